use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the manifest pipeline (loading in the app,
/// writing in the generator). The UI never propagates these (a broken
/// manifest degrades to an empty gallery), but the generator reports
/// them to the operator.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed photo manifest: {0}")]
    ManifestShape(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
