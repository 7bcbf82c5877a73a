/// Photo manifest: the static artifact the gallery is built from.
///
/// A separate offline tool (`gen-manifest`) scans the public photos
/// directory and writes a JSON list of photo descriptors; this module is
/// the consuming side of that contract. Historical manifests come in
/// three shapes (a bare list, `{"photos": [...]}`, `{"default": [...]}`),
/// all normalized to a bare list at load time. Anything else degrades to
/// an empty gallery rather than an error screen.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Directory served as the site root (images live under it).
pub const PUBLIC_DIR: &str = "assets";

/// Folder under `PUBLIC_DIR` that holds the photo tree.
pub const BASE_DIR: &str = "photos";

/// File name of the manifest artifact, written next to the photo tree.
pub const MANIFEST_FILE: &str = "photos.manifest.json";

/// Where the app reads the manifest (the generator's default output).
pub const MANIFEST_PATH: &str = "assets/photos.manifest.json";

/// One photo as described by the manifest. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Normalized absolute public path, e.g. `/photos/atrium/01.jpg`
    pub src: String,
    /// Pixel dimensions, read from the file by the generator
    pub width: u32,
    pub height: u32,
    /// Tiny blurred stand-in encoded as a base64 data URL
    #[serde(rename = "blurDataURL", default, skip_serializing_if = "Option::is_none")]
    pub blur_data_url: Option<String>,
}

/// The manifest shapes accepted on disk.
#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestShape {
    Bare(Vec<Photo>),
    Photos { photos: Vec<Photo> },
    Default { default: Vec<Photo> },
}

/// Parse manifest text into the normalized bare list.
pub fn parse_manifest(raw: &str) -> Result<Vec<Photo>, Error> {
    let shape: ManifestShape = serde_json::from_str(raw)?;
    Ok(match shape {
        ManifestShape::Bare(photos) => photos,
        ManifestShape::Photos { photos } => photos,
        ManifestShape::Default { default } => default,
    })
}

/// Load the manifest from disk. Missing or malformed input is not fatal:
/// the gallery renders its empty state instead.
pub async fn load_manifest(path: PathBuf) -> Vec<Photo> {
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(error) => {
            eprintln!("⚠️  No photo manifest at {}: {}", path.display(), error);
            return Vec::new();
        }
    };

    match parse_manifest(&raw) {
        Ok(photos) => {
            println!("📷 Loaded manifest: {} photos", photos.len());
            photos
        }
        Err(error) => {
            eprintln!("⚠️  {}", error);
            Vec::new()
        }
    }
}

/// Turn an absolute file path into the public `src` form used in the
/// manifest: relative to the public root, forward slashes, leading `/`.
/// Returns `None` for files outside the public root.
pub fn to_public_src(abs: &Path, public_root: &Path) -> Option<String> {
    let rel = abs.strip_prefix(public_root).ok()?;
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Some(format!("/{}", joined))
}

/// Resolve a manifest `src` back to the on-disk file under the public root.
pub fn resolve_public_src(public_root: &Path, src: &str) -> PathBuf {
    public_root.join(src.trim_start_matches('/'))
}
