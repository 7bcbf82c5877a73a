/// State management module
///
/// This module holds the data model and the glue around it:
/// - The photo manifest artifact and its normalization (manifest.rs)
/// - Grouping photos by their folder segment (groups.rs)
/// - The persisted view token restored across launches (session.rs)

pub mod groups;
pub mod manifest;
pub mod session;
