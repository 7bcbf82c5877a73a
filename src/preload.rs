/// Photo preload cache.
///
/// An explicit cache object owned by the page shell and passed to the
/// viewers, never module-level state. It remembers
/// which paths were already requested (each file is read at most once per
/// session), holds decoded image handles once their bytes arrive, and
/// keeps the tiny blur placeholders decoded from the manifest so a slide
/// is never a blank frame while its full file loads.
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use base64::Engine;
use iced::widget::image;

use crate::state::manifest::{resolve_public_src, Photo};

#[derive(Debug, Default)]
pub struct PreloadCache {
    public_root: PathBuf,
    ready: HashMap<String, image::Handle>,
    placeholders: HashMap<String, image::Handle>,
    requested: HashSet<String>,
}

impl PreloadCache {
    pub fn new(public_root: impl Into<PathBuf>) -> Self {
        PreloadCache {
            public_root: public_root.into(),
            ready: HashMap::new(),
            placeholders: HashMap::new(),
            requested: HashSet::new(),
        }
    }

    /// Decode blur placeholders for a freshly loaded manifest. Done once
    /// up front so `display_handle` stays cheap inside `view`.
    pub fn seed_placeholders(&mut self, photos: &[Photo]) {
        for photo in photos {
            let Some(data_url) = &photo.blur_data_url else {
                continue;
            };
            if self.placeholders.contains_key(&photo.src) {
                continue;
            }
            if let Some(handle) = decode_data_url(data_url) {
                self.placeholders.insert(photo.src.clone(), handle);
            }
        }
    }

    /// Mark paths wanted and return the (src, file path) pairs that still
    /// need a disk read. Already-requested paths are filtered out, so
    /// callers can over-ask freely.
    pub fn request<'a>(
        &mut self,
        srcs: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(String, PathBuf)> {
        let mut pending = Vec::new();
        for src in srcs {
            if self.requested.insert(src.to_string()) {
                pending.push((src.to_string(), resolve_public_src(&self.public_root, src)));
            }
        }
        pending
    }

    /// Store the bytes of a loaded photo.
    pub fn insert(&mut self, src: String, bytes: Vec<u8>) {
        self.ready.insert(src, image::Handle::from_bytes(bytes));
    }

    /// The handle a viewer should draw for `src`: the full image when
    /// loaded, else its blur placeholder, else nothing.
    pub fn display_handle(&self, src: &str) -> Option<image::Handle> {
        self.ready
            .get(src)
            .or_else(|| self.placeholders.get(src))
            .cloned()
    }

    pub fn is_ready(&self, src: &str) -> bool {
        self.ready.contains_key(src)
    }

    pub fn public_root(&self) -> &Path {
        &self.public_root
    }
}

/// The slide a viewer shows plus its loop neighbors: the preload set for
/// one controller position.
pub fn neighbor_srcs(photos: &[Photo], index: usize) -> Vec<&str> {
    let total = photos.len();
    if total == 0 {
        return Vec::new();
    }
    let index = index % total;
    let mut srcs = vec![photos[index].src.as_str()];
    for neighbor in [(index + 1) % total, (index + total - 1) % total] {
        let src = photos[neighbor].src.as_str();
        if !srcs.contains(&src) {
            srcs.push(src);
        }
    }
    srcs
}

/// Decode a `data:image/...;base64,` URL into an image handle.
fn decode_data_url(data_url: &str) -> Option<image::Handle> {
    let (_, payload) = data_url.split_once(";base64,")?;
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .ok()?;
    Some(image::Handle::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(src: &str) -> Photo {
        Photo {
            src: src.to_string(),
            width: 100,
            height: 100,
            blur_data_url: None,
        }
    }

    #[test]
    fn test_request_reads_each_path_once() {
        let mut cache = PreloadCache::new("assets");
        let first = cache.request(["/photos/a.jpg", "/photos/b.jpg"]);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].1, Path::new("assets/photos/a.jpg"));

        let second = cache.request(["/photos/a.jpg", "/photos/c.jpg"]);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].0, "/photos/c.jpg");
    }

    #[test]
    fn test_display_prefers_the_full_image_over_the_placeholder() {
        let mut cache = PreloadCache::new("assets");
        let mut subject = photo("/photos/a.jpg");
        subject.blur_data_url = Some("data:image/jpeg;base64,aGVsbG8=".to_string());
        cache.seed_placeholders(&[subject]);
        assert!(cache.display_handle("/photos/a.jpg").is_some());
        assert!(!cache.is_ready("/photos/a.jpg"));

        cache.insert("/photos/a.jpg".to_string(), vec![1, 2, 3]);
        assert!(cache.is_ready("/photos/a.jpg"));
        assert!(cache.display_handle("/photos/a.jpg").is_some());
    }

    #[test]
    fn test_unknown_src_has_no_handle() {
        let cache = PreloadCache::new("assets");
        assert!(cache.display_handle("/photos/missing.jpg").is_none());
    }

    #[test]
    fn test_malformed_data_urls_are_skipped() {
        assert!(decode_data_url("not a data url").is_none());
        assert!(decode_data_url("data:image/jpeg;base64,!!!").is_none());

        let mut cache = PreloadCache::new("assets");
        let mut subject = photo("/photos/a.jpg");
        subject.blur_data_url = Some("garbage".to_string());
        cache.seed_placeholders(&[subject]);
        assert!(cache.display_handle("/photos/a.jpg").is_none());
    }

    #[test]
    fn test_neighbor_srcs_wrap_and_dedup() {
        let photos: Vec<Photo> = (0..5)
            .map(|i| photo(&format!("/photos/{}.jpg", i)))
            .collect();

        assert_eq!(
            neighbor_srcs(&photos, 0),
            vec!["/photos/0.jpg", "/photos/1.jpg", "/photos/4.jpg"]
        );
        assert_eq!(
            neighbor_srcs(&photos, 4),
            vec!["/photos/4.jpg", "/photos/0.jpg", "/photos/3.jpg"]
        );

        let pair: Vec<Photo> = (0..2).map(|i| photo(&format!("/p/{}.jpg", i))).collect();
        assert_eq!(neighbor_srcs(&pair, 0).len(), 2);

        let single = vec![photo("/p/only.jpg")];
        assert_eq!(neighbor_srcs(&single, 0), vec!["/p/only.jpg"]);
        assert!(neighbor_srcs(&[], 0).is_empty());
    }
}
