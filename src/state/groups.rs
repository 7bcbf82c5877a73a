/// Photo groups: a pure partition of the manifest by folder segment.
///
/// The folder name directly under the photo base directory is the group
/// key (`/photos/atrium/01.jpg` → `atrium`); photos sitting directly in
/// the base fall into a fallback group. Every photo lands in exactly one
/// group and keeps its manifest order within it.
use std::collections::HashMap;

use super::manifest::Photo;

/// Key for photos whose path has no folder under the base directory.
pub const FALLBACK_GROUP: &str = "etc";

/// Caller-curated group presentation: the order of these entries is the
/// display priority; keys not listed here sort alphabetically after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupMeta {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// One derived group. `title`/`description` are present only when the
/// caller supplied metadata for the key.
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoGroup {
    pub key: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub photos: Vec<Photo>,
}

impl PhotoGroup {
    /// Human-facing name: the curated title, or the raw key.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.key)
    }
}

/// Group key for a single manifest `src`, given the base directory name.
pub fn group_key(src: &str, base: &str) -> String {
    let segments: Vec<&str> = src.split('/').filter(|s| !s.is_empty()).collect();
    match segments.iter().position(|s| *s == base) {
        // A folder must sit between the base and the file name
        Some(i) if segments.len() > i + 2 => segments[i + 1].to_string(),
        _ => FALLBACK_GROUP.to_string(),
    }
}

/// Partition the photo sequence into ordered groups.
///
/// Ordering: metas first (in their given order, only keys that actually
/// occur), then any remaining keys alphabetically. Membership is stable
/// for a given photo list.
pub fn derive_groups(photos: &[Photo], base: &str, metas: &[GroupMeta]) -> Vec<PhotoGroup> {
    let mut seen: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<Photo>> = HashMap::new();

    for photo in photos {
        let key = group_key(&photo.src, base);
        if !buckets.contains_key(&key) {
            seen.push(key.clone());
        }
        buckets.entry(key).or_default().push(photo.clone());
    }

    let mut ordered: Vec<String> = metas
        .iter()
        .filter(|meta| buckets.contains_key(meta.key))
        .map(|meta| meta.key.to_string())
        .collect();
    let mut rest: Vec<String> = seen
        .into_iter()
        .filter(|key| !ordered.contains(key))
        .collect();
    rest.sort();
    ordered.extend(rest);

    ordered
        .into_iter()
        .map(|key| {
            let meta = metas.iter().find(|meta| meta.key == key.as_str());
            PhotoGroup {
                title: meta.map(|meta| meta.title.to_string()),
                description: meta.map(|meta| meta.description.to_string()),
                photos: buckets.remove(&key).unwrap_or_default(),
                key,
            }
        })
        .collect()
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
    fn test_group_key_takes_the_folder_after_the_base() {
        assert_eq!(group_key("/photos/atrium/a.jpg", "photos"), "atrium");
        assert_eq!(group_key("/photos/room/deep/b.jpg", "photos"), "room");
    }

    #[test]
    fn test_group_key_falls_back_without_a_folder() {
        assert_eq!(group_key("/photos/a.jpg", "photos"), FALLBACK_GROUP);
        assert_eq!(group_key("/elsewhere/a.jpg", "photos"), FALLBACK_GROUP);
    }

    #[test]
    fn test_derivation_partitions_and_preserves_order() {
        let photos = vec![
            photo("/photos/atrium/a.jpg"),
            photo("/photos/room/b.jpg"),
            photo("/photos/atrium/c.jpg"),
        ];

        let groups = derive_groups(&photos, "photos", &[]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "atrium");
        assert_eq!(
            groups[0]
                .photos
                .iter()
                .map(|p| p.src.as_str())
                .collect::<Vec<_>>(),
            vec!["/photos/atrium/a.jpg", "/photos/atrium/c.jpg"]
        );
        assert_eq!(groups[1].key, "room");
        assert_eq!(groups[1].photos.len(), 1);
    }

    #[test]
    fn test_every_photo_lands_in_exactly_one_group() {
        let photos = vec![
            photo("/photos/atrium/a.jpg"),
            photo("/photos/room/b.jpg"),
            photo("/photos/c.jpg"),
            photo("/photos/terrace/d.jpg"),
        ];

        let groups = derive_groups(&photos, "photos", &[]);
        let total: usize = groups.iter().map(|g| g.photos.len()).sum();
        assert_eq!(total, photos.len());
    }

    #[test]
    fn test_meta_priority_then_alphabetical() {
        let photos = vec![
            photo("/photos/room/a.jpg"),
            photo("/photos/atrium/b.jpg"),
            photo("/photos/terrace/c.jpg"),
        ];
        let metas = [GroupMeta {
            key: "terrace",
            title: "The Terrace",
            description: "Open sky",
        }];

        let groups = derive_groups(&photos, "photos", &metas);

        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["terrace", "atrium", "room"]);
        assert_eq!(groups[0].label(), "The Terrace");
        assert_eq!(groups[1].label(), "atrium");
        assert_eq!(groups[1].title, None);
    }

    #[test]
    fn test_metas_for_absent_keys_are_ignored() {
        let photos = vec![photo("/photos/room/a.jpg")];
        let metas = [GroupMeta {
            key: "pool",
            title: "The Pool",
            description: "",
        }];

        let groups = derive_groups(&photos, "photos", &metas);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key, "room");
    }

    #[test]
    fn test_empty_sequence_yields_no_groups() {
        assert!(derive_groups(&[], "photos", &[]).is_empty());
    }
}
