/// Offline photo-manifest generator.
///
/// Scans the public photos directory recursively, reads each image's
/// pixel dimensions (skipping unreadable files with a warning),
/// optionally embeds a tiny blurred placeholder as a base64 data URL,
/// sorts entries by public path, and writes the JSON list the gallery
/// loads at startup.
///
/// Usage: gen-manifest [public-dir] [--blur]
use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::Engine;
use image::ImageFormat;
use walkdir::WalkDir;

use borderless::error::Error;
use borderless::state::manifest::{to_public_src, Photo, BASE_DIR, MANIFEST_FILE, PUBLIC_DIR};

/// Supported photo extensions (lowercase)
const PHOTO_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff", "tif", "avif",
];

/// Edge length of the embedded blur placeholder
const BLUR_SIZE: u32 = 16;

fn main() {
    let mut public_dir = PathBuf::from(PUBLIC_DIR);
    let mut with_blur = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--blur" => with_blur = true,
            other => public_dir = PathBuf::from(other),
        }
    }

    if let Err(error) = run(&public_dir, with_blur) {
        eprintln!("❌ {}", error);
        std::process::exit(1);
    }
}

fn run(public_dir: &Path, with_blur: bool) -> Result<(), Error> {
    let photos_dir = public_dir.join(BASE_DIR);
    println!("🔍 Scanning {}", photos_dir.display());

    let mut items = Vec::new();
    for entry in WalkDir::new(&photos_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() || !is_photo(path) {
            continue;
        }

        let Some(src) = to_public_src(path, public_dir) else {
            continue;
        };

        let (width, height) = match image::image_dimensions(path) {
            Ok(dimensions) => dimensions,
            Err(error) => {
                eprintln!("⚠️  Skip: {} - {}", file_name(path), error);
                continue;
            }
        };

        let blur_data_url = if with_blur {
            match blur_placeholder(path) {
                Ok(data_url) => Some(data_url),
                Err(error) => {
                    eprintln!("⚠️  No placeholder for {} - {}", file_name(path), error);
                    None
                }
            }
        } else {
            None
        };

        items.push(Photo {
            src,
            width,
            height,
            blur_data_url,
        });
    }

    items.sort_by(|a, b| a.src.cmp(&b.src));

    let out_path = public_dir.join(MANIFEST_FILE);
    let json = serde_json::to_string_pretty(&items)?;
    std::fs::write(&out_path, json).map_err(|source| Error::Write {
        path: out_path.clone(),
        source,
    })?;

    println!("✅ Wrote {} items → {}", items.len(), out_path.display());
    Ok(())
}

fn is_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_lowercase)
        .is_some_and(|extension| PHOTO_EXTENSIONS.contains(&extension.as_str()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

/// Downscale to a tiny JPEG and wrap it in a base64 data URL.
fn blur_placeholder(path: &Path) -> Result<String, image::ImageError> {
    let tiny = image::open(path)?.thumbnail(BLUR_SIZE, BLUR_SIZE).to_rgb8();
    let mut bytes = Vec::new();
    tiny.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)?;
    Ok(format!(
        "data:image/jpeg;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use borderless::state::manifest::parse_manifest;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn write_test_image(path: &Path, width: u32, height: u32) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create photo dir");
        }
        RgbImage::from_pixel(width, height, Rgb([180, 120, 60]))
            .save(path)
            .expect("failed to write test image");
    }

    #[test]
    fn test_extension_filter_is_case_insensitive() {
        assert!(is_photo(Path::new("a.jpg")));
        assert!(is_photo(Path::new("b.PNG")));
        assert!(is_photo(Path::new("c.WebP")));
        assert!(!is_photo(Path::new("d.txt")));
        assert!(!is_photo(Path::new("no_extension")));
    }

    #[test]
    fn test_blur_placeholder_is_a_jpeg_data_url() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("photo.png");
        write_test_image(&path, 64, 40);

        let data_url = blur_placeholder(&path).expect("placeholder should encode");
        assert!(data_url.starts_with("data:image/jpeg;base64,"));
        assert!(data_url.len() > "data:image/jpeg;base64,".len());
    }

    #[test]
    fn test_run_writes_a_sorted_manifest() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let public_dir = temp_dir.path();
        write_test_image(&public_dir.join("photos/room/b.png"), 32, 20);
        write_test_image(&public_dir.join("photos/atrium/a.png"), 48, 30);

        run(public_dir, false).expect("run should succeed");

        let raw = std::fs::read_to_string(public_dir.join(MANIFEST_FILE))
            .expect("manifest should exist");
        let photos = parse_manifest(&raw).expect("manifest should parse");

        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].src, "/photos/atrium/a.png");
        assert_eq!((photos[0].width, photos[0].height), (48, 30));
        assert_eq!(photos[1].src, "/photos/room/b.png");
    }

    #[test]
    fn test_unreadable_files_are_skipped_with_the_rest_kept() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let public_dir = temp_dir.path();
        write_test_image(&public_dir.join("photos/a.png"), 16, 16);
        std::fs::create_dir_all(public_dir.join("photos")).expect("dir");
        std::fs::write(public_dir.join("photos/broken.jpg"), b"not an image")
            .expect("failed to write broken file");

        run(public_dir, false).expect("run should succeed");

        let raw = std::fs::read_to_string(public_dir.join(MANIFEST_FILE))
            .expect("manifest should exist");
        let photos = parse_manifest(&raw).expect("manifest should parse");
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].src, "/photos/a.png");
    }

    #[test]
    fn test_blur_flag_embeds_placeholders() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let public_dir = temp_dir.path();
        write_test_image(&public_dir.join("photos/a.png"), 32, 32);

        run(public_dir, true).expect("run should succeed");

        let raw = std::fs::read_to_string(public_dir.join(MANIFEST_FILE))
            .expect("manifest should exist");
        let photos = parse_manifest(&raw).expect("manifest should parse");
        let data_url = photos[0]
            .blur_data_url
            .as_deref()
            .expect("placeholder should be embedded");
        assert!(data_url.starts_with("data:image/jpeg;base64,"));
    }
}
