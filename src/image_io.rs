use std::path::{Path, PathBuf};
use image::RgbImage;

use crate::errors::{RootLengthError, Result};

/// Represents an input image with its metadata
pub struct InputImage {
    pub image: RgbImage,
    pub path: PathBuf,
    pub filename: String,
}

/// Load a scan as a 3-channel color image.
///
/// Decoding failures (missing file, unknown format, corrupt data) are
/// reported as [`RootLengthError::ImageLoad`] so nothing downstream ever
/// sees a half-initialized buffer.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<InputImage> {
    let path = path.as_ref();

    let filename = path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image")
        .to_string();

    let img = image::open(path).map_err(|e| RootLengthError::ImageLoad {
        source: e,
        path: path.to_path_buf(),
    })?;

    Ok(InputImage {
        image: img.to_rgb8(),
        path: path.to_path_buf(),
        filename,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::fs;

    #[test]
    fn missing_file_fails_fast() {
        let err = load_image("/definitely/not/here/scan.png").err().unwrap();
        match err {
            RootLengthError::ImageLoad { path, .. } => {
                assert_eq!(path, PathBuf::from("/definitely/not/here/scan.png"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn corrupt_file_fails_fast() {
        let path = std::env::temp_dir().join(format!("root_length_corrupt_{}.png", std::process::id()));
        fs::write(&path, b"not a png at all").unwrap();

        let result = load_image(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(RootLengthError::ImageLoad { .. })));
    }

    #[test]
    fn png_loads_as_rgb() {
        let path = std::env::temp_dir().join(format!("root_length_scan_{}.png", std::process::id()));
        let mut img = RgbImage::new(4, 3);
        img.put_pixel(1, 2, Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.image.dimensions(), (4, 3));
        assert_eq!(*loaded.image.get_pixel(1, 2), Rgb([10, 20, 30]));
        assert!(loaded.filename.starts_with("root_length_scan_"));
    }
}
