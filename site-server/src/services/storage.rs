//! Image Storage
//!
//! Validates, re-encodes, and stores uploaded images under
//! `work_dir/images/`. Files are named by the SHA-256 of their encoded
//! bytes, so uploading the same picture twice stores it once.

use crate::utils::AppError;
use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Maximum upload size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Accepted upload extensions
pub const SUPPORTED_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];

/// JPEG quality for stored images
const JPEG_QUALITY: u8 = 85;

/// Result of storing an upload
#[derive(Debug, Clone)]
pub struct StoredImage {
    /// Filename on disk ("{hash}.jpg")
    pub filename: String,
    /// Public URL path ("/images/{hash}.jpg")
    pub url: String,
    pub size: usize,
    /// Whether an identical image already existed
    pub deduplicated: bool,
}

#[derive(Debug, Clone)]
pub struct ImageStorage {
    images_dir: PathBuf,
}

impl ImageStorage {
    pub fn new(work_dir: &Path) -> Self {
        Self {
            images_dir: work_dir.join("images"),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn url_for(filename: &str) -> String {
        format!("/images/{filename}")
    }

    /// Validate, re-encode as JPEG, and write the image to disk
    pub fn save(&self, data: &[u8], ext: &str) -> Result<StoredImage, AppError> {
        validate_image(data, ext)?;

        let encoded = encode_jpeg(data)?;
        let hash = content_hash(&encoded);
        let filename = format!("{hash}.jpg");
        let path = self.images_dir.join(&filename);

        if path.exists() {
            tracing::info!(filename = %filename, "Duplicate image, reusing stored file");
            return Ok(StoredImage {
                url: ImageStorage::url_for(&filename),
                filename,
                size: encoded.len(),
                deduplicated: true,
            });
        }

        std::fs::create_dir_all(&self.images_dir)
            .map_err(|e| AppError::internal(format!("Failed to create images directory: {e}")))?;
        std::fs::write(&path, &encoded)
            .map_err(|e| AppError::internal(format!("Failed to save file: {e}")))?;

        tracing::info!(filename = %filename, size = encoded.len(), "Image stored");

        Ok(StoredImage {
            url: ImageStorage::url_for(&filename),
            filename,
            size: encoded.len(),
            deduplicated: false,
        })
    }

    /// Remove a stored file. Missing files are not an error: the row it
    /// belonged to is already gone and that is what matters.
    pub fn delete(&self, filename: &str) -> Result<(), AppError> {
        // Reject anything that could escape the images directory
        if filename.contains(['/', '\\']) || filename.contains("..") {
            return Err(AppError::validation(format!("Invalid filename: {filename}")));
        }

        let path = self.images_dir.join(filename);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(filename = %filename, "Stored file already missing");
                Ok(())
            }
            Err(e) => Err(AppError::internal(format!("Failed to delete file: {e}"))),
        }
    }

    /// Extract the on-disk filename from a URL produced by [`url_for`].
    /// Returns None for external URLs, which are left alone on delete.
    pub fn filename_from_url(url: &str) -> Option<&str> {
        url.strip_prefix("/images/")
            .filter(|rest| !rest.is_empty() && !rest.contains('/'))
    }
}

fn content_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

fn encode_jpeg(data: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {e}")))?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {e}")))?;
    }

    Ok(buffer)
}

fn validate_image(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided".to_string()));
    }

    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        )));
    }

    if let Err(e) = image::load_from_memory(data) {
        return Err(AppError::validation(format!(
            "Invalid image file ({ext_lower}): {e}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Rgb};

    fn sample_png() -> Vec<u8> {
        let img = ImageBuffer::from_pixel(4, 4, Rgb::<u8>([200, 40, 40]));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn save_and_deduplicate() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path());

        let first = storage.save(&sample_png(), "png").unwrap();
        assert!(!first.deduplicated);
        assert!(first.filename.ends_with(".jpg"));
        assert!(dir.path().join("images").join(&first.filename).exists());

        let second = storage.save(&sample_png(), "png").unwrap();
        assert!(second.deduplicated);
        assert_eq!(second.filename, first.filename);
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path());

        let stored = storage.save(&sample_png(), "png").unwrap();
        storage.delete(&stored.filename).unwrap();
        assert!(!dir.path().join("images").join(&stored.filename).exists());
        storage.delete(&stored.filename).unwrap();
    }

    #[test]
    fn rejects_bad_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path());

        assert!(storage.save(&[], "png").is_err());
        assert!(storage.save(b"not an image", "png").is_err());
        assert!(storage.save(&sample_png(), "gif").is_err());
    }

    #[test]
    fn delete_rejects_path_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path());
        assert!(storage.delete("../secrets.txt").is_err());
    }

    #[test]
    fn url_roundtrip() {
        assert_eq!(ImageStorage::filename_from_url("/images/abc.jpg"), Some("abc.jpg"));
        assert_eq!(ImageStorage::filename_from_url("https://cdn.example/x.jpg"), None);
        assert_eq!(ImageStorage::filename_from_url("/images/"), None);
    }
}
