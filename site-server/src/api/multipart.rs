//! Shared multipart helpers for the upload routes

use axum::extract::Multipart;

use crate::services::storage::MAX_FILE_SIZE;
use crate::utils::AppError;

/// Request-body cap for the upload routes: the largest accepted file plus
/// room for the multipart framing. Without this, axum's default body limit
/// (2 MB) would reject large uploads before the file-size check runs.
pub const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE + 64 * 1024;

/// Pull the bytes and filename out of the multipart "file" field
pub async fn read_file_field(multipart: &mut Multipart) -> Result<(Vec<u8>, String), AppError> {
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(f) = multipart.next_field().await? {
        let name = f.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            original_filename = f.file_name().map(|s| s.to_string());
            field_data = Some(f.bytes().await?.to_vec());
            break;
        }
    }

    let data = field_data.ok_or_else(|| {
        AppError::validation("No 'file' field found. Field name must be 'file'".to_string())
    })?;
    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in file field".to_string()))?;

    Ok((data, filename))
}

pub fn extension_of(filename: &str) -> Result<String, AppError> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str().map(|s| s.to_string()))
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {}", filename)))
}
