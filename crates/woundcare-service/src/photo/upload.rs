//! Object naming and content types for uploaded photos.

use uuid::Uuid;

use woundcare_core::error::AppError;
use woundcare_core::result::AppResult;

/// The extension after the last `.` of a file name.
pub fn extension_of(file_name: &str) -> AppResult<&str> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    match base.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Ok(ext),
        _ => Err(AppError::validation(format!(
            "File name '{file_name}' has no extension"
        ))),
    }
}

/// A fresh, collision-resistant object path under `prefix` keeping `ext`.
pub fn object_path(prefix: &str, ext: &str) -> String {
    format!(
        "{}/{}.{ext}",
        prefix.trim_end_matches('/'),
        Uuid::new_v4().simple()
    )
}

/// MIME type for an image extension.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
