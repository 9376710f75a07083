/// MIME types accepted for upload.
pub const ALLOWED_MEDIA_TYPES: [&str; 10] = [
    "image/jpeg",
    "image/bmp",
    "image/gif",
    "image/png",
    "video/mpeg",
    "video/x-msvideo",
    "video/x-ms-wmv",
    "video/3gpp",
    "video/x-matroska",
    "video/quicktime",
];

/// Compares the essence of `content_type` (parameters stripped) case-insensitively.
pub fn is_allowed(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    ALLOWED_MEDIA_TYPES.iter().any(|m| m.eq_ignore_ascii_case(essence))
}
