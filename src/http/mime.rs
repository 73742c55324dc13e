//! MIME type detection module
//!
//! Returns the Content-Type for the fixed set of extensions the dashboard
//! asset pipeline serves. Matching is case-insensitive; anything outside
//! the table falls back to `application/octet-stream`.

/// Content-Type used for extensions outside the recognized table.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Get MIME Content-Type based on file extension
pub fn get_content_type(extension: Option<&str>) -> &'static str {
    let Some(ext) = extension else {
        return FALLBACK_CONTENT_TYPE;
    };

    match ext.to_ascii_lowercase().as_str() {
        // Images
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",

        // Text
        "css" => "text/css",
        "yml" | "yaml" => "text/yaml",
        "json" => "application/json",

        // Default
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// Whether files with this extension are read and served as decoded text
/// rather than raw bytes
pub fn is_text_extension(extension: Option<&str>) -> bool {
    extension.is_some_and(|ext| {
        matches!(
            ext.to_ascii_lowercase().as_str(),
            "yml" | "yaml" | "css" | "json"
        )
    })
}
