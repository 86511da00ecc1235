//! Content-Type detection module
//!
//! The served tree mixes bundled client assets, which carry ordinary web
//! extensions, with extension-less self-files holding raw response bodies.
//! Detection goes by extension alone, so self-files always come out as
//! `application/octet-stream`.

use std::path::Path;

/// Content-Type for a file in the snapshot tree
///
/// # Examples
/// ```
/// use std::path::Path;
/// use snapserve::http::mime::content_type_for;
/// assert_eq!(content_type_for(Path::new("index.html")), "text/html; charset=utf-8");
/// assert_eq!(content_type_for(Path::new("shows/42/self")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Text
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("txt" | "md") => "text/plain; charset=utf-8",
        Some("xml") => "application/xml",

        // JavaScript
        Some("js" | "mjs") => "application/javascript",
        Some("json") => "application/json",

        // Images
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Everything else, self-files included
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_asset_extensions() {
        assert_eq!(
            content_type_for(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(content_type_for(Path::new("styles.css")), "text/css");
        assert_eq!(
            content_type_for(Path::new("app.js")),
            "application/javascript"
        );
        assert_eq!(content_type_for(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(content_type_for(Path::new("poster.png")), "image/png");
    }

    #[test]
    fn test_self_files_fall_back_to_octet_stream() {
        assert_eq!(
            content_type_for(Path::new("shows/42/self")),
            "application/octet-stream"
        );
        assert_eq!(
            content_type_for(Path::new("data.xyz")),
            "application/octet-stream"
        );
    }
}
