//! On-disk snapshot layout
//!
//! The crawler and the snapshot server share exactly one convention: a
//! crawled URL path `/p` is stored as the file `<root>/p/self`, so the path
//! itself becomes a directory and the response body lives in its self-file.
//! Everything in this module is pure path mapping, independent of the HTTP
//! stack on either side.

use std::path::{Path, PathBuf};

/// File name holding a resource's response body inside its directory.
pub const SELF_FILE: &str = "self";

/// Map a URL path to its location under the snapshot root.
///
/// Strips the leading `/` and any `..` sequences before joining, so a
/// request path can never climb out of the root.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use snapserve::layout::snapshot_path;
/// let p = snapshot_path(Path::new("/snap"), "/shows/42");
/// assert_eq!(p, Path::new("/snap/shows/42"));
/// ```
pub fn snapshot_path(root: &Path, url_path: &str) -> PathBuf {
    // Removing ".." can expose new leading slashes ("/../x" -> "/x"), which
    // would make join() discard the root, so trim again after the replace.
    let clean = url_path.trim_start_matches('/').replace("..", "");
    root.join(clean.trim_start_matches('/'))
}

/// Location of the self-file for a crawled URL path.
pub fn self_file_path(root: &Path, url_path: &str) -> PathBuf {
    snapshot_path(root, url_path).join(SELF_FILE)
}

/// Rewrite a request path that resolved to a directory into a request for
/// the directory's self-file. Paths that resolved to plain files (or to
/// nothing) pass through unchanged.
pub fn resolve_effective_path(request_path: &str, is_directory: bool) -> String {
    if !is_directory {
        return request_path.to_string();
    }
    if request_path.ends_with('/') {
        format!("{request_path}{SELF_FILE}")
    } else {
        format!("{request_path}/{SELF_FILE}")
    }
}
