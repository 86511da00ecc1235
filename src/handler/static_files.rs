//! Static file serving module
//!
//! Maps request paths into the snapshot tree, rewrites directory hits to
//! their self-file, and handles MIME type detection, conditional requests,
//! and Range requests.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, range::RangeOutcome};
use crate::layout;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use std::time::SystemTime;
use tokio::fs;

/// File content plus everything the response headers need
struct LoadedFile {
    content: Vec<u8>,
    content_type: &'static str,
    modified: SystemTime,
}

/// Serve a request path from the snapshot tree
///
/// A path that names a directory is served from the self-file inside it, so
/// `/shows/42` and `/shows/42/self` are the same resource.
pub async fn serve_snapshot(ctx: &RequestContext<'_>, root: &Path) -> Response<Full<Bytes>> {
    match load_snapshot_file(root, ctx.path).await {
        Some(file) => build_static_file_response(file, ctx),
        None => http::build_404_response(),
    }
}

/// Resolve a request path against the snapshot root and read the file
async fn load_snapshot_file(root: &Path, request_path: &str) -> Option<LoadedFile> {
    // Security: resolve the root once so escaping paths can be rejected
    let root_canonical = match root.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Snapshot root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    let candidate = layout::snapshot_path(root, request_path);
    let is_directory = candidate.is_dir();
    let effective = layout::resolve_effective_path(request_path, is_directory);
    let file_path = layout::snapshot_path(root, &effective);

    logger::log_path_resolved(request_path, &file_path, is_directory);

    // File not found is common (404), no need to log at warning level
    let Ok(file_path_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_path_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {request_path} -> {}",
            file_path_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return None;
        }
    };

    let modified = fs::metadata(&file_path)
        .await
        .and_then(|m| m.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH);

    // Self-files carry no extension and fall through to octet-stream
    let content_type = mime::content_type_for(&file_path);

    Some(LoadedFile {
        content,
        content_type,
        modified,
    })
}

/// Build the response with cache validators and Range support
fn build_static_file_response(
    file: LoadedFile,
    ctx: &RequestContext<'_>,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(&file.content);
    let last_modified = cache::format_http_date(file.modified);
    let total_size = file.content.len();

    // Either validator answers the conditional request
    if cache::check_etag_match(ctx.if_none_match.as_deref(), &etag)
        || cache::check_modified_since(ctx.if_modified_since.as_deref(), file.modified)
    {
        return http::build_304_response(&etag, &last_modified);
    }

    match http::resolve_range(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Satisfiable(range) => http::response::build_partial_response(
            Bytes::from(file.content[range.start..=range.end].to_vec()),
            file.content_type,
            &etag,
            &last_modified,
            range.start,
            range.end,
            total_size,
            ctx.is_head,
        ),
        RangeOutcome::Unsatisfiable => http::build_416_response(total_size),
        RangeOutcome::Ignored => http::response::build_file_response(
            Bytes::from(file.content),
            file.content_type,
            &etag,
            &last_modified,
            ctx.is_head,
        ),
    }
}
