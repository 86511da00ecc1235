//! HTTP response building module
//!
//! Builders for every status the snapshot server emits. A builder failure
//! never takes down the request task; it degrades to an empty response plus
//! an error log line.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::http::response::Builder;
use hyper::Response;

/// Validator headers shared by every response describing a concrete file
fn with_validators(builder: Builder, etag: &str, last_modified: &str) -> Builder {
    builder
        .header("ETag", etag)
        .header("Last-Modified", last_modified)
        .header("Cache-Control", "public, max-age=3600")
}

/// Finish a builder, falling back to an empty response on failure
fn finish(builder: Builder, label: &str, body: Bytes) -> Response<Full<Bytes>> {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        crate::logger::log_error(&format!("Failed to build {label} response: {e}"));
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build 304 Not Modified response, validators only
pub fn build_304_response(etag: &str, last_modified: &str) -> Response<Full<Bytes>> {
    let builder = with_validators(Response::builder().status(304), etag, last_modified);
    finish(builder, "304", Bytes::new())
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(404)
        .header("Content-Type", "text/plain");
    finish(builder, "404", Bytes::from("404 Not Found"))
}

/// Build 405 Method Not Allowed response advertising the supported methods
pub fn build_405_response() -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", "GET, HEAD");
    finish(builder, "405", Bytes::from("405 Method Not Allowed"))
}

/// Build 416 Range Not Satisfiable response carrying the total size
pub fn build_416_response(file_size: usize) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"));
    finish(builder, "416", Bytes::from("Range Not Satisfiable"))
}

/// Build 200 response with the whole file.
///
/// HEAD keeps every header, including the real Content-Length, but sends no
/// body.
pub fn build_file_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    last_modified: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", data.len())
        .header("Accept-Ranges", "bytes");
    let builder = with_validators(builder, etag, last_modified);
    finish(builder, "200", if is_head { Bytes::new() } else { data })
}

/// Build 206 Partial Content response for one byte range, bounds inclusive
#[allow(clippy::too_many_arguments)]
pub fn build_partial_response(
    data: Bytes,
    content_type: &str,
    etag: &str,
    last_modified: &str,
    start: usize,
    end: usize,
    total_size: usize,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let builder = Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", end - start + 1)
        .header("Content-Range", format!("bytes {start}-{end}/{total_size}"))
        .header("Accept-Ranges", "bytes");
    let builder = with_validators(builder, etag, last_modified);
    finish(builder, "206", if is_head { Bytes::new() } else { data })
}
