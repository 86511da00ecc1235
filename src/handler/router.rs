//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, access logging, and dispatching into the snapshot tree.

use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body as _, Bytes, Incoming};
use hyper::{Method, Request, Response, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Serving configuration handed explicitly to every request
#[derive(Debug, Clone)]
pub struct ServeContext {
    /// Root of the snapshot tree being served
    pub root: PathBuf,
    /// Emit one access log line per request
    pub access_log: bool,
    /// Access log format name or custom pattern
    pub access_log_format: String,
}

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range_header: Option<String>,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<Incoming>,
    ctx: Arc<ServeContext>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.http_version = version_label(req.version()).to_string();
    entry.referer = header_value(&req, "referer");
    entry.user_agent = header_value(&req, "user-agent");

    let response = route_request(&req, &ctx).await;

    if ctx.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = body_size(&response);
        entry.request_time_us =
            u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &ctx.access_log_format);
    }

    Ok(response)
}

/// Route request into the snapshot tree
async fn route_request(req: &Request<Incoming>, ctx: &ServeContext) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(req.method()) {
        return resp;
    }

    // 2. Extract headers for caching and range requests
    let request = RequestContext {
        path: req.uri().path(),
        is_head: *req.method() == Method::HEAD,
        if_none_match: header_value(req, "if-none-match"),
        if_modified_since: header_value(req, "if-modified-since"),
        range_header: header_value(req, "range"),
    };

    static_files::serve_snapshot(&request, &ctx.root).await
}

/// Check HTTP method and return a 405 for anything but GET/HEAD
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn header_value(req: &Request<Incoming>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Exact body size of an already-built response
fn body_size(response: &Response<Full<Bytes>>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_10 => "1.0",
        _ => "1.1",
    }
}
