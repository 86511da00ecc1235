//! End-to-end serving tests against a prepared snapshot tree.

use http_body_util::{BodyExt, Empty};
use hyper::body::Bytes;
use hyper::client::conn::http1;
use hyper::header::{HeaderMap, HOST};
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use snapserve::handler::ServeContext;
use snapserve::server;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tokio::net::TcpStream;

/// Spawn the snapshot server over `root` and return its address
async fn start_server(root: &Path) -> SocketAddr {
    let listener = server::create_reusable_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let ctx = ServeContext {
        root: root.to_path_buf(),
        access_log: false,
        access_log_format: "combined".to_string(),
    };
    tokio::spawn(server::run(listener, ctx));
    addr
}

/// One request over a fresh connection
async fn send(
    addr: SocketAddr,
    method: Method,
    path: &str,
    headers: &[(&str, &str)],
) -> (StatusCode, HeaderMap, Bytes) {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = http1::handshake::<_, Empty<Bytes>>(TokioIo::new(stream))
        .await
        .unwrap();
    tokio::spawn(conn);

    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(HOST, "localhost");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let req = builder.body(Empty::new()).unwrap();

    let response = sender.send_request(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}

async fn get(addr: SocketAddr, path: &str) -> (StatusCode, HeaderMap, Bytes) {
    send(addr, Method::GET, path, &[]).await
}

/// Minimal crawled tree: one show resource plus one client asset
fn make_snapshot(scratch: &Path) -> PathBuf {
    let root = scratch.join("snapshot");
    fs::create_dir_all(root.join("shows/1")).unwrap();
    fs::write(root.join("shows/1/self"), "hello").unwrap();
    fs::write(root.join("app.js"), "let x;").unwrap();
    root
}

#[tokio::test(flavor = "multi_thread")]
async fn test_directory_path_serves_self_file() {
    let scratch = tempfile::tempdir().unwrap();
    let addr = start_server(&make_snapshot(scratch.path())).await;

    let (status, headers, body) = get(addr, "/shows/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"hello");
    assert_eq!(headers["content-type"], "application/octet-stream");

    // The explicit self path and a trailing slash name the same resource
    let (status, _, body) = get(addr, "/shows/1/self").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"hello");

    let (status, _, body) = get(addr, "/shows/1/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"hello");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_resource_is_404() {
    let scratch = tempfile::tempdir().unwrap();
    let addr = start_server(&make_snapshot(scratch.path())).await;

    let (status, _, _) = get(addr, "/shows/2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The root is a directory without a self-file, so it is not a resource
    let (status, _, _) = get(addr, "/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_asset_gets_mime_type() {
    let scratch = tempfile::tempdir().unwrap();
    let addr = start_server(&make_snapshot(scratch.path())).await;

    let (status, headers, body) = get(addr, "/app.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "application/javascript");
    assert_eq!(&body[..], b"let x;");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_head_has_headers_but_no_body() {
    let scratch = tempfile::tempdir().unwrap();
    let addr = start_server(&make_snapshot(scratch.path())).await;

    let (status, headers, body) = send(addr, Method::HEAD, "/shows/1", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(headers["content-length"], "5");
    assert!(headers.contains_key("etag"));
    assert!(headers.contains_key("last-modified"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_range_requests() {
    let scratch = tempfile::tempdir().unwrap();
    let addr = start_server(&make_snapshot(scratch.path())).await;

    let (status, headers, body) = send(addr, Method::GET, "/shows/1", &[("range", "bytes=0-1")]).await;
    assert_eq!(status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(&body[..], b"he");
    assert_eq!(headers["content-range"], "bytes 0-1/5");

    let (status, headers, body) = send(addr, Method::GET, "/shows/1", &[("range", "bytes=-2")]).await;
    assert_eq!(status, StatusCode::PARTIAL_CONTENT);
    assert_eq!(&body[..], b"lo");
    assert_eq!(headers["content-range"], "bytes 3-4/5");

    let (status, headers, _) = send(addr, Method::GET, "/shows/1", &[("range", "bytes=99-")]).await;
    assert_eq!(status, StatusCode::RANGE_NOT_SATISFIABLE);
    assert_eq!(headers["content-range"], "bytes */5");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_conditional_requests_get_304() {
    let scratch = tempfile::tempdir().unwrap();
    let addr = start_server(&make_snapshot(scratch.path())).await;

    let (_, headers, _) = get(addr, "/shows/1").await;
    let etag = headers["etag"].to_str().unwrap().to_string();
    let last_modified = headers["last-modified"].to_str().unwrap().to_string();

    let (status, _, body) =
        send(addr, Method::GET, "/shows/1", &[("if-none-match", &etag)]).await;
    assert_eq!(status, StatusCode::NOT_MODIFIED);
    assert!(body.is_empty());

    let (status, _, _) = send(
        addr,
        Method::GET,
        "/shows/1",
        &[("if-modified-since", &last_modified)],
    )
    .await;
    assert_eq!(status, StatusCode::NOT_MODIFIED);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_method_not_allowed() {
    let scratch = tempfile::tempdir().unwrap();
    let addr = start_server(&make_snapshot(scratch.path())).await;

    let (status, headers, _) = send(addr, Method::POST, "/shows/1", &[]).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(headers["allow"], "GET, HEAD");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_traversal_attempt_is_404() {
    let scratch = tempfile::tempdir().unwrap();
    let root = make_snapshot(scratch.path());
    fs::write(scratch.path().join("secret.txt"), "keep out").unwrap();
    let addr = start_server(&root).await;

    let (status, _, _) = get(addr, "/../secret.txt").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
