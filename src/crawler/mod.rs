//! Crawler module
//!
//! Pulls a fixed set of resources from a show-tracker API over one reused
//! HTTP connection and writes each response body verbatim into a snapshot
//! tree. The walk order is deterministic: shows with their episodes first,
//! then ratings, then show images.

pub mod assets;
pub mod client;
pub mod writer;

// Re-export the crawl entry points
pub use client::ApiClient;
pub use writer::SnapshotWriter;

use crate::logger;
use hyper::StatusCode;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can abort a crawl. All of these are fatal: the crawl
/// stops at the first failure and already-written files stay on disk.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to connect to {addr}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("http handshake with the api server failed")]
    Handshake {
        #[source]
        source: hyper::Error,
    },

    #[error("invalid request path '{path}'")]
    InvalidPath {
        path: String,
        #[source]
        source: hyper::http::Error,
    },

    #[error("request for {path} failed")]
    Request {
        path: String,
        #[source]
        source: hyper::Error,
    },

    #[error("unexpected status {status} for {path}")]
    UnexpectedStatus { path: String, status: StatusCode },

    #[error("invalid json in {path}")]
    JsonDecode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected a json object in {path}")]
    UnexpectedShape { path: String },

    #[error("failed to write snapshot file {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy client assets from {} to {}", from.display(), to.display())]
    Assets {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Crawl the remote API into `out_dir` and return the resource count.
///
/// The output directory must not exist yet; the bundled client assets are
/// copied into it before the first request. Every resource is fetched over
/// the same connection, strictly one after another.
pub async fn run_crawl(
    server_url: &str,
    out_dir: &Path,
    assets_dir: &Path,
) -> Result<usize, CrawlError> {
    logger::log_crawl_start(server_url, out_dir);

    let copied =
        assets::copy_client_assets(assets_dir, out_dir).map_err(|source| CrawlError::Assets {
            from: assets_dir.to_path_buf(),
            to: out_dir.to_path_buf(),
            source,
        })?;
    logger::log_assets_copied(copied, out_dir);

    let mut client = ApiClient::connect(server_url).await?;
    let mut writer = SnapshotWriter::new(out_dir);

    let shows = parse_object(&writer.snap(&mut client, "/shows").await?, "/shows")?;
    for show_id in shows.keys() {
        writer.snap(&mut client, &format!("/shows/{show_id}")).await?;
        writer
            .snap(&mut client, &format!("/shows/{show_id}/episodes"))
            .await?;
    }

    let ratings = parse_object(&writer.snap(&mut client, "/ratings").await?, "/ratings")?;
    for rating_id in ratings.keys() {
        writer
            .snap(&mut client, &format!("/ratings/{rating_id}"))
            .await?;
    }

    for (show_id, show) in &shows {
        let record = show.as_object().ok_or_else(|| CrawlError::UnexpectedShape {
            path: format!("/shows/{show_id}"),
        })?;
        if let Some(image_id) = record.get("image").filter(|v| !v.is_null()) {
            writer
                .snap(&mut client, &format!("/images/{}", id_segment(image_id)))
                .await?;
        }
    }

    let resources = writer.resources();
    logger::log_crawl_finished(resources);
    Ok(resources)
}

/// Decode a fetched body as a JSON object keyed by resource id.
///
/// Key iteration order follows the document's own order, so the crawl walks
/// resources exactly as the API listed them.
fn parse_object(body: &[u8], path: &str) -> Result<Map<String, Value>, CrawlError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|source| CrawlError::JsonDecode {
            path: path.to_string(),
            source,
        })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(CrawlError::UnexpectedShape {
            path: path.to_string(),
        }),
    }
}

/// Render an id value as a URL path segment.
///
/// String ids are used verbatim; anything else keeps its JSON display form
/// (the number 7 becomes the segment "7").
fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
