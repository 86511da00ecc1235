//! Snapshot writer module
//!
//! Persists fetched response bodies into the snapshot tree using the shared
//! self-file convention.

use crate::crawler::{ApiClient, CrawlError};
use crate::layout;
use crate::logger;
use hyper::body::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes crawled resources under one snapshot root
pub struct SnapshotWriter {
    root: PathBuf,
    resources: usize,
}

impl SnapshotWriter {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            resources: 0,
        }
    }

    /// Fetch one resource and persist its body byte-for-byte.
    ///
    /// The resource directory is created as needed; directories left over
    /// from an earlier partial crawl are reused silently. Returns the body
    /// so callers can also parse it.
    pub async fn snap(&mut self, client: &mut ApiClient, url_path: &str) -> Result<Bytes, CrawlError> {
        let body = client.get(url_path).await?;

        let dir = layout::snapshot_path(&self.root, url_path);
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| CrawlError::Write { path: dir, source })?;

        let file_path = layout::self_file_path(&self.root, url_path);
        fs::write(&file_path, &body)
            .await
            .map_err(|source| CrawlError::Write {
                path: file_path,
                source,
            })?;

        self.resources += 1;
        logger::log_resource_snapped(url_path, body.len());
        Ok(body)
    }

    /// Number of resources persisted so far
    pub const fn resources(&self) -> usize {
        self.resources
    }
}
