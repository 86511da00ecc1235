//! Logger module
//!
//! Provides logging utilities for the crawler and the snapshot server:
//! - Startup banners and crawl progress
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Informational and access output; console before `init` has run
fn write_line(message: &str) {
    if writer::is_initialized() {
        writer::get().access_line(message);
    } else {
        println!("{message}");
    }
}

/// Error and warning output; console before `init` has run
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().error_line(message);
    } else {
        eprintln!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, root: &Path, config: &Config) {
    write_line("======================================");
    write_line("Snapshot server started successfully");
    write_line(&format!("Listening on: http://{addr}"));
    write_line(&format!("Serving snapshot: {}", root.display()));
    write_line(&format!("Log level: {}", config.logging.level));
    if let Some(ref path) = config.logging.access_log_file {
        write_line(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_line(&format!("Error log: {path}"));
    }
    write_line("======================================\n");
}

pub fn log_crawl_start(server_url: &str, out_dir: &Path) {
    write_line("======================================");
    write_line("Snapshot crawl starting");
    write_line(&format!("Remote server: {server_url}"));
    write_line(&format!("Output directory: {}", out_dir.display()));
    write_line("======================================\n");
}

pub fn log_assets_copied(count: usize, out_dir: &Path) {
    write_line(&format!(
        "[Assets] Copied {count} client files into {}",
        out_dir.display()
    ));
}

pub fn log_resource_snapped(url_path: &str, bytes: usize) {
    write_line(&format!("[Snap] {url_path} ({bytes} bytes)"));
}

pub fn log_crawl_finished(resources: usize) {
    write_line(&format!("\nSnapshot complete: {resources} resources"));
}

/// Per-request diagnostic: where a request path landed on disk
pub fn log_path_resolved(request_path: &str, file_path: &Path, is_directory: bool) {
    let kind = if is_directory { "dir" } else { "file" };
    write_line(&format!(
        "[Resolve] {request_path} -> {} ({kind})",
        file_path.display()
    ));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_line(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_line(&entry.format(format));
}
