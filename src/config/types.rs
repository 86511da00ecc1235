// Typed view of the layered configuration, deserialized via serde

use serde::Deserialize;

/// Everything the two binaries read from configuration. The snapshot
/// directory and the remote URL are CLI flags, never config keys.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub crawl: CrawlConfig,
}

/// Bind address for the snapshot server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Log destinations and the access log format
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// combined, common, json, or a custom `$variable` pattern
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file; stdout if not set
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file; stderr if not set
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

/// Crawler-side settings
#[derive(Debug, Deserialize, Clone)]
pub struct CrawlConfig {
    /// Bundled static client tree copied into each new snapshot
    pub assets_dir: String,
}
