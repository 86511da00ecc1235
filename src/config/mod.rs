// Configuration module entry point
// Layered loading: optional TOML file, environment variables, built-in defaults

mod types;

use std::net::SocketAddr;

// Re-export public types
pub use types::{Config, CrawlConfig, LoggingConfig, ServerConfig};

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "snapserve.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SNAPSERVE"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8889)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("crawl.assets_dir", "res/client")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let config = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8889);
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.access_log);
        assert_eq!(config.logging.access_log_format, "combined");
        assert_eq!(config.logging.access_log_file, None);
        assert_eq!(config.crawl.assets_dir, "res/client");
    }

    #[test]
    fn test_socket_addr_from_defaults() {
        let config = Config::load_from("no-such-config-file").unwrap();
        let addr = config.get_socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8889");
    }
}
