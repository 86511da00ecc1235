//! Access log format module
//!
//! One entry per served request, rendered as `combined` (Apache/Nginx
//! combined), `common` (CLF), `json` (one object per line), or a custom
//! `$variable` pattern.

use chrono::Local;

/// Timestamp layout used by the Apache-style formats
const CLF_TIME: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: String,
    /// Request timestamp
    pub time: chrono::DateTime<Local>,
    /// HTTP method (GET, HEAD, etc.)
    pub method: String,
    /// Request URI path
    pub path: String,
    /// HTTP version (1.0, 1.1)
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response body size in bytes
    pub body_bytes: usize,
    /// Referer header
    pub referer: Option<String>,
    /// User-Agent header
    pub user_agent: Option<String>,
    /// Request processing time in microseconds
    pub request_time_us: u64,
}

impl AccessLogEntry {
    /// Start an entry for an incoming request; response fields are filled in
    /// once the response exists
    pub fn new(remote_addr: String, method: String, path: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            path,
            http_version: "1.1".to_string(),
            status: 200,
            body_bytes: 0,
            referer: None,
            user_agent: None,
            request_time_us: 0,
        }
    }

    /// Render the entry in the named format; anything that is not a known
    /// format name is treated as a custom pattern
    pub fn format(&self, format: &str) -> String {
        match format {
            "combined" => self.format_combined(),
            "common" => self.format_common(),
            "json" => self.format_json(),
            custom => self.format_custom(custom),
        }
    }

    /// Request line as it appears quoted in the Apache formats
    fn request_line(&self) -> String {
        format!("{} {} HTTP/{}", self.method, self.path, self.http_version)
    }

    /// Common Log Format:
    /// `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`
    fn format_common(&self) -> String {
        format!(
            "{} - - [{}] \"{}\" {} {}",
            self.remote_addr,
            self.time.format(CLF_TIME),
            self.request_line(),
            self.status,
            self.body_bytes,
        )
    }

    /// Combined format is CLF plus the quoted referer and user agent
    fn format_combined(&self) -> String {
        format!(
            "{} \"{}\" \"{}\"",
            self.format_common(),
            self.referer.as_deref().unwrap_or("-"),
            self.user_agent.as_deref().unwrap_or("-"),
        )
    }

    /// JSON structured log format, one object per line
    fn format_json(&self) -> String {
        serde_json::json!({
            "remote_addr": self.remote_addr,
            "time": self.time.to_rfc3339(),
            "method": self.method,
            "path": self.path,
            "http_version": self.http_version,
            "status": self.status,
            "body_bytes": self.body_bytes,
            "referer": self.referer,
            "user_agent": self.user_agent,
            "request_time_us": self.request_time_us,
        })
        .to_string()
    }

    /// Custom format with `$variable` substitution
    ///
    /// Variables: `$remote_addr`, `$time_local`, `$time_iso8601`, `$request`,
    /// `$request_method`, `$request_uri`, `$request_time` (seconds, three
    /// decimals), `$status`, `$body_bytes_sent`, `$http_referer`,
    /// `$http_user_agent`.
    fn format_custom(&self, pattern: &str) -> String {
        #[allow(clippy::cast_precision_loss)]
        let request_time = self.request_time_us as f64 / 1_000_000.0;

        // $request_* variables must be substituted before the shorter $request
        let substitutions = [
            ("$remote_addr", self.remote_addr.clone()),
            ("$time_local", self.time.format(CLF_TIME).to_string()),
            ("$time_iso8601", self.time.to_rfc3339()),
            ("$request_method", self.method.clone()),
            ("$request_uri", self.path.clone()),
            ("$request_time", format!("{request_time:.3}")),
            ("$request", self.request_line()),
            ("$status", self.status.to_string()),
            ("$body_bytes_sent", self.body_bytes.to_string()),
            (
                "$http_referer",
                self.referer.as_deref().unwrap_or("-").to_string(),
            ),
            (
                "$http_user_agent",
                self.user_agent.as_deref().unwrap_or("-").to_string(),
            ),
        ];

        let mut result = pattern.to_string();
        for (variable, value) in &substitutions {
            result = result.replace(variable, value);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".to_string(),
            "GET".to_string(),
            "/shows/42".to_string(),
        );
        entry.status = 200;
        entry.body_bytes = 1234;
        entry.referer = Some("https://example.com".to_string());
        entry.user_agent = Some("Mozilla/5.0".to_string());
        entry.request_time_us = 1500;
        entry
    }

    #[test]
    fn test_combined_extends_common() {
        let entry = sample_entry();
        let combined = entry.format("combined");
        let common = entry.format("common");
        assert!(combined.starts_with(&common));
        assert!(combined.ends_with("\"https://example.com\" \"Mozilla/5.0\""));
    }

    #[test]
    fn test_common_has_request_line_and_size() {
        let log = sample_entry().format("common");
        assert!(log.starts_with("192.168.1.1 - - ["));
        assert!(log.contains("\"GET /shows/42 HTTP/1.1\" 200 1234"));
        assert!(!log.contains("Mozilla"));
    }

    #[test]
    fn test_json_fields() {
        let log = sample_entry().format("json");
        assert!(log.contains(r#""remote_addr":"192.168.1.1""#));
        assert!(log.contains(r#""method":"GET""#));
        assert!(log.contains(r#""status":200"#));
        assert!(log.contains(r#""body_bytes":1234"#));
    }

    #[test]
    fn test_json_missing_headers_are_null() {
        let mut entry = sample_entry();
        entry.referer = None;
        entry.user_agent = None;
        let log = entry.format("json");
        assert!(log.contains(r#""referer":null"#));
        assert!(log.contains(r#""user_agent":null"#));
    }

    #[test]
    fn test_custom_pattern() {
        let mut entry = sample_entry();
        entry.request_time_us = 250_000;
        let log = entry.format("$remote_addr - $status - $request_time");
        assert_eq!(log, "192.168.1.1 - 200 - 0.250");
    }

    #[test]
    fn test_custom_request_variables_do_not_clobber() {
        let log = sample_entry().format("$request_method $request_uri | $request");
        assert_eq!(log, "GET /shows/42 | GET /shows/42 HTTP/1.1");
    }
}
