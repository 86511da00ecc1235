//! Cache validator module
//!
//! Entity tags and modification dates for conditional requests. A snapshot
//! tree never changes while served, so both validators are stable for the
//! lifetime of the process.

use chrono::{DateTime, Utc};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::SystemTime;

/// Entity tag for a file's content: quoted hex of a fast content hash, e.g.
/// `"9f86d081884c"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    let v = hasher.finish();
    format!("\"{v:x}\"")
}

/// Check a client's `If-None-Match` header against our entity tag.
///
/// The header may carry one tag, a comma-separated list, or `*`. True means
/// the client's copy is current and deserves a 304.
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|client_etag| {
        client_etag
            .split(',')
            .any(|e| e.trim() == etag || e.trim() == "*")
    })
}

/// Format a timestamp as an HTTP date (IMF-fixdate, always GMT)
///
/// # Examples
/// ```
/// use std::time::SystemTime;
/// use snapserve::http::cache::format_http_date;
/// let epoch = SystemTime::UNIX_EPOCH;
/// assert_eq!(format_http_date(epoch), "Thu, 01 Jan 1970 00:00:00 GMT");
/// ```
pub fn format_http_date(time: SystemTime) -> String {
    let datetime: DateTime<Utc> = time.into();
    datetime.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Check a client's `If-Modified-Since` header against the file's mtime
///
/// Comparison happens at second precision since HTTP dates carry no
/// sub-second component; a client echoing our own `Last-Modified` back
/// must compare equal.
///
/// # Returns
/// Returns true if the file is unchanged (should return 304)
pub fn check_modified_since(if_modified_since: Option<&str>, modified: SystemTime) -> bool {
    let Some(header) = if_modified_since else {
        return false;
    };
    let Ok(client_time) = DateTime::parse_from_rfc2822(header) else {
        return false; // Malformed date, serve full content
    };
    let modified: DateTime<Utc> = modified.into();
    modified.timestamp() <= client_time.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_etag_tracks_content() {
        let body = br#"{"1": {"image": 7}}"#;
        let etag = generate_etag(body);
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert_eq!(etag, generate_etag(body));
        assert_ne!(etag, generate_etag(br#"{"1": {}}"#));
    }

    #[test]
    fn test_etag_match_forms() {
        let etag = generate_etag(b"show one");
        let list = format!("\"stale\", {etag}");
        assert!(check_etag_match(Some(etag.as_str()), &etag));
        assert!(check_etag_match(Some(list.as_str()), &etag));
        assert!(check_etag_match(Some("*"), &etag));
        assert!(!check_etag_match(Some("\"stale\""), &etag));
        assert!(!check_etag_match(None, &etag));
    }

    #[test]
    fn test_http_date_format() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert_eq!(format_http_date(time), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn test_modified_since_echo_matches() {
        // A client echoing our Last-Modified back gets a 304 even though
        // the mtime carries sub-second precision
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_millis(784_111_777_250);
        let header = format_http_date(mtime);
        assert!(check_modified_since(Some(header.as_str()), mtime));
    }

    #[test]
    fn test_modified_since_older_client_copy() {
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert!(!check_modified_since(
            Some("Sun, 06 Nov 1994 08:49:36 GMT"),
            mtime
        ));
    }

    #[test]
    fn test_modified_since_newer_client_copy() {
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert!(check_modified_since(
            Some("Sun, 06 Nov 1994 08:50:00 GMT"),
            mtime
        ));
    }

    #[test]
    fn test_modified_since_malformed() {
        let mtime = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert!(!check_modified_since(Some("not a date"), mtime));
        assert!(!check_modified_since(None, mtime));
    }
}
