//! HTTP Range request parsing module
//!
//! Resolves a `Range` header directly against the actual file size. Only
//! single byte ranges are honored; multi-range requests and anything
//! malformed fall back to the full response.

/// Byte range resolved against the actual file size, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position
    pub start: usize,
    /// Last byte position, always < file size
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes the range covers, never zero by construction
    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// What a `Range` header means for this particular file
#[derive(Debug)]
pub enum RangeOutcome {
    /// A slice of the file can be served with 206
    Satisfiable(ByteRange),
    /// The range names no byte of the file: answer 416
    Unsatisfiable,
    /// No header, or one we do not honor: serve the whole file
    Ignored,
}

/// Resolve a `Range` header against a file of `file_size` bytes.
///
/// Honored forms, all in the `bytes` unit:
/// - `bytes=start-end`
/// - `bytes=start-` (through end of file)
/// - `bytes=-suffix` (last `suffix` bytes)
///
/// # Examples
/// ```
/// use snapserve::http::range::{resolve_range, RangeOutcome};
///
/// let outcome = resolve_range(Some("bytes=0-99"), 1000);
/// assert!(matches!(outcome, RangeOutcome::Satisfiable(_)));
///
/// let outcome = resolve_range(None, 1000);
/// assert!(matches!(outcome, RangeOutcome::Ignored));
/// ```
pub fn resolve_range(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(header) = range_header else {
        return RangeOutcome::Ignored;
    };

    let Some(spec) = header.strip_prefix("bytes=") else {
        return RangeOutcome::Ignored; // Some other unit
    };

    // A comma means multiple ranges, which we do not honor
    if spec.contains(',') {
        return RangeOutcome::Ignored;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Ignored;
    };

    match (start_str.trim(), end_str.trim()) {
        ("", suffix) => suffix_range(suffix, file_size),
        (start, end) => bounded_range(start, end, file_size),
    }
}

/// `bytes=-N`: the last N bytes of the file
fn suffix_range(suffix_str: &str, file_size: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };

    // A zero-length suffix, or any suffix of an empty file, selects nothing
    if suffix == 0 || file_size == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Satisfiable(ByteRange {
        start: file_size.saturating_sub(suffix),
        end: file_size - 1,
    })
}

/// `bytes=N-` or `bytes=N-M`, end clamped to the file
fn bounded_range(start_str: &str, end_str: &str, file_size: usize) -> RangeOutcome {
    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Ignored;
    };

    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(e) = end_str.parse::<usize>() else {
            return RangeOutcome::Ignored;
        };
        e.min(file_size - 1)
    };

    if start > end {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Satisfiable(ByteRange { start, end })
}
