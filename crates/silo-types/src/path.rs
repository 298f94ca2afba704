//! Content-path limits and comparison.
//!
//! Shard range bounds are truncated to the platform's maximum content-path
//! length when ranges are created, so every comparison against a bound must
//! be truncated the same way or keys longer than the limit would sort
//! differently from the bound they were cut from.

use std::cmp::Ordering;

/// Maximum length of a content path, in bytes.
pub const CONTENT_PATH_MAX: usize = 1024;

/// Compare two paths byte-wise, looking at no more than
/// [`CONTENT_PATH_MAX`] bytes of each.
pub fn cmp_bounded(a: &str, b: &str) -> Ordering {
    let a = &a.as_bytes()[..a.len().min(CONTENT_PATH_MAX)];
    let b = &b.as_bytes()[..b.len().min(CONTENT_PATH_MAX)];
    a.cmp(b)
}
