//! Mtime-based freshness detection for cached downloads.

use std::path::Path;
use std::time::{Duration, SystemTime};

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub fn get_mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().and_then(|m| m.modified()).ok()
}

/// Check if a cached file was written less than `max_age` ago
///
/// Returns `false` if the file doesn't exist, so callers fetch it.
/// Files with an mtime in the future count as fresh.
pub fn is_fresh(path: &Path, max_age: Duration) -> bool {
    let Some(mtime) = get_mtime(path) else {
        return false;
    };

    SystemTime::now()
        .duration_since(mtime)
        .map_or(true, |age| age < max_age)
}
