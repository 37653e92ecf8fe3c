//! Utility functions for timestamps, log-safe strings, and file system setup.
//!
//! This module provides helper functions used throughout the application:
//! - Timestamp formatting for [`crate::models::NewsBundle::updated_at`]
//! - String truncation for logging
//! - Parent directory creation for the output file

use chrono::Local;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, instrument};

/// Current local time as an offset-less ISO-8601 string with microseconds.
///
/// # Examples
///
/// ```ignore
/// let ts = now_timestamp(); // "2025-05-06T20:30:00.123456"
/// ```
pub fn now_timestamp() -> String {
    Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes, backing off to the nearest
/// character boundary, with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…(+{} bytes)", &s[..end], s.len() - end)
}

/// Create the directory that will hold `path`, if it has one.
///
/// A bare file name (no parent component) needs no directory and succeeds
/// immediately. Existing directories are not an error.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn ensure_parent_dir(path: &Path) -> Result<(), Box<dyn Error>> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).await?;
            debug!(dir = %dir.display(), "Output directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}
