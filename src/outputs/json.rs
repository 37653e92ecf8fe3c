//! JSON output for the news bundle.
//!
//! The file is pretty-printed with two-space indentation and non-ASCII text
//! (the Arabic titles and tips) is written as literal UTF-8, not `\u` escapes.

use crate::models::NewsBundle;
use crate::utils::ensure_parent_dir;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`NewsBundle`] to `path`, creating its directory if needed.
///
/// An existing file is overwritten.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot be
/// written.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_bundle(bundle: &NewsBundle, path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(bundle)?;

    if let Err(e) = ensure_parent_dir(path).await {
        error!(error = %e, "Failed to create output directory");
        return Err(e);
    }

    fs::write(path, json).await?;
    info!(
        path = %path.display(),
        article_count = bundle.articles.len(),
        "Wrote news bundle"
    );

    Ok(())
}
