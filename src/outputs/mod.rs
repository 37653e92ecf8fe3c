//! Output generation for the news bundle.
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`crate::models::NewsBundle`] to its JSON file
//!
//! # Output Structure
//!
//! ```text
//! data/
//! └── daily_news.json
//! ```

pub mod json;
