//! Wikiwalk: first-link walks over Wikipedia
//!
//! This crate implements the "first link" game: start on an article, follow
//! the first qualifying link in its body text, and repeat until an article
//! comes up a second time. Each walk is a path of articles; many walks
//! accumulate into one directed graph for export as Graphviz DOT and an
//! optional rendered image.

pub mod config;
pub mod graph;
pub mod page;
pub mod walker;

use thiserror::Error;

/// Error type for a single walk
///
/// Every variant ends the walk it occurred in, not the run: the driver logs
/// the failure and moves on to the next walk.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error(transparent)]
    Fetch(#[from] walker::FetchError),

    #[error("no content container on {page}")]
    NoContent { page: String },

    #[error("no qualifying link on {page}")]
    NoLink { page: String },

    #[error("no repeated page within {limit} links")]
    MaxDepth { limit: u32 },
}

/// Result type alias for walk operations
pub type Result<T> = std::result::Result<T, WalkError>;

// Re-export commonly used types
pub use config::WalkConfig;
pub use graph::{Layout, WalkGraph};
pub use page::ArticlePath;
pub use walker::{first_link, FetchError, Walk, WalkEngine};
