//! Walker module for first-link traversal
//!
//! This module contains the walking logic, including:
//! - HTTP fetching with gzip handling
//! - First-link extraction with parenthetical suppression
//! - The walk loop that follows links until a page repeats

mod engine;
mod extract;
mod fetcher;

pub use engine::{Walk, WalkEngine};
pub use extract::{first_link, suppress_parentheticals, ExtractError};
pub use fetcher::{FetchError, PageFetcher, RANDOM_PAGE};
