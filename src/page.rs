//! Article identifiers
//!
//! Wikipedia articles are addressed by their site-relative path, always of
//! the form `/wiki/<title>`. The newtype here is the only place that pattern
//! is checked; link extraction, CLI validation, and graph labels all go
//! through it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error for strings that do not name a wiki article
#[derive(Debug, Error, PartialEq, Eq)]
#[error("not a wiki article path (expected /wiki/<title>): {0}")]
pub struct ArticlePathError(String);

/// Site-relative path of an article, such as `/wiki/Philosophy`
///
/// Always starts with `/wiki/`. Construction goes through [`FromStr`], so a
/// held value is known to match the internal-link pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticlePath(String);

impl ArticlePath {
    /// Path prefix every article shares
    pub const PREFIX: &'static str = "/wiki/";

    /// Returns the full path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the title portion after the `/wiki/` prefix
    pub fn title(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }
}

impl FromStr for ArticlePath {
    type Err = ArticlePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with(Self::PREFIX) {
            Ok(ArticlePath(s.to_string()))
        } else {
            Err(ArticlePathError(s.to_string()))
        }
    }
}

impl fmt::Display for ArticlePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
