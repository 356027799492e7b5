//! Walk engine
//!
//! Drives fetch and extract rounds from a starting page until some page
//! comes up for the second time, then reports the whole path with the
//! closing repeat as its last element.

use std::collections::HashMap;

use crate::config::WalkConfig;
use crate::page::ArticlePath;
use crate::walker::extract::{first_link, ExtractError};
use crate::walker::fetcher::{PageFetcher, RANDOM_PAGE};
use crate::{Result, WalkError};

/// A completed walk: the pages visited, in order, ending at the first repeat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    /// Visited pages in walk order; the last entry repeats an earlier one
    pub pages: Vec<ArticlePath>,
}

impl Walk {
    /// Consecutive page pairs, one per followed link
    pub fn edges(&self) -> impl Iterator<Item = (&ArticlePath, &ArticlePath)> + '_ {
        self.pages.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

/// Runs first-link walks against a single wiki host
pub struct WalkEngine {
    config: WalkConfig,
}

impl WalkEngine {
    /// Creates an engine with the given run settings
    pub fn new(config: WalkConfig) -> Self {
        WalkEngine { config }
    }

    /// Performs one walk
    ///
    /// Starting from `start`, or from a random article when `None`, follows
    /// the first link of each page until a page repeats or `max_depth` links
    /// have been followed. A given start page is the walk's first element; a
    /// random walk begins at the first followed link, since the random
    /// article's own identity is not known to the fetch.
    ///
    /// # Arguments
    ///
    /// * `start` - The article to start from, or `None` for a random one
    ///
    /// # Returns
    ///
    /// * `Ok(Walk)` - The traversed path, closing repeat included
    /// * `Err(WalkError)` - Fetch failure, a page without a usable link, or
    ///   no repeat within `max_depth`
    pub async fn walk(&self, start: Option<ArticlePath>) -> Result<Walk> {
        let fetcher = PageFetcher::new(&self.config)?;

        let mut pages: Vec<ArticlePath> = Vec::new();
        let mut seen: HashMap<ArticlePath, u32> = HashMap::new();

        let mut current = start;
        match &current {
            Some(page) => {
                tracing::info!("Starting walk at {}", page);
                seen.insert(page.clone(), 1);
                pages.push(page.clone());
            }
            None => tracing::info!("Starting walk at a random article"),
        }

        for _ in 0..self.config.max_depth {
            let body = fetcher.fetch(current.as_ref()).await?;

            let page_label = current
                .as_ref()
                .map(|page| page.to_string())
                .unwrap_or_else(|| RANDOM_PAGE.to_string());

            let next = match first_link(&body) {
                Ok(next) => next,
                Err(ExtractError::MissingContent) => {
                    return Err(WalkError::NoContent { page: page_label });
                }
                Err(ExtractError::NoLink) => {
                    return Err(WalkError::NoLink { page: page_label });
                }
            };

            tracing::info!("Followed {} -> {}", page_label, next);
            pages.push(next.clone());

            let visits = seen.entry(next.clone()).or_insert(0);
            *visits += 1;
            if *visits >= 2 {
                tracing::info!("Walk closed at {} after {} pages", next, pages.len());
                return Ok(Walk { pages });
            }

            current = Some(next);
        }

        tracing::info!("No repeat within {} links, giving up", self.config.max_depth);
        Err(WalkError::MaxDepth {
            limit: self.config.max_depth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> ArticlePath {
        s.parse().unwrap()
    }

    fn make_walk(paths: &[&str]) -> Walk {
        Walk {
            pages: paths.iter().map(|p| path(p)).collect(),
        }
    }

    #[test]
    fn test_edges_pair_consecutive_pages() {
        let walk = make_walk(&["/wiki/A", "/wiki/B", "/wiki/C", "/wiki/B"]);
        let edges: Vec<(&str, &str)> = walk
            .edges()
            .map(|(from, to)| (from.as_str(), to.as_str()))
            .collect();
        assert_eq!(
            edges,
            vec![
                ("/wiki/A", "/wiki/B"),
                ("/wiki/B", "/wiki/C"),
                ("/wiki/C", "/wiki/B"),
            ]
        );
    }

    #[test]
    fn test_edges_empty_for_single_page() {
        let walk = make_walk(&["/wiki/A"]);
        assert_eq!(walk.edges().count(), 0);
    }

    #[test]
    fn test_edges_self_loop() {
        let walk = make_walk(&["/wiki/A", "/wiki/A"]);
        let edges: Vec<(&str, &str)> = walk
            .edges()
            .map(|(from, to)| (from.as_str(), to.as_str()))
            .collect();
        assert_eq!(edges, vec![("/wiki/A", "/wiki/A")]);
    }
}
