//! Page fetching
//!
//! This module handles all HTTP requests for the walker, including:
//! - Building a client that presents a desktop-browser identity
//! - Fetching named articles and the random-article endpoint
//! - Inspecting Content-Encoding and gunzipping response bodies by hand
//! - Error classification

use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_ENCODING, CONTENT_ENCODING};
use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::config::WalkConfig;
use crate::page::ArticlePath;

/// Endpoint that redirects to a random article
pub const RANDOM_PAGE: &str = "/wiki/Special:Random";

/// Errors from fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("invalid URL {url}: {source}")]
    InvalidUrl { url: String, source: url::ParseError },
}

/// HTTP session for fetching article pages
///
/// Redirects follow the client's default policy, so fetching the random
/// endpoint lands on a concrete article's content.
pub struct PageFetcher {
    client: Client,
    base_url: Url,
}

impl PageFetcher {
    /// Creates a fetcher for the configured wiki host
    ///
    /// # Arguments
    ///
    /// * `config` - Host, user agent, and limits for this run
    ///
    /// # Returns
    ///
    /// * `Ok(PageFetcher)` - Ready-to-use fetcher
    /// * `Err(FetchError)` - Base URL did not parse or the client failed to build
    ///
    /// # Example
    ///
    /// ```no_run
    /// use wikiwalk::config::WalkConfig;
    /// use wikiwalk::walker::PageFetcher;
    ///
    /// let fetcher = PageFetcher::new(&WalkConfig::default()).unwrap();
    /// ```
    pub fn new(config: &WalkConfig) -> Result<Self, FetchError> {
        let base_url = Url::parse(&config.base_url).map_err(|source| FetchError::InvalidUrl {
            url: config.base_url.clone(),
            source,
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(FetchError::Client)?;

        Ok(PageFetcher { client, base_url })
    }

    /// Fetches a page body as text
    ///
    /// With `None`, fetches the random-article endpoint; the returned body
    /// belongs to whichever article the server picked.
    ///
    /// # Arguments
    ///
    /// * `page` - The article to fetch, or `None` for a random one
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The decoded page body
    /// * `Err(FetchError)` - Non-success status or transport failure
    pub async fn fetch(&self, page: Option<&ArticlePath>) -> Result<String, FetchError> {
        let path = page.map(ArticlePath::as_str).unwrap_or(RANDOM_PAGE);
        let url = self
            .base_url
            .join(path)
            .map_err(|source| FetchError::InvalidUrl {
                url: format!("{}{}", self.base_url, path),
                source,
            })?;

        tracing::info!("Fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let gzipped = response
            .headers()
            .get(CONTENT_ENCODING)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.eq_ignore_ascii_case("gzip"))
            .unwrap_or(false);

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        Ok(decode_body(&body, gzipped, url.as_str()))
    }
}

/// Decodes a response body, gunzipping when the header says to
///
/// A body that claims gzip but fails to decode is passed through unchanged
/// with a warning.
fn decode_body(body: &[u8], gzipped: bool, url: &str) -> String {
    if gzipped {
        let mut decoder = GzDecoder::new(body);
        let mut decoded = Vec::new();
        match decoder.read_to_end(&mut decoded) {
            Ok(_) => {
                tracing::debug!("Decompressed {} gzip bytes from {}", body.len(), url);
                return String::from_utf8_lossy(&decoded).into_owned();
            }
            Err(e) => {
                tracing::warn!("Content-Encoding says gzip but decoding failed for {}: {}", url, e);
            }
        }
    }

    String::from_utf8_lossy(body).into_owned()
}
