//! Run configuration
//!
//! One context struct carried from the CLI into the walker components.
//! There is no config file; every knob is a flag with a default.

/// Default wiki host
pub const DEFAULT_BASE_URL: &str = "https://en.wikipedia.org";

/// Browser identity presented on every request
///
/// Wikipedia and its mirrors answer unknown user agents with reduced or
/// blocked responses, so requests identify as a desktop browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

/// Default bound on links followed per walk
pub const DEFAULT_MAX_DEPTH: u32 = 100;

/// Settings shared by every walk in a run
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Base URL of the wiki host
    pub base_url: String,

    /// User-Agent header value for all requests
    pub user_agent: String,

    /// Most links followed in one walk before giving up
    pub max_depth: u32,
}

impl Default for WalkConfig {
    fn default() -> Self {
        WalkConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
