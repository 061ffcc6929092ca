use std::time::Duration;

pub const DEFAULT_LISTING_URL: &str =
    "https://api.github.com/repos/dedsec1121fk/dedsec1121fk.github.io/contents/Useful_Information";
pub const DEFAULT_EXTENSION: &str = ".html";
pub const DEFAULT_USER_AGENT: &str = "article-search/0.1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// What to do when some documents fail to fetch during the index build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Index whatever was fetched; fail only when nothing was.
    #[default]
    Partial,
    /// Any failed fetch aborts the build and nothing is indexed.
    Strict,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Directory listing endpoint (GitHub contents API shape).
    pub listing_url: String,
    /// Only listing entries whose name ends with this are articles.
    pub extension: String,
    pub user_agent: String,
    /// Per-request timeout, covering connect and body.
    pub timeout: Duration,
    pub max_body_bytes: usize,
    pub policy: FailurePolicy,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            listing_url: DEFAULT_LISTING_URL.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            policy: FailurePolicy::default(),
        }
    }
}

impl FetchConfig {
    pub fn with_listing_url(mut self, url: impl Into<String>) -> Self {
        self.listing_url = url.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_body_bytes(mut self, max: usize) -> Self {
        self.max_body_bytes = max;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }
}
