//! Error types for discovery, index building and content loading.

use engine::FailedDocument;
use thiserror::Error;

/// A single HTTP fetch that did not produce a usable body.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} body exceeds {limit} bytes")]
    TooLarge { url: String, limit: usize },

    #[error("invalid listing from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout { url: url.to_string() }
        } else {
            FetchError::Transport { url: url.to_string(), source }
        }
    }
}

/// The directory listing could not be fetched; nothing gets indexed.
#[derive(Debug, Error)]
#[error("document discovery failed: {0}")]
pub struct DiscoveryError(#[from] pub FetchError);

/// One document whose body could not be fetched during the index build.
#[derive(Debug, Error)]
#[error("{name}: {error}")]
pub struct DocumentFailure {
    pub name: String,
    pub url: String,
    #[source]
    pub error: FetchError,
}

impl DocumentFailure {
    pub fn record(&self) -> FailedDocument {
        FailedDocument { name: self.name.clone(), url: self.url.clone(), reason: self.error.to_string() }
    }
}

/// The build produced no index: either a failure under the strict policy, or every
/// document failed.
#[derive(Debug, Error)]
#[error("index build failed: {} of {total} documents could not be fetched", .failures.len())]
pub struct IndexBuildFailure {
    pub total: usize,
    pub failures: Vec<DocumentFailure>,
}

/// The index was built, but without some documents.
#[derive(Debug, Error)]
#[error("index built from {indexed} of {total} documents; {} failed", .failures.len())]
pub struct PartialIndexFailure {
    pub indexed: usize,
    pub total: usize,
    pub failures: Vec<DocumentFailure>,
}

impl PartialIndexFailure {
    pub fn records(&self) -> Vec<FailedDocument> {
        self.failures.iter().map(DocumentFailure::record).collect()
    }
}

/// On-demand content load failed. Affects only that one request.
#[derive(Debug, Error)]
#[error("failed to load content: {0}")]
pub struct LoadError(#[from] pub FetchError);

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Build(#[from] IndexBuildFailure),
}
