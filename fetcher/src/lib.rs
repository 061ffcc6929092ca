//! Network side of article search: discovering the corpus, fetching and indexing every
//! article, and loading single articles for the detail view.

pub mod builder;
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod loader;
pub mod pipeline;

pub use builder::{build_index, BuiltIndex};
pub use client::DocumentClient;
pub use config::{FailurePolicy, FetchConfig};
pub use discovery::{discover, fetch_listing};
pub use error::{
    BootstrapError, DiscoveryError, DocumentFailure, FetchError, IndexBuildFailure, LoadError, PartialIndexFailure,
};
pub use loader::{load_document, DocumentBody, LOAD_ERROR_PLACEHOLDER};
pub use pipeline::{bootstrap, BootstrapSummary};
