//! In-memory bilingual article search.
//!
//! - [`tokenizer`]: text -> normalized word tokens
//! - [`corpus`]: documents, languages and tokenized corpus items
//! - [`idf`]: smoothed inverse document frequency over the corpus
//! - [`query`]: title/text weighted scoring and ranking
//! - [`session`]: language, readiness and discovery state shared with the UI layer
//!
//! Nothing here touches the network; fetching lives in the `fetcher` crate.

pub mod corpus;
pub mod idf;
pub mod index;
pub mod query;
pub mod session;
pub mod titles;
pub mod tokenizer;

pub use corpus::{preprocess, BilingualTitle, CorpusItem, DocumentDescriptor, Language};
pub use error::Error;
pub use idf::{calculate_idf, IdfTable};
pub use index::SearchIndex;
pub use query::{search, ResultView, ScoredResult};
pub use session::{FailedDocument, NavEntry, Phase, QueryOutcome, SearchSession, SessionSettings};

mod error {
    #[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        /// Language code other than `en` / `gr`.
        #[error("unknown language code: {0:?}")]
        UnknownLanguage(String),
    }
}
