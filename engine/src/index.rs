use crate::corpus::{CorpusItem, Language};
use crate::idf::{calculate_idf, IdfTable};
use crate::query::{search, ScoredResult};
use std::time::SystemTime;

/// The built corpus: every (document, language) item plus the IDF table computed over all
/// of them. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    items: Vec<CorpusItem>,
    idf: IdfTable,
    built_at: SystemTime,
}

impl SearchIndex {
    /// Computes the IDF table over `items` in one pass.
    pub fn new(items: Vec<CorpusItem>) -> Self {
        let idf = calculate_idf(&items);
        Self { items, idf, built_at: SystemTime::now() }
    }

    pub fn empty() -> Self { Self::new(Vec::new()) }

    pub fn items(&self) -> &[CorpusItem] { &self.items }

    pub fn idf(&self) -> &IdfTable { &self.idf }

    pub fn built_at(&self) -> SystemTime { self.built_at }

    pub fn len(&self) -> usize { self.items.len() }

    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Items in `lang`; other languages are never searched together.
    pub fn subset(&self, lang: Language) -> impl Iterator<Item = &CorpusItem> + '_ {
        self.items.iter().filter(move |item| item.language() == lang)
    }

    pub fn search(&self, query: &str, lang: Language) -> Vec<ScoredResult<'_>> {
        search(query, self.subset(lang), &self.idf)
    }
}
