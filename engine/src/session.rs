//! Per-session state shared by the fetch pipeline and the UI layer.
//!
//! Writers:
//! - language: [`SearchSession::set_language`] only.
//! - descriptors, index, phase, failures: the startup pipeline only, each set once.
//! - discovery guard: whoever holds the [`DiscoveryGuard`].
//!
//! Readers check [`SearchSession::is_ready`] (or go through [`SearchSession::query`]) before
//! touching the index, so queries never observe a half-built corpus.

use crate::corpus::{DocumentDescriptor, Language};
use crate::index::SearchIndex;
use crate::query::ScoredResult;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use tokio::sync::watch;

pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Queries with fewer characters (after trimming) are not searched.
    pub min_query_len: usize,
    pub language: Language,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self { min_query_len: DEFAULT_MIN_QUERY_LEN, language: Language::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Pending,
    Discovering,
    Building,
    Ready,
    DiscoveryFailed,
    BuildFailed,
}

/// A document that could not be indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDocument {
    pub name: String,
    pub url: String,
    pub reason: String,
}

/// One navigation control, labelled in a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub id: String,
    pub title: String,
    pub url: String,
}

#[derive(Debug)]
pub enum QueryOutcome<'a> {
    /// Query too short; the caller shows the full navigation instead.
    BelowMinimum,
    /// Index not built (yet, or ever).
    NotReady,
    Results(Vec<ScoredResult<'a>>),
}

impl<'a> QueryOutcome<'a> {
    /// Ranked results, empty for the gated outcomes.
    pub fn into_results(self) -> Vec<ScoredResult<'a>> {
        match self {
            QueryOutcome::Results(r) => r,
            _ => Vec::new(),
        }
    }
}

pub struct SearchSession {
    settings: SessionSettings,
    language: watch::Sender<Language>,
    descriptors: OnceLock<Vec<DocumentDescriptor>>,
    index: OnceLock<SearchIndex>,
    phase: RwLock<Phase>,
    failures: RwLock<Vec<FailedDocument>>,
    discovering: AtomicBool,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(SessionSettings::default())
    }
}

impl SearchSession {
    pub fn new(settings: SessionSettings) -> Self {
        let (language, _) = watch::channel(settings.language);
        Self {
            settings,
            language,
            descriptors: OnceLock::new(),
            index: OnceLock::new(),
            phase: RwLock::new(Phase::Pending),
            failures: RwLock::new(Vec::new()),
            discovering: AtomicBool::new(false),
        }
    }

    pub fn settings(&self) -> &SessionSettings { &self.settings }

    // --- language ---

    pub fn language(&self) -> Language {
        *self.language.borrow()
    }

    /// Switch the display language and notify subscribers. Returns false when `lang` was
    /// already active (no notification is sent).
    pub fn set_language(&self, lang: Language) -> bool {
        let changed = self.language.send_if_modified(|current| {
            if *current == lang {
                false
            } else {
                *current = lang;
                true
            }
        });
        if changed {
            tracing::info!(language = %lang, "language changed");
        }
        changed
    }

    /// The single subscription point for language changes. The receiver starts at the
    /// current language.
    pub fn subscribe_language(&self) -> watch::Receiver<Language> {
        self.language.subscribe()
    }

    // --- discovery ---

    /// Claim the discovery slot. `None` when discovery already completed or another caller is
    /// in flight; such callers are dropped, not queued.
    pub fn begin_discovery(&self) -> Option<DiscoveryGuard<'_>> {
        if self.descriptors.get().is_some() {
            return None;
        }
        self.discovering
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| DiscoveryGuard { flag: &self.discovering })
    }

    pub fn is_discovering(&self) -> bool {
        self.discovering.load(Ordering::Acquire)
    }

    /// Store the discovered documents. Only the first call wins.
    pub fn install_descriptors(&self, descriptors: Vec<DocumentDescriptor>) -> bool {
        self.descriptors.set(descriptors).is_ok()
    }

    pub fn descriptors(&self) -> &[DocumentDescriptor] {
        self.descriptors.get().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn descriptor(&self, id: &str) -> Option<&DocumentDescriptor> {
        self.descriptors().iter().find(|d| d.id == id)
    }

    /// Navigation labels for `lang`, in listing order.
    pub fn navigation(&self, lang: Language) -> Vec<NavEntry> {
        self.descriptors()
            .iter()
            .map(|d| NavEntry { id: d.id.clone(), title: d.title(lang).to_string(), url: d.download_url.clone() })
            .collect()
    }

    // --- index ---

    /// Publish the built index and set the ready flag. Only the first call wins.
    pub fn install_index(&self, index: SearchIndex) -> bool {
        let items = index.len();
        if self.index.set(index).is_err() {
            return false;
        }
        *self.phase.write() = Phase::Ready;
        tracing::info!(items, "search index ready");
        true
    }

    pub fn is_ready(&self) -> bool {
        self.index.get().is_some()
    }

    pub fn index(&self) -> Option<&SearchIndex> {
        self.index.get()
    }

    pub fn phase(&self) -> Phase {
        *self.phase.read()
    }

    /// Ready is one-way; later phase changes are ignored once the index is installed.
    pub fn set_phase(&self, phase: Phase) {
        let mut current = self.phase.write();
        if *current != Phase::Ready {
            *current = phase;
        }
    }

    pub fn record_failures(&self, failures: Vec<FailedDocument>) {
        *self.failures.write() = failures;
    }

    pub fn failures(&self) -> Vec<FailedDocument> {
        self.failures.read().clone()
    }

    // --- queries ---

    /// Run `text` against the current-language subset, applying the minimum-length and
    /// readiness gates first.
    pub fn query(&self, text: &str) -> QueryOutcome<'_> {
        self.query_in(text, self.language())
    }

    pub fn query_in(&self, text: &str, lang: Language) -> QueryOutcome<'_> {
        if text.trim().chars().count() < self.settings.min_query_len {
            return QueryOutcome::BelowMinimum;
        }
        match self.index.get() {
            Some(index) => QueryOutcome::Results(index.search(text, lang)),
            None => QueryOutcome::NotReady,
        }
    }
}

/// Held for the duration of one discovery; releases the in-flight flag on drop.
pub struct DiscoveryGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for DiscoveryGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
