use crate::corpus::{CorpusItem, Language};
use crate::idf::IdfTable;
use crate::tokenizer::tokenize;
use serde::Serialize;

pub const TITLE_BOOST: f64 = 10.0;
pub const TEXT_BOOST: f64 = 1.0;

/// A corpus item paired with its score for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult<'a> {
    pub item: &'a CorpusItem,
    pub score: f64,
}

/// Rank `items` against `query`.
///
/// Each query token adds `10 * idf` when it occurs in the title and `1 * idf` when it
/// occurs in the text. Items scoring exactly zero are dropped; the rest are returned in
/// descending score order, ties keeping their input order. No truncation happens here.
pub fn search<'a, I>(query: &str, items: I, idf: &IdfTable) -> Vec<ScoredResult<'a>>
where
    I: IntoIterator<Item = &'a CorpusItem>,
{
    let q_tokens = tokenize(query);
    if q_tokens.is_empty() {
        return Vec::new();
    }
    let q_weights: Vec<(&str, f64)> = q_tokens.iter().map(|t| (t.as_str(), idf.weight(t))).collect();

    let mut scored: Vec<ScoredResult<'a>> = items
        .into_iter()
        .filter_map(|item| {
            let mut score = 0.0f64;
            for (token, weight) in &q_weights {
                if item.title_tokens().iter().any(|t| t == token) {
                    score += TITLE_BOOST * weight;
                }
                if item.text_tokens().iter().any(|t| t == token) {
                    score += TEXT_BOOST * weight;
                }
            }
            (score != 0.0).then_some(ScoredResult { item, score })
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored
}

/// First `max_chars` characters of `text`, with an ellipsis when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    let mut chars = text.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// What the result list shows for one hit.
#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub doc_id: String,
    pub title: String,
    pub url: String,
    pub language: Language,
    pub score: f64,
    pub preview: String,
}

impl ResultView {
    pub fn from_scored(result: &ScoredResult<'_>, preview_chars: usize) -> Self {
        let item = result.item;
        Self {
            doc_id: item.doc_id().to_string(),
            title: item.title().to_string(),
            url: item.url().to_string(),
            language: item.language(),
            score: result.score,
            preview: preview(item.text(), preview_chars),
        }
    }
}
