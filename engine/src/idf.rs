use crate::corpus::CorpusItem;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Weight used for query tokens that never occur in the corpus.
pub const UNSEEN_TOKEN_WEIGHT: f64 = 0.5;

/// Token -> inverse document frequency.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IdfTable {
    weights: HashMap<String, f64>,
}

impl IdfTable {
    pub fn new() -> Self { Self::default() }

    /// Weight for `token`, or [`UNSEEN_TOKEN_WEIGHT`] when absent.
    pub fn weight(&self, token: &str) -> f64 {
        self.weights.get(token).copied().unwrap_or(UNSEEN_TOKEN_WEIGHT)
    }

    pub fn get(&self, token: &str) -> Option<f64> {
        self.weights.get(token).copied()
    }

    pub fn len(&self) -> usize { self.weights.len() }

    pub fn is_empty(&self) -> bool { self.weights.is_empty() }
}

/// Smoothed IDF over the whole corpus: `ln(N / (1 + df))`, where `df` counts items whose
/// title or text contains the token at least once.
pub fn calculate_idf(items: &[CorpusItem]) -> IdfTable {
    let mut df: HashMap<&str, u32> = HashMap::new();
    for item in items {
        let seen_in_item: HashSet<&str> = item
            .title_tokens()
            .iter()
            .chain(item.text_tokens())
            .map(String::as_str)
            .collect();
        for token in seen_in_item {
            *df.entry(token).or_insert(0) += 1;
        }
    }

    let n = items.len() as f64;
    let weights = df
        .into_iter()
        .map(|(token, df_t)| (token.to_string(), (n / (1.0 + df_t as f64)).ln()))
        .collect();
    IdfTable { weights }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{preprocess, Language};

    fn item(title: &str, text: &str) -> CorpusItem {
        preprocess(title, text, "https://x/doc.html", Language::En)
    }

    #[test]
    fn repeated_token_counts_once_per_item() {
        let items = vec![item("vpn vpn", "vpn"), item("tor", ""), item("other", "")];
        let idf = calculate_idf(&items);
        assert!((idf.weight("vpn") - (3.0f64 / 2.0).ln()).abs() < 1e-12);
    }

    #[test]
    fn token_in_every_item_is_non_positive() {
        let items = vec![item("common a", ""), item("common", "b"), item("x", "common")];
        let idf = calculate_idf(&items);
        let w = idf.get("common").unwrap();
        assert!((w - (3.0f64 / 4.0).ln()).abs() < 1e-12);
        assert!(w <= 0.0);
    }

    #[test]
    fn unseen_token_uses_default() {
        let idf = calculate_idf(&[item("a", "b")]);
        assert_eq!(idf.get("zzz"), None);
        assert_eq!(idf.weight("zzz"), UNSEEN_TOKEN_WEIGHT);
    }

    #[test]
    fn empty_corpus_gives_empty_table() {
        assert!(calculate_idf(&[]).is_empty());
    }
}
