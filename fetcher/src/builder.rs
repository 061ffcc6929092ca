use crate::client::DocumentClient;
use crate::config::FailurePolicy;
use crate::error::{DocumentFailure, IndexBuildFailure, PartialIndexFailure};
use crate::extract::section_texts;
use engine::{preprocess, CorpusItem, DocumentDescriptor, Language, SearchIndex};
use futures::future::{join_all, try_join_all};

/// Result of a build that produced an index.
#[derive(Debug)]
pub struct BuiltIndex {
    pub index: SearchIndex,
    /// Set when some documents were left out.
    pub partial: Option<PartialIndexFailure>,
}

/// Fetch one document and turn it into one corpus item per language.
async fn index_document(client: &DocumentClient, d: &DocumentDescriptor) -> Result<Vec<CorpusItem>, DocumentFailure> {
    let body = client.get_text(&d.download_url).await.map_err(|error| {
        tracing::warn!(name = %d.name, error = %error, "document fetch failed");
        DocumentFailure { name: d.name.clone(), url: d.download_url.clone(), error }
    })?;
    let sections = section_texts(&body);
    Ok(Language::ALL
        .iter()
        .map(|&lang| preprocess(d.title(lang), sections.text(lang), &d.download_url, lang))
        .collect())
}

/// Fetch every document concurrently and build the index once all fetches have settled.
///
/// Under [`FailurePolicy::Strict`] the first failed fetch aborts the build and the remaining
/// fetches are dropped. Under [`FailurePolicy::Partial`] failures are collected and the index
/// is built from the rest; the build only fails when no document at all could be fetched.
pub async fn build_index(
    client: &DocumentClient,
    descriptors: &[DocumentDescriptor],
) -> Result<BuiltIndex, IndexBuildFailure> {
    let total = descriptors.len();
    let tasks = descriptors.iter().map(|d| index_document(client, d));

    let built = match client.config().policy {
        FailurePolicy::Strict => {
            let per_doc = try_join_all(tasks)
                .await
                .map_err(|failure| IndexBuildFailure { total, failures: vec![failure] })?;
            BuiltIndex { index: SearchIndex::new(per_doc.into_iter().flatten().collect()), partial: None }
        }
        FailurePolicy::Partial => {
            let mut items = Vec::with_capacity(total * Language::ALL.len());
            let mut failures = Vec::new();
            for outcome in join_all(tasks).await {
                match outcome {
                    Ok(doc_items) => items.extend(doc_items),
                    Err(failure) => failures.push(failure),
                }
            }
            let indexed = total - failures.len();
            if total > 0 && indexed == 0 {
                return Err(IndexBuildFailure { total, failures });
            }
            let partial = (!failures.is_empty()).then(|| PartialIndexFailure { indexed, total, failures });
            BuiltIndex { index: SearchIndex::new(items), partial }
        }
    };

    if let Some(p) = &built.partial {
        tracing::warn!(indexed = p.indexed, total, failed = p.failures.len(), "index built without some documents");
    }
    tracing::info!(documents = total, items = built.index.len(), terms = built.index.idf().len(), "index build complete");
    Ok(built)
}
