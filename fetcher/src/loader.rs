use crate::client::DocumentClient;
use crate::error::LoadError;
use crate::extract::{detail_fragment, localize};
use engine::Language;

/// Shown in the detail view when a load fails, whatever the language.
pub const LOAD_ERROR_PLACEHOLDER: &str = "Failed to load content";

/// Raw body of one fetched article.
#[derive(Debug, Clone)]
pub struct DocumentBody {
    pub url: String,
    pub html: String,
}

impl DocumentBody {
    /// The detail-view fragment with only the `lang` sections kept.
    pub fn render(&self, lang: Language) -> String {
        localize(&detail_fragment(&self.html), lang)
    }
}

/// Fetch `url` for the detail view. Never cached: every call goes to the network.
pub async fn load_document(client: &DocumentClient, url: &str) -> Result<DocumentBody, LoadError> {
    match client.get_text(url).await {
        Ok(html) => {
            tracing::debug!(url, bytes = html.len(), "loaded document");
            Ok(DocumentBody { url: url.to_string(), html })
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "document load failed");
            Err(LoadError(e))
        }
    }
}
