use crate::client::DocumentClient;
use crate::error::{DiscoveryError, FetchError};
use engine::{DocumentDescriptor, Phase, SearchSession};
use serde::Deserialize;

/// One entry of the directory listing (GitHub contents API shape).
#[derive(Debug, Clone, Deserialize)]
pub struct ListingEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Keep article files, in listing order.
pub fn descriptors_from_listing(entries: Vec<ListingEntry>, extension: &str) -> Vec<DocumentDescriptor> {
    entries
        .into_iter()
        .filter(|e| e.kind == "file" && e.name.ends_with(extension))
        .filter_map(|e| {
            let url = e.download_url?;
            Some(DocumentDescriptor::new(e.name, url, extension))
        })
        .collect()
}

/// Fetch and filter the listing. No session bookkeeping.
pub async fn fetch_listing(client: &DocumentClient) -> Result<Vec<DocumentDescriptor>, DiscoveryError> {
    let config = client.config();
    let url = config.listing_url.as_str();
    let body = client.get_bytes(url).await?;
    let entries: Vec<ListingEntry> =
        serde_json::from_slice(&body).map_err(|source| FetchError::Decode { url: url.to_string(), source })?;
    Ok(descriptors_from_listing(entries, &config.extension))
}

/// Run discovery once for `session`.
///
/// Returns `Ok(None)` without fetching when discovery already succeeded or another call is
/// in flight. On success the descriptors are installed into the session.
pub async fn discover(
    session: &SearchSession,
    client: &DocumentClient,
) -> Result<Option<Vec<DocumentDescriptor>>, DiscoveryError> {
    let Some(_guard) = session.begin_discovery() else {
        tracing::debug!("discovery already done or in flight; dropping request");
        return Ok(None);
    };
    session.set_phase(Phase::Discovering);

    match fetch_listing(client).await {
        Ok(descriptors) => {
            tracing::info!(documents = descriptors.len(), "discovered articles");
            session.install_descriptors(descriptors.clone());
            Ok(Some(descriptors))
        }
        Err(e) => {
            tracing::error!(error = %e, "article discovery failed");
            session.set_phase(Phase::DiscoveryFailed);
            Err(e)
        }
    }
}
