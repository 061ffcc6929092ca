use crate::config::FetchConfig;
use crate::error::FetchError;
use reqwest::{header, Client};
use std::sync::Arc;

/// Shared HTTP client plus the fetch settings every suspension point uses.
#[derive(Clone)]
pub struct DocumentClient {
    http: Client,
    config: Arc<FetchConfig>,
}

impl DocumentClient {
    pub fn new(config: FetchConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config: Arc::new(config) })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// GET `url` and return the body, rejecting non-success statuses and bodies over the
    /// configured size limit.
    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let resp = self
            .http
            .get(url)
            .header(header::ACCEPT, "application/json, text/html;q=0.9, */*;q=0.8")
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }
        let limit = self.config.max_body_bytes;
        if resp.content_length().is_some_and(|len| len > limit as u64) {
            return Err(FetchError::TooLarge { url: url.to_string(), limit });
        }

        let bytes = resp.bytes().await.map_err(|e| FetchError::from_reqwest(url, e))?;
        if bytes.len() > limit {
            return Err(FetchError::TooLarge { url: url.to_string(), limit });
        }
        Ok(bytes.to_vec())
    }

    pub async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let bytes = self.get_bytes(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
