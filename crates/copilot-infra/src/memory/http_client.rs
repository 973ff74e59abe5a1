//! HttpMemoryClient -- concrete [`MemorySearchClient`] for a Kernel-Memory
//! style web service.
//!
//! Sends `POST {endpoint}/search` and decodes the returned `SearchResult`.
//! Every failure (transport, non-2xx status, undecodable body) is reported
//! as [`MemoryError::Connector`]; a missing index comes back as 404.
//!
//! The optional API key is wrapped in [`secrecy::SecretString`] and is only
//! exposed when building the `Authorization` header.

use std::time::Duration;

use copilot_core::memory::client::MemorySearchClient;
use copilot_types::config::MemoryServiceConfig;
use copilot_types::error::MemoryError;
use copilot_types::memory::{MemoryFilter, SearchResult};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::types::SearchRequest;

/// HTTP client for the semantic memory service.
pub struct HttpMemoryClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<SecretString>,
}

impl HttpMemoryClient {
    /// Build a client from configuration.
    pub fn new(config: &MemoryServiceConfig) -> Result<Self, MemoryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MemoryError::Connector(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config
                .api_key
                .as_ref()
                .filter(|key| !key.is_empty())
                .map(|key| SecretString::from(key.clone())),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }
}

impl MemorySearchClient for HttpMemoryClient {
    async fn search(
        &self,
        query: &str,
        index: &str,
        filter: &MemoryFilter,
    ) -> Result<SearchResult, MemoryError> {
        let body = SearchRequest::new(query, index, filter);

        let mut request = self.client.post(self.url("/search")).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| MemoryError::Connector(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(MemoryError::Connector(format!("HTTP {status}: {error_body}")));
        }

        let result: SearchResult = response
            .json()
            .await
            .map_err(|e| MemoryError::Connector(format!("failed to parse response: {e}")))?;

        debug!(index, citations = result.results.len(), "memory search completed");
        Ok(result)
    }
}
