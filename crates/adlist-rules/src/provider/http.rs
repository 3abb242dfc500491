//! HTTP fetcher for remote rule lists.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::RulesError;
use crate::provider::Fetch;

/// User-Agent sent upstream; some list mirrors gate on a client UA.
const USER_AGENT: &str = "Quantumult X/1.0.30 (iPhone; iOS 16.0; Scale/3.00)";

/// Fetches rule lists over HTTP/HTTPS with a per-request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, RulesError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RulesError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, RulesError> {
        tracing::debug!(url = %url, "fetching remote rule list");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RulesError::Http(format!("request failed for {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RulesError::Http(format!("HTTP {status} for {url}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RulesError::Http(format!("failed to read body for {url}: {e}")))?;

        tracing::debug!(url = %url, bytes = body.len(), "fetched remote rule list");
        Ok(body)
    }
}
