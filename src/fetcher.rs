use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("pagedate/", env!("CARGO_PKG_VERSION"));
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// A document as acquired, before any validation: raw payload plus a
/// descriptor of where it came from (URL, "stdin", or a batch line).
pub struct RawDocument {
    pub html: String,
    pub source: String,
}

impl RawDocument {
    pub fn new(html: String, source: impl Into<String>) -> Self {
        Self {
            html,
            source: source.into(),
        }
    }
}

/// Retrieval of a URL into raw document text. Absence covers every failure
/// mode: unreachable host, error status, undecodable body.
#[async_trait]
pub trait DocumentFetcher {
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// Default fetcher over HTTP(S). Retry and backoff, if ever added, belong
/// here rather than in the orchestrator.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("request failed for {}: {}", url, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status {}", url, status);
            return None;
        }

        match response.text().await {
            Ok(body) => {
                debug!("fetched {} ({} bytes)", url, body.len());
                Some(body)
            }
            Err(e) => {
                warn!("could not decode body of {}: {}", url, e);
                None
            }
        }
    }
}
