//! Outbound HTTP seam for the search gateway.
//!
//! The gateway talks to the wire through [`SearchTransport`] so tests can
//! substitute a scripted transport and count upstream calls.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header;
use thiserror::Error;

use crate::models::PropertySearchBody;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("connection failed: {0}")]
    Connection(String),
}

/// A received upstream response, decoded far enough for classification:
/// status line, lower-cased headers, and the raw body text.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Issues `POST url` with a JSON body and bearer auth. Returns the raw
    /// response whatever its status; `Err` means no response was received.
    async fn post_search(
        &self,
        url: &str,
        api_key: &str,
        body: &PropertySearchBody,
    ) -> Result<RawResponse, TransportError>;
}

/// `reqwest`-backed transport. No retries and no timeout of its own; the
/// caller's surrounding timeout, if any, is external to this layer.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .user_agent("immoteur-rs/0.1")
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

#[async_trait]
impl SearchTransport for HttpTransport {
    async fn post_search(
        &self,
        url: &str,
        api_key: &str,
        body: &PropertySearchBody,
    ) -> Result<RawResponse, TransportError> {
        // The gateway owns caching; keep intermediaries out of it.
        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .header(header::ACCEPT, "application/json")
            .header(header::CACHE_CONTROL, "no-store")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let final_url = response.url().to_string();
        let mut headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_ascii_lowercase(), value.to_string());
            }
        }
        let body = response.text().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            url: final_url,
            headers,
            body,
        })
    }
}
