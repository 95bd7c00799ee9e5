pub mod http;

use async_trait::async_trait;

/// Raw outcome of a single GET, before any JSON handling.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

/// Network fetch capability used by the Gamma client (reqwest in production, mocks in tests)
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Issue exactly one GET for `url`. Non-2xx statuses are returned, not raised.
    async fn get(&self, url: &str) -> reqwest::Result<FetchResponse>;
}

pub use http::HttpFetch;
