use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;

use crate::source::{Fetch, FetchResponse};

/// reqwest-backed fetcher. No timeout and no retries: one request per call.
#[derive(Clone)]
pub struct HttpFetch {
    http: reqwest::Client,
}

impl HttpFetch {
    pub fn new() -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(concat!("pmkt/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { http })
    }
}

/// Reason phrase for `status`, or the bare code when none is registered.
fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

#[async_trait]
impl Fetch for HttpFetch {
    async fn get(&self, url: &str) -> reqwest::Result<FetchResponse> {
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        let status_text = status_text(status);

        // the body of a failed response is never decoded
        let body = if status.is_success() {
            resp.text().await?
        } else {
            String::new()
        };

        Ok(FetchResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
