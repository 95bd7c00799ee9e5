use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{ClientError, ClientResult, Operation};
use super::schema::{self, Entity};
use super::types::{Comment, Event, Market, Tag};
use crate::source::Fetch;

pub const GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";
pub const CLOB_API_URL: &str = "https://clob.polymarket.com";

pub const DEFAULT_COMMENTS_LIMIT: u32 = 25;

#[derive(Debug, Clone, Default, Serialize)]
pub struct MarketListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct EventListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascending: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PageOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Comments of one parent entity. `limit`/`offset` are always sent.
#[derive(Debug, Clone, Serialize)]
pub struct CommentListOptions {
    #[serde(rename = "parent_entity_type")]
    pub entity_type: String,
    #[serde(rename = "parent_entity_id")]
    pub entity_id: String,
    pub limit: u32,
    pub offset: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascending: Option<bool>,
}

impl CommentListOptions {
    pub fn new(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            limit: DEFAULT_COMMENTS_LIMIT,
            offset: 0,
            ascending: None,
        }
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn ascending(mut self, ascending: bool) -> Self {
        self.ascending = Some(ascending);
        self
    }
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    #[serde(rename = "_q")]
    q: &'a str,
}

#[derive(Serialize)]
struct TagEventsQuery<'a> {
    tag_slug: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
}

/// Read-only client for the Gamma REST API.
///
/// Every method performs exactly one GET, rejects non-2xx statuses before looking at
/// the body, and validates the JSON against the entity schema. No retries, no caching.
#[derive(Clone)]
pub struct GammaClient<F> {
    fetch: F,
    gamma_url: String,
    clob_url: String,
}

impl<F: Fetch> GammaClient<F> {
    pub fn new(fetch: F, gamma_url: impl Into<String>, clob_url: impl Into<String>) -> Self {
        Self {
            fetch,
            gamma_url: gamma_url.into().trim_end_matches('/').to_string(),
            clob_url: clob_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn gamma_url(&self) -> &str {
        &self.gamma_url
    }

    /// Configured CLOB host. None of the current operations call it.
    pub fn clob_url(&self) -> &str {
        &self.clob_url
    }

    pub async fn get_markets(&self, options: &MarketListOptions) -> ClientResult<Vec<Market>> {
        let url = self.url_with_query("/markets", options)?;
        self.fetch_list(Operation::ListMarkets, &url).await
    }

    pub async fn get_market(&self, id: &str) -> ClientResult<Market> {
        let url = self.url(&format!("/markets/{}", urlencoding::encode(id)));
        self.fetch_one(Operation::GetMarket, &url).await
    }

    /// Free-text market search. No match is an empty list, not an error.
    pub async fn search_markets(&self, query: &str) -> ClientResult<Vec<Market>> {
        let url = self.url_with_query("/markets", &SearchQuery { q: query })?;
        self.fetch_list(Operation::SearchMarkets, &url).await
    }

    pub async fn get_events(&self, options: &EventListOptions) -> ClientResult<Vec<Event>> {
        let url = self.url_with_query("/events", options)?;
        self.fetch_list(Operation::ListEvents, &url).await
    }

    pub async fn get_event(&self, id: &str) -> ClientResult<Event> {
        let url = self.url(&format!("/events/{}", urlencoding::encode(id)));
        self.fetch_one(Operation::GetEvent, &url).await
    }

    pub async fn get_tags(&self) -> ClientResult<Vec<Tag>> {
        let url = self.url("/tags");
        self.fetch_list(Operation::ListTags, &url).await
    }

    /// Upstream support for this route is not guaranteed; callers should treat failure as "unknown tag".
    pub async fn get_tag(&self, slug: &str) -> ClientResult<Tag> {
        let url = self.url(&format!("/tags/{}", urlencoding::encode(slug)));
        self.fetch_one(Operation::GetTag, &url).await
    }

    pub async fn get_events_by_tag(
        &self,
        tag_slug: &str,
        options: &PageOptions,
    ) -> ClientResult<Vec<Event>> {
        let query = TagEventsQuery {
            tag_slug,
            limit: options.limit,
            offset: options.offset,
        };
        let url = self.url_with_query("/events", &query)?;
        self.fetch_list(Operation::ListEventsByTag, &url).await
    }

    pub async fn get_comments(&self, options: &CommentListOptions) -> ClientResult<Vec<Comment>> {
        let url = self.url_with_query("/comments", options)?;
        self.fetch_list(Operation::ListComments, &url).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.gamma_url, path)
    }

    fn url_with_query<Q: Serialize>(&self, path: &str, query: &Q) -> ClientResult<String> {
        let qs = serde_urlencoded::to_string(query)?;
        if qs.is_empty() {
            Ok(self.url(path))
        } else {
            Ok(format!("{}?{}", self.url(path), qs))
        }
    }

    async fn fetch_one<T: Entity>(&self, operation: Operation, url: &str) -> ClientResult<T> {
        let value = self.fetch_json(operation, url).await?;
        schema::validate(value).map_err(|source| {
            warn!(%operation, issues = source.issues.len(), "response failed validation");
            ClientError::Validation { operation, source }
        })
    }

    async fn fetch_list<T: Entity>(&self, operation: Operation, url: &str) -> ClientResult<Vec<T>> {
        let value = self.fetch_json(operation, url).await?;
        let items = schema::validate_list(value).map_err(|source| {
            warn!(%operation, issues = source.issues.len(), "response failed validation");
            ClientError::Validation { operation, source }
        })?;
        debug!(%operation, count = items.len(), "gamma list decoded");
        Ok(items)
    }

    async fn fetch_json(&self, operation: Operation, url: &str) -> ClientResult<Value> {
        debug!(%operation, url = %url, "gamma request");

        let resp = self
            .fetch
            .get(url)
            .await
            .map_err(|source| ClientError::Network { operation, source })?;

        if !resp.ok() {
            warn!(%operation, status = resp.status, status_text = %resp.status_text, "gamma request failed");
            return Err(ClientError::Transport {
                operation,
                status_text: resp.status_text,
            });
        }

        resp.json()
            .map_err(|source| ClientError::Decode { operation, source })
    }
}
