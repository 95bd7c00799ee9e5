//! Gamma client error types.

use std::fmt;

use thiserror::Error;

use super::schema::ValidationError;

/// One client operation; its display form is the `<verb> <resource>` part of error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListMarkets,
    GetMarket,
    SearchMarkets,
    ListEvents,
    GetEvent,
    ListTags,
    GetTag,
    ListEventsByTag,
    ListComments,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Operation::ListMarkets => "fetch markets",
            Operation::GetMarket => "fetch market",
            Operation::SearchMarkets => "search markets",
            Operation::ListEvents => "fetch events",
            Operation::GetEvent => "fetch event",
            Operation::ListTags => "fetch tags",
            Operation::GetTag => "fetch tag",
            Operation::ListEventsByTag => "fetch events by tag",
            Operation::ListComments => "fetch comments",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// Non-2xx status. The body is never decoded.
    #[error("Failed to {operation}: {status_text}")]
    Transport {
        operation: Operation,
        status_text: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("Failed to {operation}: {source}")]
    Network {
        operation: Operation,
        source: reqwest::Error,
    },

    /// Body is not JSON.
    #[error("Failed to {operation}: malformed JSON body: {source}")]
    Decode {
        operation: Operation,
        source: serde_json::Error,
    },

    /// Body is JSON but does not match the entity schema.
    #[error("Failed to {operation}: {source}")]
    Validation {
        operation: Operation,
        source: ValidationError,
    },

    #[error("invalid query parameters: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),
}

impl ClientError {
    /// `true` when upstream answered but with data we could not accept.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, ClientError::Decode { .. } | ClientError::Validation { .. })
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
