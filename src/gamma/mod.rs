//! Polymarket Gamma API: entity schemas, validation and the fetch client.

pub mod client;
pub mod error;
pub mod schema;
pub mod types;

#[cfg(test)]
pub(crate) mod fixtures;

pub use client::{
    CommentListOptions, EventListOptions, GammaClient, MarketListOptions, PageOptions,
    CLOB_API_URL, GAMMA_API_URL,
};
pub use types::{Comment, Event, Market, Tag};
