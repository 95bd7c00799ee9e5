use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::{decode_json_string, Entity, Field, Kind, Schema};

// Field tables. Presence is chosen per field: ids stay required, Event/Comment
// metadata may arrive as null, and Market optionals may be absent but not null.

pub const MARKET_FIELDS: &[Field] = &[
    Field::required("id", Kind::String),
    Field::required("question", Kind::String),
    Field::required("conditionId", Kind::String),
    Field::required("slug", Kind::String),
    Field::optional("endDate", Kind::String),
    Field::optional("liquidity", Kind::String),
    Field::required("volume", Kind::String),
    Field::optional("volume24hr", Kind::Number),
    Field::required("outcomes", Kind::StringArray).preprocess(decode_json_string),
    Field::required("outcomePrices", Kind::StringArray).preprocess(decode_json_string),
    Field::required("active", Kind::Bool),
];

pub const EVENT_FIELDS: &[Field] = &[
    Field::required("id", Kind::String),
    Field::nullable("ticker", Kind::String),
    Field::nullable("slug", Kind::String),
    Field::nullable("title", Kind::String),
    Field::nullable("description", Kind::String),
    Field::nullable("startDate", Kind::String),
    Field::nullable("endDate", Kind::String),
    Field::nullable("creationDate", Kind::String),
    Field::nullable("image", Kind::String),
    Field::nullable("active", Kind::Bool),
    Field::nullable("closed", Kind::Bool),
    Field::nullable("archived", Kind::Bool),
    Field::nullable("featured", Kind::Bool),
    Field::nullable("liquidity", Kind::Number),
    Field::nullable("volume", Kind::Number),
    Field::nullable("volume24hr", Kind::Number),
    Field::nullable("markets", Kind::ArrayOf(MARKET_FIELDS)),
];

pub const TAG_FIELDS: &[Field] = &[
    Field::optional("id", Kind::String),
    Field::required("slug", Kind::String),
    Field::optional("label", Kind::String),
    Field::optional("name", Kind::String),
];

pub const PROFILE_FIELDS: &[Field] = &[
    Field::nullable("name", Kind::String),
    Field::nullable("pseudonym", Kind::String),
    Field::nullable("bio", Kind::String),
    Field::nullable("profileImage", Kind::String),
];

pub const COMMENT_FIELDS: &[Field] = &[
    Field::required("id", Kind::String),
    Field::nullable("body", Kind::String),
    Field::nullable("parentEntityType", Kind::String),
    Field::nullable("parentEntityID", Kind::Number),
    Field::nullable("userAddress", Kind::String),
    Field::nullable("createdAt", Kind::String),
    Field::nullable("updatedAt", Kind::String),
    Field::nullable("profile", Kind::Object(PROFILE_FIELDS)),
    Field::nullable("reactionCount", Kind::Number),
    Field::nullable("reportCount", Kind::Number),
];

/// Gamma market. Unmodelled upstream keys are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: String,
    pub question: String,
    pub condition_id: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<String>,
    pub volume: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume24hr: Option<f64>,
    pub outcomes: Vec<String>,
    pub outcome_prices: Vec<String>,
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Market {
    /// Price quoted for the outcome at `idx`, if upstream sent one.
    pub fn price_at(&self, idx: usize) -> Option<&str> {
        self.outcome_prices.get(idx).map(String::as_str)
    }
}

impl Entity for Market {
    const SCHEMA: Schema = Schema {
        entity: "market",
        fields: MARKET_FIELDS,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume24hr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markets: Option<Vec<Market>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    pub fn market_count(&self) -> usize {
        self.markets.as_ref().map_or(0, Vec::len)
    }
}

impl Entity for Event {
    const SCHEMA: Schema = Schema {
        entity: "event",
        fields: EVENT_FIELDS,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Tag {
    const SCHEMA: Schema = Schema {
        entity: "tag",
        fields: TAG_FIELDS,
    };
}

/// Commenter profile embedded in a comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudonym: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_entity_type: Option<String>,
    #[serde(rename = "parentEntityID", default, skip_serializing_if = "Option::is_none")]
    pub parent_entity_id: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_count: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Comment {
    const SCHEMA: Schema = Schema {
        entity: "comment",
        fields: COMMENT_FIELDS,
    };
}
