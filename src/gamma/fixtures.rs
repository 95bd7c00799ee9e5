//! Upstream-shaped JSON payloads shared by the gamma tests.

use serde_json::{json, Value};

pub fn market() -> Value {
    json!({
        "id": "12345",
        "question": "Will Bitcoin reach $100k by end of 2025?",
        "conditionId": "condition-12345",
        "slug": "bitcoin-100k-2025",
        "endDate": "2025-12-31T23:59:59Z",
        "liquidity": "125000",
        "volume": "500000",
        "volume24hr": 25000,
        "outcomes": ["Yes", "No"],
        "outcomePrices": ["0.42", "0.58"],
        "active": true,
    })
}

pub fn market2() -> Value {
    json!({
        "id": "67890",
        "question": "Will the Fed cut rates in Q1 2025?",
        "conditionId": "condition-67890",
        "slug": "fed-rates-q1-2025",
        "endDate": "2025-03-31T23:59:59Z",
        "liquidity": "89000",
        "volume": "200000",
        "volume24hr": 15000,
        "outcomes": ["Yes", "No"],
        "outcomePrices": ["0.65", "0.35"],
        "active": true,
    })
}

pub fn markets() -> Value {
    json!([market(), market2()])
}

pub fn invalid_market() -> Value {
    json!({
        "id": 12345,
        "question": "Invalid market",
    })
}

/// Event as the events endpoint returns it: second market has string-encoded arrays.
pub fn event() -> Value {
    let mut second = market2();
    second["outcomes"] = json!("[\"Yes\", \"No\"]");
    second["outcomePrices"] = json!("[\"0.65\", \"0.35\"]");

    json!({
        "id": "ev-100",
        "ticker": "btc-2025",
        "slug": "bitcoin-price-2025",
        "title": "Bitcoin price 2025",
        "description": null,
        "startDate": "2025-01-01T00:00:00Z",
        "endDate": "2025-12-31T23:59:59Z",
        "active": true,
        "closed": false,
        "liquidity": 214000.5,
        "volume": 1234567.89,
        "volume24hr": null,
        "commentCount": 12,
        "markets": [market(), second],
    })
}

pub fn events() -> Value {
    json!([
        event(),
        { "id": "ev-200", "title": "Fed decision", "volume": 5400.25, "markets": [] },
    ])
}

pub fn tags() -> Value {
    json!([
        { "id": "tag-1", "slug": "politics", "label": "Politics", "name": "Politics" },
        { "id": "tag-2", "slug": "crypto", "label": "Crypto", "name": "Cryptocurrency" },
        { "id": "tag-3", "slug": "sports", "label": "Sports", "name": "Sports" },
    ])
}

pub fn invalid_tag() -> Value {
    json!({ "id": "123", "label": "Invalid Tag" })
}

pub fn comments() -> Value {
    json!([
        {
            "id": "comment-123",
            "body": "This is a test comment about the market",
            "parentEntityType": "Event",
            "parentEntityID": 12345,
            "userAddress": "0x1234567890abcdef1234567890abcdef12345678",
            "createdAt": "2024-01-15T10:30:00Z",
            "updatedAt": "2024-01-15T10:30:00Z",
            "profile": {
                "name": "John Doe",
                "pseudonym": "johnd",
                "bio": "Crypto enthusiast",
                "profileImage": "https://example.com/avatar.png",
            },
            "reactionCount": 5,
            "reportCount": 0,
        },
        {
            "id": "comment-456",
            "body": "Another insightful comment",
            "parentEntityType": "Event",
            "parentEntityID": 12345,
            "userAddress": "0xabcdef1234567890abcdef1234567890abcdef12",
            "createdAt": "2024-01-14T15:45:00Z",
            "updatedAt": "2024-01-14T15:45:00Z",
            "profile": {
                "name": null,
                "pseudonym": "anon_user",
                "bio": null,
                "profileImage": null,
            },
            "reactionCount": 2,
            "reportCount": 0,
        },
        {
            "id": "comment-789",
            "body": "Great prediction market!",
            "parentEntityType": "Event",
            "parentEntityID": 12345,
            "userAddress": "0x9876543210fedcba9876543210fedcba98765432",
            "createdAt": "2024-01-13T09:00:00Z",
            "updatedAt": "2024-01-13T09:00:00Z",
            "profile": null,
            "reactionCount": 0,
            "reportCount": 0,
        },
    ])
}

pub fn invalid_comment() -> Value {
    json!({ "body": "Invalid comment without id" })
}
