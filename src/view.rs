//! Plain-text renderers for the terminal. Every function is pure: state in, lines out.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::gamma::{Comment, Market, Tag};
use crate::state::{AppState, View};

const TITLE_WIDTH: usize = 56;

pub fn render_header(view: View) -> Vec<String> {
    let tabs = [
        (View::Events, "e", "Events"),
        (View::Portfolio, "p", "Portfolio"),
        (View::Search, "s", "Search"),
    ];
    let tabs: Vec<String> = tabs
        .iter()
        .map(|(v, key, label)| {
            let marker = if *v == view { "*" } else { " " };
            format!("{marker}[{key}] {label}")
        })
        .collect();
    vec![
        format!("PMKT | Polymarket Terminal    {}", tabs.join("  ")),
        String::new(),
    ]
}

pub fn render_events(state: &AppState) -> Vec<String> {
    let mut out = Vec::new();

    if state.events.is_empty() {
        out.push("Trending Events".to_string());
        if state.is_loading {
            out.push("Loading events...".to_string());
        } else if let Some(err) = &state.error {
            out.push(format!("Error: {err}"));
            out.push("Run the command again to retry".to_string());
        } else {
            out.push("No events found".to_string());
        }
        return out;
    }

    out.push(format!("Trending Events ({})", state.events.len()));
    out.push(String::new());

    for (i, event) in state.events.iter().enumerate() {
        let marker = if i == state.selected_index { '>' } else { ' ' };
        let title = event.title.as_deref().filter(|t| !t.is_empty()).unwrap_or("Untitled Event");
        let count = event.market_count();
        let unit = if count == 1 { "mkt" } else { "mkts" };
        out.push(format!(
            "{marker} {title:<w$.w$} {count:>4} {unit:<4} {vol:>8} {date:>14}",
            w = TITLE_WIDTH,
            vol = format_volume(event.volume),
            date = format_end_date(event.end_date.as_deref()),
        ));
    }
    out
}

/// Markets and comment window of the selected event.
pub fn render_event_detail(
    state: &AppState,
    comments: &[Comment],
    visible: usize,
    now: DateTime<Utc>,
) -> Vec<String> {
    let Some(event) = &state.selected_event else {
        return vec!["No event selected".to_string()];
    };
    let markets = event.markets.as_deref().unwrap_or_default();

    let mut out = vec![
        event
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled Event".to_string()),
        format!(
            "End: {}  Volume: {}  Markets: {}",
            format_long_date(event.end_date.as_deref()),
            format_volume(event.volume),
            markets.len()
        ),
        String::new(),
    ];

    if markets.is_empty() {
        out.push("No markets for this event".to_string());
    }
    for market in markets {
        out.push(market.question.clone());
        out.push(format!("  {}", quote_line(market)));
    }

    out.push(String::new());
    out.push(format!("Comments ({})", comments.len()));
    if comments.is_empty() {
        out.push("No comments yet".to_string());
        return out;
    }

    let start = state.comment_scroll.min(comments.len());
    let end = start.saturating_add(visible).min(comments.len());
    if start > 0 {
        out.push(format!("  ↑ {start} more above"));
    }
    for comment in &comments[start..end] {
        out.extend(comment_lines(comment, now));
    }
    if end < comments.len() {
        out.push(format!("  ↓ {} more below", comments.len() - end));
    }
    out
}

pub fn render_markets(title: &str, markets: &[Market]) -> Vec<String> {
    if markets.is_empty() {
        return vec![title.to_string(), "No markets found".to_string()];
    }

    let mut out = vec![format!("{title} ({})", markets.len()), String::new()];
    for market in markets {
        let status = if market.active { "" } else { "  (inactive)" };
        out.push(format!(
            "{id:>8}  {q:<w$.w$}  Yes {yes:>4}  Vol {vol:>8}{status}",
            id = market.id,
            q = market.question,
            w = TITLE_WIDTH,
            yes = format_price(market.price_at(0).unwrap_or("0")),
            vol = format_volume_str(Some(&market.volume)),
        ));
    }
    out
}

pub fn render_tags(tags: &[Tag]) -> Vec<String> {
    if tags.is_empty() {
        return vec!["Tags".to_string(), "No tags found".to_string()];
    }

    let mut out = vec![format!("Tags ({})", tags.len()), String::new()];
    for tag in tags {
        let label = tag.label.as_deref().or(tag.name.as_deref()).unwrap_or("");
        out.push(format!("{:<28} {}", tag.slug, label));
    }
    out
}

pub fn render_comments(comments: &[Comment], now: DateTime<Utc>) -> Vec<String> {
    let mut out = vec![format!("Comments ({})", comments.len())];
    if comments.is_empty() {
        out.push("No comments yet".to_string());
    }
    for comment in comments {
        out.extend(comment_lines(comment, now));
    }
    out
}

fn quote_line(market: &Market) -> String {
    let yes = market.price_at(0).unwrap_or("0");
    let no = market.price_at(1).unwrap_or("0");
    format!(
        "Yes: {} ({})  No: {} ({})  Vol: {}",
        format_price(yes),
        format_cost(yes),
        format_price(no),
        format_cost(no),
        format_volume_str(Some(&market.volume)),
    )
}

fn comment_lines(comment: &Comment, now: DateTime<Utc>) -> Vec<String> {
    let mut head = format!(
        "{} {}",
        author_name(comment),
        relative_time(comment.created_at.as_deref(), now)
    );
    if let Some(n) = comment.reaction_count.filter(|n| *n > 0.0) {
        head.push_str(&format!(" +{n}"));
    }
    vec![
        head.trim_end().to_string(),
        format!("  {}", comment.body.as_deref().unwrap_or("")),
    ]
}

pub fn author_name(comment: &Comment) -> String {
    let profile = comment.profile.as_ref();
    let non_empty = |s: Option<&String>| s.filter(|s| !s.is_empty()).cloned();

    if let Some(p) = non_empty(profile.and_then(|p| p.pseudonym.as_ref())) {
        return p;
    }
    if let Some(n) = non_empty(profile.and_then(|p| p.name.as_ref())) {
        return n;
    }
    match comment.user_address.as_deref() {
        Some(addr) if addr.len() > 10 && addr.is_ascii() => {
            format!("{}...{}", &addr[..6], &addr[addr.len() - 4..])
        }
        Some(addr) if !addr.is_empty() => addr.to_string(),
        _ => "Anonymous".to_string(),
    }
}

pub fn format_volume(vol: Option<f64>) -> String {
    match vol {
        Some(v) if v.is_finite() => {
            if v >= 1_000_000.0 {
                format!("${:.1}M", v / 1_000_000.0)
            } else if v >= 1_000.0 {
                format!("${:.0}K", v / 1_000.0)
            } else {
                format!("${v:.0}")
            }
        }
        _ => "$0".to_string(),
    }
}

/// Market volumes arrive as decimal strings.
pub fn format_volume_str(vol: Option<&str>) -> String {
    format_volume(vol.and_then(|v| v.trim().parse::<f64>().ok()))
}

pub fn format_price(price: &str) -> String {
    match parse_decimal(price) {
        Some(p) => format!("{}%", (p * Decimal::ONE_HUNDRED).round_dp(0)),
        None => "0%".to_string(),
    }
}

pub fn format_cost(price: &str) -> String {
    match parse_decimal(price) {
        Some(p) => format!("${:.2}", p.round_dp(2)),
        None => "$0.00".to_string(),
    }
}

pub fn format_end_date(date: Option<&str>) -> String {
    format_date(date, "%b %-d, %Y")
}

fn format_long_date(date: Option<&str>) -> String {
    format_date(date, "%a, %b %-d, %Y")
}

fn format_date(date: Option<&str>, fmt: &str) -> String {
    let Some(raw) = date.filter(|d| !d.is_empty()) else {
        return "No end date".to_string();
    };
    match parse_date(raw) {
        Some(d) => d.format(fmt).to_string(),
        None => raw.to_string(),
    }
}

/// `just now`, `5m ago`, `3h ago`, `2d ago`, then a short calendar date.
pub fn relative_time(date: Option<&str>, now: DateTime<Utc>) -> String {
    let Some(at) = date.and_then(parse_date) else {
        return String::new();
    };
    let elapsed = now.signed_duration_since(at);
    let mins = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if mins < 1 {
        "just now".to_string()
    } else if mins < 60 {
        format!("{mins}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        at.format("%b %-d").to_string()
    }
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    s.trim().parse::<Decimal>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamma::fixtures;
    use crate::gamma::schema::{validate, validate_list};
    use crate::gamma::Event;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn comments() -> Vec<Comment> {
        validate_list(fixtures::comments()).unwrap()
    }

    fn comment(raw: serde_json::Value) -> Comment {
        validate(raw).unwrap()
    }

    #[test]
    fn volume_formatting() {
        assert_eq!(format_volume(Some(1_234_567.89)), "$1.2M");
        assert_eq!(format_volume(Some(125_000.0)), "$125K");
        assert_eq!(format_volume(Some(42.3)), "$42");
        assert_eq!(format_volume(None), "$0");
        assert_eq!(format_volume_str(Some("500000")), "$500K");
        assert_eq!(format_volume_str(Some("abc")), "$0");
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price("0.42"), "42%");
        assert_eq!(format_price("1"), "100%");
        assert_eq!(format_price("nan?"), "0%");
        assert_eq!(format_cost("0.42"), "$0.42");
        assert_eq!(format_cost("1"), "$1.00");
        assert_eq!(format_cost(""), "$0.00");
        assert_eq!(parse_decimal(" 0.58 "), Some(dec!(0.58)));
    }

    #[test]
    fn end_date_formatting() {
        assert_eq!(format_end_date(Some("2025-12-31T23:59:59Z")), "Dec 31, 2025");
        assert_eq!(format_end_date(Some("2025-03-01")), "Mar 1, 2025");
        assert_eq!(format_end_date(None), "No end date");
        assert_eq!(format_end_date(Some("someday")), "someday");
        assert_eq!(format_long_date(Some("2025-12-31T23:59:59Z")), "Wed, Dec 31, 2025");
    }

    #[test]
    fn relative_times() {
        assert_eq!(relative_time(Some("2024-01-15T11:59:30Z"), now()), "just now");
        assert_eq!(relative_time(Some("2024-01-15T11:55:00Z"), now()), "5m ago");
        assert_eq!(relative_time(Some("2024-01-15T09:00:00Z"), now()), "3h ago");
        assert_eq!(relative_time(Some("2024-01-13T09:00:00Z"), now()), "2d ago");
        assert_eq!(relative_time(Some("2024-01-05T09:00:00Z"), now()), "Jan 5");
        assert_eq!(relative_time(None, now()), "");
    }

    #[test]
    fn author_fallbacks() {
        let c = comments();
        assert_eq!(author_name(&c[0]), "johnd");
        assert_eq!(author_name(&c[1]), "anon_user");
        assert_eq!(author_name(&c[2]), "0x9876...5432");

        let named = comment(json!({ "id": "a", "profile": { "name": "Jane", "pseudonym": "" } }));
        assert_eq!(author_name(&named), "Jane");
        assert_eq!(author_name(&comment(json!({ "id": "b" }))), "Anonymous");
    }

    #[test]
    fn events_states() {
        let mut state = AppState::default();
        state.set_loading(true);
        assert_eq!(render_events(&state)[1], "Loading events...");

        state.set_loading(false);
        state.set_error(Some("Failed to fetch events: Bad Gateway".into()));
        assert_eq!(render_events(&state)[1], "Error: Failed to fetch events: Bad Gateway");

        state.set_error(None);
        assert_eq!(render_events(&state)[1], "No events found");
    }

    #[test]
    fn events_rows() {
        let mut state = AppState::default();
        state.set_events(validate_list(fixtures::events()).unwrap());
        let lines = render_events(&state);

        assert_eq!(lines[0], "Trending Events (2)");
        assert!(lines[2].starts_with("> Bitcoin price 2025"));
        assert!(lines[2].contains("2 mkts"));
        assert!(lines[2].contains("$1.2M"));
        assert!(lines[2].ends_with("Dec 31, 2025"));
        assert!(lines[3].starts_with("  Fed decision"));
        assert!(lines[3].contains("0 mkts"));
        assert!(lines[3].ends_with("No end date"));
    }

    #[test]
    fn event_detail_lists_markets_and_comments() {
        let mut state = AppState::default();
        let event: Event = validate(fixtures::event()).unwrap();
        state.select_event(Some(event));

        let lines = render_event_detail(&state, &comments(), 2, now());
        assert_eq!(lines[0], "Bitcoin price 2025");
        assert_eq!(lines[1], "End: Wed, Dec 31, 2025  Volume: $1.2M  Markets: 2");
        assert!(lines.contains(&"  Yes: 42% ($0.42)  No: 58% ($0.58)  Vol: $500K".to_string()));
        assert!(lines.contains(&"Comments (3)".to_string()));
        assert!(lines.contains(&"johnd 1h ago +5".to_string()));
        assert!(lines.contains(&"  ↓ 1 more below".to_string()));

        state.scroll_comments_down(3, 2);
        let lines = render_event_detail(&state, &comments(), 2, now());
        assert!(lines.contains(&"  ↑ 1 more above".to_string()));
        assert!(lines.contains(&"0x9876...5432 2d ago".to_string()));
        assert!(!lines.iter().any(|l| l.contains("more below")));
    }

    #[test]
    fn event_detail_with_huge_window_shows_everything() {
        let mut state = AppState::default();
        state.select_event(Some(validate(fixtures::event()).unwrap()));
        state.scroll_comments_down(3, 1);

        let lines = render_event_detail(&state, &comments(), usize::MAX, now());
        assert!(lines.contains(&"  ↑ 1 more above".to_string()));
        assert!(lines.contains(&"0x9876...5432 2d ago".to_string()));
        assert!(!lines.iter().any(|l| l.contains("more below")));
    }

    #[test]
    fn event_detail_without_selection_or_data() {
        let state = AppState::default();
        assert_eq!(render_event_detail(&state, &[], 5, now()), vec!["No event selected"]);

        let mut state = AppState::default();
        state.select_event(Some(validate(json!({ "id": "ev-9" })).unwrap()));
        let lines = render_event_detail(&state, &[], 5, now());
        assert_eq!(lines[0], "Untitled Event");
        assert!(lines.contains(&"No markets for this event".to_string()));
        assert_eq!(lines.last().map(String::as_str), Some("No comments yet"));
    }

    #[test]
    fn markets_and_tags() {
        let markets: Vec<Market> = validate_list(fixtures::markets()).unwrap();
        let lines = render_markets("Markets", &markets);
        assert_eq!(lines[0], "Markets (2)");
        assert!(lines[2].contains("Yes  42%"));
        assert_eq!(render_markets("Search: zzz", &[])[1], "No markets found");

        let tags: Vec<Tag> = validate_list(fixtures::tags()).unwrap();
        let lines = render_tags(&tags);
        assert_eq!(lines[0], "Tags (3)");
        assert!(lines[3].starts_with("crypto"));
        assert!(lines[3].ends_with("Crypto"));
    }

    #[test]
    fn header_marks_current_view() {
        let line = &render_header(View::Events)[0];
        assert!(line.contains("*[e] Events"));
        assert!(line.contains(" [p] Portfolio"));
    }
}
