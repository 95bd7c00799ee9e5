mod config;
mod gamma;
mod source;
mod state;
mod view;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::gamma::{
    CommentListOptions, EventListOptions, GammaClient, MarketListOptions, PageOptions,
};
use crate::source::HttpFetch;
use crate::state::{AppState, View};

#[derive(Debug, Parser)]
#[command(name = "pmkt", version, about = "Rich terminal UI for Polymarket")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Trending active events (default)
    Events,
    /// One event with its markets and latest comments
    Event { id: String },
    Markets {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long)]
        active: Option<bool>,
    },
    Market { id: String },
    Search { query: String },
    Tags,
    Tag { slug: String },
    /// Events carrying a tag
    TagEvents {
        slug: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Comments on an Event, Series or market
    Comments {
        entity_type: String,
        entity_id: String,
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(long)]
        ascending: Option<bool>,
    },
}

type Client = GammaClient<HttpFetch>;

fn print(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let s = Settings::from_env()?;
    let client = GammaClient::new(HttpFetch::new()?, s.gamma_host.clone(), s.clob_host.clone());
    tracing::debug!(gamma = client.gamma_url(), clob = client.clob_url(), "client ready");

    match cli.command.unwrap_or(Command::Events) {
        Command::Events => show_events(&client, &s).await,
        Command::Event { id } => show_event(&client, &s, &id).await?,
        Command::Markets { limit, offset, active } => {
            let options = MarketListOptions { limit, offset, active };
            let markets = client.get_markets(&options).await?;
            tracing::info!(count = markets.len(), "markets loaded");
            print(view::render_markets("Markets", &markets));
        }
        Command::Market { id } => {
            let market = client.get_market(&id).await?;
            print(view::render_markets("Market", std::slice::from_ref(&market)));
        }
        Command::Search { query } => {
            let markets = client.search_markets(&query).await?;
            tracing::info!(count = markets.len(), query = %query, "search finished");
            print(view::render_markets(&format!("Search: {query}"), &markets));
        }
        Command::Tags => print(view::render_tags(&client.get_tags().await?)),
        Command::Tag { slug } => match client.get_tag(&slug).await {
            Ok(tag) => print(view::render_tags(std::slice::from_ref(&tag))),
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "tag lookup failed");
                println!("Tag {slug} unavailable: {e}");
            }
        },
        Command::TagEvents { slug, limit, offset } => {
            let events = client
                .get_events_by_tag(&slug, &PageOptions { limit, offset })
                .await?;
            let mut state = AppState::default();
            state.set_events(events);
            print(view::render_events(&state));
        }
        Command::Comments {
            entity_type,
            entity_id,
            limit,
            offset,
            ascending,
        } => {
            let mut options = CommentListOptions::new(entity_type, entity_id);
            if let Some(limit) = limit {
                options = options.limit(limit);
            }
            if let Some(offset) = offset {
                options = options.offset(offset);
            }
            if let Some(ascending) = ascending {
                options = options.ascending(ascending);
            }
            let comments = client.get_comments(&options).await?;
            print(view::render_comments(&comments, chrono::Utc::now()));
        }
    }

    Ok(())
}

async fn show_events(client: &Client, s: &Settings) {
    let mut state = AppState::default();
    state.set_view(View::Events);
    state.set_loading(true);
    state.set_error(None);

    let options = EventListOptions {
        limit: Some(s.events_limit),
        active: Some(true),
        closed: Some(false),
        ascending: Some(false),
        ..Default::default()
    };
    match client.get_events(&options).await {
        Ok(events) => {
            tracing::info!(count = events.len(), "events loaded");
            state.set_events(events);
        }
        Err(e) => {
            if e.is_shape_error() {
                tracing::warn!(error = %e, "events payload did not match the expected shape");
            } else {
                tracing::warn!(error = %e, "events fetch failed");
            }
            state.set_error(Some(e.to_string()));
        }
    }
    state.set_loading(false);

    print(view::render_header(state.view));
    print(view::render_events(&state));
}

async fn show_event(client: &Client, s: &Settings, id: &str) -> Result<()> {
    let comments_options = CommentListOptions::new("Event", id)
        .limit(s.comments_limit)
        .ascending(false);

    // independent requests, issued together
    let (event, comments) = tokio::try_join!(
        client.get_event(id),
        client.get_comments(&comments_options)
    )?;
    tracing::info!(markets = event.market_count(), comments = comments.len(), "event loaded");

    let mut state = AppState::default();
    state.select_event(Some(event));
    print(view::render_header(state.view));
    print(view::render_event_detail(
        &state,
        &comments,
        s.visible_comments,
        chrono::Utc::now(),
    ));
    Ok(())
}
