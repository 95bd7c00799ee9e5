use serde::Deserialize;

use crate::gamma::{CLOB_API_URL, GAMMA_API_URL};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub gamma_host: String,
    // Not used by any current view, kept configurable alongside the gamma host.
    pub clob_host: String,

    pub events_limit: u32,
    pub comments_limit: u32,
    pub visible_comments: usize,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::load(config::Environment::default())
    }

    fn load(env: config::Environment) -> anyhow::Result<Self> {
        let c = config::Config::builder()
            .set_default("gamma_host", GAMMA_API_URL)?
            .set_default("clob_host", CLOB_API_URL)?
            .set_default("events_limit", 25_i64)?
            .set_default("comments_limit", 25_i64)?
            .set_default("visible_comments", 5_i64)?
            .add_source(env)
            .build()?;
        Ok(c.try_deserialize()?)
    }
}
