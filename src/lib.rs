pub mod appresult;
pub mod blocks;
pub mod config;
pub mod reddit;
pub mod roster;
pub mod slack;
pub mod subreddit;
pub mod whichroom;

use std::sync::Arc;

use anyhow::anyhow;
use axum::{debug_handler, extract::FromRef, routing::get, Router};
use serde_json::Value;
use tower_http::trace::TraceLayer;

pub use appresult::{AppError, AppResult};
use config::Config;
use reddit::RedditClient;
use roster::RosterStore;
use slack::{SigningSecret, SlackClient};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub slack: SlackClient,
    pub reddit: RedditClient,
    pub rosters: Arc<RosterStore>,
    pub signing_secret: SigningSecret,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<AppState> {
        Ok(
            AppState {
                slack: SlackClient::new(reqwest::Client::new(), &config.slack_token, &config.slack_api_url),
                reddit: RedditClient::new(config)?,
                rosters: Arc::new(RosterStore::new(config.roster_ttl)),
                signing_secret: SigningSecret(config.slack_signing_secret.clone()),
            }
        )
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))

        .merge(subreddit::router())
        .merge(whichroom::router())

        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

#[debug_handler]
async fn health() -> &'static str {
    "ok"
}

pub trait GetField {
    fn get_str_field(&self, field: &str) -> AppResult<String>;
}

impl GetField for Value {
    fn get_str_field(&self, field: &str) -> AppResult<String> {
        Ok(
            self.get(field)
            .ok_or(anyhow!("expected {field} in {self}"))?
            .as_str()
            .ok_or(anyhow!("expected {field} in {self} to be string"))?
            .to_owned()
        )
    }
}
