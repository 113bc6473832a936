use std::time::Duration;

use roombot::{app, config::Config, AppState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let app_state = AppState::new(&config)?;

    let sweep_every = (config.roster_ttl / 4).clamp(Duration::from_secs(1), Duration::from_secs(10 * 60));
    let sweeper = app_state.rosters.clone().spawn_sweeper(sweep_every);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!("Server started on {}", listener.local_addr()?);

    axum::serve(listener, app(app_state)).await?;
    sweeper.abort();
    Ok(())
}
