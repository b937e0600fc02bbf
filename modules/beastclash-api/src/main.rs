use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use beastclash_arena::{BattleOracle, OutcomeService};
use beastclash_common::{Config, PicsumResolver};

mod rest;

pub struct AppState {
    pub oracle: Arc<dyn OutcomeService>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("beastclash=info".parse()?))
        .init();

    let config = Config::from_env();

    let oracle = BattleOracle::new(&config, Arc::new(PicsumResolver));
    let state = Arc::new(AppState {
        oracle: Arc::new(oracle),
    });

    let app = Router::new()
        .route("/health", get(rest::health))
        .route("/api/battle", post(rest::api_battle))
        .route("/api/matchup", post(rest::api_matchup))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!(addr = %addr, "beastclash api listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
