mod config;
mod db;
mod directory;
mod errors;
mod llm_client;
mod models;
mod routes;
mod selection;
mod state;
mod store;
mod votes;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::directory::TmdbClient;
use crate::routes::build_router;
use crate::selection::orchestrator::Selector;
use crate::selection::ranking::RankingAdapter;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("kmk_api={},tower_http={}", config.rust_log, config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting KMK API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize the celebrity directory
    if config.tmdb_api_token.is_none() {
        warn!("TMDB_API_TOKEN is not set; selections will fail with 502 until it is");
    }
    let directory = TmdbClient::new(config.tmdb_base_url.clone(), config.tmdb_api_token.clone())?;
    info!("Directory client initialized ({})", config.tmdb_base_url);

    // Initialize ranking (disabled without OPENAI_API_KEY)
    let ranking = RankingAdapter::from_api_key(config.openai_api_key.clone())?;
    if ranking.is_enabled() {
        info!("Ranking enabled (model: {})", llm_client::MODEL);
    } else {
        info!("Ranking disabled; using the sampler's first three picks");
    }

    let selector = Selector::new(Arc::new(directory), config.pipeline.clone(), ranking);
    let policy = selector.config();
    info!(
        "Selection policy: {:?} ages, salt '{}', pages {:?}",
        policy.age_policy, policy.seed_version_salt, policy.pages
    );

    // Build app state
    let state = AppState {
        db,
        selector: Arc::new(selector),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
