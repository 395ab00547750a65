mod config;
mod db;
mod embedding;
mod errors;
mod intake;
mod llm_client;
mod models;
mod process;
mod questions;
mod routes;
mod scoring;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::embedding::HttpEmbedder;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scoring::ScoreWeights;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("hirelens_api={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Hirelens API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize embedding backend
    let embedder = Arc::new(HttpEmbedder::new(config.embeddings_url.clone()));
    info!("Embedding client initialized ({})", config.embeddings_url);

    // Process-wide score weights; the default table is validated by tests
    let weights = ScoreWeights::default();
    info!(
        "Score weights: skills {:.0}%, experience {:.0}%, education {:.0}%, culture {:.0}%, interview {:.0}%",
        weights.skills * 100.0,
        weights.experience * 100.0,
        weights.education * 100.0,
        weights.culture * 100.0,
        weights.interview * 100.0
    );

    // Build app state
    let state = AppState {
        db,
        llm,
        embedder,
        weights,
        config: config.clone(),
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
