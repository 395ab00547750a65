use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::embedding::Embedder;
use crate::llm_client::LlmClient;
use crate::scoring::ScoreWeights;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    /// Pluggable embedding backend used for skill matching.
    pub embedder: Arc<dyn Embedder>,
    /// Process-wide weight table; validated at startup, read-only afterward.
    pub weights: ScoreWeights,
    pub config: Config,
}
