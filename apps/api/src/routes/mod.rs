pub mod briefs;
pub mod candidates;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Brief API
        .route(
            "/api/v1/briefs",
            post(briefs::handle_create_brief).get(briefs::handle_list_briefs),
        )
        .route(
            "/api/v1/briefs/:id",
            get(briefs::handle_get_brief).delete(briefs::handle_delete_brief),
        )
        // Candidate API
        .route(
            "/api/v1/candidates",
            post(candidates::handle_create_candidate).get(candidates::handle_list_candidates),
        )
        .route(
            "/api/v1/candidates/upload",
            post(candidates::handle_upload_candidate),
        )
        .route("/api/v1/candidates/:id", get(candidates::handle_get_candidate))
        .route(
            "/api/v1/candidates/:id/questions",
            post(candidates::handle_generate_questions),
        )
        .route(
            "/api/v1/candidates/:id/evaluation",
            post(candidates::handle_submit_evaluation),
        )
        .route(
            "/api/v1/candidates/:id/finalize",
            post(candidates::handle_finalize),
        )
        .with_state(state)
}
