use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::types::Json as SqlJson;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::{JOB_DESCRIPTION_PROMPT_TEMPLATE, JOB_DESCRIPTION_SYSTEM};
use crate::models::brief::{BriefRow, JobDescription};
use crate::process::service::fetch_brief;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateBriefRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-text experience expectation fed to the LLM (e.g. "3-5 years").
    #[serde(default)]
    pub experience: Option<String>,
}

#[derive(Serialize)]
pub struct BriefResponse {
    pub brief: BriefRow,
}

/// POST /api/v1/briefs
/// Expands a recruiter brief into a structured job description and stores it.
pub async fn handle_create_brief(
    State(state): State<AppState>,
    Json(req): Json<CreateBriefRequest>,
) -> Result<(StatusCode, Json<BriefResponse>), AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Brief title is required".into()));
    }

    let prompt = JOB_DESCRIPTION_PROMPT_TEMPLATE
        .replace("{title}", req.title.trim())
        .replace("{description}", req.description.trim())
        .replace(
            "{experience}",
            req.experience.as_deref().unwrap_or("unspecified"),
        );

    let job: JobDescription = state
        .llm
        .call_json(&prompt, JOB_DESCRIPTION_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Job description generation failed: {e}")))?;

    if job.skills.is_empty() {
        return Err(AppError::Llm(
            "Job description generation returned no skills".into(),
        ));
    }

    let brief: BriefRow = sqlx::query_as(
        r#"
        INSERT INTO briefs (id, title, description, full_data, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, 'active', now(), now())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.title.trim())
    .bind(req.description.trim())
    .bind(SqlJson(&job))
    .fetch_one(&state.db)
    .await?;

    info!("Brief {} created: '{}'", brief.id, brief.title);
    Ok((StatusCode::CREATED, Json(BriefResponse { brief })))
}

/// GET /api/v1/briefs
pub async fn handle_list_briefs(
    State(state): State<AppState>,
) -> Result<Json<Vec<BriefRow>>, AppError> {
    let briefs: Vec<BriefRow> =
        sqlx::query_as("SELECT * FROM briefs ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;
    Ok(Json(briefs))
}

/// GET /api/v1/briefs/:id
pub async fn handle_get_brief(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BriefRow>, AppError> {
    Ok(Json(fetch_brief(&state.db, id).await?))
}

/// DELETE /api/v1/briefs/:id
/// Deletes the brief and cascades to its candidates and their appreciations.
pub async fn handle_delete_brief(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut tx = state.db.begin().await?;

    sqlx::query(
        "DELETE FROM appreciations WHERE candidate_id IN (SELECT id FROM candidates WHERE brief_id = $1)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM candidates WHERE brief_id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM briefs WHERE id = $1")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if deleted.rows_affected() == 0 {
        tx.rollback().await?;
        return Err(AppError::NotFound(format!("Brief {id} not found")));
    }
    tx.commit().await?;

    info!("Brief {id} deleted with its candidates");
    Ok(StatusCode::NO_CONTENT)
}
