use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake;
use crate::models::appreciation::AppreciationRow;
use crate::models::candidate::{CandidateView, CreateCandidateRequest};
use crate::process::service::{
    self, fetch_appreciations, fetch_appreciations_for, EvaluationInput,
};
use crate::process::stage::ProcessStage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CandidateListQuery {
    pub brief_id: Option<Uuid>,
    pub process_stage: Option<String>,
}

#[derive(Serialize)]
pub struct CandidateListResponse {
    pub candidates: Vec<CandidateView>,
    pub total: usize,
}

/// POST /api/v1/candidates
/// Creates a candidate from already-extracted CV text.
pub async fn handle_create_candidate(
    State(state): State<AppState>,
    Json(req): Json<CreateCandidateRequest>,
) -> Result<(StatusCode, Json<CandidateView>), AppError> {
    let row = service::create_candidate(&state, req).await?;
    let view = CandidateView::from_row(row, vec![])?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// POST /api/v1/candidates/upload
/// Multipart variant: `file` (PDF), `brief_id`, optional `name` (defaults to
/// the file stem).
pub async fn handle_upload_candidate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<CandidateView>), AppError> {
    let mut brief_id: Option<Uuid> = None;
    let mut name: Option<String> = None;
    let mut file_name: Option<String> = None;
    let mut pdf_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "file" => {
                file_name = field.file_name().map(|s| s.to_string());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read file field: {e}")))?;
                pdf_bytes = Some(bytes.to_vec());
            }
            "brief_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read brief_id: {e}")))?;
                brief_id = Some(
                    text.parse()
                        .map_err(|_| AppError::Validation("brief_id must be a UUID".into()))?,
                );
            }
            "name" => {
                name = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Could not read name field: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let brief_id =
        brief_id.ok_or_else(|| AppError::Validation("brief_id field is required".into()))?;
    let pdf_bytes =
        pdf_bytes.ok_or_else(|| AppError::Validation("file field is required".into()))?;
    let name = name
        .or_else(|| file_stem(file_name.as_deref()))
        .ok_or_else(|| AppError::Validation("name field is required".into()))?;

    let cv_text = intake::extract_pdf_text(&pdf_bytes)?;

    let row = service::create_candidate(
        &state,
        CreateCandidateRequest {
            brief_id,
            name,
            cv_text,
        },
    )
    .await?;
    let view = CandidateView::from_row(row, vec![])?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/v1/candidates?brief_id=&process_stage=
/// Ordered by final predictive score descending.
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(params): Query<CandidateListQuery>,
) -> Result<Json<CandidateListResponse>, AppError> {
    let stage = params
        .process_stage
        .as_deref()
        .map(ProcessStage::parse)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let rows = service::list_candidates(&state.db, params.brief_id, stage).await?;

    let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
    let mut by_candidate: HashMap<Uuid, Vec<AppreciationRow>> = HashMap::new();
    for appreciation in fetch_appreciations_for(&state.db, &ids).await? {
        by_candidate
            .entry(appreciation.candidate_id)
            .or_default()
            .push(appreciation);
    }

    let mut candidates = Vec::with_capacity(rows.len());
    for row in rows {
        let own = by_candidate.remove(&row.id).unwrap_or_default();
        candidates.push(CandidateView::from_row(row, own)?);
    }

    let total = candidates.len();
    Ok(Json(CandidateListResponse { candidates, total }))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateView>, AppError> {
    let row = service::fetch_candidate(&state.db, id).await?;
    let appreciations = fetch_appreciations(&state.db, id).await?;
    Ok(Json(CandidateView::from_row(row, appreciations)?))
}

/// POST /api/v1/candidates/:id/questions
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<CandidateView>), AppError> {
    let row = service::generate_questions(&state, id).await?;
    let appreciations = fetch_appreciations(&state.db, id).await?;
    Ok((
        StatusCode::CREATED,
        Json(CandidateView::from_row(row, appreciations)?),
    ))
}

#[derive(Debug, Deserialize)]
pub struct EvaluationRequest {
    pub evaluations: Vec<EvaluationInput>,
}

/// POST /api/v1/candidates/:id/evaluation
pub async fn handle_submit_evaluation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<EvaluationRequest>,
) -> Result<Json<CandidateView>, AppError> {
    let row = service::submit_evaluation(&state, id, req.evaluations).await?;
    let appreciations = fetch_appreciations(&state.db, id).await?;
    Ok(Json(CandidateView::from_row(row, appreciations)?))
}

#[derive(Serialize)]
pub struct FinalizeResponse {
    pub final_predictive_score: f64,
    pub decision: String,
    pub candidate: CandidateView,
}

/// POST /api/v1/candidates/:id/finalize
pub async fn handle_finalize(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FinalizeResponse>, AppError> {
    let (row, assessment) = service::finalize(&state, id).await?;
    let final_score = row.final_predictive_score.unwrap_or_default();
    let appreciations = fetch_appreciations(&state.db, id).await?;
    Ok(Json(FinalizeResponse {
        final_predictive_score: final_score,
        decision: assessment.decision.label().to_string(),
        candidate: CandidateView::from_row(row, appreciations)?,
    }))
}

fn file_stem(file_name: Option<&str>) -> Option<String> {
    let file_name = file_name?;
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    let stem = stem.trim();
    (!stem.is_empty()).then(|| stem.to_string())
}
