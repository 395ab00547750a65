//! Candidate pipeline orchestration. Every stage transition follows the same
//! shape: load the durable record, check the stage machine's preconditions,
//! compute the side effects, then apply a guarded conditional UPDATE
//! (`WHERE process_stage = $expected`). Of two concurrent submissions exactly
//! one matches the expected stage; the loser gets a precondition error and no
//! partial write.

use serde::Deserialize;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake;
use crate::models::appreciation::{Appreciation, AppreciationRow, Rating};
use crate::models::brief::BriefRow;
use crate::models::candidate::{CandidateRow, CreateCandidateRequest};
use crate::process::stage::ProcessStage;
use crate::questions::{self, QuestionCategory};
use crate::scoring::aggregate::aggregate;
use crate::scoring::dimensions;
use crate::scoring::recommendation::{recommend, Assessment, Recommendation, Risk};
use crate::state::AppState;

pub async fn fetch_brief(db: &PgPool, id: Uuid) -> Result<BriefRow, AppError> {
    let brief: Option<BriefRow> = sqlx::query_as("SELECT * FROM briefs WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;
    brief.ok_or_else(|| AppError::NotFound(format!("Brief {id} not found")))
}

pub async fn fetch_candidate(db: &PgPool, id: Uuid) -> Result<CandidateRow, AppError> {
    let candidate: Option<CandidateRow> = sqlx::query_as("SELECT * FROM candidates WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;
    candidate.ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}

pub async fn list_candidates(
    db: &PgPool,
    brief_id: Option<Uuid>,
    stage: Option<ProcessStage>,
) -> Result<Vec<CandidateRow>, AppError> {
    let rows: Vec<CandidateRow> = sqlx::query_as(
        r#"
        SELECT * FROM candidates
        WHERE ($1::uuid IS NULL OR brief_id = $1)
          AND ($2::text IS NULL OR process_stage = $2)
        ORDER BY final_predictive_score DESC NULLS LAST, created_at DESC
        "#,
    )
    .bind(brief_id)
    .bind(stage.map(|s| s.as_str()))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn fetch_appreciations(
    db: &PgPool,
    candidate_id: Uuid,
) -> Result<Vec<AppreciationRow>, AppError> {
    let rows: Vec<AppreciationRow> =
        sqlx::query_as("SELECT * FROM appreciations WHERE candidate_id = $1 ORDER BY created_at")
            .bind(candidate_id)
            .fetch_all(db)
            .await?;
    Ok(rows)
}

pub async fn fetch_appreciations_for(
    db: &PgPool,
    candidate_ids: &[Uuid],
) -> Result<Vec<AppreciationRow>, AppError> {
    let rows: Vec<AppreciationRow> = sqlx::query_as(
        "SELECT * FROM appreciations WHERE candidate_id = ANY($1) ORDER BY created_at",
    )
    .bind(candidate_ids)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Creates a candidate from extracted CV text: LLM profile extraction, then
/// the three CV-side dimension scores, then the insert at `cv_analysis`.
pub async fn create_candidate(
    state: &AppState,
    req: CreateCandidateRequest,
) -> Result<CandidateRow, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Candidate name is required".into()));
    }
    if req.cv_text.trim().is_empty() {
        return Err(AppError::Validation("CV text is required".into()));
    }

    let brief = fetch_brief(&state.db, req.brief_id).await?;
    let requirement = brief.full_data.0.requirement();

    let profile = intake::analyze_cv(&state.llm, &req.cv_text).await?;

    let skills_score = dimensions::score_skills(
        state.embedder.as_ref(),
        &profile.skills,
        &requirement.skills,
    )
    .await
    .map_err(|e| AppError::Embedding(e.to_string()))?;
    let experience_score =
        dimensions::score_experience(&profile.experience, requirement.required_experience_years);
    let education_score =
        dimensions::score_education(&profile.education, &requirement.required_degree);

    let row: CandidateRow = sqlx::query_as(
        r#"
        INSERT INTO candidates
            (id, brief_id, name, cv_profile, skills_score, experience_score, education_score,
             process_stage, risks, recommendations, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, now(), now())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(brief.id)
    .bind(req.name.trim())
    .bind(Json(&profile))
    .bind(skills_score)
    .bind(experience_score)
    .bind(education_score)
    .bind(ProcessStage::CvAnalysis.as_str())
    .bind(Json(Vec::<Risk>::new()))
    .bind(Json(Vec::<Recommendation>::new()))
    .fetch_one(&state.db)
    .await?;

    info!(
        "Candidate {} created for '{}' - skills {:.1}%, experience {:.1}%, education {:.1}%",
        row.id, requirement.title, skills_score, experience_score, education_score
    );
    Ok(row)
}

/// Stage 1 → 2: generate the interview question set and advance.
pub async fn generate_questions(
    state: &AppState,
    candidate_id: Uuid,
) -> Result<CandidateRow, AppError> {
    let row = fetch_candidate(&state.db, candidate_id).await?;
    row.stage()?
        .check_advance(ProcessStage::InterviewQuestionsGenerated)?;

    let brief = fetch_brief(&state.db, row.brief_id).await?;
    let generated = questions::generate_interview_questions(
        &state.llm,
        &brief.full_data.0,
        &row.cv_profile.0,
        row.experience_score,
    )
    .await?;

    let updated: Option<CandidateRow> = sqlx::query_as(
        r#"
        UPDATE candidates
        SET interview_questions = $1, process_stage = $2, updated_at = now()
        WHERE id = $3 AND process_stage = $4
        RETURNING *
        "#,
    )
    .bind(Json(&generated))
    .bind(ProcessStage::InterviewQuestionsGenerated.as_str())
    .bind(candidate_id)
    .bind(ProcessStage::CvAnalysis.as_str())
    .fetch_optional(&state.db)
    .await?;

    let updated = updated.ok_or_else(lost_transition)?;
    info!(
        "Candidate {} advanced to {} with {} questions",
        candidate_id,
        updated.process_stage,
        generated.len()
    );
    Ok(updated)
}

#[derive(Debug, Deserialize)]
pub struct EvaluationInput {
    pub question: String,
    pub category: QuestionCategory,
    pub rating: Rating,
}

/// Stage 2 → 3: record the appreciation batch and compute the culture and
/// interview scores. Appreciation inserts and the stage CAS share one
/// transaction, so a lost race leaves no appreciations behind.
pub async fn submit_evaluation(
    state: &AppState,
    candidate_id: Uuid,
    evaluations: Vec<EvaluationInput>,
) -> Result<CandidateRow, AppError> {
    let row = fetch_candidate(&state.db, candidate_id).await?;
    row.stage()?.check_advance(ProcessStage::InterviewEvaluated)?;

    if evaluations.is_empty() {
        return Err(AppError::Validation(
            "At least one appreciation is required".into(),
        ));
    }

    let generated = row
        .interview_questions
        .as_ref()
        .map(|q| q.0.as_slice())
        .unwrap_or_default();
    for question in generated {
        if !evaluations.iter().any(|e| e.question == question.question) {
            return Err(AppError::Precondition(format!(
                "Question '{}' has no appreciation; every generated question needs at least one",
                question.question
            )));
        }
    }

    let appreciations: Vec<Appreciation> = evaluations
        .iter()
        .map(|e| Appreciation {
            category: e.category,
            rating: e.rating,
        })
        .collect();
    let culture_score = dimensions::score_culture(&appreciations);
    let interview_score = dimensions::score_interview(&appreciations);

    let mut tx = state.db.begin().await?;

    for evaluation in &evaluations {
        sqlx::query(
            r#"
            INSERT INTO appreciations (id, candidate_id, question, category, rating, score, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, now())
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(candidate_id)
        .bind(&evaluation.question)
        .bind(evaluation.category.as_str())
        .bind(evaluation.rating.as_str())
        .bind(evaluation.rating.ordinal() as f64)
        .execute(&mut *tx)
        .await?;
    }

    let updated: Option<CandidateRow> = sqlx::query_as(
        r#"
        UPDATE candidates
        SET culture_score = $1, interview_score = $2, process_stage = $3, updated_at = now()
        WHERE id = $4 AND process_stage = $5
        RETURNING *
        "#,
    )
    .bind(culture_score)
    .bind(interview_score)
    .bind(ProcessStage::InterviewEvaluated.as_str())
    .bind(candidate_id)
    .bind(ProcessStage::InterviewQuestionsGenerated.as_str())
    .fetch_optional(&mut *tx)
    .await?;

    let Some(updated) = updated else {
        tx.rollback().await?;
        return Err(lost_transition());
    };
    tx.commit().await?;

    info!(
        "Candidate {} evaluated - culture {:.1}%, interview {:.1}%",
        candidate_id, culture_score, interview_score
    );
    Ok(updated)
}

/// Stage 3 → 4 (terminal): aggregate the five dimensions into the final
/// predictive score and persist the typed assessment.
pub async fn finalize(
    state: &AppState,
    candidate_id: Uuid,
) -> Result<(CandidateRow, Assessment), AppError> {
    let row = fetch_candidate(&state.db, candidate_id).await?;
    row.stage()?.check_advance(ProcessStage::FinalAssessment)?;

    let scores = row.dimension_scores().ok_or_else(|| {
        AppError::Precondition(
            "Culture and interview scores must be computed before finalizing".into(),
        )
    })?;

    let final_score = aggregate(&scores, &state.weights);
    let assessment = recommend(final_score, &scores);

    let updated: Option<CandidateRow> = sqlx::query_as(
        r#"
        UPDATE candidates
        SET final_predictive_score = $1, risks = $2, recommendations = $3,
            process_stage = $4, updated_at = now()
        WHERE id = $5 AND process_stage = $6
        RETURNING *
        "#,
    )
    .bind(final_score)
    .bind(Json(&assessment.risks))
    .bind(Json(&assessment.recommendations))
    .bind(ProcessStage::FinalAssessment.as_str())
    .bind(candidate_id)
    .bind(ProcessStage::InterviewEvaluated.as_str())
    .fetch_optional(&state.db)
    .await?;

    let updated = updated.ok_or_else(lost_transition)?;
    info!(
        "Candidate {} finalized - score {:.2}%, decision '{}'",
        candidate_id,
        final_score,
        assessment.decision.label()
    );
    Ok((updated, assessment))
}

fn lost_transition() -> AppError {
    AppError::Precondition(
        "Candidate stage changed concurrently; the transition was not applied".into(),
    )
}
