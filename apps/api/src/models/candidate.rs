use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::appreciation::AppreciationRow;
use crate::models::cv::CvProfile;
use crate::process::stage::ProcessStage;
use crate::questions::InterviewQuestion;
use crate::scoring::recommendation::{Recommendation, Risk};
use crate::scoring::DimensionScores;

/// Durable candidate record. Created at CV intake with stage `cv_analysis`,
/// mutated in place as each stage completes, deleted only by brief cascade.
///
/// Culture, interview, and final scores are nullable until their stage has
/// run — presence, not a zero sentinel, is what preconditions check.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub brief_id: Uuid,
    pub name: String,
    pub cv_profile: Json<CvProfile>,
    pub skills_score: f64,
    pub experience_score: f64,
    pub education_score: f64,
    pub culture_score: Option<f64>,
    pub interview_score: Option<f64>,
    pub final_predictive_score: Option<f64>,
    pub process_stage: String,
    pub interview_questions: Option<Json<Vec<InterviewQuestion>>>,
    pub risks: Json<Vec<Risk>>,
    pub recommendations: Json<Vec<Recommendation>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateRow {
    pub fn stage(&self) -> Result<ProcessStage, AppError> {
        ProcessStage::parse(&self.process_stage).map_err(|e| {
            AppError::Internal(anyhow::anyhow!(
                "candidate {} has a corrupt process stage: {e}",
                self.id
            ))
        })
    }

    /// The full five-dimension score set, available once the interview has
    /// been evaluated.
    pub fn dimension_scores(&self) -> Option<DimensionScores> {
        Some(DimensionScores {
            skills: self.skills_score,
            experience: self.experience_score,
            education: self.education_score,
            culture: self.culture_score?,
            interview: self.interview_score?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ScoreView {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub culture: Option<f64>,
    pub interview: Option<f64>,
    pub final_predictive: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct AppreciationView {
    pub question: String,
    pub category: String,
    pub rating: String,
    pub score: f64,
}

/// The single canonical JSON shape for a candidate. Every endpoint that
/// returns a candidate returns this — there is exactly one serialization.
#[derive(Debug, Serialize)]
pub struct CandidateView {
    pub id: Uuid,
    pub brief_id: Uuid,
    pub name: String,
    pub cv_profile: CvProfile,
    pub scores: ScoreView,
    pub process_stage: ProcessStage,
    pub status: &'static str,
    pub interview_questions: Vec<InterviewQuestion>,
    pub appreciations: Vec<AppreciationView>,
    pub risks: Vec<Risk>,
    pub recommendations: Vec<Recommendation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CandidateView {
    pub fn from_row(
        row: CandidateRow,
        appreciations: Vec<AppreciationRow>,
    ) -> Result<Self, AppError> {
        let stage = row.stage()?;
        Ok(CandidateView {
            id: row.id,
            brief_id: row.brief_id,
            name: row.name,
            cv_profile: row.cv_profile.0,
            scores: ScoreView {
                skills: row.skills_score,
                experience: row.experience_score,
                education: row.education_score,
                culture: row.culture_score,
                interview: row.interview_score,
                final_predictive: row.final_predictive_score,
            },
            process_stage: stage,
            status: stage.status_label(),
            interview_questions: row.interview_questions.map(|q| q.0).unwrap_or_default(),
            appreciations: appreciations
                .into_iter()
                .map(|a| AppreciationView {
                    question: a.question,
                    category: a.category,
                    rating: a.rating,
                    score: a.score,
                })
                .collect(),
            risks: row.risks.0,
            recommendations: row.recommendations.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCandidateRequest {
    pub brief_id: Uuid,
    pub name: String,
    pub cv_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(stage: &str, culture: Option<f64>, interview: Option<f64>) -> CandidateRow {
        CandidateRow {
            id: Uuid::new_v4(),
            brief_id: Uuid::new_v4(),
            name: "Ada".to_string(),
            cv_profile: Json(CvProfile {
                skills: vec!["Rust".to_string()],
                experience: vec![],
                education: vec![],
            }),
            skills_score: 80.0,
            experience_score: 60.0,
            education_score: 100.0,
            culture_score: culture,
            interview_score: interview,
            final_predictive_score: None,
            process_stage: stage.to_string(),
            interview_questions: None,
            risks: Json(vec![]),
            recommendations: Json(vec![]),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_dimension_scores_require_both_interview_side_scores() {
        assert!(row("interview_evaluated", Some(70.0), None)
            .dimension_scores()
            .is_none());
        assert!(row("interview_evaluated", None, Some(70.0))
            .dimension_scores()
            .is_none());
        let scores = row("interview_evaluated", Some(70.0), Some(55.0))
            .dimension_scores()
            .unwrap();
        assert_eq!(scores.culture, 70.0);
        assert_eq!(scores.interview, 55.0);
    }

    #[test]
    fn test_corrupt_stage_surfaces_as_internal_error() {
        let result = row("limbo", None, None).stage();
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[test]
    fn test_view_derives_status_from_stage() {
        let view = CandidateView::from_row(row("cv_analysis", None, None), vec![]).unwrap();
        assert_eq!(view.status, "CV analyzed");
        assert_eq!(view.process_stage, ProcessStage::CvAnalysis);
        assert!(view.interview_questions.is_empty());
    }
}
