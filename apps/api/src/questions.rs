//! Interview question generation — a fixed batch of 5 questions per category
//! across three fixed categories, produced by the LLM and validated before
//! the candidate may advance. A malformed batch is retried a bounded number
//! of times; after exhaustion the operation fails and the candidate stays in
//! its prior stage.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::prompts::{QUESTIONS_PROMPT_TEMPLATE, QUESTIONS_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::brief::JobDescription;
use crate::models::cv::CvProfile;

pub const QUESTIONS_PER_CATEGORY: usize = 5;
/// Attempts per category before the whole generation is declared failed.
const MAX_GENERATION_ATTEMPTS: u32 = 3;

/// The three fixed interview question categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    JobFit,
    Culture,
    CvSpecific,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 3] = [
        QuestionCategory::JobFit,
        QuestionCategory::Culture,
        QuestionCategory::CvSpecific,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionCategory::JobFit => "job_fit",
            QuestionCategory::Culture => "culture",
            QuestionCategory::CvSpecific => "cv_specific",
        }
    }

    /// Culture appreciations feed the culture score; everything else feeds
    /// the interview score.
    pub fn is_culture(self) -> bool {
        matches!(self, QuestionCategory::Culture)
    }

    fn focus(self) -> &'static str {
        match self {
            QuestionCategory::JobFit => {
                "fit against the role's required skills and responsibilities"
            }
            QuestionCategory::Culture => {
                "alignment with the company's values, collaboration style, and ways of working"
            }
            QuestionCategory::CvSpecific => {
                "the candidate's own career path, projects, and claims made in the CV"
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub category: QuestionCategory,
    pub question: String,
    pub purpose: String,
}

#[derive(Debug, Deserialize)]
struct QuestionsPayload {
    questions: Vec<InterviewQuestion>,
}

/// A batch is valid only if it contains exactly `QUESTIONS_PER_CATEGORY`
/// questions, all of the requested category.
fn batch_is_valid(questions: &[InterviewQuestion], expected: QuestionCategory) -> bool {
    questions.len() == QUESTIONS_PER_CATEGORY && questions.iter().all(|q| q.category == expected)
}

/// Generates the full interview question set: `QUESTIONS_PER_CATEGORY`
/// questions for each category in `QuestionCategory::ALL`.
pub async fn generate_interview_questions(
    llm: &LlmClient,
    job: &JobDescription,
    cv: &CvProfile,
    experience_score: f64,
) -> Result<Vec<InterviewQuestion>, AppError> {
    let mut all_questions = Vec::with_capacity(QUESTIONS_PER_CATEGORY * QuestionCategory::ALL.len());

    for category in QuestionCategory::ALL {
        let questions = generate_for_category(llm, job, cv, experience_score, category).await?;
        all_questions.extend(questions);
    }

    Ok(all_questions)
}

async fn generate_for_category(
    llm: &LlmClient,
    job: &JobDescription,
    cv: &CvProfile,
    experience_score: f64,
    category: QuestionCategory,
) -> Result<Vec<InterviewQuestion>, AppError> {
    let prompt = QUESTIONS_PROMPT_TEMPLATE
        .replace("{count}", &QUESTIONS_PER_CATEGORY.to_string())
        .replace("{category}", category.as_str())
        .replace("{focus}", category.focus())
        .replace("{context}", &category_context(job, cv, experience_score, category));

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        match llm.call_json::<QuestionsPayload>(&prompt, QUESTIONS_SYSTEM).await {
            Ok(payload) if batch_is_valid(&payload.questions, category) => {
                return Ok(payload.questions);
            }
            Ok(payload) => {
                warn!(
                    "Question batch for {} invalid on attempt {}: {} questions received",
                    category.as_str(),
                    attempt,
                    payload.questions.len()
                );
            }
            Err(e) => {
                warn!(
                    "Question generation for {} failed on attempt {}: {e}",
                    category.as_str(),
                    attempt
                );
            }
        }
    }

    Err(AppError::Llm(format!(
        "Question generation for category '{}' failed after {} attempts",
        category.as_str(),
        MAX_GENERATION_ATTEMPTS
    )))
}

fn category_context(
    job: &JobDescription,
    cv: &CvProfile,
    experience_score: f64,
    category: QuestionCategory,
) -> String {
    match category {
        QuestionCategory::JobFit => format!(
            "Role: {} ({} years of experience expected)\nRequired skills: {}\nResponsibilities: {}",
            job.title,
            job.required_experience_years,
            job.skills.join(", "),
            job.responsibilities.join("; "),
        ),
        QuestionCategory::Culture => format!(
            "Role: {}\nCompany and team context: {}",
            job.title, job.description,
        ),
        QuestionCategory::CvSpecific => {
            let degrees: Vec<&str> = cv.education.iter().map(|e| e.degree.as_str()).collect();
            format!(
                "Candidate skills: {}\nEducation: {}\nExperience score against the role: {experience_score:.1}%",
                cv.skills.join(", "),
                degrees.join(", "),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(category: QuestionCategory) -> InterviewQuestion {
        InterviewQuestion {
            category,
            question: "How would you design the ingestion pipeline?".to_string(),
            purpose: "Probe system design depth".to_string(),
        }
    }

    #[test]
    fn test_full_batch_of_expected_category_is_valid() {
        let batch = vec![question(QuestionCategory::JobFit); QUESTIONS_PER_CATEGORY];
        assert!(batch_is_valid(&batch, QuestionCategory::JobFit));
    }

    #[test]
    fn test_short_batch_is_invalid() {
        let batch = vec![question(QuestionCategory::JobFit); QUESTIONS_PER_CATEGORY - 1];
        assert!(!batch_is_valid(&batch, QuestionCategory::JobFit));
    }

    #[test]
    fn test_oversized_batch_is_invalid() {
        let batch = vec![question(QuestionCategory::Culture); QUESTIONS_PER_CATEGORY + 1];
        assert!(!batch_is_valid(&batch, QuestionCategory::Culture));
    }

    #[test]
    fn test_category_mismatch_is_invalid() {
        let mut batch = vec![question(QuestionCategory::Culture); QUESTIONS_PER_CATEGORY - 1];
        batch.push(question(QuestionCategory::JobFit));
        assert!(!batch_is_valid(&batch, QuestionCategory::Culture));
    }

    #[test]
    fn test_only_culture_category_feeds_culture_score() {
        assert!(QuestionCategory::Culture.is_culture());
        assert!(!QuestionCategory::JobFit.is_culture());
        assert!(!QuestionCategory::CvSpecific.is_culture());
    }

    #[test]
    fn test_category_serde_round() {
        let cat: QuestionCategory = serde_json::from_str(r#""cv_specific""#).unwrap();
        assert_eq!(cat, QuestionCategory::CvSpecific);
        assert_eq!(
            serde_json::to_string(&QuestionCategory::JobFit).unwrap(),
            r#""job_fit""#
        );
    }
}
