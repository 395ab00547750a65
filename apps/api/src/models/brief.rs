use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// Structured job description produced by the LLM from a recruiter brief.
/// Stored as JSONB on the brief row; immutable once the brief is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescription {
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub responsibilities: Vec<String>,
    pub qualifications: Vec<String>,
    pub required_experience_years: f64,
    pub required_degree: String,
}

/// The slice of a job description that scoring reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequirement {
    pub title: String,
    pub skills: Vec<String>,
    pub required_experience_years: f64,
    pub required_degree: String,
}

impl JobDescription {
    pub fn requirement(&self) -> JobRequirement {
        JobRequirement {
            title: self.title.clone(),
            skills: self.skills.clone(),
            required_experience_years: self.required_experience_years,
            required_degree: self.required_degree.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BriefRow {
    pub id: Uuid,
    pub title: String,
    /// The recruiter's original short description.
    pub description: String,
    pub full_data: Json<JobDescription>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
