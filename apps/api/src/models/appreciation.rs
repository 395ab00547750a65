use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::questions::QuestionCategory;

/// Upper bound of the appreciation ordinal scale (ratings run 1..=5).
pub const ORDINAL_SCALE_MAX: f64 = 5.0;

/// Qualitative rating on a five-point ordinal scale. The label is what the
/// evaluator picks; the ordinal is what scoring consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    VeryUnsatisfied,
    Unsatisfied,
    Neutral,
    Satisfied,
    VerySatisfied,
}

impl Rating {
    pub fn ordinal(self) -> u8 {
        match self {
            Rating::VeryUnsatisfied => 1,
            Rating::Unsatisfied => 2,
            Rating::Neutral => 3,
            Rating::Satisfied => 4,
            Rating::VerySatisfied => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::VeryUnsatisfied => "very_unsatisfied",
            Rating::Unsatisfied => "unsatisfied",
            Rating::Neutral => "neutral",
            Rating::Satisfied => "satisfied",
            Rating::VerySatisfied => "very_satisfied",
        }
    }
}

/// One collected appreciation, as scoring sees it.
#[derive(Debug, Clone, Copy)]
pub struct Appreciation {
    pub category: QuestionCategory,
    pub rating: Rating,
}

/// Persisted appreciation. Append-only: created during interview evaluation,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AppreciationRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub question: String,
    pub category: String,
    pub rating: String,
    pub score: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_cover_the_scale() {
        let ratings = [
            Rating::VeryUnsatisfied,
            Rating::Unsatisfied,
            Rating::Neutral,
            Rating::Satisfied,
            Rating::VerySatisfied,
        ];
        let ordinals: Vec<u8> = ratings.iter().map(|r| r.ordinal()).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
        assert_eq!(*ordinals.last().unwrap() as f64, ORDINAL_SCALE_MAX);
    }

    #[test]
    fn test_rating_deserializes_from_snake_case() {
        let rating: Rating = serde_json::from_str(r#""very_satisfied""#).unwrap();
        assert_eq!(rating, Rating::VerySatisfied);
    }
}
