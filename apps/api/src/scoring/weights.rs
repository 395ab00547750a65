use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Dimension;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Contribution of each dimension to the final predictive score. Fractions
/// must sum to 1.0; the table is built once at startup and injected into the
/// aggregator, never read from a global.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub culture: f64,
    pub interview: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum WeightsError {
    #[error("score weights sum to {sum}, expected 1.0")]
    InvalidSum { sum: f64 },
}

impl ScoreWeights {
    pub fn new(
        skills: f64,
        experience: f64,
        education: f64,
        culture: f64,
        interview: f64,
    ) -> Result<Self, WeightsError> {
        let weights = Self {
            skills,
            experience,
            education,
            culture,
            interview,
        };
        let sum = weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightsError::InvalidSum { sum });
        }
        Ok(weights)
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Skills => self.skills,
            Dimension::Experience => self.experience,
            Dimension::Education => self.education,
            Dimension::Culture => self.culture,
            Dimension::Interview => self.interview,
        }
    }

    fn sum(&self) -> f64 {
        self.skills + self.experience + self.education + self.culture + self.interview
    }
}

impl Default for ScoreWeights {
    /// 30% skills, 25% experience, 15% each for education, culture, interview.
    fn default() -> Self {
        Self {
            skills: 0.30,
            experience: 0.25,
            education: 0.15,
            culture: 0.15,
            interview: 0.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let w = ScoreWeights::default();
        assert!((w.sum() - 1.0).abs() < WEIGHT_SUM_TOLERANCE);
    }

    #[test]
    fn test_invalid_sum_rejected() {
        let err = ScoreWeights::new(0.5, 0.5, 0.5, 0.0, 0.0).unwrap_err();
        assert_eq!(err, WeightsError::InvalidSum { sum: 1.5 });
    }

    #[test]
    fn test_alternate_valid_table_accepted() {
        let w = ScoreWeights::new(0.2, 0.2, 0.2, 0.2, 0.2).unwrap();
        assert_eq!(w.get(Dimension::Culture), 0.2);
    }

    #[test]
    fn test_tiny_float_error_tolerated() {
        // 5 × 0.2 accumulated in floating point still counts as 1.0.
        let fifth = 1.0_f64 / 5.0;
        assert!(ScoreWeights::new(fifth, fifth, fifth, fifth, fifth).is_ok());
    }
}
