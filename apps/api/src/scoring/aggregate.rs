//! Final predictive score: the weighted sum of the five dimension scores.
//! Pure and deterministic — re-derivable at any time from the persisted
//! dimension scores alone, which makes recomputation and auditing safe.

use super::{Dimension, DimensionScores, ScoreWeights};

/// `Σ scores[d] × weights[d]` over the five dimensions.
pub fn aggregate(scores: &DimensionScores, weights: &ScoreWeights) -> f64 {
    Dimension::ALL
        .iter()
        .map(|d| scores.get(*d) * weights.get(*d))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(skills: f64, experience: f64, education: f64, culture: f64, interview: f64) -> DimensionScores {
        DimensionScores {
            skills,
            experience,
            education,
            culture,
            interview,
        }
    }

    #[test]
    fn test_worked_example() {
        // 0.30×90 + 0.25×70 + 0.15×100 + 0.15×50 + 0.15×40 = 73.0
        let result = aggregate(&scores(90.0, 70.0, 100.0, 50.0, 40.0), &ScoreWeights::default());
        assert!((result - 73.0).abs() < 1e-9, "result was {result}");
    }

    #[test]
    fn test_linear_in_each_dimension() {
        let weights = ScoreWeights::default();
        let base = scores(40.0, 40.0, 40.0, 40.0, 40.0);
        let baseline = aggregate(&base, &weights);

        for dimension in Dimension::ALL {
            let mut bumped = base;
            match dimension {
                Dimension::Skills => bumped.skills *= 2.0,
                Dimension::Experience => bumped.experience *= 2.0,
                Dimension::Education => bumped.education *= 2.0,
                Dimension::Culture => bumped.culture *= 2.0,
                Dimension::Interview => bumped.interview *= 2.0,
            }
            let delta = aggregate(&bumped, &weights) - baseline;
            let expected = weights.get(dimension) * 40.0;
            assert!(
                (delta - expected).abs() < 1e-9,
                "{dimension}: delta {delta}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_idempotent_on_identical_inputs() {
        let weights = ScoreWeights::default();
        let input = scores(81.5, 62.3, 100.0, 47.0, 55.5);
        assert_eq!(aggregate(&input, &weights), aggregate(&input, &weights));
    }

    #[test]
    fn test_alternate_weight_table() {
        let weights = ScoreWeights::new(1.0, 0.0, 0.0, 0.0, 0.0).unwrap();
        assert_eq!(aggregate(&scores(88.0, 0.0, 0.0, 0.0, 0.0), &weights), 88.0);
    }

    #[test]
    fn test_all_perfect_is_100() {
        let result = aggregate(&scores(100.0, 100.0, 100.0, 100.0, 100.0), &ScoreWeights::default());
        assert!((result - 100.0).abs() < 1e-9);
    }
}
