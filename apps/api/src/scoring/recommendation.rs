//! Recommendation engine: turns a final score and the per-dimension detail
//! into a qualitative decision plus typed risks and recommendations. The
//! typed variants are persisted as JSONB, so nothing downstream re-parses
//! free text.

use serde::{Deserialize, Serialize};

use super::{Dimension, DimensionScores};

const STRONGLY_RECOMMENDED_MIN: f64 = 80.0;
const RECOMMENDED_MIN: f64 = 65.0;
const TO_CONSIDER_MIN: f64 = 50.0;
/// Dimensions strictly below this are flagged as risks.
const WEAKNESS_BELOW: f64 = 40.0;
/// Dimensions at or above this are flagged as strengths.
const STRENGTH_MIN: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    StronglyRecommended,
    Recommended,
    ToConsider,
    NotRecommended,
}

impl Decision {
    pub fn from_score(final_score: f64) -> Self {
        if final_score >= STRONGLY_RECOMMENDED_MIN {
            Decision::StronglyRecommended
        } else if final_score >= RECOMMENDED_MIN {
            Decision::Recommended
        } else if final_score >= TO_CONSIDER_MIN {
            Decision::ToConsider
        } else {
            Decision::NotRecommended
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Decision::StronglyRecommended => "Strongly recommended",
            Decision::Recommended => "Recommended",
            Decision::ToConsider => "To consider",
            Decision::NotRecommended => "Not recommended",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Risk {
    /// The aggregate score itself is below the bar for the role.
    OverallFit { message: String },
    /// One dimension is weak enough to call out on its own.
    Weakness { dimension: Dimension, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    /// The global decision line. Always present.
    Decision { message: String },
    Strength { dimension: Dimension, message: String },
    /// Onboarding support suggestion covering the weak dimensions.
    Training { dimensions: Vec<Dimension>, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub decision: Decision,
    pub risks: Vec<Risk>,
    pub recommendations: Vec<Recommendation>,
}

pub fn recommend(final_score: f64, scores: &DimensionScores) -> Assessment {
    let decision = Decision::from_score(final_score);

    let mut recommendations = vec![Recommendation::Decision {
        message: decision_line(decision),
    }];
    let mut risks = Vec::new();

    if decision == Decision::NotRecommended {
        risks.push(Risk::OverallFit {
            message: format!("Overall score {final_score:.1}% is below the bar for the role"),
        });
    }

    let mut weak_dimensions = Vec::new();
    for dimension in Dimension::ALL {
        let score = scores.get(dimension);
        if score < WEAKNESS_BELOW {
            weak_dimensions.push(dimension);
            risks.push(Risk::Weakness {
                dimension,
                message: format!("{} insufficient ({score:.1}%)", dimension.label()),
            });
        } else if score >= STRENGTH_MIN {
            recommendations.push(Recommendation::Strength {
                dimension,
                message: format!("Excellent {} ({score:.1}%)", dimension.label()),
            });
        }
    }

    if !weak_dimensions.is_empty() {
        let names: Vec<&str> = weak_dimensions.iter().map(|d| d.label()).collect();
        recommendations.push(Recommendation::Training {
            dimensions: weak_dimensions,
            message: format!("Plan onboarding support for: {}", names.join(", ")),
        });
    }

    Assessment {
        decision,
        risks,
        recommendations,
    }
}

fn decision_line(decision: Decision) -> String {
    let line = match decision {
        Decision::StronglyRecommended => "Excellent candidate, proceed to hire",
        Decision::Recommended => "Good candidate, proceed to the final steps",
        Decision::ToConsider => "Average candidate, assess against team needs",
        Decision::NotRecommended => "Below expectations for the role",
    };
    line.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(score: f64) -> DimensionScores {
        DimensionScores {
            skills: score,
            experience: score,
            education: score,
            culture: score,
            interview: score,
        }
    }

    #[test]
    fn test_decision_thresholds_are_exact() {
        assert_eq!(Decision::from_score(80.0), Decision::StronglyRecommended);
        assert_eq!(Decision::from_score(79.99), Decision::Recommended);
        assert_eq!(Decision::from_score(65.0), Decision::Recommended);
        assert_eq!(Decision::from_score(64.99), Decision::ToConsider);
        assert_eq!(Decision::from_score(50.0), Decision::ToConsider);
        assert_eq!(Decision::from_score(49.99), Decision::NotRecommended);
    }

    #[test]
    fn test_worked_example_73_is_recommended() {
        let assessment = recommend(73.0, &flat(73.0));
        assert_eq!(assessment.decision, Decision::Recommended);
        assert_eq!(assessment.decision.label(), "Recommended");
    }

    #[test]
    fn test_dimension_at_35_appears_in_risks() {
        let mut scores = flat(60.0);
        scores.culture = 35.0;
        let assessment = recommend(55.0, &scores);
        assert!(assessment.risks.iter().any(|r| matches!(
            r,
            Risk::Weakness { dimension: Dimension::Culture, message } if message.contains("35.0%")
        )));
    }

    #[test]
    fn test_dimension_at_76_appears_as_strength() {
        let mut scores = flat(60.0);
        scores.skills = 76.0;
        let assessment = recommend(62.0, &scores);
        assert!(assessment.recommendations.iter().any(|r| matches!(
            r,
            Recommendation::Strength { dimension: Dimension::Skills, .. }
        )));
    }

    #[test]
    fn test_exactly_40_is_not_a_risk() {
        let assessment = recommend(40.0, &flat(40.0));
        assert!(!assessment
            .risks
            .iter()
            .any(|r| matches!(r, Risk::Weakness { .. })));
    }

    #[test]
    fn test_exactly_75_is_a_strength() {
        let assessment = recommend(75.0, &flat(75.0));
        let strengths = assessment
            .recommendations
            .iter()
            .filter(|r| matches!(r, Recommendation::Strength { .. }))
            .count();
        assert_eq!(strengths, Dimension::ALL.len());
    }

    #[test]
    fn test_decision_line_always_present() {
        for score in [10.0, 55.0, 70.0, 95.0] {
            let assessment = recommend(score, &flat(score));
            assert!(matches!(
                assessment.recommendations.first(),
                Some(Recommendation::Decision { .. })
            ));
        }
    }

    #[test]
    fn test_not_recommended_carries_global_risk() {
        let assessment = recommend(30.0, &flat(30.0));
        assert!(assessment
            .risks
            .iter()
            .any(|r| matches!(r, Risk::OverallFit { .. })));
    }

    #[test]
    fn test_weak_dimensions_trigger_training_recommendation() {
        let mut scores = flat(60.0);
        scores.education = 20.0;
        scores.interview = 10.0;
        let assessment = recommend(52.0, &scores);
        assert!(assessment.recommendations.iter().any(|r| matches!(
            r,
            Recommendation::Training { dimensions, .. }
                if dimensions == &vec![Dimension::Education, Dimension::Interview]
        )));
    }

    #[test]
    fn test_risks_serialize_with_kind_tag() {
        let risk = Risk::Weakness {
            dimension: Dimension::Skills,
            message: "Skills insufficient (35.0%)".to_string(),
        };
        let json = serde_json::to_value(&risk).unwrap();
        assert_eq!(json["kind"], "weakness");
        assert_eq!(json["dimension"], "skills");
    }
}
