//! Candidate scoring: five dimension scorers, the weighted aggregator, and
//! the recommendation engine that turns a final score into a decision.

pub mod aggregate;
pub mod dimensions;
pub mod duration;
pub mod recommendation;
pub mod weights;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use weights::ScoreWeights;

/// The five scored dimensions of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Skills,
    Experience,
    Education,
    Culture,
    Interview,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Skills,
        Dimension::Experience,
        Dimension::Education,
        Dimension::Culture,
        Dimension::Interview,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Skills => "Skills",
            Dimension::Experience => "Experience",
            Dimension::Education => "Education",
            Dimension::Culture => "Culture",
            Dimension::Interview => "Interview",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A complete set of dimension scores, each in [0, 100]. Only constructed
/// once all five dimensions have been computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub culture: f64,
    pub interview: f64,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Skills => self.skills,
            Dimension::Experience => self.experience,
            Dimension::Education => self.education,
            Dimension::Culture => self.culture,
            Dimension::Interview => self.interview,
        }
    }
}
