//! The candidate process stage machine: a strictly linear pipeline with no
//! skipping and no going back. The enum owns the legal-transition rules; the
//! service layer owns their durable, race-safe application.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessStage {
    CvAnalysis,
    InterviewQuestionsGenerated,
    InterviewEvaluated,
    FinalAssessment,
}

#[derive(Debug, Error, PartialEq)]
pub enum StageError {
    #[error("candidate is already at the terminal stage")]
    AlreadyTerminal,

    #[error("cannot advance from '{from}' to '{to}': only '{next}' is reachable")]
    IllegalTransition {
        from: ProcessStage,
        to: ProcessStage,
        next: ProcessStage,
    },

    #[error("unknown process stage '{0}'")]
    Unknown(String),
}

impl ProcessStage {
    pub const ALL: [ProcessStage; 4] = [
        ProcessStage::CvAnalysis,
        ProcessStage::InterviewQuestionsGenerated,
        ProcessStage::InterviewEvaluated,
        ProcessStage::FinalAssessment,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ProcessStage::CvAnalysis => "cv_analysis",
            ProcessStage::InterviewQuestionsGenerated => "interview_questions_generated",
            ProcessStage::InterviewEvaluated => "interview_evaluated",
            ProcessStage::FinalAssessment => "final_assessment",
        }
    }

    pub fn parse(s: &str) -> Result<Self, StageError> {
        match s {
            "cv_analysis" => Ok(ProcessStage::CvAnalysis),
            "interview_questions_generated" => Ok(ProcessStage::InterviewQuestionsGenerated),
            "interview_evaluated" => Ok(ProcessStage::InterviewEvaluated),
            "final_assessment" => Ok(ProcessStage::FinalAssessment),
            other => Err(StageError::Unknown(other.to_string())),
        }
    }

    /// The single next stage, or `None` at the terminal stage.
    pub const fn next(self) -> Option<ProcessStage> {
        match self {
            ProcessStage::CvAnalysis => Some(ProcessStage::InterviewQuestionsGenerated),
            ProcessStage::InterviewQuestionsGenerated => Some(ProcessStage::InterviewEvaluated),
            ProcessStage::InterviewEvaluated => Some(ProcessStage::FinalAssessment),
            ProcessStage::FinalAssessment => None,
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, ProcessStage::FinalAssessment)
    }

    /// Checks that `target` is the single legal successor of `self`.
    pub fn check_advance(self, target: ProcessStage) -> Result<(), StageError> {
        if self.is_terminal() {
            return Err(StageError::AlreadyTerminal);
        }
        match self.next() {
            None => Err(StageError::AlreadyTerminal),
            Some(next) if next == target => Ok(()),
            Some(next) => Err(StageError::IllegalTransition {
                from: self,
                to: target,
                next,
            }),
        }
    }

    /// Human-readable candidate status derived from the stage.
    pub const fn status_label(self) -> &'static str {
        match self {
            ProcessStage::CvAnalysis => "CV analyzed",
            ProcessStage::InterviewQuestionsGenerated => "Interview questions generated",
            ProcessStage::InterviewEvaluated => "Interview evaluated",
            ProcessStage::FinalAssessment => "Fully evaluated",
        }
    }
}

impl fmt::Display for ProcessStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StageError> for crate::errors::AppError {
    fn from(e: StageError) -> Self {
        match e {
            StageError::Unknown(_) => {
                crate::errors::AppError::Internal(anyhow::anyhow!(e.to_string()))
            }
            other => crate::errors::AppError::Precondition(other.to_string()),
        }
    }
}
