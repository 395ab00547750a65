use serde::{Deserialize, Serialize};

/// Structured CV profile extracted once at intake by the LLM.
/// Never mutated afterward; re-uploading a CV creates a new candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvProfile {
    pub skills: Vec<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: String,
    /// Duration as written in the CV (e.g. "3 years", "18 months", "2019-2022").
    /// Parsed into fractional years at scoring time; unparseable strings
    /// contribute zero instead of failing the computation.
    pub duration: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub institution: String,
}
