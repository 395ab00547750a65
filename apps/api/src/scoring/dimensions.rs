//! The five dimension scorers. Each returns a score in [0, 100] and degrades
//! gracefully: a single unparseable CV field contributes zero to its
//! aggregate, never a global failure.

use std::collections::HashMap;

use tracing::warn;

use super::duration::parse_duration_years;
use crate::embedding::{cosine_similarity, Embedder, EmbeddingError};
use crate::models::appreciation::{Appreciation, ORDINAL_SCALE_MAX};
use crate::models::cv::{EducationEntry, ExperienceEntry};
use crate::questions::QuestionCategory;

/// Score for a zero-experience CV against a zero-requirement posting.
const ZERO_REQUIREMENT_BASELINE: f64 = 50.0;
/// Years at which a zero-requirement posting saturates at 100.
const ZERO_REQUIREMENT_SATURATION_YEARS: f64 = 2.0;

/// Ordinal degree ladder, matched case-insensitively as substrings.
const DEGREE_LEVELS: &[(&str, u32)] = &[
    ("associate", 1),
    ("bachelor", 2),
    ("licence", 2),
    ("master", 3),
    ("mba", 3),
    ("phd", 4),
    ("doctor", 4),
];

/// Semantic skill match: for each CV skill, the best cosine similarity
/// against all job skills, averaged across CV skills and scaled to [0, 100].
/// Either list empty ⇒ 0.0 without touching the embedder.
pub async fn score_skills(
    embedder: &dyn Embedder,
    cv_skills: &[String],
    job_skills: &[String],
) -> Result<f64, EmbeddingError> {
    if cv_skills.is_empty() || job_skills.is_empty() {
        return Ok(0.0);
    }

    let cv_vectors = embedder.embed(cv_skills).await?;
    let job_vectors = embedder.embed(job_skills).await?;

    let mut best_matches = Vec::with_capacity(cv_vectors.len());
    for cv_vector in &cv_vectors {
        let best = job_vectors
            .iter()
            .map(|job_vector| cosine_similarity(cv_vector, job_vector))
            .fold(f32::MIN, f32::max);
        best_matches.push(best as f64);
    }

    let mean = best_matches.iter().sum::<f64>() / best_matches.len() as f64;
    Ok((mean * 100.0).clamp(0.0, 100.0))
}

/// Total parsed experience against the requirement. With a zero-requirement
/// posting any experience is a bonus: the score starts at a positive baseline
/// and saturates once the total reaches a low threshold.
pub fn score_experience(entries: &[ExperienceEntry], required_years: f64) -> f64 {
    let total_years: f64 = entries
        .iter()
        .map(|entry| match parse_duration_years(&entry.duration) {
            Some(years) => years,
            None => {
                warn!(
                    "Unparseable duration '{}' for role '{}', contributes 0",
                    entry.duration, entry.role
                );
                0.0
            }
        })
        .sum();

    if required_years <= 0.0 {
        let saturation = (total_years / ZERO_REQUIREMENT_SATURATION_YEARS).min(1.0);
        return ZERO_REQUIREMENT_BASELINE + (100.0 - ZERO_REQUIREMENT_BASELINE) * saturation;
    }

    (total_years / required_years).min(1.0) * 100.0
}

/// Best CV degree level against the required level on the ordinal ladder.
/// Unrecognized CV degrees contribute level 0; an unrecognized required
/// degree falls back to the lowest level.
pub fn score_education(entries: &[EducationEntry], required_degree: &str) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }

    let best_level = entries
        .iter()
        .map(|entry| degree_level(&entry.degree))
        .max()
        .unwrap_or(0);

    if best_level == 0 {
        return 0.0;
    }

    let required_level = match degree_level(required_degree) {
        0 => {
            warn!("Unrecognized required degree '{required_degree}', assuming lowest level");
            1
        }
        level => level,
    };

    (best_level as f64 / required_level as f64).min(1.0) * 100.0
}

fn degree_level(degree: &str) -> u32 {
    let degree = degree.to_lowercase();
    DEGREE_LEVELS
        .iter()
        .filter(|(name, _)| degree.contains(name))
        .map(|(_, level)| *level)
        .max()
        .unwrap_or(0)
}

/// Mean ordinal rating of culture-category appreciations, normalized from the
/// ordinal span to [0, 100].
pub fn score_culture(appreciations: &[Appreciation]) -> f64 {
    let culture: Vec<f64> = appreciations
        .iter()
        .filter(|a| a.category.is_culture())
        .map(|a| a.rating.ordinal() as f64)
        .collect();

    if culture.is_empty() {
        return 0.0;
    }

    let mean = culture.iter().sum::<f64>() / culture.len() as f64;
    mean / ORDINAL_SCALE_MAX * 100.0
}

/// Mean over non-culture categories: average per category first, then average
/// the category means, so a category with many questions cannot drown out one
/// with few.
pub fn score_interview(appreciations: &[Appreciation]) -> f64 {
    let mut totals: HashMap<QuestionCategory, (f64, u32)> = HashMap::new();

    for appreciation in appreciations {
        if appreciation.category.is_culture() {
            continue;
        }
        let entry = totals.entry(appreciation.category).or_insert((0.0, 0));
        entry.0 += appreciation.rating.ordinal() as f64;
        entry.1 += 1;
    }

    if totals.is_empty() {
        return 0.0;
    }

    let mean_of_means = totals
        .values()
        .map(|(sum, count)| sum / *count as f64)
        .sum::<f64>()
        / totals.len() as f64;

    mean_of_means / ORDINAL_SCALE_MAX * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::StaticEmbedder;
    use crate::models::appreciation::Rating;
    use async_trait::async_trait;

    /// Proves the empty-list short-circuit: any embed call panics.
    struct PanickingEmbedder;

    #[async_trait]
    impl Embedder for PanickingEmbedder {
        async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            panic!("embedder must not be called for empty skill lists");
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn experience(duration: &str) -> ExperienceEntry {
        ExperienceEntry {
            role: "Backend Developer".to_string(),
            duration: duration.to_string(),
            description: String::new(),
        }
    }

    fn education(degree: &str) -> EducationEntry {
        EducationEntry {
            degree: degree.to_string(),
            institution: "Example University".to_string(),
        }
    }

    fn appreciation(category: QuestionCategory, rating: Rating) -> Appreciation {
        Appreciation { category, rating }
    }

    #[tokio::test]
    async fn test_empty_cv_skills_score_zero_without_embedding() {
        let score = score_skills(&PanickingEmbedder, &[], &strings(&["Python"]))
            .await
            .unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_empty_job_skills_score_zero_without_embedding() {
        let score = score_skills(&PanickingEmbedder, &strings(&["Python"]), &[])
            .await
            .unwrap();
        assert_eq!(score, 0.0);
    }

    #[tokio::test]
    async fn test_partial_skill_match_is_similarity_weighted() {
        // CV covers one of two required skills almost exactly; the score is
        // the best-match mean, not a naive coverage ratio.
        let embedder = StaticEmbedder::new(vec![
            ("Python", vec![0.95, 0.05, 0.0]),
            ("Python ", vec![1.0, 0.0, 0.0]),
            ("SQL", vec![0.0, 0.0, 1.0]),
        ]);
        let score = score_skills(
            &embedder,
            &strings(&["Python"]),
            &strings(&["Python ", "SQL"]),
        )
        .await
        .unwrap();
        assert!(score > 50.0 && score <= 100.0, "score was {score}");
        assert!((score - 99.86).abs() < 0.1, "score was {score}");
    }

    #[tokio::test]
    async fn test_negative_similarity_clamps_to_zero() {
        let embedder = StaticEmbedder::new(vec![
            ("Cobol", vec![-1.0, 0.0, 0.0]),
            ("Rust", vec![1.0, 0.0, 0.0]),
        ]);
        let score = score_skills(&embedder, &strings(&["Cobol"]), &strings(&["Rust"]))
            .await
            .unwrap();
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_experience_partial_requirement() {
        let score = score_experience(&[experience("2 years")], 3.0);
        assert!((score - 66.666).abs() < 0.01, "score was {score}");
    }

    #[test]
    fn test_experience_saturates_at_requirement() {
        assert_eq!(score_experience(&[experience("8 years")], 3.0), 100.0);
    }

    #[test]
    fn test_no_experience_against_real_requirement_is_zero() {
        assert_eq!(score_experience(&[], 5.0), 0.0);
    }

    #[test]
    fn test_zero_requirement_gives_positive_baseline() {
        let score = score_experience(&[], 0.0);
        assert_eq!(score, 50.0);
    }

    #[test]
    fn test_zero_requirement_is_monotone_and_saturates() {
        let one_year = score_experience(&[experience("1 year")], 0.0);
        let two_years = score_experience(&[experience("2 years")], 0.0);
        let five_years = score_experience(&[experience("5 years")], 0.0);
        assert_eq!(one_year, 75.0);
        assert_eq!(two_years, 100.0);
        assert_eq!(five_years, 100.0);
    }

    #[test]
    fn test_unparseable_duration_contributes_zero() {
        let entries = [experience("2 years"), experience("a while")];
        let score = score_experience(&entries, 3.0);
        assert!((score - 66.666).abs() < 0.01, "score was {score}");
    }

    #[test]
    fn test_education_exact_degree_match() {
        let score = score_education(&[education("Bachelor of Computer Science")], "Bachelor");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_education_below_requirement_is_partial() {
        let score = score_education(&[education("Associate Degree")], "Master");
        assert!((score - 33.333).abs() < 0.01, "score was {score}");
    }

    #[test]
    fn test_education_above_requirement_caps_at_100() {
        assert_eq!(score_education(&[education("PhD")], "Bachelor"), 100.0);
    }

    #[test]
    fn test_unrecognized_cv_degree_scores_zero() {
        assert_eq!(
            score_education(&[education("Certificate of attendance")], "Bachelor"),
            0.0
        );
    }

    #[test]
    fn test_unrecognized_required_degree_falls_back_to_lowest() {
        assert_eq!(score_education(&[education("Bachelor")], "Diploma"), 100.0);
    }

    #[test]
    fn test_no_education_entries_scores_zero() {
        assert_eq!(score_education(&[], "Bachelor"), 0.0);
    }

    #[test]
    fn test_culture_averages_only_culture_appreciations() {
        let appreciations = [
            appreciation(QuestionCategory::Culture, Rating::Satisfied),
            appreciation(QuestionCategory::Culture, Rating::VerySatisfied),
            appreciation(QuestionCategory::JobFit, Rating::VeryUnsatisfied),
        ];
        // (4 + 5) / 2 = 4.5 → 90%
        assert_eq!(score_culture(&appreciations), 90.0);
    }

    #[test]
    fn test_culture_with_no_culture_appreciations_is_zero() {
        let appreciations = [appreciation(QuestionCategory::JobFit, Rating::Satisfied)];
        assert_eq!(score_culture(&appreciations), 0.0);
    }

    #[test]
    fn test_interview_groups_by_category_before_averaging() {
        // job_fit: one 5; cv_specific: three 3s. Category means are 5 and 3,
        // so the score is 4/5 = 80%, not the flat mean 3.5/5 = 70%.
        let appreciations = [
            appreciation(QuestionCategory::JobFit, Rating::VerySatisfied),
            appreciation(QuestionCategory::CvSpecific, Rating::Neutral),
            appreciation(QuestionCategory::CvSpecific, Rating::Neutral),
            appreciation(QuestionCategory::CvSpecific, Rating::Neutral),
        ];
        assert_eq!(score_interview(&appreciations), 80.0);
    }

    #[test]
    fn test_interview_excludes_culture() {
        let appreciations = [
            appreciation(QuestionCategory::Culture, Rating::VeryUnsatisfied),
            appreciation(QuestionCategory::JobFit, Rating::VerySatisfied),
        ];
        assert_eq!(score_interview(&appreciations), 100.0);
    }

    #[test]
    fn test_interview_with_only_culture_is_zero() {
        let appreciations = [appreciation(QuestionCategory::Culture, Rating::Satisfied)];
        assert_eq!(score_interview(&appreciations), 0.0);
    }
}
