//! CV intake: PDF text extraction and LLM-backed profile extraction.

use crate::errors::AppError;
use crate::llm_client::prompts::{CV_ANALYSIS_PROMPT_TEMPLATE, CV_ANALYSIS_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::cv::CvProfile;

/// Extracts the text of an uploaded PDF. Unreadable or text-free documents
/// are the caller's fault, not the server's.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::UnprocessableEntity(format!("Could not read PDF: {e}")))?;
    let text = normalize_whitespace(&text);
    if text.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "PDF contains no extractable text".into(),
        ));
    }
    Ok(text)
}

/// Extracts a structured profile from raw CV text via the LLM.
pub async fn analyze_cv(llm: &LlmClient, cv_text: &str) -> Result<CvProfile, AppError> {
    let prompt = CV_ANALYSIS_PROMPT_TEMPLATE.replace("{cv_text}", cv_text);
    llm.call_json::<CvProfile>(&prompt, CV_ANALYSIS_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("CV analysis failed: {e}")))
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace_collapses_runs() {
        assert_eq!(
            normalize_whitespace("  Jane\n\nDoe \t Backend   Engineer "),
            "Jane Doe Backend Engineer"
        );
    }

    #[test]
    fn test_normalize_whitespace_empty_input() {
        assert_eq!(normalize_whitespace("   \n \t "), "");
    }
}
