// All LLM prompt constants used by Hirelens: job-description expansion,
// CV profile extraction, and interview question generation.

/// System prompt for job-description expansion — enforces JSON-only output.
pub const JOB_DESCRIPTION_SYSTEM: &str =
    "You are an expert technical recruiter writing structured job descriptions. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Job-description expansion template. Replace `{title}`, `{description}`
/// and `{experience}` before sending.
pub const JOB_DESCRIPTION_PROMPT_TEMPLATE: &str = r#"Expand the following recruiter brief into a structured job description.

BRIEF:
- Title: {title}
- Context: {description}
- Expected experience: {experience}

Return a JSON object with this EXACT schema (no extra fields):
{
  "title": "Backend Engineer",
  "description": "A 100-150 word professional description of the role",
  "skills": ["Python", "SQL"],
  "responsibilities": ["Own the billing service end to end"],
  "qualifications": ["3+ years building production services"],
  "required_experience_years": 3.0,
  "required_degree": "Bachelor"
}

Rules:
- "skills" must list concrete, individually matchable skills (languages, frameworks, tools, practices).
- "required_experience_years" is a number; use 0 for internship-level roles.
- "required_degree" is one of: "Associate", "Bachelor", "Master", "Doctorate"."#;

/// System prompt for CV profile extraction — enforces JSON-only output.
pub const CV_ANALYSIS_SYSTEM: &str =
    "You are an expert CV analyst. Extract structured facts from a raw CV text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT invent facts not present in the CV.";

/// CV extraction template. Replace `{cv_text}` before sending.
pub const CV_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Extract the key information from the following CV.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["Python", "PostgreSQL"],
  "experience": [
    {"role": "Backend Developer", "duration": "3 years", "description": "Built the payments API"}
  ],
  "education": [
    {"degree": "Bachelor of Computer Science", "institution": "Example University"}
  ]
}

Rules:
- "skills" lists individual skills as short strings, no sentences.
- "duration" is copied verbatim from the CV (e.g. "3 years", "18 months", "2019-2022").
- Omit nothing that is present; invent nothing that is absent. Use empty lists for missing sections.

CV:
{cv_text}"#;

/// System prompt for interview question generation — enforces JSON-only output.
pub const QUESTIONS_SYSTEM: &str =
    "You are an experienced interviewer preparing structured interview questions. \
    You MUST respond with valid JSON only — an object with a \"questions\" array. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Per-category question generation template. Replace `{count}`, `{category}`,
/// `{focus}` and `{context}` before sending.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate exactly {count} interview questions for the category "{category}".

Category focus: {focus}

CONTEXT:
{context}

Return a JSON object with this EXACT schema:
{
  "questions": [
    {"category": "{category}", "question": "The question text", "purpose": "What the answer reveals"}
  ]
}

Rules:
- Exactly {count} questions, all with category "{category}".
- Each question must be answerable in an interview, specific to the context, and non-redundant."#;
