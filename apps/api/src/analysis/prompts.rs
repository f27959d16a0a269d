// Analysis LLM prompt templates.
// Placeholders in braces are substituted with `str::replace` by the calling step.

pub use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, PLAIN_LINES_SYSTEM};

pub const SKILL_EXTRACTION_PROMPT: &str = r#"Extract ONLY technical skills and tools from the resume below.
Return them as a single JSON array of strings and nothing else.
Example: ["Python", "Docker", "AWS"]

Resume:
{resume_text}"#;

pub const MATCH_PROMPT: &str = r#"You are an expert technical recruiter.

Job description:
{job_description}

Candidate skills: {skills}

Estimate how well the candidate matches the job and list the required skills the candidate is missing.
Return ONLY valid JSON with exactly this shape:
{"match_percentage": 85, "missing_skills": ["Kubernetes", "Terraform"]}"#;

pub const LEARNING_PATH_PROMPT: &str = "Suggest the TOP 3 online courses (with direct links) to learn: {missing_skills}\n\
Put each course on its own line as: <course title> - <full https URL>";
