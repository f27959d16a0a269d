//! Learning-Path Advisor: course suggestions for the skills a candidate lacks.

use tracing::warn;

use crate::analysis::prompts::{LEARNING_PATH_PROMPT, PLAIN_LINES_SYSTEM};
use crate::analysis::{DecodeError, Outcome};
use crate::llm_client::LanguageModel;

pub const MAX_LEARNING_PATH: usize = 3;
pub const NO_ACTION_NEEDED: &str = "You are already a strong match!";
pub const FALLBACK_COURSE: &str =
    "Browse courses for these skills on Coursera: https://www.coursera.org/courses";

/// The fixed answer when there is nothing to learn. Makes no LLM call.
pub fn no_action_needed() -> Vec<String> {
    vec![NO_ACTION_NEEDED.to_string()]
}

/// Empty input short-circuits without calling the model. Otherwise one LLM call;
/// a transport failure or a reply without links yields the fallback course.
pub async fn suggest_learning_path(
    missing_skills: &[String],
    llm: &dyn LanguageModel,
) -> Outcome<Vec<String>> {
    if missing_skills.is_empty() {
        return Outcome::Answered(no_action_needed());
    }

    let prompt = LEARNING_PATH_PROMPT.replace("{missing_skills}", &missing_skills.join(", "));

    let reply = match llm.complete(&prompt, PLAIN_LINES_SYSTEM).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Learning path call failed, using fallback course: {e}");
            return Outcome::Fallback(vec![FALLBACK_COURSE.to_string()]);
        }
    };

    match decode_course_links(&reply) {
        Ok(courses) => Outcome::Answered(courses),
        Err(e) => {
            warn!("Learning path reply rejected ({e}), using fallback course");
            Outcome::Fallback(vec![FALLBACK_COURSE.to_string()])
        }
    }
}

/// Keeps the first three non-blank lines that mention a link, minus list markers.
pub fn decode_course_links(reply: &str) -> Result<Vec<String>, DecodeError> {
    let courses: Vec<String> = reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && line.contains("http"))
        .map(trim_list_marker)
        .filter(|line| !line.is_empty())
        .take(MAX_LEARNING_PATH)
        .map(String::from)
        .collect();

    if courses.is_empty() {
        return Err(DecodeError::NoLinks);
    }
    Ok(courses)
}

/// `- x`, `* x`, `• x`, `1. x`, `2) x` → `x`
fn trim_list_marker(line: &str) -> &str {
    let line = line.trim_start_matches(|c: char| matches!(c, '-' | '*' | '•') || c.is_whitespace());
    let unnumbered = line.trim_start_matches(|c: char| c.is_ascii_digit());
    let line = match unnumbered.strip_prefix(|c: char| c == '.' || c == ')') {
        // `3.5 Hours of Docker` is a title, not a numbered item
        Some(rest) if unnumbered.len() < line.len() && rest.starts_with(char::is_whitespace) => {
            rest
        }
        _ => line,
    };
    line.trim().trim_end_matches(|c: char| c == '-' || c.is_whitespace())
}
