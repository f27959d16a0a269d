//! Skill Extractor: asks the LLM for the resume's technical skills as a list.

use tracing::warn;

use crate::analysis::prompts::{JSON_ONLY_SYSTEM, SKILL_EXTRACTION_PROMPT};
use crate::analysis::{snippet, DecodeError, Outcome};
use crate::llm_client::{strip_code_fences, LanguageModel};

/// Prompt-size guard, counted in characters.
pub const MAX_RESUME_CHARS: usize = 10_000;

/// One LLM call. Never fails: any transport or decode error yields `fallback`.
pub async fn extract_skills(
    resume_text: &str,
    llm: &dyn LanguageModel,
    fallback: &[String],
) -> Outcome<Vec<String>> {
    let prompt = SKILL_EXTRACTION_PROMPT.replace(
        "{resume_text}",
        truncate_chars(resume_text, MAX_RESUME_CHARS),
    );

    let reply = match llm.complete(&prompt, JSON_ONLY_SYSTEM).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Skill extraction call failed, using fallback skills: {e}");
            return Outcome::Fallback(fallback.to_vec());
        }
    };

    match decode_skill_list(&reply) {
        Ok(skills) => Outcome::Answered(skills),
        Err(e) => {
            warn!("Skill extraction reply rejected ({e}), using fallback skills");
            Outcome::Fallback(fallback.to_vec())
        }
    }
}

/// Accepts the first JSON array of strings in the reply, ignoring prose around it.
/// Failing that, the first balanced `[...]` span is read as loosely quoted
/// comma-separated items (`['Go', "Rust", SQL]`).
pub fn decode_skill_list(reply: &str) -> Result<Vec<String>, DecodeError> {
    let text = strip_code_fences(reply);
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }

    for (start, _) in text.match_indices('[') {
        let mut stream =
            serde_json::Deserializer::from_str(&text[start..]).into_iter::<Vec<String>>();
        if let Some(Ok(skills)) = stream.next() {
            return Ok(skills);
        }
    }

    let list = balanced_list(text).ok_or_else(|| DecodeError::NotAList(snippet(text)))?;
    let skills = list
        .split(',')
        .map(|item| item.trim().trim_matches(|c: char| c == '"' || c == '\'').trim())
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect();
    Ok(skills)
}

/// Inside of the first `[...]` whose brackets balance, without the brackets.
fn balanced_list(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let mut depth = 0usize;
    for (i, c) in text[start..].char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start + 1..start + i]);
                }
            }
            _ => {}
        }
    }
    None
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((i, _)) => &text[..i],
        None => text,
    }
}
