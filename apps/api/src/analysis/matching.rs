//! Match Scorer: asks the LLM how well the skills cover a job description.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::analysis::prompts::{JSON_ONLY_SYSTEM, MATCH_PROMPT};
use crate::analysis::{snippet, DecodeError, Outcome};
use crate::llm_client::{strip_code_fences, LanguageModel};

/// The model's verdict. `match_percentage` is trusted as-is (0–100 expected, not enforced).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(default, deserialize_with = "rounded_percentage")]
    pub match_percentage: i64,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

/// Models sometimes answer `72.5`; round instead of rejecting the whole reply.
fn rounded_percentage<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = f64::deserialize(deserializer)?;
    Ok(value.round() as i64)
}

/// One LLM call. Never fails: any transport or decode error yields `fallback`.
pub async fn score_match(
    skills: &[String],
    job_description: &str,
    llm: &dyn LanguageModel,
    fallback: &MatchResult,
) -> Outcome<MatchResult> {
    let prompt = MATCH_PROMPT
        .replace("{skills}", &skills.join(", "))
        .replace("{job_description}", job_description);

    let reply = match llm.complete(&prompt, JSON_ONLY_SYSTEM).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Match scoring call failed, using fallback result: {e}");
            return Outcome::Fallback(fallback.clone());
        }
    };

    match decode_match_result(&reply) {
        Ok(result) => Outcome::Answered(result),
        Err(e) => {
            warn!("Match scoring reply rejected ({e}), using fallback result");
            Outcome::Fallback(fallback.clone())
        }
    }
}

/// Decodes one `MatchResult` starting at the first `{`. Text after the object is ignored.
pub fn decode_match_result(reply: &str) -> Result<MatchResult, DecodeError> {
    let text = strip_code_fences(reply);
    if text.is_empty() {
        return Err(DecodeError::Empty);
    }

    let start = text
        .find('{')
        .ok_or_else(|| DecodeError::NotAMatch(snippet(text)))?;

    match serde_json::Deserializer::from_str(&text[start..])
        .into_iter::<MatchResult>()
        .next()
    {
        Some(Ok(result)) => Ok(result),
        Some(Err(e)) => Err(DecodeError::NotAMatch(e.to_string())),
        None => Err(DecodeError::NotAMatch(snippet(text))),
    }
}
