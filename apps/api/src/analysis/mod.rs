// Resume analysis: skills → match → learning path → career tracks.
// All LLM and embedding calls go through the llm_client traits; nothing here
// talks to the provider directly.

use thiserror::Error;

pub mod handlers;
pub mod learning;
pub mod matching;
pub mod pipeline;
pub mod prompts;
pub mod skills;
pub mod tracks;

/// Result of one LLM-backed step, tagged with where the value came from.
///
/// Steps never fail outright; a transport or decode failure yields `Fallback`
/// carrying the configured default, and callers decide what that means downstream.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Answered(T),
    Fallback(T),
}

impl<T> Outcome<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Outcome::Fallback(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Outcome::Answered(v) | Outcome::Fallback(v) => v,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Answered(v) | Outcome::Fallback(v) => v,
        }
    }
}

/// A reply that did not have the shape the prompt asked for.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("reply was empty")]
    Empty,

    #[error("reply is not a list: {0}")]
    NotAList(String),

    #[error("reply is not a match object: {0}")]
    NotAMatch(String),

    #[error("reply contained no links")]
    NoLinks,
}

/// Short prefix of a reply for log lines.
pub(crate) fn snippet(text: &str) -> String {
    const MAX: usize = 80;
    match text.char_indices().nth(MAX) {
        Some((i, _)) => format!("{}…", &text[..i]),
        None => text.to_string(),
    }
}
