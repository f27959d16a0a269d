// Shared prompt fragments.
// Each analysis step defines its own prompts in analysis/prompts.rs;
// this file holds the cross-cutting output-format instructions.

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for free-text answers that will be scanned line by line.
pub const PLAIN_LINES_SYSTEM: &str = "You are a concise assistant. \
    Answer with one item per line. \
    Do NOT add introductions, summaries, or closing remarks.";
