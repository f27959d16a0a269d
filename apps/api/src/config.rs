use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::analysis::matching::MatchResult;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_api_base: String,
    pub embedding_model: String,
    pub llm_timeout: Duration,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
    pub analysis: AnalysisSettings,
}

/// Knobs that used to distinguish the separate pipeline variants.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub model_name: String,
    pub rate_limit_enabled: bool,
    pub rate_limit_per_minute: u32,
    pub fallback_skill_list: Vec<String>,
    pub fallback_match_result: MatchResult,
    /// When set, responses carry `degraded` so callers can tell a fallback apart from a real answer.
    pub report_degraded: bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            rate_limit_enabled: false,
            rate_limit_per_minute: 10,
            fallback_skill_list: vec!["Python".to_string(), "SQL".to_string(), "Git".to_string()],
            fallback_match_result: MatchResult {
                match_percentage: 70,
                missing_skills: vec!["Error parsing".to_string()],
            },
            report_degraded: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so tests never touch the process env.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = AnalysisSettings::default();

        let fallback_skill_list = match lookup("FALLBACK_SKILLS") {
            Some(raw) => {
                let skills = split_list(&raw);
                if skills.is_empty() {
                    return Err(anyhow!("FALLBACK_SKILLS must name at least one skill"));
                }
                skills
            }
            None => defaults.fallback_skill_list,
        };

        let fallback_match_result = MatchResult {
            match_percentage: parse_or(
                &lookup,
                "FALLBACK_MATCH_PERCENTAGE",
                defaults.fallback_match_result.match_percentage,
            )?,
            missing_skills: defaults.fallback_match_result.missing_skills,
        };

        Ok(Config {
            gemini_api_key: lookup("GEMINI_API_KEY")
                .filter(|key| !key.trim().is_empty())
                .context("Required environment variable 'GEMINI_API_KEY' is not set")?,
            gemini_api_base: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            embedding_model: lookup("EMBEDDING_MODEL")
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            llm_timeout: Duration::from_secs(parse_or(&lookup, "LLM_TIMEOUT_SECS", 60)?),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            port: parse_or(&lookup, "PORT", 8000)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            analysis: AnalysisSettings {
                model_name: lookup("LLM_MODEL").unwrap_or(defaults.model_name),
                rate_limit_enabled: parse_or(
                    &lookup,
                    "RATE_LIMIT_ENABLED",
                    defaults.rate_limit_enabled,
                )?,
                rate_limit_per_minute: parse_or(
                    &lookup,
                    "RATE_LIMIT_PER_MINUTE",
                    defaults.rate_limit_per_minute,
                )?,
                fallback_skill_list,
                fallback_match_result,
                report_degraded: parse_or(&lookup, "REPORT_DEGRADED", defaults.report_degraded)?,
            },
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_is_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "k")])).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.llm_timeout, Duration::from_secs(60));
        assert_eq!(config.gemini_api_base, DEFAULT_API_BASE);
        assert_eq!(config.analysis.model_name, DEFAULT_MODEL);
        assert!(!config.analysis.rate_limit_enabled);
        assert_eq!(config.analysis.rate_limit_per_minute, 10);
        assert_eq!(config.analysis.fallback_match_result.match_percentage, 70);
        assert!(config.analysis.report_degraded);
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "k"),
            ("LLM_MODEL", "gemini-2.0-flash"),
            ("RATE_LIMIT_ENABLED", "true"),
            ("RATE_LIMIT_PER_MINUTE", "3"),
            ("FALLBACK_SKILLS", "Rust, Go ,,"),
            ("FALLBACK_MATCH_PERCENTAGE", "55"),
            ("REPORT_DEGRADED", "false"),
        ]))
        .unwrap();
        assert_eq!(config.analysis.model_name, "gemini-2.0-flash");
        assert!(config.analysis.rate_limit_enabled);
        assert_eq!(config.analysis.rate_limit_per_minute, 3);
        assert_eq!(config.analysis.fallback_skill_list, vec!["Rust", "Go"]);
        assert_eq!(config.analysis.fallback_match_result.match_percentage, 55);
        assert!(!config.analysis.report_degraded);
    }

    #[test]
    fn test_invalid_number_names_the_variable() {
        let err = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "k"), ("PORT", "eighty")]))
            .unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_empty_fallback_skills_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "k"),
            ("FALLBACK_SKILLS", " , "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("FALLBACK_SKILLS"));
    }
}
