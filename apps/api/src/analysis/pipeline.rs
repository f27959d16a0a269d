//! Resume analysis: orchestrates the full request pipeline.
//!
//! Flow: extract_text → extract_skills → score_match → learning path →
//!       rank_career_tracks → AnalysisResult.
//!
//! Steps run strictly in sequence. The three LLM steps degrade to fallbacks;
//! document and ranking failures abort the request and nothing partial is returned.

use anyhow::anyhow;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::learning::{no_action_needed, suggest_learning_path};
use crate::analysis::matching::score_match;
use crate::analysis::skills::extract_skills;
use crate::analysis::tracks::{rank_career_tracks, TrackFit};
use crate::analysis::Outcome;
use crate::config::AnalysisSettings;
use crate::errors::AppError;
use crate::extraction::ResumeDocument;
use crate::llm_client::{Embedder, LanguageModel};

#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub document: ResumeDocument,
    pub job_description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub match_score: i64,
    pub extracted_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub learning_path: Vec<String>,
    pub career_track_recommendations: Vec<TrackFit>,
    /// `Some(true)` when any LLM step fell back. Omitted unless `report_degraded` is on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded: Option<bool>,
}

pub async fn analyze_resume(
    llm: &dyn LanguageModel,
    embedder: &dyn Embedder,
    settings: &AnalysisSettings,
    request: AnalyzeRequest,
) -> Result<AnalysisResult, AppError> {
    let AnalyzeRequest {
        document,
        job_description,
    } = request;

    // Step 1: Document text (CPU-bound parsing off the async workers)
    let text = tokio::task::spawn_blocking(move || document.extract_text())
        .await
        .map_err(|e| AppError::Internal(anyhow!("text extraction task failed: {e}")))??;
    info!("Extracted {} characters of resume text", text.chars().count());

    // Step 2: Skills
    let skills = extract_skills(&text, llm, &settings.fallback_skill_list).await;
    info!(
        "Extracted {} skills (fallback: {})",
        skills.value().len(),
        skills.is_fallback()
    );

    // Step 3: Match score and gaps
    let matched = score_match(
        skills.value(),
        &job_description,
        llm,
        &settings.fallback_match_result,
    )
    .await;
    info!(
        "Match score: {}% with {} missing skills (fallback: {})",
        matched.value().match_percentage,
        matched.value().missing_skills.len(),
        matched.is_fallback()
    );

    // Step 4: Learning path. A fallback match carries placeholder gaps, not real ones.
    let learning = match &matched {
        Outcome::Answered(result) => suggest_learning_path(&result.missing_skills, llm).await,
        Outcome::Fallback(_) => {
            warn!("Match scoring fell back; skipping learning path lookup");
            Outcome::Answered(no_action_needed())
        }
    };

    // Step 5: Career tracks (no fallback, failures propagate)
    let career_track_recommendations = rank_career_tracks(skills.value(), embedder).await?;

    let degraded = skills.is_fallback() || matched.is_fallback() || learning.is_fallback();
    if degraded {
        warn!("Analysis completed with fallback values");
    }

    let matched = matched.into_value();
    Ok(AnalysisResult {
        match_score: matched.match_percentage,
        extracted_skills: skills.into_value(),
        missing_skills: matched.missing_skills,
        learning_path: learning.into_value(),
        career_track_recommendations,
        degraded: settings.report_degraded.then_some(degraded),
    })
}
