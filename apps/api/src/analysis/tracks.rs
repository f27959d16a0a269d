//! Career-Track Ranker: embedding similarity between the candidate's skills
//! and a fixed registry of five tracks.
//!
//! Unlike the LLM steps there is no fallback here: an embedding failure
//! propagates and fails the request.

use std::cmp::Ordering;

use serde::Serialize;
use thiserror::Error;

use crate::llm_client::{Embedder, LlmError};

pub const TOP_TRACKS: usize = 3;

#[derive(Debug, Error)]
pub enum RankError {
    #[error("embedding failed: {0}")]
    Embedding(#[from] LlmError),

    #[error("embedding dimensions don't match: {0} vs {1}")]
    DimensionMismatch(usize, usize),
}

#[derive(Debug, Clone, Copy)]
pub struct CareerTrack {
    pub name: &'static str,
    pub skills: &'static [&'static str],
}

/// Static registry, declaration order is the tie-break order.
pub const CAREER_TRACKS: [CareerTrack; 5] = [
    CareerTrack {
        name: "DevOps Engineer",
        skills: &[
            "Kubernetes",
            "Docker",
            "CI/CD",
            "Terraform",
            "AWS",
            "Linux",
            "Jenkins",
            "GitHub Actions",
        ],
    },
    CareerTrack {
        name: "Cloud Architect",
        skills: &[
            "AWS",
            "Azure",
            "GCP",
            "Terraform",
            "CloudFormation",
            "Networking",
            "Security",
        ],
    },
    CareerTrack {
        name: "Data Scientist",
        skills: &[
            "Python",
            "Pandas",
            "Machine Learning",
            "TensorFlow",
            "SQL",
            "Statistics",
        ],
    },
    CareerTrack {
        name: "Full-Stack Developer",
        skills: &[
            "JavaScript",
            "React",
            "Node.js",
            "TypeScript",
            "MongoDB",
            "PostgreSQL",
        ],
    },
    CareerTrack {
        name: "Site Reliability Engineer",
        skills: &["Kubernetes", "Prometheus", "Grafana", "Python", "Go"],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackFit {
    pub track: &'static str,
    /// Cosine similarity as a percentage, one decimal, within 0–100.
    pub fit: f64,
}

pub async fn rank_career_tracks(
    skills: &[String],
    embedder: &dyn Embedder,
) -> Result<Vec<TrackFit>, RankError> {
    let mut fits = Vec::with_capacity(CAREER_TRACKS.len());

    if skills.is_empty() {
        // Nothing to embed; every track scores zero and keeps registry order.
        fits.extend(CAREER_TRACKS.iter().map(|t| TrackFit {
            track: t.name,
            fit: 0.0,
        }));
    } else {
        let candidate = embedder.embed(&skills.join(" ")).await?;
        for track in &CAREER_TRACKS {
            let track_vec = embedder.embed(&track.skills.join(" ")).await?;
            let similarity = cosine_similarity(&candidate, &track_vec)?;
            fits.push(TrackFit {
                track: track.name,
                fit: to_fit_score(similarity),
            });
        }
    }

    // sort_by is stable, so equal fits keep declaration order
    fits.sort_by(|a, b| b.fit.partial_cmp(&a.fit).unwrap_or(Ordering::Equal));
    fits.truncate(TOP_TRACKS);
    Ok(fits)
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, RankError> {
    if a.len() != b.len() {
        return Err(RankError::DimensionMismatch(a.len(), b.len()));
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }
    Ok(dot_product / (norm_a * norm_b))
}

fn to_fit_score(similarity: f32) -> f64 {
    let percent = (f64::from(similarity) * 100.0).clamp(0.0, 100.0);
    (percent * 10.0).round() / 10.0
}
