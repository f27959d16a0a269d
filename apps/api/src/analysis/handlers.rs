//! Axum route handlers for the Analysis API.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::analysis::pipeline::{analyze_resume, AnalysisResult, AnalyzeRequest};
use crate::errors::AppError;
use crate::extraction::ResumeDocument;
use crate::state::AppState;

/// POST /analyze
///
/// Multipart form: `resume_file` (PDF or Word) and `job_description` (text).
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let request = read_analyze_form(multipart).await?;

    let span = info_span!(
        "analyze",
        request_id = %Uuid::new_v4(),
        filename = %request.document.filename
    );

    let result = analyze_resume(
        state.llm.as_ref(),
        state.embedder.as_ref(),
        &state.config.analysis,
        request,
    )
    .instrument(span)
    .await?;

    Ok(Json(result))
}

async fn read_analyze_form(mut multipart: Multipart) -> Result<AnalyzeRequest, AppError> {
    let mut document = None;
    let mut job_description = None;

    while let Some(field) = multipart.next_field().await.map_err(form_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("resume_file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(form_error)?;
                document = Some(ResumeDocument { filename, bytes });
            }
            Some("job_description") => {
                job_description = Some(field.text().await.map_err(form_error)?);
            }
            _ => {}
        }
    }

    let document =
        document.ok_or_else(|| AppError::Validation("resume_file is required".to_string()))?;
    let job_description = job_description
        .filter(|jd| !jd.trim().is_empty())
        .ok_or_else(|| AppError::Validation("job_description is required".to_string()))?;

    Ok(AnalyzeRequest {
        document,
        job_description,
    })
}

fn form_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", e.body_text()))
    }
}
