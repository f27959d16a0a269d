use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Always 200; does not touch the LLM provider.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "skillmatch-api"
    }))
}
