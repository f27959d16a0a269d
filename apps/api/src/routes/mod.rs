pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::rate_limit;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let analyze = post(handlers::handle_analyze)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyze", analyze)
        .with_state(state)
}
