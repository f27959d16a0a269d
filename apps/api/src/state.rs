use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::{Embedder, LanguageModel};
use crate::rate_limit::FixedWindowLimiter;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once in `main` and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn LanguageModel>,
    pub embedder: Arc<dyn Embedder>,
    pub config: Arc<Config>,
    /// Present only when `RATE_LIMIT_ENABLED` is set.
    pub rate_limiter: Option<Arc<FixedWindowLimiter>>,
}

impl AppState {
    pub fn new(
        llm: Arc<dyn LanguageModel>,
        embedder: Arc<dyn Embedder>,
        config: Config,
    ) -> Self {
        let rate_limiter = config.analysis.rate_limit_enabled.then(|| {
            Arc::new(FixedWindowLimiter::per_minute(
                config.analysis.rate_limit_per_minute,
            ))
        });

        Self {
            llm,
            embedder,
            config: Arc::new(config),
            rate_limiter,
        }
    }
}
