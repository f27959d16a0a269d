//! Fixed-window request limiter keyed by client IP, applied to `/analyze` only.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::time::Instant;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

const WINDOW: Duration = Duration::from_secs(60);

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    clients: Mutex<HashMap<IpAddr, Window>>,
}

impl FixedWindowLimiter {
    pub fn per_minute(limit: u32) -> Self {
        Self {
            limit,
            window: WINDOW,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Counts the request against `client`'s window; `false` means reject.
    pub fn try_acquire(&self, client: IpAddr) -> bool {
        let now = Instant::now();
        let mut clients = self.clients.lock().unwrap_or_else(PoisonError::into_inner);

        // Expired windows carry no state worth keeping.
        clients.retain(|_, w| now.duration_since(w.started) < self.window);

        let window = clients.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });
        if window.count >= self.limit {
            return false;
        }
        window.count += 1;
        true
    }
}

/// Middleware: rejects with 429 before the handler runs. A no-op when limiting is disabled.
pub async fn enforce(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(limiter) = &state.rate_limiter {
        let client = request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

        if !limiter.try_acquire(client) {
            warn!("Rate limit exceeded for {client}");
            return AppError::RateLimited.into_response();
        }
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(last: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, last))
    }

    #[tokio::test]
    async fn test_limit_applies_per_client() {
        tokio::time::pause();
        let limiter = FixedWindowLimiter::per_minute(2);
        assert!(limiter.try_acquire(ip(1)));
        assert!(limiter.try_acquire(ip(1)));
        assert!(!limiter.try_acquire(ip(1)));
        assert!(limiter.try_acquire(ip(2)));
    }

    #[tokio::test]
    async fn test_default_budget_rejects_eleventh_request() {
        tokio::time::pause();
        let limiter = FixedWindowLimiter::per_minute(10);
        for _ in 0..10 {
            assert!(limiter.try_acquire(ip(7)));
        }
        assert!(!limiter.try_acquire(ip(7)));
    }

    #[tokio::test]
    async fn test_window_resets_after_a_minute() {
        tokio::time::pause();
        let limiter = FixedWindowLimiter::per_minute(1);
        assert!(limiter.try_acquire(ip(1)));
        assert!(!limiter.try_acquire(ip(1)));

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(!limiter.try_acquire(ip(1)));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(limiter.try_acquire(ip(1)));
    }

    #[tokio::test]
    async fn test_zero_limit_rejects_everything() {
        let limiter = FixedWindowLimiter::per_minute(0);
        assert!(!limiter.try_acquire(ip(1)));
    }
}
