//! Probe endpoints.
//!
//! `/ping` and `/healthz` are plain-text liveness probes with no dependency
//! checks. `/readyz` round-trips to the counter store.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::{db::CounterStore, state::AppState};

/// Readiness response.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ReadinessResponse {
    /// "ok" or "degraded".
    pub status: String,

    /// Service name.
    pub service: String,

    /// Service version.
    pub version: String,

    /// Current timestamp (ISO 8601).
    pub timestamp: String,

    /// Counter store status: "ok" or "unavailable".
    pub database: String,
}

/// Create probe routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/ping", get(ping))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}

async fn root() -> &'static str {
    "Ops. Nothing here"
}

async fn ping() -> &'static str {
    "pong"
}

/// The pool reconnects on its own, so a running process is healthy.
async fn healthz() -> &'static str {
    "OK"
}

/// Returns 503 when the counter store does not answer.
async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let db_result = state.allocator().store().health_check().await;
    if let Err(e) = &db_result {
        tracing::warn!(error = %e, "Readiness check failed");
    }
    let db_ok = db_result.is_ok();

    let response = ReadinessResponse {
        status: if db_ok { "ok" } else { "degraded" }.to_string(),
        service: "eniidentificador".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
        database: if db_ok { "ok" } else { "unavailable" }.to_string(),
    };

    if db_ok {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::{
        allocator::Allocator,
        db::{MemoryCounterStore, MemoryFault},
    };

    #[tokio::test]
    async fn test_liveness_bodies() {
        assert_eq!(ping().await, "pong");
        assert_eq!(healthz().await, "OK");
        assert_eq!(root().await, "Ops. Nothing here");
    }

    #[tokio::test]
    async fn test_readyz_reports_store_outage() {
        let store = Arc::new(MemoryCounterStore::with_fault(MemoryFault::Unavailable));
        let state = AppState::new(Allocator::new(store));
        let response = readyz(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_readyz_ok() {
        let state = AppState::new(Allocator::new(Arc::new(MemoryCounterStore::new())));
        let response = readyz(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
