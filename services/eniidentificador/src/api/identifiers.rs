//! Identifier allocation endpoints.
//!
//! GET /eniidentificador/documento/{unit}/{year}/{series}
//! GET /eniidentificador/expediente/{unit}/{year}/{series}
//!
//! A trailing slash is accepted, and a format suffix on the last segment
//! (`AB.json`) is dropped before validation.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use eni_id::{IdentifierRequest, Mode};
use serde::Serialize;
use tracing::{debug, error, info};

use crate::{api::error::ApiError, state::AppState};

/// Successful allocation.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct IdentifierResponse {
    pub identificador: String,
}

type PathParams = Result<Path<(String, String, String)>, PathRejection>;

/// Create identifier routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/documento/{unit}/{year}/{series}", get(issue_document))
        .route("/documento/{unit}/{year}/{series}/", get(issue_document))
        .route("/expediente/{unit}/{year}/{series}", get(issue_case_file))
        .route("/expediente/{unit}/{year}/{series}/", get(issue_case_file))
}

/// Drops a `.ext` format suffix from the last path segment.
fn strip_format_suffix(segment: &str) -> &str {
    match segment.rfind('.') {
        Some(dot) => &segment[..dot],
        None => segment,
    }
}

async fn issue_document(
    State(state): State<AppState>,
    params: PathParams,
) -> Result<Json<IdentifierResponse>, ApiError> {
    issue(&state, Mode::Document, params).await
}

async fn issue_case_file(
    State(state): State<AppState>,
    params: PathParams,
) -> Result<Json<IdentifierResponse>, ApiError> {
    issue(&state, Mode::CaseFile, params).await
}

async fn issue(
    state: &AppState,
    mode: Mode,
    params: PathParams,
) -> Result<Json<IdentifierResponse>, ApiError> {
    let Path((unit, year, series)) = params.map_err(|e| {
        debug!(%mode, error = %e, "Rejected path parameters");
        ApiError::invalid_request()
    })?;

    let series = strip_format_suffix(&series);
    let request = IdentifierRequest::parse(mode, &unit, &year, series).map_err(|e| {
        debug!(%mode, field = e.field(), error = %e, "Invalid identifier request");
        ApiError::invalid_request()
    })?;

    let key = request.counter_key();
    let index = state.allocator().allocate(&key).await.map_err(|e| {
        error!(%key, error = %e, "Identifier allocation failed");
        ApiError::internal()
    })?;

    let identificador = request.render(index);
    info!(%key, index = index.value(), %identificador, "Identifier issued");

    Ok(Json(IdentifierResponse { identificador }))
}
