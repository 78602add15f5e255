//! Random selection API handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use randomsong_core::{FilterCriteria, SearchOutcome};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::handlers::ErrorResponse;
use crate::state::AppState;

/// Largest per-request attempt budget accepted over HTTP.
pub const MAX_REQUEST_RETRIES: u32 = 1000;

// ============================================================================
// Request/Response types
// ============================================================================

/// Body of `POST /api/v1/random`. Omitted fields fall back to the config.
#[derive(Debug, Default, Deserialize)]
pub struct RandomRequest {
    #[serde(default)]
    pub filter: Option<FilterCriteria>,
    #[serde(default)]
    pub max_retries: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RandomStatusResponse {
    pub in_progress: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/v1/random
///
/// Run one random search. Only one search runs at a time; a second request
/// while one is in flight gets `409 Conflict`. A `max_retries` above
/// [`MAX_REQUEST_RETRIES`] is rejected with `400`.
pub async fn find_random(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RandomRequest>,
) -> Response {
    if let Some(max_retries) = body.max_retries {
        if max_retries > MAX_REQUEST_RETRIES {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!(
                        "max_retries ({}) cannot exceed {}",
                        max_retries, MAX_REQUEST_RETRIES
                    ),
                }),
            )
                .into_response();
        }
    }

    if let Some(filter) = &body.filter {
        if let Err(e) = filter.validate() {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: e }),
            )
                .into_response();
        }
    }

    let Some(_guard) = state.try_begin_search() else {
        info!("Rejecting random search request, another search is in progress");
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "A random search is already in progress".to_string(),
            }),
        )
            .into_response();
    };

    let criteria = body.filter.as_ref().or(state.config().filter.as_ref());
    let max_retries = body
        .max_retries
        .unwrap_or(state.selector().config().max_retries);

    let outcome = state
        .selector()
        .find_random_acceptable_item(criteria, max_retries)
        .await;

    let status = match &outcome {
        SearchOutcome::Unreachable { reason } => {
            warn!("Catalog unreachable: {}", reason);
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::OK,
    };

    (status, Json(outcome)).into_response()
}

/// GET /api/v1/random/status
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<RandomStatusResponse> {
    Json(RandomStatusResponse {
        in_progress: state.search_in_progress(),
    })
}
