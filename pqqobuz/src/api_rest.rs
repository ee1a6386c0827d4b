//! REST endpoint exposing Qobuz catalog search
//!
//! A thin HTTP boundary over [`QobuzClient::search_tracks`]: paging
//! and query validation live in the client, this module only maps
//! errors to status codes.

use crate::client::{QobuzClient, SearchPage};
use crate::error::QobuzError;
use axum::{
    extract::rejection::QueryRejection,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

/// Search query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct SearchParams {
    /// Search query (must not be blank)
    #[serde(default)]
    pub q: Option<String>,
    /// Page size, clamped to [1, 200] (default 20)
    #[serde(default)]
    pub limit: Option<u32>,
    /// Paging offset (default 0)
    #[serde(default)]
    pub offset: Option<u32>,
}

/// Error envelope shared by all failure responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Router for the search endpoint, mounted at the server root
pub fn search_router(client: Arc<QobuzClient>) -> Router {
    Router::new()
        .route("/search", get(search_tracks))
        .with_state(client)
}

#[utoipa::path(
    get,
    path = "/search",
    tag = "qobuz",
    params(SearchParams),
    responses(
        (status = 200, description = "Normalized search results", body = SearchPage),
        (status = 400, description = "Blank query", body = ErrorResponse),
        (status = 502, description = "Upstream catalog failure", body = ErrorResponse)
    )
)]
pub async fn search_tracks(
    State(client): State<Arc<QobuzClient>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    // A malformed query string gets the same envelope as every failure
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => {
            return (
                rejection.status(),
                Json(ErrorResponse {
                    error: rejection.body_text(),
                }),
            )
                .into_response()
        }
    };

    let query = params.q.unwrap_or_default();

    match client
        .search_tracks(&query, params.limit, params.offset)
        .await
    {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(err) => map_error(err),
    }
}

fn map_error(error: QobuzError) -> Response {
    let (status, message) = match &error {
        QobuzError::InvalidQuery(message) => (StatusCode::BAD_REQUEST, message.clone()),
        QobuzError::Upstream { .. } | QobuzError::Http(_) => {
            tracing::error!(error = %error, "Qobuz catalog request failed");
            // The upstream status travels in the envelope
            (StatusCode::BAD_GATEWAY, error.to_string())
        }
        QobuzError::Configuration(_) => {
            tracing::error!(error = %error, "Qobuz adapter misconfigured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error.".to_string(),
            )
        }
    };

    (status, Json(ErrorResponse { error: message })).into_response()
}
