use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::validation::{Issue, ValidationErrors};

/// Error response type
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Present only for validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<Issue>>,
}

/// Response type for health check endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Seconds since the service started
    pub uptime: f64,
    pub timestamp: String,
}

/// Response type for unhealthy status
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every handler returns this so that status codes and JSON error bodies are
/// produced in one place. Storage failures are logged here and reach the
/// client only as a generic message.
#[derive(Debug)]
pub enum ApiError {
    /// Request body failed schema validation
    Validation(ValidationErrors),
    /// Request body was not acceptable JSON
    InvalidBody(JsonRejection),
    /// Query string could not be decoded
    InvalidQuery(QueryRejection),
    /// No item with this id
    ItemNotFound(String),
    /// No route matched the request
    RouteNotFound,
    /// Reading or writing the items document failed
    Storage(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, issues) = match self {
            ApiError::Validation(errors) => {
                tracing::debug!("Validation failed: {}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    Some(errors.into_issues()),
                )
            }
            ApiError::InvalidBody(rejection) => (rejection.status(), rejection.body_text(), None),
            ApiError::InvalidQuery(rejection) => (rejection.status(), rejection.body_text(), None),
            ApiError::ItemNotFound(id) => {
                tracing::debug!("Item not found: {}", id);
                (StatusCode::NOT_FOUND, "Item not found".to_string(), None)
            }
            ApiError::RouteNotFound => (StatusCode::NOT_FOUND, "Route not found".to_string(), None),
            ApiError::Storage(err) => {
                tracing::error!("Storage error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { message, issues })).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Storage(err)
    }
}

/// Fallback for paths no route matches
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}
