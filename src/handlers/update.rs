use crate::error::{ApiError, ErrorResponse};
use crate::models::ItemResponse;
use crate::routes;
use crate::state::AppState;
use crate::validation::validate_update;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value as JsonValue;

/// PUT /api/items/{id} handler - Partially update an item
///
/// Only the fields present in the body change; at least one must be supplied.
#[utoipa::path(
    put,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "Item id")
    ),
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 400, description = "Validation failed or invalid JSON", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let Json(body) = body?;
    let patch = validate_update(&body)?;

    match state.store.update(&id, patch).await? {
        Some(item) => {
            tracing::info!("Updated item with id: {}", id);
            Ok((StatusCode::OK, Json(ItemResponse { item })))
        }
        None => Err(ApiError::ItemNotFound(id)),
    }
}
