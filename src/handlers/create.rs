use crate::error::{ApiError, ErrorResponse};
use crate::models::ItemResponse;
use crate::routes;
use crate::state::AppState;
use crate::validation::validate_create;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value as JsonValue;

/// POST /api/items handler - Create an item
///
/// Body: `name` (required), `description` and `status` (optional).
#[utoipa::path(
    post,
    path = routes::ITEMS,
    request_body = serde_json::Value,
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Validation failed or invalid JSON", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let Json(body) = body?;
    let new_item = validate_create(&body)?;

    let item = state.store.create(new_item).await?;

    tracing::info!("Created item with id: {}", item.id);
    Ok((StatusCode::CREATED, Json(ItemResponse { item })))
}
