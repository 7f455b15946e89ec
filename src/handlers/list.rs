use crate::error::{ApiError, ErrorResponse};
use crate::models::{ItemListResponse, ListQuery};
use crate::routes;
use crate::state::AppState;
use crate::validation::validate_list_query;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Json,
};

/// GET /api/items handler - List items
///
/// Returns every item in insertion order, optionally narrowed by status and
/// by a case-insensitive substring of name or description. No pagination.
#[utoipa::path(
    get,
    path = routes::ITEMS,
    params(ListQuery),
    responses(
        (status = 200, description = "Matching items", body = ItemListResponse),
        (status = 400, description = "Invalid query parameter", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn list_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<(StatusCode, Json<ItemListResponse>), ApiError> {
    let Query(pairs) = query?;
    let query = ListQuery::from_pairs(pairs);
    let filter = validate_list_query(&query)?;

    let items = state.store.list(&filter).await?;

    tracing::info!(
        "Listed {} items (status: {:?}, query: {:?})",
        items.len(),
        filter.status,
        filter.query
    );

    Ok((StatusCode::OK, Json(ItemListResponse { items })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{read_json, send, setup_test_app};
    use crate::models::{ItemResponse, ItemStatus};
    use axum::Router;
    use serde_json::json;

    async fn create(app: &Router, body: serde_json::Value) -> ItemResponse {
        let response = send(app, "POST", routes::ITEMS, Some(body)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json(response).await
    }

    async fn list(app: &Router, uri: &str) -> ItemListResponse {
        let response = send(app, "GET", uri, None).await;
        assert_eq!(response.status(), StatusCode::OK);
        read_json(response).await
    }

    #[tokio::test]
    async fn test_list_endpoint_empty() {
        let app = setup_test_app();

        let response_json = list(&app, "/api/items").await;
        assert!(response_json.items.is_empty());
    }

    #[tokio::test]
    async fn test_list_endpoint_returns_insertion_order() {
        let app = setup_test_app();
        create(&app, json!({"name": "first"})).await;
        create(&app, json!({"name": "second"})).await;

        let response_json = list(&app, "/api/items").await;
        let names: Vec<&str> = response_json.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_list_endpoint_status_filter() {
        let app = setup_test_app();
        let created = create(&app, json!({"name": "Task A", "status": "active"})).await;
        create(&app, json!({"name": "Task B"})).await;

        let active = list(&app, "/api/items?status=active").await;
        assert_eq!(active.items.len(), 1);
        assert_eq!(active.items[0], created.item);

        let archived = list(&app, "/api/items?status=archived").await;
        assert!(archived.items.iter().all(|i| i.id != created.item.id));
        assert!(archived.items.is_empty());
    }

    #[tokio::test]
    async fn test_list_endpoint_each_status_only_returns_that_status() {
        let app = setup_test_app();
        for status in ItemStatus::ALL {
            create(&app, json!({"name": format!("{} one", status), "status": status})).await;
            create(&app, json!({"name": format!("{} two", status), "status": status})).await;
        }

        for status in ItemStatus::ALL {
            let response_json = list(&app, &format!("/api/items?status={}", status)).await;
            assert_eq!(response_json.items.len(), 2);
            assert!(response_json.items.iter().all(|i| i.status == status));
        }
    }

    #[tokio::test]
    async fn test_list_endpoint_query_filter() {
        let app = setup_test_app();
        create(&app, json!({"name": "Food prep"})).await;
        create(&app, json!({"name": "Bar"})).await;
        create(&app, json!({"name": "Shopping", "description": "more FOOD"})).await;

        let response_json = list(&app, "/api/items?q=foo").await;
        let names: Vec<&str> = response_json.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Food prep", "Shopping"]);
    }

    #[tokio::test]
    async fn test_list_endpoint_empty_params_are_ignored() {
        let app = setup_test_app();
        create(&app, json!({"name": "anything"})).await;

        let response_json = list(&app, "/api/items?status=&q=").await;
        assert_eq!(response_json.items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_endpoint_repeated_param_is_ignored() {
        let app = setup_test_app();
        create(&app, json!({"name": "Task A", "status": "active"})).await;
        create(&app, json!({"name": "Task B"})).await;

        let response_json = list(&app, "/api/items?status=active&status=archived").await;
        assert_eq!(response_json.items.len(), 2);
    }

    #[tokio::test]
    async fn test_list_endpoint_invalid_status() {
        let app = setup_test_app();

        let response = send(&app, "GET", "/api/items?status=done", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error_response: ErrorResponse = read_json(response).await;
        assert_eq!(error_response.message, "Validation failed");
        assert_eq!(error_response.issues.unwrap()[0].path, "status");
    }

    #[tokio::test]
    async fn test_list_endpoint_query_too_long() {
        let app = setup_test_app();

        let uri = format!("/api/items?q={}", "a".repeat(201));
        let response = send(&app, "GET", &uri, None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let error_response: ErrorResponse = read_json(response).await;
        assert_eq!(error_response.issues.unwrap()[0].path, "q");
    }
}
