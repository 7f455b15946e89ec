use axum::{
    extract::DefaultBodyLimit,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::config::Config;
use crate::error::route_not_found;
use crate::handlers;
use crate::routes;
use crate::state::AppState;

/// Largest accepted request body
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// API routes, docs and the JSON 404 fallback, without outer middleware
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(
            routes::ITEMS,
            get(handlers::list_handler).post(handlers::create_handler),
        )
        .route(
            routes::ITEM,
            get(handlers::get_handler)
                .put(handlers::update_handler)
                .delete(handlers::delete_handler),
        )
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}

/// The full service: [`router`] plus CORS and request tracing
pub fn build_app(state: AppState, config: &Config) -> Router {
    router(state)
        .layer(config.cors_layer())
        .layer(TraceLayer::new_for_http())
}
