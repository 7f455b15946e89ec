// Route path constants - single source of truth for all API paths

pub const HEALTH: &str = "/api/health";
pub const ITEMS: &str = "/api/items";
pub const ITEM: &str = "/api/items/{id}";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
