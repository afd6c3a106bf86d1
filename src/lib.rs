pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod constants;
pub mod core;
pub mod infrastructure;

use std::sync::Arc;

use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api::{
    handlers::{AppService, api_routes},
    openapi::ApiDoc,
};
use auth::api_key::ApiKey;

/// Health check at `/`, the REST surface under `/api` and the Swagger UI.
///
/// HTTP layers (timeout, CORS, tracing) are left to the caller.
pub fn build_router(service: Arc<AppService>, api_key: Option<ApiKey>) -> Router {
    Router::new()
        .route("/", get(|| async { "OK" }))
        .nest("/api", api_routes(service, api_key))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

#[cfg(test)]
mod tests;
