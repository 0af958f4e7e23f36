//! Main application router.

use crate::{
    controllers::{health_controller, user_controller},
    middleware::logging_middleware,
    openapi::ApiDoc,
    state::AppState,
};
use axum::{middleware, Router};
use roster_config::ServerConfig;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates the application router over the given state.
pub fn create_router(state: AppState, server_config: &ServerConfig) -> Router {
    let mut router = Router::new()
        .merge(user_controller::router())
        .merge(health_controller::router())
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    if server_config.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    info!("Router created with user endpoints and Swagger UI at /swagger-ui");
    router
}
