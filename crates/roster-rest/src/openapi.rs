//! OpenAPI documentation configuration.

use crate::controllers::HealthResponse;
use roster_core::{ErrorResponse, FieldError};
use roster_service::{CreateUserRequest, UserResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the Roster API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = "1.0.0",
        description = "Create and fetch users"
    ),
    paths(
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            CreateUserRequest,
            UserResponse,
            ErrorResponse,
            FieldError,
            HealthResponse,
        )
    ),
    tags(
        (name = "users", description = "User endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_user_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/user/"));
        assert!(doc.paths.paths.contains_key("/user/{user_id}"));
        assert!(doc.paths.paths.contains_key("/ready"));
    }
}
