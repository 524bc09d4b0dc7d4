//! OpenAPI documentation configuration.
//!
//! This module provides OpenAPI/Swagger documentation generation for the
//! REST API.

use nimbus_core::{ErrorResponse, FieldError};
use nimbus_service::{RegisterUserRequest, UserListResponse, UserResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the Nimbus Users API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Nimbus Users API",
        version = "1.0.0",
        description = "RESTful API for user registration and listing",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::register_user,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            RegisterUserRequest,
            UserResponse,
            UserListResponse,
        )
    ),
    tags(
        (name = "users", description = "User registration and listing endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
