use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::auth::ErrorResponse;
use crate::models::user::{LoginRequest, LoginResponse, RegisterRequest, User};

/// OpenAPI document covering the REST endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::auth::me,
        crate::handlers::auth::username_registered,
        crate::handlers::auth::phone_registered,
        crate::handlers::auth::email_registered
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        LoginResponse,
        User,
        ErrorResponse
    )),
    modifiers(&BearerSecurity),
    tags(
        (name = "Auth", description = "Authentication & token APIs"),
        (name = "Users", description = "Identity existence probes")
    )
)]
pub struct ApiDoc;

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
