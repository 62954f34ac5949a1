//! OpenAPI document.

use axum::Json;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use school_registry_core::{School, SchoolFields};

use super::schools;
use crate::error::{ErrorMessage, StatusMessage};

/// API description generated from the handler annotations.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "School API",
        version = "1.0.0",
        description = "API documentation for the School management system"
    ),
    paths(
        schools::create_school,
        schools::list_schools,
        schools::get_school,
        schools::update_school,
        schools::delete_school
    ),
    components(schemas(School, SchoolFields, ErrorMessage, StatusMessage)),
    modifiers(&BearerAuth),
    tags((name = "Schools", description = "School management"))
)]
pub struct ApiDoc;

/// Registers the `bearerAuth` scheme referenced by every school route.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Serve the OpenAPI document.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
