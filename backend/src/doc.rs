//! OpenAPI documentation for the REST surface.
//!
//! The [`ApiDoc`] struct aggregates every endpoint and schema. Swagger UI
//! serves the document at `/docs` in debug builds; external tooling can
//! consume `/api-docs/openapi.json`.

use utoipa::OpenApi;

use crate::domain::RateStatistics;
use crate::inbound::http::error::{ApiError, ErrorCode};
use crate::inbound::http::files::{AddUsersRequest, NewUserDto};

/// OpenAPI document for the file-processing API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "File processing backend API",
        description = "Analyses user-collection XML documents, merges new users into them, and gates requests on a token query parameter."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::files::analyze,
        crate::inbound::http::files::add_users,
        crate::inbound::http::gate::token,
        crate::inbound::http::gate::no_token,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(RateStatistics, AddUsersRequest, NewUserDto, ApiError, ErrorCode)),
    tags(
        (name = "file", description = "XML analysis and merge operations"),
        (name = "gate", description = "Token presence gate"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;

    use super::ApiDoc;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for expected in [
            "/api/file/analyze",
            "/api/file/adduser",
            "/api/testmiddleware/token",
            "/api/testmiddleware/notoken",
            "/health/ready",
            "/health/live",
        ] {
            assert!(
                doc.paths.paths.contains_key(expected),
                "missing path {expected}"
            );
        }
    }
}
