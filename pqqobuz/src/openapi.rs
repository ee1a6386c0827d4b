//! OpenAPI documentation for the Qobuz search endpoint.

use utoipa::OpenApi;

/// OpenAPI documentation for the catalog search API.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api_rest::search_tracks,
    ),
    components(
        schemas(
            crate::api_rest::SearchParams,
            crate::api_rest::ErrorResponse,
            crate::client::SearchPage,
            crate::models::NormalizedTrack,
        )
    ),
    tags(
        (name = "qobuz", description = "Qobuz catalog search")
    ),
    info(
        title = "PartyQueue - Qobuz Search API",
        version = "0.1.0",
        description = r#"
# Catalog search

Search the Qobuz catalog for tracks to queue. Results are normalized:
`title` and `artist` are always present (with fallback values), `id`
is the catalog id or a synthesized UUID, `cover` follows the album
image when available.
        "#,
        license(
            name = "MIT",
        ),
    )
)]
pub struct ApiDoc;
