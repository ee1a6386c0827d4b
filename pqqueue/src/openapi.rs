//! Documentation OpenAPI pour les endpoints de files partagées.

use utoipa::OpenApi;

/// Documentation OpenAPI pour l'API de files (REST + flux SSE).
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::create_queue,
        crate::api::fetch_queue,
        crate::api::list_queues,
        crate::api::add_track,
        crate::api::remove_item,
        crate::sse::queue_stream,
    ),
    components(
        schemas(
            crate::api::CreateQueueRequest,
            crate::api::QueueRefParams,
            crate::api::QueueInfoResponse,
            crate::api::QueueResponse,
            crate::api::AddTrackRequest,
            crate::api::AddTrackResponse,
            crate::api::RemoveItemRequest,
            crate::api::RemoveItemResponse,
            crate::api::ErrorResponse,
            crate::manager::QueueOverview,
            crate::track::QueueItem,
            crate::events::QueueEvent,
        )
    ),
    tags(
        (name = "queues", description = "Files d'attente musicales partagées")
    ),
    info(
        title = "PartyQueue - Queue API",
        version = "0.1.0",
        description = r#"
# Files d'attente partagées

API REST + SSE pour des files musicales collaboratives :
- création de file avec code de partage (8 caractères A-Z0-9)
- ajout / retrait de morceaux, `queued_id` monotone par file
- flux SSE par file (`init`, `add`, `remove`)

Une file se référence par `queue_id`, `code` ou `queue` (nom).
        "#,
        license(
            name = "MIT",
        ),
    )
)]
pub struct ApiDoc;
