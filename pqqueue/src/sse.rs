//! SSE pour suivre les évènements d'une file (init, add, remove).
//!
//! Route type : `GET /queue/stream?code=AB12CD34`

use crate::api::{map_error, map_rejection, QueueRefParams};
use crate::manager::QueueManager;
use async_stream::stream;
use axum::{
    extract::rejection::QueryRejection,
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Handler SSE : diffuse les évènements de la file référencée.
///
/// Chaque trame est un message sans nom d'évènement, dont la donnée
/// est l'évènement JSON discriminé par `type`. Le premier message est
/// toujours `init` ; aucun rejeu des évènements antérieurs.
#[utoipa::path(
    get,
    path = "/queue/stream",
    tag = "queues",
    params(QueueRefParams),
    responses(
        (status = 200, description = "Flux SSE des évènements de la file (init, add, remove)", content_type = "text/event-stream"),
        (status = 400, description = "Référence vide", body = crate::api::ErrorResponse),
        (status = 404, description = "File introuvable", body = crate::api::ErrorResponse)
    )
)]
pub async fn queue_stream(
    State(manager): State<Arc<QueueManager>>,
    params: Result<Query<QueueRefParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return map_rejection(rejection.status(), rejection.body_text()),
    };

    let mut subscription = match manager.subscribe(&params.into()).await {
        Ok(subscription) => subscription,
        Err(err) => return map_error(err),
    };

    // Le flux possède l'abonnement : la désinscription suit la
    // fermeture de la connexion (drop du stream).
    let stream = stream! {
        while let Some(event) = subscription.recv().await {
            if let Ok(json) = serde_json::to_string(&event) {
                yield Ok::<_, axum::Error>(Event::default().data(json));
            }
        }
    };

    Sse::new(stream)
        .keep_alive(KeepAlive::default())
        .into_response()
}
