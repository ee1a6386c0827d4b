//! API REST pour la gestion des files partagées.
//!
//! La validation des entrées (réf vide, champs obligatoires absents)
//! se fait ici, avant d'atteindre le coordinateur.

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::manager::{QueueManager, QueueOverview, QueueSnapshot};
use crate::queue::core::RemoveSelector;
use crate::store::QueueRef;
use crate::track::{QueueItem, Track};

/// Router des endpoints de file, prêt à être monté à la racine.
pub fn queue_api_router(manager: Arc<QueueManager>) -> Router {
    Router::new()
        .route("/queue", get(fetch_queue))
        .route("/queue/list", get(list_queues))
        .route("/queue/create", post(create_queue))
        .route("/queue/add", post(add_track))
        .route("/queue/remove", post(remove_item))
        .route("/queue/stream", get(crate::sse::queue_stream))
        .with_state(manager)
}

/// Référence de file telle qu'elle circule sur le fil
/// (query string des GET, corps JSON des POST).
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct QueueRefParams {
    /// Identifiant numérique de la file
    #[serde(default)]
    pub queue_id: Option<u64>,
    /// Code de partage (alias humain, ex: "AB12CD34")
    #[serde(default)]
    pub code: Option<String>,
    /// Nom d'affichage de la file
    #[serde(default, rename = "queue")]
    pub queue: Option<String>,
}

impl From<QueueRefParams> for QueueRef {
    fn from(params: QueueRefParams) -> Self {
        QueueRef {
            id: params.queue_id,
            code: params.code,
            name: params.queue,
        }
    }
}

/// Requête de création de file.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateQueueRequest {
    /// Nom d'affichage (défaut "Queue" si absent ou vide)
    #[serde(default)]
    pub name: Option<String>,
}

/// Identité d'une file.
#[derive(Debug, Serialize, ToSchema)]
pub struct QueueInfoResponse {
    pub id: u64,
    pub code: String,
    pub name: String,
}

impl From<&QueueOverview> for QueueInfoResponse {
    fn from(overview: &QueueOverview) -> Self {
        Self {
            id: overview.id,
            code: overview.code.clone(),
            name: overview.name.clone(),
        }
    }
}

/// Réponse détaillée pour une file (identité + contenu).
#[derive(Debug, Serialize, ToSchema)]
pub struct QueueResponse {
    pub items: Vec<QueueItem>,
    pub queue: QueueInfoResponse,
}

impl From<QueueSnapshot> for QueueResponse {
    fn from(snapshot: QueueSnapshot) -> Self {
        Self {
            queue: QueueInfoResponse::from(&snapshot.overview),
            items: snapshot.items,
        }
    }
}

/// Requête d'ajout d'un morceau dans une file.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AddTrackRequest {
    /// Identifiant catalogue (UUID synthétisé si absent)
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(flatten)]
    #[schema(inline)]
    pub queue: QueueRefParams,
}

/// Réponse d'ajout : l'item stocké.
#[derive(Debug, Serialize, ToSchema)]
pub struct AddTrackResponse {
    pub item: QueueItem,
}

/// Requête de retrait d'un morceau.
#[derive(Debug, Deserialize, ToSchema)]
pub struct RemoveItemRequest {
    /// Identifiant de file du morceau (prioritaire)
    #[serde(default)]
    pub queued_id: Option<u64>,
    /// Identifiant catalogue (première occurrence)
    #[serde(default)]
    pub track_id: Option<String>,
    #[serde(flatten)]
    #[schema(inline)]
    pub queue: QueueRefParams,
}

/// Réponse de retrait : `removed` distingue le no-op.
#[derive(Debug, Serialize, ToSchema)]
pub struct RemoveItemResponse {
    pub removed: bool,
}

/// Enveloppe d'erreur commune à toutes les réponses d'échec.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[utoipa::path(
    post,
    path = "/queue/create",
    tag = "queues",
    request_body = CreateQueueRequest,
    responses(
        (status = 201, description = "File créée", body = QueueInfoResponse),
        (status = 400, description = "Nom invalide", body = ErrorResponse)
    )
)]
pub async fn create_queue(
    State(manager): State<Arc<QueueManager>>,
    req: Result<Json<CreateQueueRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match req {
        Ok(req) => req,
        Err(rejection) => return map_rejection(rejection.status(), rejection.body_text()),
    };

    match manager.create_queue(req.name).await {
        Ok(overview) => (
            StatusCode::CREATED,
            Json(QueueInfoResponse::from(&overview)),
        )
            .into_response(),
        Err(err) => map_error(err),
    }
}

#[utoipa::path(
    get,
    path = "/queue",
    tag = "queues",
    params(QueueRefParams),
    responses(
        (status = 200, description = "Identité et contenu de la file", body = QueueResponse),
        (status = 400, description = "Référence vide", body = ErrorResponse),
        (status = 404, description = "File introuvable", body = ErrorResponse)
    )
)]
pub async fn fetch_queue(
    State(manager): State<Arc<QueueManager>>,
    params: Result<Query<QueueRefParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return map_rejection(rejection.status(), rejection.body_text()),
    };

    match manager.queue_snapshot(&params.into()).await {
        Ok(snapshot) => (StatusCode::OK, Json(QueueResponse::from(snapshot))).into_response(),
        Err(err) => map_error(err),
    }
}

#[utoipa::path(
    get,
    path = "/queue/list",
    tag = "queues",
    responses(
        (status = 200, description = "Liste de toutes les files", body = [QueueOverview])
    )
)]
pub async fn list_queues(State(manager): State<Arc<QueueManager>>) -> Response {
    let overviews = manager.list_queues().await;
    (StatusCode::OK, Json(overviews)).into_response()
}

#[utoipa::path(
    post,
    path = "/queue/add",
    tag = "queues",
    request_body = AddTrackRequest,
    responses(
        (status = 200, description = "Morceau ajouté", body = AddTrackResponse),
        (status = 400, description = "Champs obligatoires absents", body = ErrorResponse),
        (status = 404, description = "File introuvable", body = ErrorResponse)
    )
)]
pub async fn add_track(
    State(manager): State<Arc<QueueManager>>,
    req: Result<Json<AddTrackRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match req {
        Ok(req) => req,
        Err(rejection) => return map_rejection(rejection.status(), rejection.body_text()),
    };

    let title = match non_blank(req.title) {
        Some(title) => title,
        None => return map_status(StatusCode::BAD_REQUEST, "Track title is required."),
    };
    let artist = match non_blank(req.artist) {
        Some(artist) => artist,
        None => return map_status(StatusCode::BAD_REQUEST, "Track artist is required."),
    };

    let track = Track {
        // Un morceau ajouté à la main n'a pas forcément d'id catalogue
        id: non_blank(req.id).unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
        title,
        artist,
        album: req.album,
        cover: req.cover,
    };

    match manager.add_track(&req.queue.into(), track).await {
        Ok(item) => (StatusCode::OK, Json(AddTrackResponse { item })).into_response(),
        Err(err) => map_error(err),
    }
}

#[utoipa::path(
    post,
    path = "/queue/remove",
    tag = "queues",
    request_body = RemoveItemRequest,
    responses(
        (status = 200, description = "Retrait effectué (no-op inclus)", body = RemoveItemResponse),
        (status = 400, description = "Aucun critère de retrait", body = ErrorResponse),
        (status = 404, description = "File introuvable", body = ErrorResponse)
    )
)]
pub async fn remove_item(
    State(manager): State<Arc<QueueManager>>,
    req: Result<Json<RemoveItemRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match req {
        Ok(req) => req,
        Err(rejection) => return map_rejection(rejection.status(), rejection.body_text()),
    };

    if req.queued_id.is_none() && req.track_id.is_none() {
        return map_status(
            StatusCode::BAD_REQUEST,
            "Either queued_id or track_id is required.",
        );
    }

    let selector = RemoveSelector {
        queued_id: req.queued_id,
        track_id: req.track_id,
    };

    match manager.remove_item(&req.queue.into(), &selector).await {
        Ok(removed) => (StatusCode::OK, Json(RemoveItemResponse { removed })).into_response(),
        Err(err) => map_error(err),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Met une réponse de rejet d'extracteur (corps ou query illisible)
/// dans l'enveloppe d'erreur commune.
pub(crate) fn map_rejection(status: StatusCode, detail: String) -> Response {
    map_status(status, detail)
}

pub(crate) fn map_status<S: Into<String>>(status: StatusCode, message: S) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub(crate) fn map_error(error: crate::Error) -> Response {
    let status = match &error {
        crate::Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        crate::Error::QueueNotFound(_) => StatusCode::NOT_FOUND,
        crate::Error::CodeSpaceExhausted | crate::Error::Other(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        // Détail loggé côté serveur, jamais renvoyé au client
        tracing::error!(error = %error, "Internal error while handling queue request");
        return map_status(status, "Internal server error.");
    }

    map_status(status, error.to_string())
}
