//! Modèles de données : Track et QueueItem

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Un morceau normalisé issu du catalogue
///
/// Immuable une fois normalisé : `title` et `artist` sont toujours
/// renseignés (valeurs de repli côté adaptateur catalogue), `id` est
/// l'identifiant catalogue ou un UUID synthétisé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// Un morceau placé dans une file précise
///
/// `queued_id` est unique pour la durée de vie de la file, strictement
/// croissant, jamais réutilisé (même après retrait). Sur le fil, les
/// champs du track sont aplatis à côté de `queued_id`/`queue_id`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QueueItem {
    pub queued_id: u64,
    pub queue_id: u64,
    #[serde(flatten)]
    #[schema(inline)]
    pub track: Track,
    pub created_at: DateTime<Utc>,
}
