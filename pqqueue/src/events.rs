//! Évènements de file diffusés aux abonnés
//!
//! Chaque évènement est sérialisé en JSON, discriminé par le champ
//! `type` : `init` (identité de la file à l'abonnement), `add`
//! (morceau ajouté) et `remove` (morceau retiré).

use crate::track::QueueItem;
use serde::Serialize;
use utoipa::ToSchema;

/// Évènement décrivant un changement d'état de file
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueueEvent {
    /// Évènement synthétique livré immédiatement à l'abonnement :
    /// porte l'identité de la file pour que l'abonné puisse s'afficher
    /// sans fetch séparé (le contenu courant reste à charger via l'API).
    Init {
        queue_id: u64,
        code: String,
        name: String,
    },
    /// Un morceau a été ajouté en queue de file
    Add { queue_id: u64, item: QueueItem },
    /// Un morceau a été retiré de la file
    Remove { queue_id: u64, queued_id: u64 },
}

impl QueueEvent {
    /// Identifiant de la file concernée
    pub fn queue_id(&self) -> u64 {
        match self {
            QueueEvent::Init { queue_id, .. }
            | QueueEvent::Add { queue_id, .. }
            | QueueEvent::Remove { queue_id, .. } => *queue_id,
        }
    }
}
