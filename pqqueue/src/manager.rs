//! QueueManager : coordinateur central des mutations de files
//!
//! Le manager est l'unique autorité de mutation : il résout la
//! référence, prend le créneau exclusif de la file (verrou en
//! écriture), mute le contenu puis publie l'évènement correspondant —
//! avant de relâcher le verrou, pour que l'ordre d'émission suive
//! exactement l'ordre d'acceptation des mutations. Les files
//! distinctes ne partagent aucun verrou.
//!
//! Le manager est construit une fois au démarrage et circule par
//! `Arc` (état axum) : pas de singleton global.

use crate::broadcast::{Broadcaster, Subscription};
use crate::events::QueueEvent;
use crate::queue::core::RemoveSelector;
use crate::store::{QueueRef, QueueStore};
use crate::track::{QueueItem, Track};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use utoipa::ToSchema;

/// Résumé d'une file (identité + compteur)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QueueOverview {
    pub id: u64,
    pub code: String,
    pub name: String,
    pub item_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Photographie complète d'une file (identité + contenu copié)
#[derive(Debug, Clone)]
pub struct QueueSnapshot {
    pub overview: QueueOverview,
    pub items: Vec<QueueItem>,
}

/// Coordinateur des files partagées
pub struct QueueManager {
    store: QueueStore,
    broadcaster: Broadcaster,
}

impl QueueManager {
    /// Crée un manager vide (registre et diffuseur neufs)
    pub fn new() -> Self {
        Self {
            store: QueueStore::new(),
            broadcaster: Broadcaster::new(),
        }
    }

    /// Crée une nouvelle file
    ///
    /// La création n'est pas sérialisée par file : elle passe par le
    /// chemin d'allocation atomique du store (jamais de collision
    /// d'id ou de code sous créations concurrentes).
    pub async fn create_queue(&self, name: Option<String>) -> Result<QueueOverview> {
        let queue = self.store.create_queue(name)?;
        info!(queue_id = queue.id, code = %queue.code, name = %queue.name, "Queue created");

        Ok(QueueOverview {
            id: queue.id,
            code: queue.code.clone(),
            name: queue.name.clone(),
            item_count: 0,
            created_at: queue.created_at(),
        })
    }

    /// Ajoute un morceau en queue de file
    ///
    /// Retourne l'item stocké de façon synchrone : l'appelant n'attend
    /// jamais la livraison aux abonnés.
    pub async fn add_track(&self, queue_ref: &QueueRef, track: Track) -> Result<QueueItem> {
        let queue = self.store.resolve(queue_ref)?;

        let mut core = queue.core.write().await;
        let item = core.append(queue.id, track);

        // Publication sous le verrou : l'ordre des évènements suit
        // l'ordre de linéarisation des mutations. try_send ne bloque pas.
        self.broadcaster.publish(
            queue.id,
            &QueueEvent::Add {
                queue_id: queue.id,
                item: (*item).clone(),
            },
        );
        drop(core);

        debug!(queue_id = queue.id, queued_id = item.queued_id, "Track queued");
        Ok((*item).clone())
    }

    /// Retire un morceau d'une file
    ///
    /// Retirer un morceau absent est un no-op rapporté (`Ok(false)`),
    /// pas une erreur, et n'émet aucun évènement. L'absence des deux
    /// critères est une entrée invalide.
    pub async fn remove_item(
        &self,
        queue_ref: &QueueRef,
        selector: &RemoveSelector,
    ) -> Result<bool> {
        if selector.is_empty() {
            return Err(crate::Error::InvalidInput(
                "Either queued_id or track_id is required.".to_string(),
            ));
        }

        let queue = self.store.resolve(queue_ref)?;

        let mut core = queue.core.write().await;
        match core.remove(selector) {
            Some(queued_id) => {
                self.broadcaster.publish(
                    queue.id,
                    &QueueEvent::Remove {
                        queue_id: queue.id,
                        queued_id,
                    },
                );
                drop(core);
                debug!(queue_id = queue.id, queued_id, "Track removed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Photographie d'une file : identité + contenu copié
    pub async fn queue_snapshot(&self, queue_ref: &QueueRef) -> Result<QueueSnapshot> {
        let queue = self.store.resolve(queue_ref)?;
        let core = queue.core.read().await;
        let items = core.snapshot().iter().map(|i| (**i).clone()).collect();
        let item_count = core.len();
        drop(core);

        Ok(QueueSnapshot {
            overview: QueueOverview {
                id: queue.id,
                code: queue.code.clone(),
                name: queue.name.clone(),
                item_count,
                created_at: queue.created_at(),
            },
            items,
        })
    }

    /// Liste toutes les files, par ordre de création
    pub async fn list_queues(&self) -> Vec<QueueOverview> {
        let mut overviews = Vec::new();
        for queue in self.store.list() {
            let item_count = queue.core.read().await.len();
            overviews.push(QueueOverview {
                id: queue.id,
                code: queue.code.clone(),
                name: queue.name.clone(),
                item_count,
                created_at: queue.created_at(),
            });
        }
        overviews
    }

    /// Abonne un consommateur au flux d'évènements d'une file
    ///
    /// L'évènement `init` est livré immédiatement ; aucun rejeu des
    /// évènements antérieurs à l'abonnement.
    pub async fn subscribe(&self, queue_ref: &QueueRef) -> Result<Subscription> {
        let queue = self.store.resolve(queue_ref)?;
        Ok(self.broadcaster.subscribe(&queue))
    }

    /// Nombre d'abonnés actifs d'une file
    pub fn subscriber_count(&self, queue_id: u64) -> usize {
        self.broadcaster.subscriber_count(queue_id)
    }
}

impl Default for QueueManager {
    fn default() -> Self {
        Self::new()
    }
}
