//! File interne (gérée par le QueueStore)

pub mod core;

use self::core::QueueCore;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Une file partagée : identité fixe + contenu mutable
///
/// L'identité (`id`, `code`, `name`) est figée à la création. Le
/// contenu vit derrière un `RwLock` : le verrou en écriture est le
/// créneau exclusif de mutation de la file (une mutation en vol à la
/// fois, les files distinctes ne se gênent jamais).
pub struct Queue {
    pub id: u64,
    pub code: String,
    pub name: String,
    pub core: RwLock<QueueCore>,
    created_at: DateTime<Utc>,
}

impl Queue {
    /// Crée une nouvelle file vide
    pub(crate) fn new(id: u64, code: String, name: String) -> Self {
        Self {
            id,
            code,
            name,
            core: RwLock::new(QueueCore::new()),
            created_at: Utc::now(),
        }
    }

    /// Timestamp de création
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
