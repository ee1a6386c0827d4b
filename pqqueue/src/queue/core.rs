//! QueueCore : contenu ordonné d'une file (structure interne protégée par RwLock)

use crate::track::{QueueItem, Track};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::Arc;

/// Critère de retrait d'un morceau
///
/// `queued_id` prime sur `track_id` : si les deux sont fournis, seul
/// `queued_id` est considéré.
#[derive(Debug, Clone, Default)]
pub struct RemoveSelector {
    pub queued_id: Option<u64>,
    pub track_id: Option<String>,
}

impl RemoveSelector {
    /// Retrait par identifiant de file
    pub fn by_queued_id(queued_id: u64) -> Self {
        Self {
            queued_id: Some(queued_id),
            ..Default::default()
        }
    }

    /// Retrait par identifiant catalogue (première occurrence)
    pub fn by_track_id(track_id: impl Into<String>) -> Self {
        Self {
            track_id: Some(track_id.into()),
            ..Default::default()
        }
    }

    /// Vrai si aucun critère n'est fourni
    pub fn is_empty(&self) -> bool {
        self.queued_id.is_none() && self.track_id.is_none()
    }
}

/// Noyau de la file : liste ordonnée + compteur d'identifiants
///
/// Le compteur `next_queued_id` démarre à 1 et n'est jamais décrémenté,
/// y compris après un retrait : un `queued_id` n'est jamais réutilisé.
pub struct QueueCore {
    items: VecDeque<Arc<QueueItem>>,
    next_queued_id: u64,
}

impl QueueCore {
    /// Crée un noyau vide
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            next_queued_id: 1,
        }
    }

    /// Ajoute un morceau en queue de file et lui assigne son identifiant
    pub fn append(&mut self, queue_id: u64, track: Track) -> Arc<QueueItem> {
        let item = Arc::new(QueueItem {
            queued_id: self.next_queued_id,
            queue_id,
            track,
            created_at: Utc::now(),
        });
        self.next_queued_id += 1;
        self.items.push_back(item.clone());
        item
    }

    /// Retire la première correspondance du critère
    ///
    /// Retourne le `queued_id` retiré, ou `None` si rien ne correspond.
    pub fn remove(&mut self, selector: &RemoveSelector) -> Option<u64> {
        let pos = if let Some(queued_id) = selector.queued_id {
            self.items.iter().position(|i| i.queued_id == queued_id)
        } else if let Some(track_id) = selector.track_id.as_deref() {
            self.items.iter().position(|i| i.track.id == track_id)
        } else {
            None
        }?;

        self.items.remove(pos).map(|i| i.queued_id)
    }

    /// Snapshot copié de tous les morceaux (jamais une vue vivante)
    pub fn snapshot(&self) -> Vec<Arc<QueueItem>> {
        self.items.iter().cloned().collect()
    }

    /// Nombre de morceaux
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Vérifie si la file est vide
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for QueueCore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Title {}", id),
            artist: format!("Artist {}", id),
            album: None,
            cover: None,
        }
    }

    #[test]
    fn test_queued_ids_monotonic_across_removals() {
        let mut core = QueueCore::new();

        let first = core.append(1, track("a"));
        let second = core.append(1, track("b"));
        assert_eq!(first.queued_id, 1);
        assert_eq!(second.queued_id, 2);

        assert_eq!(core.remove(&RemoveSelector::by_queued_id(1)), Some(1));

        // L'identifiant 1 n'est jamais réutilisé
        let third = core.append(1, track("c"));
        assert_eq!(third.queued_id, 3);
        assert_eq!(core.len(), 2);
    }

    #[test]
    fn test_remove_by_track_id_first_match_only() {
        let mut core = QueueCore::new();
        core.append(1, track("dup"));
        core.append(1, track("dup"));

        assert_eq!(core.remove(&RemoveSelector::by_track_id("dup")), Some(1));
        assert_eq!(core.len(), 1);
        assert_eq!(core.snapshot()[0].queued_id, 2);
    }

    #[test]
    fn test_remove_miss_is_none() {
        let mut core = QueueCore::new();
        core.append(1, track("a"));

        assert_eq!(core.remove(&RemoveSelector::by_queued_id(42)), None);
        assert_eq!(core.remove(&RemoveSelector::by_track_id("zz")), None);
        assert_eq!(core.remove(&RemoveSelector::default()), None);
        assert_eq!(core.len(), 1);
    }

    #[test]
    fn test_queued_id_takes_precedence_over_track_id() {
        let mut core = QueueCore::new();
        core.append(1, track("a"));
        core.append(1, track("b"));

        let selector = RemoveSelector {
            queued_id: Some(2),
            track_id: Some("a".to_string()),
        };
        assert_eq!(core.remove(&selector), Some(2));
        assert_eq!(core.snapshot()[0].track.id, "a");
    }
}
