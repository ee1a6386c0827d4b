//! Diffusion des évènements de file vers les abonnés
//!
//! Chaque abonné possède son propre canal borné : un abonné lent ou
//! déconnecté ne bloque jamais la livraison aux autres, il est
//! simplement désinscrit. Aucun rejeu : un abonné ne voit que les
//! évènements émis après son abonnement.

use crate::events::QueueEvent;
use crate::queue::Queue;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Capacité du canal de chaque abonné
///
/// Un tampon plein signale un consommateur mort ou bloqué : l'abonné
/// est désinscrit plutôt que de retenir l'éditeur.
pub const SUBSCRIBER_BUFFER: usize = 32;

/// Registre interne : file → (jeton d'abonné → émetteur)
struct BroadcasterInner {
    subscribers: Mutex<HashMap<u64, HashMap<u64, mpsc::Sender<QueueEvent>>>>,
    next_token: AtomicU64,
}

/// Diffuseur d'évènements par file
pub struct Broadcaster {
    inner: Arc<BroadcasterInner>,
}

impl Broadcaster {
    /// Crée un diffuseur sans abonnés
    pub fn new() -> Self {
        Self {
            inner: Arc::new(BroadcasterInner {
                subscribers: Mutex::new(HashMap::new()),
                next_token: AtomicU64::new(1),
            }),
        }
    }

    /// Abonne un nouveau consommateur à une file
    ///
    /// L'évènement synthétique `init` (id, code, nom de la file) est
    /// déposé immédiatement dans le canal de l'abonné. Le handle
    /// retourné se désinscrit tout seul au drop.
    pub fn subscribe(&self, queue: &Queue) -> Subscription {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_BUFFER);

        // Canal neuf : l'init ne peut pas échouer sur un tampon plein
        let _ = tx.try_send(QueueEvent::Init {
            queue_id: queue.id,
            code: queue.code.clone(),
            name: queue.name.clone(),
        });

        let token = self.inner.next_token.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .lock()
            .unwrap()
            .entry(queue.id)
            .or_default()
            .insert(token, tx);

        debug!(queue_id = queue.id, token, "Subscriber registered");

        Subscription {
            queue_id: queue.id,
            token,
            rx,
            inner: self.inner.clone(),
        }
    }

    /// Diffuse un évènement à tous les abonnés de la file concernée
    ///
    /// La livraison est non bloquante : un canal plein ou fermé vaut
    /// désinscription immédiate de l'abonné fautif, jamais une erreur
    /// pour l'éditeur.
    pub fn publish(&self, queue_id: u64, event: &QueueEvent) {
        let mut registry = self.inner.subscribers.lock().unwrap();
        let Some(subs) = registry.get_mut(&queue_id) else {
            return;
        };

        let mut dropped = Vec::new();
        for (token, tx) in subs.iter() {
            match tx.try_send(event.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(queue_id, token, "Dropping slow subscriber (buffer full)");
                    dropped.push(*token);
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(queue_id, token, "Dropping disconnected subscriber");
                    dropped.push(*token);
                }
            }
        }

        for token in dropped {
            subs.remove(&token);
        }
        if subs.is_empty() {
            registry.remove(&queue_id);
        }
    }

    /// Nombre d'abonnés actifs d'une file
    pub fn subscriber_count(&self, queue_id: u64) -> usize {
        self.inner
            .subscribers
            .lock()
            .unwrap()
            .get(&queue_id)
            .map(HashMap::len)
            .unwrap_or(0)
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

fn unsubscribe(inner: &BroadcasterInner, queue_id: u64, token: u64) {
    let mut registry = inner.subscribers.lock().unwrap();
    if let Some(subs) = registry.get_mut(&queue_id) {
        subs.remove(&token);
        if subs.is_empty() {
            registry.remove(&queue_id);
        }
    }
}

/// Handle d'abonnement : séquence paresseuse d'évènements
///
/// Se termine uniquement à la désinscription (drop du handle, côté
/// transport fermé) ou si l'abonné a été éjecté par le diffuseur.
pub struct Subscription {
    queue_id: u64,
    token: u64,
    rx: mpsc::Receiver<QueueEvent>,
    inner: Arc<BroadcasterInner>,
}

impl Subscription {
    /// Identifiant de la file suivie
    pub fn queue_id(&self) -> u64 {
        self.queue_id
    }

    /// Attend le prochain évènement
    ///
    /// Retourne `None` quand l'abonnement est clos (abonné éjecté).
    pub async fn recv(&mut self) -> Option<QueueEvent> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        unsubscribe(&self.inner, self.queue_id, self.token);
        debug!(queue_id = self.queue_id, token = self.token, "Subscriber unregistered");
    }
}
