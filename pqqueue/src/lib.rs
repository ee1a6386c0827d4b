//! # pqqueue - Files d'attente musicales partagées
//!
//! Cette crate fournit le cœur du service de files collaboratives :
//! - Registre des files avec codes de partage (8 caractères A-Z0-9)
//! - Mutations sérialisées par file, `queued_id` strictement monotone
//! - Diffusion d'évènements par abonné (canaux bornés, abonnés lents
//!   désinscrits sans bloquer les autres)
//! - API REST + flux SSE prêts à être montés sur un serveur axum
//!
//! # Architecture
//!
//! - **QueueStore** : registre, allocation id/code, résolution de référence
//! - **QueueManager** : coordinateur des mutations, publie sous le verrou
//! - **Broadcaster** : fan-out par file, un canal borné par abonné
//! - **api / sse** : frontière HTTP (axum + utoipa)
//!
//! # Exemple d'utilisation
//!
//! ```no_run
//! use pqqueue::{QueueManager, QueueRef, Track};
//!
//! # #[tokio::main]
//! # async fn main() -> pqqueue::Result<()> {
//! let manager = QueueManager::new();
//!
//! let queue = manager.create_queue(Some("Soirée".to_string())).await?;
//!
//! let item = manager
//!     .add_track(
//!         &QueueRef::by_code(queue.code.clone()),
//!         Track {
//!             id: "qobuz:12345".to_string(),
//!             title: "Song A".to_string(),
//!             artist: "Artist X".to_string(),
//!             album: None,
//!             cover: None,
//!         },
//!     )
//!     .await?;
//! println!("queued as #{}", item.queued_id);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod broadcast;
mod error;
pub mod events;
mod manager;
pub mod openapi;
mod queue;
pub mod sse;
mod store;
mod track;

// Réexports publics
pub use broadcast::{Broadcaster, Subscription, SUBSCRIBER_BUFFER};
pub use error::{Error, Result};
pub use events::QueueEvent;
pub use manager::{QueueManager, QueueOverview, QueueSnapshot};
pub use queue::core::RemoveSelector;
pub use store::{QueueRef, QueueStore};
pub use track::{QueueItem, Track};
