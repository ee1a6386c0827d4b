//! # pqserver - Serveur web haut niveau basé sur Axum
//!
//! Cette crate fournit une abstraction simple pour assembler puis
//! lancer le serveur HTTP du service : routes JSON ponctuelles, APIs
//! documentées (OpenAPI/Swagger) et arrêt gracieux sur Ctrl+C.
//!
//! ## Exemple d'utilisation
//!
//! ```rust,no_run
//! use pqserver::{LoggingOptions, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut server = Server::new_configured();
//!     server.init_logging(LoggingOptions::default());
//!
//!     server.add_route("/api/status", || async {
//!         serde_json::json!({"status": "ok"})
//!     }).await;
//!
//!     server.start().await;
//!     server.wait().await;
//! }
//! ```

pub mod logs;
pub mod server;

pub use logs::LoggingOptions;
pub use server::Server;
