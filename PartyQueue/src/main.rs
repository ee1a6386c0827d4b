use pqconfig::get_config;
use pqqobuz::{QobuzClient, QobuzConfigExt};
use pqqueue::QueueManager;
use pqserver::{LoggingOptions, Server};
use std::sync::Arc;
use tracing::{info, warn};
use utoipa::OpenApi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========== PHASE 1 : Infrastructure ==========

    let mut server = Server::new_configured();
    server.init_logging(LoggingOptions::default());

    server
        .add_route("/health", || async {
            serde_json::json!({"status": "ok"})
        })
        .await;

    // ========== PHASE 2 : Services métier ==========

    // Coordinateur des files : construit une fois, partagé par Arc
    info!("🎵 Initializing shared queue service...");
    let manager = Arc::new(QueueManager::new());
    server
        .add_openapi(
            pqqueue::api::queue_api_router(manager.clone()),
            pqqueue::openapi::ApiDoc::openapi(),
            "queues",
        )
        .await;

    // Adaptateur de recherche Qobuz (optionnel : exige un app_id)
    info!("🔍 Initializing Qobuz catalog search...");
    let config = get_config();
    match QobuzClient::builder()
        .app_id(config.get_qobuz_app_id())
        .base_url(config.get_qobuz_base_url())
        .build()
    {
        Ok(client) => {
            server
                .add_openapi(
                    pqqobuz::api_rest::search_router(Arc::new(client)),
                    pqqobuz::openapi::ApiDoc::openapi(),
                    "qobuz",
                )
                .await;
        }
        Err(e) => {
            warn!("⚠️ Qobuz search disabled: {}", e);
        }
    }

    // ========== PHASE 3 : Démarrage du serveur ==========

    info!("🌐 Starting HTTP server...");
    server.start().await;

    info!("✅ PartyQueue is ready!");
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    Ok(())
}
