//! # Module Server - façade axum du service
//!
//! Le serveur accumule son router au fil de la phase de câblage
//! (routes JSON simples, APIs documentées avec leur Swagger), puis
//! `start()` fige le router et lance l'écoute HTTP avec arrêt
//! gracieux sur Ctrl+C.

use crate::logs::{init_logging, LoggingOptions};
use axum::routing::get;
use axum::{Json, Router};
use pqconfig::get_config;
use serde::Serialize;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{signal, sync::RwLock, task::JoinHandle};
use tracing::info;
use utoipa_swagger_ui::SwaggerUi;

/// Serveur principal
pub struct Server {
    name: String,
    base_url: String,
    http_port: u16,
    router: Arc<RwLock<Router>>,
    join_handle: Option<JoinHandle<()>>,
}

impl Server {
    /// Crée une nouvelle instance de serveur
    ///
    /// # Arguments
    ///
    /// * `name` - Nom du serveur (pour les logs)
    /// * `base_url` - URL de base (ex: "127.0.0.1")
    /// * `http_port` - Port HTTP à écouter
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, http_port: u16) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            http_port,
            router: Arc::new(RwLock::new(Router::new())),
            join_handle: None,
        }
    }

    /// Crée un serveur à partir de la configuration globale
    pub fn new_configured() -> Self {
        let config = get_config();
        Self::new(
            config.get_server_name(),
            config.get_base_url(),
            config.get_http_port(),
        )
    }

    /// Ajoute une route GET retournant du JSON
    ///
    /// La closure est appelée à chaque requête ; sa valeur de retour
    /// est sérialisée dans la réponse.
    pub async fn add_route<F, Fut, T>(&mut self, path: &str, f: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        let f = Arc::new(f);
        let handler = {
            let f = f.clone();
            move || {
                let f = f.clone();
                async move { Json(f().await) }
            }
        };

        let route = Router::new().route("/", get(handler));

        let mut r = self.router.write().await;
        *r = if path == "/" {
            std::mem::take(&mut *r).merge(route)
        } else {
            std::mem::take(&mut *r).nest(path, route)
        };
    }

    /// Ajoute une API documentée avec OpenAPI et Swagger UI
    ///
    /// Le `api_router` est fusionné tel quel au router principal (ses
    /// chemins restent absolus). Chaque appel publie sa propre paire
    /// Swagger UI + JSON sous `name`, pour pouvoir monter plusieurs
    /// APIs indépendantes.
    pub async fn add_openapi(
        &mut self,
        api_router: Router,
        openapi: utoipa::openapi::OpenApi,
        name: &str,
    ) {
        let swagger_path: &'static str =
            Box::leak(format!("/swagger-ui/{}", name).into_boxed_str());
        let json_path: &'static str =
            Box::leak(format!("/api-docs/{}.json", name).into_boxed_str());

        let swagger = SwaggerUi::new(swagger_path).url(json_path, openapi);

        let mut r = self.router.write().await;
        *r = std::mem::take(&mut *r).merge(api_router).merge(swagger);
    }

    /// Initialise le système de logging
    pub fn init_logging(&mut self, options: LoggingOptions) {
        init_logging(options);
    }

    /// Démarre le serveur HTTP
    ///
    /// Le router accumulé est figé au moment de l'appel. Ctrl+C
    /// déclenche l'arrêt gracieux.
    pub async fn start(&mut self) {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.http_port));
        info!(
            "Server {} running at http://{}:{}",
            self.name, self.base_url, self.http_port
        );

        let router = self.router.clone();
        let serve_task = tokio::spawn(async move {
            let r = router.read().await.clone();
            let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
            axum::serve(listener, r.into_make_service()).await.unwrap();
        });

        let shutdown_task = tokio::spawn(async move {
            signal::ctrl_c().await.expect("failed to listen for ctrl_c");
            info!("Ctrl+C reçu, arrêt gracieux");
        });

        self.join_handle = Some(tokio::spawn(async move {
            tokio::select! {
                _ = serve_task => {},
                _ = shutdown_task => {},
            }
        }));
    }

    /// Attend la fin du serveur
    pub async fn wait(&mut self) {
        if let Some(h) = self.join_handle.take() {
            let _ = h.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn current_router(server: &Server) -> Router {
        server.router.read().await.clone()
    }

    #[tokio::test]
    async fn test_add_route_serves_json() {
        let mut server = Server::new("test", "127.0.0.1", 0);
        server
            .add_route("/health", || async { serde_json::json!({"status": "ok"}) })
            .await;

        let response = current_router(&server)
            .await
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_add_openapi_merges_api_and_publishes_doc() {
        use utoipa::OpenApi;

        #[derive(OpenApi)]
        #[openapi(info(title = "Test API", version = "0.0.1"))]
        struct Doc;

        let mut server = Server::new("test", "127.0.0.1", 0);
        let api = Router::new().route("/ping", get(|| async { "pong" }));
        server.add_openapi(api, Doc::openapi(), "test").await;

        let router = current_router(&server).await;

        // Les routes de l'API sont montées telles quelles
        let response = router
            .clone()
            .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Le JSON OpenAPI est publié sous le nom donné
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api-docs/test.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
