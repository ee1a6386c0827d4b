//! Initialisation du système de logging (tracing + env-filter).

use pqconfig::get_config;
use tracing_subscriber::EnvFilter;

/// Options de configuration du logging
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Directive de filtre par défaut (ex: "info", "pqqueue=debug")
    pub level: String,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: get_config().get_log_level(),
        }
    }
}

/// Initialise le subscriber tracing global.
///
/// La variable d'environnement `RUST_LOG` est prioritaire sur la
/// directive fournie dans les options. Les appels répétés sont ignorés
/// (utile dans les tests).
pub fn init_logging(options: LoggingOptions) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(options.level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
