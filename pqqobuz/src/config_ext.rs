//! Configuration extension for the Qobuz adapter
//!
//! Reads the `qobuz:` section of the PartyQueue configuration. The
//! `QOBUZ_APP_ID` environment variable takes precedence over the
//! config file, so deployments never have to write the credential to
//! disk.

use crate::client::DEFAULT_BASE_URL;
use pqconfig::Config;
use std::env;

/// Environment variable overriding the configured app id
pub const ENV_APP_ID: &str = "QOBUZ_APP_ID";

/// Typed accessors for the `qobuz:` configuration section
pub trait QobuzConfigExt {
    /// Qobuz application id (env first, then config; empty if unset)
    fn get_qobuz_app_id(&self) -> String;

    /// Qobuz API base URL
    fn get_qobuz_base_url(&self) -> String;
}

impl QobuzConfigExt for Config {
    fn get_qobuz_app_id(&self) -> String {
        if let Ok(app_id) = env::var(ENV_APP_ID) {
            if !app_id.trim().is_empty() {
                return app_id;
            }
        }
        self.get_str_or(&["qobuz", "app_id"], "")
    }

    fn get_qobuz_base_url(&self) -> String {
        self.get_str_or(&["qobuz", "base_url"], DEFAULT_BASE_URL)
    }
}
