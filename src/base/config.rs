//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc};

use serde::Deserialize;

use crate::base::prompts;

use super::types::Res;

/// Placeholder credential shipped in the default configuration.
///
/// The classifier refuses to go to the network while the key still has this
/// value, reporting a configuration error instead.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_GEMINI_API_KEY";

/// Default Gemini API base endpoint.
fn default_gemini_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

/// Default Gemini model to use for classification.
fn default_gemini_model() -> String {
    "gemini-2.5-flash-preview-09-2025".to_string()
}

/// Default (unusable) Gemini API key.
fn default_gemini_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

/// Default system directive for the classifier agent.
fn default_classifier_system_directive() -> String {
    prompts::CLASSIFIER_SYSTEM_DIRECTIVE.to_string()
}

/// Default bind address for the HTTP shell.
fn default_server_addr() -> String {
    "127.0.0.1:5000".to_string()
}

/// Default ticket substituted when an invoke request carries no query.
fn default_fallback_ticket() -> String {
    "Default test ticket: My monitor is flickering.".to_string()
}

/// Configuration for the ticket-triage application.
#[derive(Debug, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConfigInner {
    /// Gemini API key (`GEMINI_API_KEY`).
    pub gemini_api_key: String,
    /// Gemini API base endpoint (`GEMINI_ENDPOINT`).
    ///
    /// Overridable so tests can point the classifier at a local mock server.
    pub gemini_endpoint: String,
    /// Gemini model to use for classification (`GEMINI_MODEL`).
    pub gemini_model: String,
    /// Optional custom system directive to override the default (`CLASSIFIER_SYSTEM_DIRECTIVE`).
    pub classifier_system_directive: String,
    /// Bind address for the HTTP shell (`SERVER_ADDR`).
    pub server_addr: String,
    /// Ticket text substituted when a request carries no query (`FALLBACK_TICKET`).
    pub fallback_ticket: String,
}

impl Default for ConfigInner {
    fn default() -> Self {
        Self {
            gemini_api_key: default_gemini_api_key(),
            gemini_endpoint: default_gemini_endpoint(),
            gemini_model: default_gemini_model(),
            classifier_system_directive: default_classifier_system_directive(),
            server_addr: default_server_addr(),
            fallback_ticket: default_fallback_ticket(),
        }
    }
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("TICKET_TRIAGE"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        if result.server_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(anyhow::anyhow!("Server address must be a valid socket address, got `{}`.", result.server_addr));
        }

        if !result.gemini_endpoint.starts_with("http://") && !result.gemini_endpoint.starts_with("https://") {
            return Err(anyhow::anyhow!("Gemini endpoint must be an http(s) URL, got `{}`.", result.gemini_endpoint));
        }

        Ok(result)
    }

    /// Whether a usable credential has been supplied.
    pub fn has_credential(&self) -> bool {
        !self.gemini_api_key.is_empty() && self.gemini_api_key != PLACEHOLDER_API_KEY
    }
}
