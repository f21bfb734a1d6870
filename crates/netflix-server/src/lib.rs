//! Wiring for the `netflix-server` binary: configuration and the top-level
//! router that mounts the customer API under `/netflix`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::Router;
use netflix_core::service::CustomerService;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

/// Path prefix every API route is mounted under.
pub const BASE_PATH: &str = "/netflix";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `NETFLIX_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("netflix.db") }

impl ServerConfig {
  /// Layer an optional TOML file under `NETFLIX_*` environment overrides.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("NETFLIX"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application: the API nested under [`BASE_PATH`] with
/// request tracing.
pub fn app<S>(service: Arc<S>) -> Router
where
  S: CustomerService + 'static,
{
  Router::new()
    .nest(BASE_PATH, netflix_api::api_router(service))
    .layer(TraceLayer::new_for_http())
}
