//! HTML front end and server assembly for Inventario.
//!
//! Combines the maud views, the JSON API from `inventario-api` and the static
//! assets into one axum [`Router`] backed by any [`InventoryStore`].

pub mod error;
pub mod views;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use inventario_core::store::InventoryStore;
use serde::Deserialize;
use tower_http::{services::ServeDir, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `INVENTARIO_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// Directory holding the three table files.
  pub data_dir:   PathBuf,
  /// Directory served under `/static`.
  pub static_dir: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8000,
      data_dir:   PathBuf::from("data"),
      static_dir: PathBuf::from("static"),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all view handlers.
#[derive(Clone)]
pub struct AppState<S: InventoryStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the complete application router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: InventoryStore + Clone + 'static,
{
  let api = inventario_api::api_router(state.store.clone());
  let assets = ServeDir::new(&state.config.static_dir);

  Router::new()
    .route("/",                      get(views::index))
    .route("/registrar/compra",      get(views::purchase_form))
    .route("/registrar/venta",       get(views::sale_form))
    .route("/ver/productos",         get(views::products::<S>))
    .route("/ver/historial/{kind}",  get(views::history::<S>))
    .route("/ver/top",               get(views::top))
    .with_state(state)
    .nest("/api", api)
    .nest_service("/static", assets)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
