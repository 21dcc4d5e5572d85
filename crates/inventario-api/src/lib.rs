//! JSON API for Inventario.
//!
//! Exposes an axum [`Router`] backed by any
//! [`inventario_core::store::InventoryStore`]. Transport concerns (tracing,
//! binding) are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", inventario_api::api_router(store.clone()))
//! ```

pub mod batches;
pub mod error;
pub mod products;
pub mod reports;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use inventario_core::store::InventoryStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: InventoryStore + 'static,
{
  Router::new()
    // Products
    .route("/buscar-producto", get(products::search::<S>))
    .route("/productos", get(products::list::<S>))
    .route("/productos/{id}", get(products::get_one::<S>))
    // Batches
    .route("/registrar-compra", post(batches::purchases::<S>))
    .route("/registrar-venta", post(batches::sales::<S>))
    // Reports
    .route("/top-ventas", get(reports::top_sellers::<S>))
    .route("/historial/{kind}", get(reports::history::<S>))
    .with_state(store)
}
