//! Handlers for batch registration.
//!
//! Both endpoints take a JSON array of [`LineItem`]s and answer
//! `{"status":"ok"}`. A body that does not parse is rejected by the `Json`
//! extractor; a line the store refuses yields 400 and nothing is written.

use std::sync::Arc;

use axum::{Json, extract::State};
use inventario_core::{record::LineItem, store::InventoryStore};
use serde_json::{Value, json};

use crate::error::ApiError;

fn ok() -> Json<Value> { Json(json!({ "status": "ok" })) }

/// `POST /registrar-compra`
pub async fn purchases<S>(
  State(store): State<Arc<S>>,
  Json(items): Json<Vec<LineItem>>,
) -> Result<Json<Value>, ApiError>
where
  S: InventoryStore,
{
  store
    .register_purchases(items)
    .await
    .map_err(ApiError::from_store)?;
  Ok(ok())
}

/// `POST /registrar-venta`
pub async fn sales<S>(
  State(store): State<Arc<S>>,
  Json(items): Json<Vec<LineItem>>,
) -> Result<Json<Value>, ApiError>
where
  S: InventoryStore,
{
  store
    .register_sales(items)
    .await
    .map_err(ApiError::from_store)?;
  Ok(ok())
}
