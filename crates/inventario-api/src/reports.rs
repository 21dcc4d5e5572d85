//! Handlers for history and sales reports.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use inventario_core::{
  report::{History, HistoryKind, TopSeller},
  store::InventoryStore,
};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct TopParams {
  /// Window size in days, counted back from now.
  pub dias: i64,
}

/// `GET /top-ventas?dias=<n>`
pub async fn top_sellers<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<TopParams>,
) -> Result<Json<Vec<TopSeller>>, ApiError>
where
  S: InventoryStore,
{
  let rows = store
    .top_sellers(params.dias)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(rows))
}

/// `GET /historial/{kind}` — `compras`, or anything else for sales.
pub async fn history<S>(
  State(store): State<Arc<S>>,
  Path(kind): Path<String>,
) -> Result<Json<History>, ApiError>
where
  S: InventoryStore,
{
  let history = store
    .history(HistoryKind::from_segment(&kind))
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(history))
}
