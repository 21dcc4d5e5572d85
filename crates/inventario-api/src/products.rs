//! Handlers for product reads.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/buscar-producto` | `?q=` required; case-insensitive name match |
//! | `GET`  | `/productos` | Whole product table |
//! | `GET`  | `/productos/{id}` | 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use inventario_core::{product::Product, store::InventoryStore};
use serde::Deserialize;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
  pub q: String,
}

/// `GET /buscar-producto?q=<text>`
pub async fn search<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>, ApiError>
where
  S: InventoryStore,
{
  let products = store
    .search_products(&params.q)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(products))
}

/// `GET /productos`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Product>>, ApiError>
where
  S: InventoryStore,
{
  let products = store.list_products().await.map_err(ApiError::from_store)?;
  Ok(Json(products))
}

/// `GET /productos/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Product>, ApiError>
where
  S: InventoryStore,
{
  let product = store
    .get_product(&id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("product {id} not found")))?;
  Ok(Json(product))
}
