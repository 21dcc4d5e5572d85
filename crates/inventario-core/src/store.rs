//! The `InventoryStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `inventario-store-csv`).
//! The HTTP layers (`inventario-api`, `inventario-web`) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  product::Product,
  record::LineItem,
  report::{History, HistoryKind, TopSeller},
  table::BatchOutcome,
};

/// Abstraction over an inventory backend.
///
/// Every operation works on a fresh load of its tables; nothing is cached
/// between calls. Batch writes either apply every line or persist nothing.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait InventoryStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Products ──────────────────────────────────────────────────────────

  /// The whole product table.
  fn list_products(
    &self,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + '_;

  /// A single product by id. Returns `None` if not found.
  fn get_product<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Product>, Self::Error>> + Send + 'a;

  /// Case-insensitive substring search over product names.
  fn search_products<'a>(
    &'a self,
    query: &'a str,
  ) -> impl Future<Output = Result<Vec<Product>, Self::Error>> + Send + 'a;

  // ── Batches ───────────────────────────────────────────────────────────

  /// Record a purchase batch, creating products for unseen names.
  fn register_purchases(
    &self,
    items: Vec<LineItem>,
  ) -> impl Future<Output = Result<BatchOutcome, Self::Error>> + Send + '_;

  /// Record a sale batch. Lines for unknown products are dropped.
  fn register_sales(
    &self,
    items: Vec<LineItem>,
  ) -> impl Future<Output = Result<BatchOutcome, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// One history table joined against the current product names.
  fn history(
    &self,
    kind: HistoryKind,
  ) -> impl Future<Output = Result<History, Self::Error>> + Send + '_;

  /// Per-product sales over the last `window_days` days.
  fn top_sellers(
    &self,
    window_days: i64,
  ) -> impl Future<Output = Result<Vec<TopSeller>, Self::Error>> + Send + '_;
}
