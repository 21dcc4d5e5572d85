//! Read models computed from the history tables: the joined history view and
//! the per-product sales aggregate.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::{
  record::{PurchaseRecord, Record, SaleRecord},
  table::ProductTable,
};

/// Name shown for history rows whose product no longer exists.
pub const DELETED_PRODUCT: &str = "Producto Eliminado";

// ─── History ─────────────────────────────────────────────────────────────────

/// Which history table to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
  Compras,
  Ventas,
}

impl HistoryKind {
  /// Parse a URL segment. Anything other than `compras` selects the sale
  /// history.
  pub fn from_segment(s: &str) -> Self {
    if s == "compras" { Self::Compras } else { Self::Ventas }
  }

  pub fn title(self) -> &'static str {
    match self {
      Self::Compras => "Historial de Compras",
      Self::Ventas => "Historial de Ventas",
    }
  }
}

/// A history row with the current name of its product attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry<R> {
  #[serde(flatten)]
  pub record: R,
  pub nombre: String,
}

/// The rows of one history table, joined against the product table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum History {
  Compras(Vec<HistoryEntry<PurchaseRecord>>),
  Ventas(Vec<HistoryEntry<SaleRecord>>),
}

impl History {
  pub fn kind(&self) -> HistoryKind {
    match self {
      History::Compras(_) => HistoryKind::Compras,
      History::Ventas(_) => HistoryKind::Ventas,
    }
  }

  pub fn len(&self) -> usize {
    match self {
      History::Compras(rows) => rows.len(),
      History::Ventas(rows) => rows.len(),
    }
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Left-join `records` against `products` by id.
pub fn join_history<R: Record>(records: Vec<R>, products: &ProductTable) -> Vec<HistoryEntry<R>> {
  records
    .into_iter()
    .map(|record| {
      let nombre = products
        .find(record.product_id())
        .map_or_else(|| DELETED_PRODUCT.to_owned(), |p| p.nombre.clone());
      HistoryEntry { record, nombre }
    })
    .collect()
}

// ─── Top sellers ─────────────────────────────────────────────────────────────

/// Sales of one product within a time window.
///
/// `ganancia` is computed from the product's *current* purchase price, not
/// the price paid when the stock was bought. The product fields are `None`
/// when the product no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSeller {
  pub id:            String,
  pub cantidad:      f64,
  pub total:         f64,
  pub nombre:        Option<String>,
  pub precio_compra: Option<f64>,
  pub ganancia:      Option<f64>,
}

/// Group the sales made in the last `window_days` days before `now` by
/// product. Rows come out in id order; no ranking or limit is applied.
pub fn top_sellers(
  sales: &[SaleRecord],
  products: &ProductTable,
  window_days: i64,
  now: NaiveDateTime,
) -> Vec<TopSeller> {
  // A window too large to represent covers everything.
  let cutoff = TimeDelta::try_days(window_days).and_then(|d| now.checked_sub_signed(d));

  let mut grouped: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
  for sale in sales
    .iter()
    .filter(|s| cutoff.is_none_or(|c| s.fecha_venta >= c))
  {
    let entry = grouped.entry(sale.id.as_str()).or_default();
    entry.0 += sale.cantidad;
    entry.1 += sale.total;
  }

  grouped
    .into_iter()
    .map(|(id, (cantidad, total))| {
      let product = products.find(id);
      let precio_compra = product.map(|p| p.precio_compra);
      TopSeller {
        id: id.to_owned(),
        cantidad,
        total,
        nombre: product.map(|p| p.nombre.clone()),
        precio_compra,
        ganancia: precio_compra.map(|c| total - c * cantidad),
      }
    })
    .collect()
}
