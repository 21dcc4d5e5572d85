//! History records and the line items submitted to create them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── History rows ────────────────────────────────────────────────────────────

/// One purchased line, appended to the purchase history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
  pub id:            String,
  #[serde(with = "crate::timestamp")]
  pub fecha_compra:  NaiveDateTime,
  pub precio_compra: f64,
  pub cantidad:      f64,
  pub total:         f64,
}

/// One sold line, appended to the sale history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
  pub id:           String,
  #[serde(with = "crate::timestamp")]
  pub fecha_venta:  NaiveDateTime,
  pub precio_venta: f64,
  pub cantidad:     f64,
  pub total:        f64,
}

/// Common access to the columns shared by both history tables.
pub trait Record {
  fn product_id(&self) -> &str;
  fn fecha(&self) -> NaiveDateTime;
  /// Unit price of the line.
  fn precio(&self) -> f64;
  fn cantidad(&self) -> f64;
  fn total(&self) -> f64;
}

impl Record for PurchaseRecord {
  fn product_id(&self) -> &str { &self.id }

  fn fecha(&self) -> NaiveDateTime { self.fecha_compra }

  fn precio(&self) -> f64 { self.precio_compra }

  fn cantidad(&self) -> f64 { self.cantidad }

  fn total(&self) -> f64 { self.total }
}

impl Record for SaleRecord {
  fn product_id(&self) -> &str { &self.id }

  fn fecha(&self) -> NaiveDateTime { self.fecha_venta }

  fn precio(&self) -> f64 { self.precio_venta }

  fn cantidad(&self) -> f64 { self.cantidad }

  fn total(&self) -> f64 { self.total }
}

// ─── Line items ──────────────────────────────────────────────────────────────

/// One line of a purchase or sale batch, as submitted by the client.
///
/// `total` is required on input but never trusted: the stored total is
/// recomputed as `cantidad * price`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
  #[serde(default)]
  pub id:            Option<String>,
  #[serde(default)]
  pub nombre:        Option<String>,
  #[serde(default)]
  pub precio_compra: f64,
  #[serde(default)]
  pub precio_venta:  f64,
  pub cantidad:      f64,
  pub total:         f64,
}

impl LineItem {
  /// The submitted id, treating an empty string as absent. Ids are matched
  /// exactly; surrounding whitespace is not stripped.
  pub fn product_id(&self) -> Option<&str> {
    self.id.as_deref().filter(|s| !s.is_empty())
  }

  pub(crate) fn check_purchase(&self, index: usize) -> Result<()> {
    check_amount(index, "cantidad", self.cantidad)?;
    check_amount(index, "precio_compra", self.precio_compra)
  }

  pub(crate) fn check_sale(&self, index: usize) -> Result<()> {
    check_amount(index, "cantidad", self.cantidad)?;
    check_amount(index, "precio_venta", self.precio_venta)
  }
}

fn check_amount(index: usize, field: &str, value: f64) -> Result<()> {
  if !value.is_finite() {
    return Err(Error::invalid_line(index, format!("{field} is not a number")));
  }
  if value < 0.0 {
    return Err(Error::invalid_line(index, format!("{field} is negative")));
  }
  Ok(())
}
