//! The in-memory product table and the batch operations applied to it.
//!
//! A backend loads the whole table, runs one of [`apply_purchases`] or
//! [`apply_sales`] against it, and writes the result back. Both functions
//! mutate their arguments in place; on error the caller must discard them
//! rather than persist a half-applied batch.

use chrono::NaiveDateTime;

use crate::{
  Error, Result,
  product::{Product, mint_product_id},
  record::{LineItem, PurchaseRecord, SaleRecord},
};

// ─── Product table ───────────────────────────────────────────────────────────

/// The full product table, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductTable {
  rows: Vec<Product>,
}

/// What happened to a sale line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaleOutcome {
  Applied,
  /// No product has the given id; the line is dropped.
  UnknownProduct,
}

impl ProductTable {
  pub fn new(rows: Vec<Product>) -> Self { Self { rows } }

  pub fn rows(&self) -> &[Product] { &self.rows }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  fn position(&self, id: &str) -> Option<usize> {
    self.rows.iter().position(|p| p.id == id)
  }

  /// The first product with the given id.
  pub fn find(&self, id: &str) -> Option<&Product> {
    self.position(id).map(|i| &self.rows[i])
  }

  /// Products whose name contains `query`, ignoring case.
  ///
  /// An empty query matches nothing.
  pub fn search(&self, query: &str) -> Vec<Product> {
    if query.is_empty() {
      return Vec::new();
    }
    let needle = query.to_lowercase();
    self
      .rows
      .iter()
      .filter(|p| p.nombre.to_lowercase().contains(&needle))
      .cloned()
      .collect()
  }

  /// Apply one purchase line and return the id of the product it landed on.
  ///
  /// A missing or unknown id creates a new product under a freshly minted id;
  /// a known id adds to its stock and overwrites its purchase price.
  pub fn upsert_on_purchase(&mut self, index: usize, line: &LineItem) -> Result<String> {
    if let Some(i) = line.product_id().and_then(|id| self.position(id)) {
      let product = &mut self.rows[i];
      product.stock += line.cantidad;
      product.precio_compra = line.precio_compra;
      return Ok(product.id.clone());
    }

    let nombre = line
      .nombre
      .as_deref()
      .map(str::trim)
      .filter(|n| !n.is_empty())
      .ok_or_else(|| Error::invalid_line(index, "nombre is required for a new product"))?;

    let id = mint_product_id();
    self.rows.push(Product::from_first_purchase(
      id.clone(),
      nombre.to_owned(),
      line.precio_compra,
      line.cantidad,
    ));
    Ok(id)
  }

  /// Subtract `cantidad` from the stock of `id`. Stock may go negative.
  pub fn apply_sale(&mut self, id: &str, cantidad: f64) -> SaleOutcome {
    match self.position(id) {
      Some(i) => {
        self.rows[i].stock -= cantidad;
        SaleOutcome::Applied
      }
      None => SaleOutcome::UnknownProduct,
    }
  }
}

// ─── Batches ─────────────────────────────────────────────────────────────────

/// Summary of an applied batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
  /// History rows appended.
  pub recorded: usize,
  /// Indices of sale lines dropped because their product does not exist.
  pub dropped:  Vec<usize>,
}

/// Apply a purchase batch in order, appending one history row per line.
pub fn apply_purchases(
  products: &mut ProductTable,
  history: &mut Vec<PurchaseRecord>,
  items: &[LineItem],
  at: NaiveDateTime,
) -> Result<BatchOutcome> {
  let mut outcome = BatchOutcome::default();
  for (index, line) in items.iter().enumerate() {
    line.check_purchase(index)?;
    let id = products.upsert_on_purchase(index, line)?;
    history.push(PurchaseRecord {
      id,
      fecha_compra: at,
      precio_compra: line.precio_compra,
      cantidad: line.cantidad,
      total: line.cantidad * line.precio_compra,
    });
    outcome.recorded += 1;
  }
  Ok(outcome)
}

/// Apply a sale batch in order. Lines naming an unknown product are dropped
/// without touching either table.
pub fn apply_sales(
  products: &mut ProductTable,
  history: &mut Vec<SaleRecord>,
  items: &[LineItem],
  at: NaiveDateTime,
) -> Result<BatchOutcome> {
  let mut outcome = BatchOutcome::default();
  for (index, line) in items.iter().enumerate() {
    line.check_sale(index)?;
    let Some(id) = line.product_id() else {
      outcome.dropped.push(index);
      continue;
    };
    match products.apply_sale(id, line.cantidad) {
      SaleOutcome::Applied => {
        history.push(SaleRecord {
          id: id.to_owned(),
          fecha_venta: at,
          precio_venta: line.precio_venta,
          cantidad: line.cantidad,
          total: line.cantidad * line.precio_venta,
        });
        outcome.recorded += 1;
      }
      SaleOutcome::UnknownProduct => outcome.dropped.push(index),
    }
  }
  Ok(outcome)
}
