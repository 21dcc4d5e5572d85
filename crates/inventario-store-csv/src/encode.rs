//! Reading and writing whole tables.
//!
//! Rows are read through lenient `Raw*` shapes: any cell may be empty, and
//! empty cells become `""` for text and `0` for numbers. Rows are written
//! straight from the core types, whose field order matches the headers in
//! [`crate::schema`].

use std::path::Path;

use inventario_core::{
  product::Product,
  record::{PurchaseRecord, SaleRecord},
  timestamp,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tempfile::NamedTempFile;

use crate::{
  Error, Result,
  schema::{PRODUCT_HEADERS, PURCHASE_HEADERS, SALE_HEADERS},
};

// ─── Raw row shapes ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawProduct {
  id:            Option<String>,
  nombre:        Option<String>,
  precio_compra: Option<f64>,
  precio_venta:  Option<f64>,
  categoria:     Option<String>,
  tipo:          Option<String>,
  unidad:        Option<String>,
  proveedor:     Option<String>,
  stock:         Option<f64>,
  ubicacion:     Option<String>,
}

impl From<RawProduct> for Product {
  fn from(r: RawProduct) -> Self {
    Product {
      id:            r.id.unwrap_or_default(),
      nombre:        r.nombre.unwrap_or_default(),
      precio_compra: r.precio_compra.unwrap_or_default(),
      precio_venta:  r.precio_venta.unwrap_or_default(),
      categoria:     r.categoria.unwrap_or_default(),
      tipo:          r.tipo.unwrap_or_default(),
      unidad:        r.unidad.unwrap_or_default(),
      proveedor:     r.proveedor.unwrap_or_default(),
      stock:         r.stock.unwrap_or_default(),
      ubicacion:     r.ubicacion.unwrap_or_default(),
    }
  }
}

#[derive(Debug, Deserialize)]
struct RawPurchase {
  id:            Option<String>,
  fecha_compra:  String,
  precio_compra: Option<f64>,
  cantidad:      Option<f64>,
  total:         Option<f64>,
}

impl TryFrom<RawPurchase> for PurchaseRecord {
  type Error = Error;

  fn try_from(r: RawPurchase) -> Result<Self> {
    Ok(PurchaseRecord {
      id:            r.id.unwrap_or_default(),
      fecha_compra:  timestamp::decode(&r.fecha_compra)?,
      precio_compra: r.precio_compra.unwrap_or_default(),
      cantidad:      r.cantidad.unwrap_or_default(),
      total:         r.total.unwrap_or_default(),
    })
  }
}

#[derive(Debug, Deserialize)]
struct RawSale {
  id:           Option<String>,
  fecha_venta:  String,
  precio_venta: Option<f64>,
  cantidad:     Option<f64>,
  total:        Option<f64>,
}

impl TryFrom<RawSale> for SaleRecord {
  type Error = Error;

  fn try_from(r: RawSale) -> Result<Self> {
    Ok(SaleRecord {
      id:           r.id.unwrap_or_default(),
      fecha_venta:  timestamp::decode(&r.fecha_venta)?,
      precio_venta: r.precio_venta.unwrap_or_default(),
      cantidad:     r.cantidad.unwrap_or_default(),
      total:        r.total.unwrap_or_default(),
    })
  }
}

// ─── Generic table I/O ───────────────────────────────────────────────────────

/// Deserialize every data row of `path`, matching columns by header name.
fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
  let mut reader = csv::Reader::from_path(path).map_err(Error::csv(path))?;
  reader
    .deserialize()
    .map(|row| row.map_err(Error::csv(path)))
    .collect()
}

/// Replace the contents of `path` with `headers` followed by `rows`.
///
/// The table is written to a temporary file in the same directory and
/// renamed over `path`, so the old table stays readable until the new one is
/// complete. The header row is written explicitly so that an empty table
/// still gets one.
pub(crate) fn write_rows<T: Serialize>(path: &Path, headers: &[&str], rows: &[T]) -> Result<()> {
  let dir = path
    .parent()
    .filter(|d| !d.as_os_str().is_empty())
    .unwrap_or(Path::new("."));
  let mut tmp = NamedTempFile::new_in(dir)?;
  {
    let mut writer = csv::WriterBuilder::new()
      .has_headers(false)
      .from_writer(&mut tmp);
    writer.write_record(headers).map_err(Error::csv(path))?;
    for row in rows {
      writer.serialize(row).map_err(Error::csv(path))?;
    }
    writer.flush()?;
  }
  tmp.persist(path).map_err(|e| e.error)?;
  Ok(())
}

// ─── Per-table helpers ───────────────────────────────────────────────────────

pub(crate) fn read_products(path: &Path) -> Result<Vec<Product>> {
  Ok(
    read_rows::<RawProduct>(path)?
      .into_iter()
      .map(Product::from)
      .collect(),
  )
}

pub(crate) fn write_products(path: &Path, rows: &[Product]) -> Result<()> {
  write_rows(path, PRODUCT_HEADERS, rows)
}

pub(crate) fn read_purchases(path: &Path) -> Result<Vec<PurchaseRecord>> {
  read_rows::<RawPurchase>(path)?
    .into_iter()
    .map(PurchaseRecord::try_from)
    .collect()
}

pub(crate) fn write_purchases(path: &Path, rows: &[PurchaseRecord]) -> Result<()> {
  write_rows(path, PURCHASE_HEADERS, rows)
}

pub(crate) fn read_sales(path: &Path) -> Result<Vec<SaleRecord>> {
  read_rows::<RawSale>(path)?
    .into_iter()
    .map(SaleRecord::try_from)
    .collect()
}

pub(crate) fn write_sales(path: &Path, rows: &[SaleRecord]) -> Result<()> {
  write_rows(path, SALE_HEADERS, rows)
}
