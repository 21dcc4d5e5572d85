//! File layout of a data directory.
//!
//! Three tables, each with a fixed header row. Missing files are created
//! empty (header only) when the store is opened; existing files are left
//! untouched.

use std::{
  fs,
  path::{Path, PathBuf},
};

use crate::Result;

pub const PRODUCTS_FILE: &str = "PRODUCTOS_BD.csv";
pub const PURCHASES_FILE: &str = "COMPRAS_BD.csv";
pub const SALES_FILE: &str = "VENTAS_BD.csv";

pub const PRODUCT_HEADERS: &[&str] = &[
  "id",
  "nombre",
  "precio_compra",
  "precio_venta",
  "categoria",
  "tipo",
  "unidad",
  "proveedor",
  "stock",
  "ubicacion",
];

pub const PURCHASE_HEADERS: &[&str] =
  &["id", "fecha_compra", "precio_compra", "cantidad", "total"];

pub const SALE_HEADERS: &[&str] = &["id", "fecha_venta", "precio_venta", "cantidad", "total"];

/// Paths of the three table files under one data directory.
#[derive(Debug, Clone)]
pub struct DataFiles {
  pub products:  PathBuf,
  pub purchases: PathBuf,
  pub sales:     PathBuf,
}

impl DataFiles {
  pub fn in_dir(dir: &Path) -> Self {
    Self {
      products:  dir.join(PRODUCTS_FILE),
      purchases: dir.join(PURCHASES_FILE),
      sales:     dir.join(SALES_FILE),
    }
  }

  /// Create `dir` and any missing table file. Returns the files created.
  pub(crate) fn init(&self, dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut created = Vec::new();
    for (path, headers) in [
      (&self.products, PRODUCT_HEADERS),
      (&self.purchases, PURCHASE_HEADERS),
      (&self.sales, SALE_HEADERS),
    ] {
      if !path.exists() {
        crate::encode::write_rows::<()>(path, headers, &[])?;
        created.push(path.clone());
      }
    }
    Ok(created)
  }
}
