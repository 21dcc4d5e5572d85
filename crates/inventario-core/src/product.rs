//! Product — one row of the product table.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attribute values assigned to a product created by its first purchase.
pub mod defaults {
  pub const CATEGORIA: &str = "General";
  pub const TIPO: &str = "General";
  pub const UNIDAD: &str = "unidad";
  pub const PROVEEDOR: &str = "General";
  pub const UBICACION: &str = "Bodega";
}

/// A product and its running stock level.
///
/// `stock` is signed: sales are never blocked, so it may go negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id:            String,
  pub nombre:        String,
  /// Unit price of the most recent purchase.
  pub precio_compra: f64,
  pub precio_venta:  f64,
  pub categoria:     String,
  pub tipo:          String,
  pub unidad:        String,
  pub proveedor:     String,
  pub stock:         f64,
  pub ubicacion:     String,
}

impl Product {
  /// A product created by its first purchase, with default attributes.
  pub fn from_first_purchase(
    id: String,
    nombre: String,
    precio_compra: f64,
    cantidad: f64,
  ) -> Self {
    Self {
      id,
      nombre,
      precio_compra,
      precio_venta: 0.0,
      categoria: defaults::CATEGORIA.to_owned(),
      tipo: defaults::TIPO.to_owned(),
      unidad: defaults::UNIDAD.to_owned(),
      proveedor: defaults::PROVEEDOR.to_owned(),
      stock: cantidad,
      ubicacion: defaults::UBICACION.to_owned(),
    }
  }
}

/// Mint a short product identifier: the first eight hex digits of a v4 UUID.
///
/// Collisions are not checked for.
pub fn mint_product_id() -> String {
  let mut id = Uuid::new_v4().simple().to_string();
  id.truncate(8);
  id
}
