//! Integration tests for `CsvStore` against a temporary data directory.

use std::fs;

use inventario_core::{
  product::Product,
  record::LineItem,
  report::{DELETED_PRODUCT, History, HistoryKind},
  store::InventoryStore,
};
use tempfile::TempDir;

use crate::{CsvStore, Error, encode, schema};

async fn store() -> (TempDir, CsvStore) {
  let dir = TempDir::new().expect("temp dir");
  let store = CsvStore::open(dir.path()).await.expect("open store");
  (dir, store)
}

fn purchase(nombre: &str, cantidad: f64, precio: f64) -> LineItem {
  LineItem {
    nombre: Some(nombre.into()),
    precio_compra: precio,
    cantidad,
    total: cantidad * precio,
    ..Default::default()
  }
}

fn purchase_of(id: &str, cantidad: f64, precio: f64) -> LineItem {
  LineItem {
    id: Some(id.into()),
    precio_compra: precio,
    cantidad,
    total: cantidad * precio,
    ..Default::default()
  }
}

fn sale(id: &str, cantidad: f64, precio: f64) -> LineItem {
  LineItem {
    id: Some(id.into()),
    precio_venta: precio,
    cantidad,
    total: cantidad * precio,
    ..Default::default()
  }
}

async fn widget(s: &CsvStore) -> Product {
  s.register_purchases(vec![purchase("Widget", 10.0, 2.0)])
    .await
    .unwrap();
  s.search_products("widget").await.unwrap().remove(0)
}

// ─── Opening ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn open_creates_header_only_files() {
  let (dir, s) = store().await;
  let products = fs::read_to_string(&s.files().products).unwrap();
  assert_eq!(
    products.trim_end(),
    "id,nombre,precio_compra,precio_venta,categoria,tipo,unidad,proveedor,stock,ubicacion"
  );
  let sales = fs::read_to_string(dir.path().join(schema::SALES_FILE)).unwrap();
  assert_eq!(sales.trim_end(), "id,fecha_venta,precio_venta,cantidad,total");
  assert!(s.list_products().await.unwrap().is_empty());
}

#[tokio::test]
async fn open_keeps_existing_tables() {
  let (dir, s) = store().await;
  widget(&s).await;

  let reopened = CsvStore::open(dir.path()).await.unwrap();
  assert_eq!(reopened.list_products().await.unwrap().len(), 1);
}

#[tokio::test]
async fn open_creates_missing_directory() {
  let dir = TempDir::new().unwrap();
  let nested = dir.path().join("data");
  CsvStore::open(&nested).await.unwrap();
  assert!(nested.join(schema::PRODUCTS_FILE).exists());
  assert!(nested.join(schema::PURCHASES_FILE).exists());
}

// ─── Products ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn products_roundtrip_through_file() {
  let (_dir, s) = store().await;
  let rows: Vec<Product> = (0..3_u32)
    .map(|i| Product {
      id:            format!("id{i}"),
      nombre:        format!("Item, \"{i}\""),
      precio_compra: 1.5 * f64::from(i),
      precio_venta:  2.0,
      categoria:     "Ferretería".into(),
      tipo:          String::new(),
      unidad:        "kg".into(),
      proveedor:     "ACME".into(),
      stock:         -1.0 + f64::from(i),
      ubicacion:     "Estante 3".into(),
    })
    .collect();
  encode::write_products(&s.files().products, &rows).unwrap();

  let listed = s.list_products().await.unwrap();
  assert_eq!(listed, rows);
}

#[tokio::test]
async fn empty_cells_are_normalized() {
  let (_dir, s) = store().await;
  fs::write(
    &s.files().products,
    "id,nombre,precio_compra,precio_venta,categoria,tipo,unidad,proveedor,stock,ubicacion\n\
     p1,Tornillo,,,,,,,,\n",
  )
  .unwrap();

  let p = s.get_product("p1").await.unwrap().unwrap();
  assert_eq!(p.nombre, "Tornillo");
  assert_eq!(p.categoria, "");
  assert_eq!(p.ubicacion, "");
  assert_eq!(p.stock, 0.0);
  assert_eq!(p.precio_compra, 0.0);
}

#[tokio::test]
async fn get_product_missing_returns_none() {
  let (_dir, s) = store().await;
  assert!(s.get_product("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn search_is_case_insensitive_and_empty_query_matches_nothing() {
  let (_dir, s) = store().await;
  widget(&s).await;

  assert_eq!(s.search_products("WID").await.unwrap().len(), 1);
  assert!(s.search_products("").await.unwrap().is_empty());
  assert!(s.search_products("gadget").await.unwrap().is_empty());
}

// ─── Purchases ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn purchase_of_unseen_name_creates_product_and_row() {
  let (_dir, s) = store().await;
  let outcome = s
    .register_purchases(vec![purchase("Widget", 10.0, 2.0)])
    .await
    .unwrap();
  assert_eq!(outcome.recorded, 1);

  let products = s.list_products().await.unwrap();
  assert_eq!(products.len(), 1);
  assert_eq!(products[0].nombre, "Widget");
  assert_eq!(products[0].stock, 10.0);
  assert_eq!(products[0].precio_compra, 2.0);
  assert_eq!(products[0].ubicacion, "Bodega");

  let History::Compras(rows) = s.history(HistoryKind::Compras).await.unwrap() else {
    panic!("expected purchase history");
  };
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].record.id, products[0].id);
  assert_eq!(rows[0].record.total, 20.0);
  assert_eq!(rows[0].nombre, "Widget");
}

#[tokio::test]
async fn purchase_of_existing_id_updates_in_place() {
  let (_dir, s) = store().await;
  let w = widget(&s).await;

  s.register_purchases(vec![purchase_of(&w.id, 5.0, 3.0)])
    .await
    .unwrap();

  let products = s.list_products().await.unwrap();
  assert_eq!(products.len(), 1);
  assert_eq!(products[0].stock, 15.0);
  assert_eq!(products[0].precio_compra, 3.0);
  assert_eq!(s.history(HistoryKind::Compras).await.unwrap().len(), 2);
}

#[tokio::test]
async fn invalid_line_aborts_the_whole_batch() {
  let (_dir, s) = store().await;
  let before_products = fs::read_to_string(&s.files().products).unwrap();
  let before_history = fs::read_to_string(&s.files().purchases).unwrap();

  let err = s
    .register_purchases(vec![
      purchase("Widget", 10.0, 2.0),
      purchase("Gadget", -1.0, 2.0),
    ])
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(inventario_core::Error::InvalidLine { index: 1, .. })
  ));

  assert_eq!(fs::read_to_string(&s.files().products).unwrap(), before_products);
  assert_eq!(fs::read_to_string(&s.files().purchases).unwrap(), before_history);
}

// ─── Sales ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn sale_decrements_stock_and_appends_row() {
  let (_dir, s) = store().await;
  let w = widget(&s).await;

  s.register_sales(vec![sale(&w.id, 4.0, 5.0)]).await.unwrap();

  let p = s.get_product(&w.id).await.unwrap().unwrap();
  assert_eq!(p.stock, 6.0);
  let History::Ventas(rows) = s.history(HistoryKind::Ventas).await.unwrap() else {
    panic!("expected sale history");
  };
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0].record.total, 20.0);
}

#[tokio::test]
async fn sale_may_drive_stock_negative() {
  let (_dir, s) = store().await;
  let w = widget(&s).await;

  s.register_sales(vec![sale(&w.id, 12.0, 5.0)]).await.unwrap();
  assert_eq!(s.get_product(&w.id).await.unwrap().unwrap().stock, -2.0);
}

#[tokio::test]
async fn sale_of_unknown_id_changes_nothing() {
  let (_dir, s) = store().await;
  widget(&s).await;

  let outcome = s.register_sales(vec![sale("ghost", 1.0, 1.0)]).await.unwrap();
  assert_eq!(outcome.recorded, 0);
  assert_eq!(outcome.dropped, vec![0]);

  assert_eq!(s.list_products().await.unwrap().len(), 1);
  assert!(s.history(HistoryKind::Ventas).await.unwrap().is_empty());
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn history_of_removed_product_uses_placeholder() {
  let (_dir, s) = store().await;
  widget(&s).await;
  encode::write_products(&s.files().products, &[]).unwrap();

  let History::Compras(rows) = s.history(HistoryKind::Compras).await.unwrap() else {
    panic!("expected purchase history");
  };
  assert_eq!(rows[0].nombre, DELETED_PRODUCT);
}

#[tokio::test]
async fn widget_scenario_end_to_end() {
  let (_dir, s) = store().await;
  let w = widget(&s).await;
  assert_eq!(w.stock, 10.0);
  assert_eq!(w.precio_compra, 2.0);

  s.register_sales(vec![sale(&w.id, 4.0, 5.0)]).await.unwrap();
  assert_eq!(s.get_product(&w.id).await.unwrap().unwrap().stock, 6.0);

  let top = s.top_sellers(1).await.unwrap();
  assert_eq!(top.len(), 1);
  assert_eq!(top[0].id, w.id);
  assert_eq!(top[0].nombre.as_deref(), Some("Widget"));
  assert_eq!(top[0].cantidad, 4.0);
  assert_eq!(top[0].total, 20.0);
  assert_eq!(top[0].ganancia, Some(12.0));
}

#[tokio::test]
async fn top_sellers_ignores_old_sales() {
  let (_dir, s) = store().await;
  let w = widget(&s).await;
  fs::write(
    &s.files().sales,
    format!(
      "id,fecha_venta,precio_venta,cantidad,total\n\
       {id},2001-01-01 10:00:00,5.0,3.0,15.0\n",
      id = w.id
    ),
  )
  .unwrap();

  assert!(s.top_sellers(30).await.unwrap().is_empty());
  assert_eq!(s.top_sellers(i64::MAX).await.unwrap().len(), 1);
}

#[tokio::test]
async fn unparseable_timestamp_is_an_error() {
  let (_dir, s) = store().await;
  fs::write(
    &s.files().sales,
    "id,fecha_venta,precio_venta,cantidad,total\nx,someday,1,1,1\n",
  )
  .unwrap();

  let err = s.top_sellers(30).await.unwrap_err();
  assert!(matches!(
    err,
    Error::Core(inventario_core::Error::InvalidTimestamp(_))
  ));
}

#[tokio::test]
async fn concurrent_batches_are_not_lost() {
  let (_dir, s) = store().await;
  let w = widget(&s).await;

  let handles: Vec<_> = (0..8)
    .map(|_| {
      let s = s.clone();
      let id = w.id.clone();
      tokio::spawn(async move { s.register_purchases(vec![purchase_of(&id, 1.0, 2.0)]).await })
    })
    .collect();
  for h in handles {
    h.await.unwrap().unwrap();
  }

  assert_eq!(s.get_product(&w.id).await.unwrap().unwrap().stock, 18.0);
  assert_eq!(s.history(HistoryKind::Compras).await.unwrap().len(), 9);
}

// ─── Rewrites ────────────────────────────────────────────────────────────────

fn bulk_products(n: usize) -> Vec<Product> {
  (0..n)
    .map(|i| Product::from_first_purchase(format!("p{i}"), format!("Item {i}"), 1.0, 1.0))
    .collect()
}

#[tokio::test]
async fn aborted_batch_keeps_the_lock_until_its_rewrite_finishes() {
  let (_dir, s) = store().await;
  encode::write_products(&s.files().products, &bulk_products(100_000)).unwrap();

  let first = {
    let s = s.clone();
    tokio::spawn(async move { s.register_purchases(vec![purchase("Primero", 1.0, 1.0)]).await })
  };
  tokio::time::sleep(std::time::Duration::from_millis(20)).await;
  first.abort();
  let _ = first.await;

  s.register_purchases(vec![purchase("Segundo", 1.0, 1.0)])
    .await
    .expect("second batch reads a complete table");

  let products = s.list_products().await.unwrap();
  assert!(
    products.len() == 100_001 || products.len() == 100_002,
    "len: {}",
    products.len()
  );
  assert!(products.iter().any(|p| p.nombre == "Segundo"));
}

#[tokio::test]
async fn readers_never_see_a_partial_table() {
  let (_dir, s) = store().await;
  encode::write_products(&s.files().products, &bulk_products(20_000)).unwrap();

  let writer = {
    let s = s.clone();
    tokio::spawn(async move {
      for i in 0..5 {
        s.register_purchases(vec![purchase(&format!("Nuevo {i}"), 1.0, 1.0)])
          .await
          .unwrap();
      }
    })
  };

  while !writer.is_finished() {
    let products = s.list_products().await.expect("complete table");
    assert!(products.len() >= 20_000, "len: {}", products.len());
  }
  writer.await.unwrap();
  assert_eq!(s.list_products().await.unwrap().len(), 20_005);
}

#[tokio::test]
async fn rewrite_leaves_no_temporary_files() {
  let (dir, s) = store().await;
  widget(&s).await;

  let mut names: Vec<_> = fs::read_dir(dir.path())
    .unwrap()
    .map(|e| e.unwrap().file_name().into_string().unwrap())
    .collect();
  names.sort();
  assert_eq!(names, vec![
    schema::PURCHASES_FILE,
    schema::PRODUCTS_FILE,
    schema::SALES_FILE
  ]);
}
