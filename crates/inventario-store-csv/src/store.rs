//! [`CsvStore`] — the flat-file implementation of [`InventoryStore`].

use std::{path::Path, sync::Arc};

use inventario_core::{
  product::Product,
  record::LineItem,
  report::{self, History, HistoryKind, TopSeller},
  store::InventoryStore,
  table::{self, BatchOutcome, ProductTable},
  timestamp,
};
use tokio::sync::Mutex;

use crate::{
  Result,
  encode::{
    read_products, read_purchases, read_sales, write_products, write_purchases, write_sales,
  },
  schema::DataFiles,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An inventory store backed by three CSV files in one directory.
///
/// Batches hold `write_lock` for their whole read-modify-write cycle, so two
/// batches submitted to the same process never overwrite each other. Tables
/// are replaced by renaming a finished temporary file over them, so readers
/// never see a partly written table. Another process writing the same
/// directory is not coordinated with: the last rewrite wins.
///
/// Cloning is cheap; clones share the lock.
#[derive(Clone)]
pub struct CsvStore {
  files:      Arc<DataFiles>,
  write_lock: Arc<Mutex<()>>,
}

impl CsvStore {
  /// Open a store rooted at `dir`, creating the directory and any missing
  /// table files.
  pub async fn open(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref().to_path_buf();
    let files = DataFiles::in_dir(&dir);
    let created = {
      let files = files.clone();
      tokio::task::spawn_blocking(move || files.init(&dir)).await??
    };
    for path in created {
      tracing::info!(path = %path.display(), "created empty table");
    }
    Ok(Self {
      files:      Arc::new(files),
      write_lock: Arc::new(Mutex::new(())),
    })
  }

  pub fn files(&self) -> &DataFiles { &self.files }

  /// Run file I/O on the blocking pool.
  async fn blocking<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&DataFiles) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    let files = Arc::clone(&self.files);
    tokio::task::spawn_blocking(move || f(&files)).await?
  }

  /// Run a read-modify-write batch on the blocking pool under `write_lock`.
  ///
  /// The guard moves into the blocking task: if the caller is dropped
  /// mid-batch, the lock is still held until the rewrite has finished.
  async fn write_batch<T, F>(&self, f: F) -> Result<T>
  where
    F: FnOnce(&DataFiles) -> Result<T> + Send + 'static,
    T: Send + 'static,
  {
    let guard = Arc::clone(&self.write_lock).lock_owned().await;
    self
      .blocking(move |files| {
        let _guard = guard;
        f(files)
      })
      .await
  }
}

// ─── InventoryStore impl ─────────────────────────────────────────────────────

impl InventoryStore for CsvStore {
  type Error = crate::Error;

  // ── Products ──────────────────────────────────────────────────────────────

  async fn list_products(&self) -> Result<Vec<Product>> {
    self.blocking(|f| read_products(&f.products)).await
  }

  async fn get_product(&self, id: &str) -> Result<Option<Product>> {
    let id = id.to_owned();
    self
      .blocking(move |f| {
        let products = ProductTable::new(read_products(&f.products)?);
        Ok(products.find(&id).cloned())
      })
      .await
  }

  async fn search_products(&self, query: &str) -> Result<Vec<Product>> {
    let query = query.to_owned();
    self
      .blocking(move |f| Ok(ProductTable::new(read_products(&f.products)?).search(&query)))
      .await
  }

  // ── Batches ───────────────────────────────────────────────────────────────

  async fn register_purchases(&self, items: Vec<LineItem>) -> Result<BatchOutcome> {
    let outcome = self
      .write_batch(move |f| {
        let at = timestamp::now();
        let mut products = ProductTable::new(read_products(&f.products)?);
        let mut history = read_purchases(&f.purchases)?;
        let outcome = table::apply_purchases(&mut products, &mut history, &items, at)?;
        write_products(&f.products, products.rows())?;
        write_purchases(&f.purchases, &history)?;
        Ok(outcome)
      })
      .await?;

    tracing::info!(recorded = outcome.recorded, "registered purchase batch");
    Ok(outcome)
  }

  async fn register_sales(&self, items: Vec<LineItem>) -> Result<BatchOutcome> {
    let outcome = self
      .write_batch(move |f| {
        let at = timestamp::now();
        let mut products = ProductTable::new(read_products(&f.products)?);
        let mut history = read_sales(&f.sales)?;
        let outcome = table::apply_sales(&mut products, &mut history, &items, at)?;
        write_products(&f.products, products.rows())?;
        write_sales(&f.sales, &history)?;
        Ok(outcome)
      })
      .await?;

    if !outcome.dropped.is_empty() {
      tracing::warn!(lines = ?outcome.dropped, "dropped sale lines for unknown products");
    }
    tracing::info!(recorded = outcome.recorded, "registered sale batch");
    Ok(outcome)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn history(&self, kind: HistoryKind) -> Result<History> {
    self
      .blocking(move |f| {
        let products = ProductTable::new(read_products(&f.products)?);
        Ok(match kind {
          HistoryKind::Compras => {
            History::Compras(report::join_history(read_purchases(&f.purchases)?, &products))
          }
          HistoryKind::Ventas => {
            History::Ventas(report::join_history(read_sales(&f.sales)?, &products))
          }
        })
      })
      .await
  }

  async fn top_sellers(&self, window_days: i64) -> Result<Vec<TopSeller>> {
    let now = timestamp::now();
    self
      .blocking(move |f| {
        let products = ProductTable::new(read_products(&f.products)?);
        let sales = read_sales(&f.sales)?;
        Ok(report::top_sellers(&sales, &products, window_days, now))
      })
      .await
  }
}
