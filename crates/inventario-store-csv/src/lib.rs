//! Flat-file backend for the Inventario store.
//!
//! Each table lives in its own CSV file. Every operation reads the tables it
//! needs in full and every batch rewrites them in full; file I/O runs on
//! tokio's blocking pool so the async runtime is never stalled.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use schema::DataFiles;
pub use store::CsvStore;

#[cfg(test)]
mod tests;
