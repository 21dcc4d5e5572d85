//! Core types and table logic for the Inventario store.
//!
//! This crate is deliberately free of HTTP and file-system dependencies.
//! The storage backend loads tables into the types defined here, applies the
//! operations in [`table`] and [`report`], and writes the tables back.

pub mod error;
pub mod product;
pub mod record;
pub mod report;
pub mod store;
pub mod table;
pub mod timestamp;

pub use error::{Error, Result};
