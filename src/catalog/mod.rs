//! Catalog Management Module
//!
//! This module manages the table metadata the join optimizer needs:
//! table names, ids and primary keys.

pub mod catalog;
pub mod column;
pub mod table;

// Re-export key types
pub use self::catalog::{Catalog, CatalogError};
pub use self::column::Column;
pub use self::table::Table;
