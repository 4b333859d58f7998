//! Table Management Module
//!
//! This module defines the Table type that represents a database table schema.

use serde::{Serialize, Deserialize};

use crate::common::types::TableId;
use super::column::Column;

/// Represents a database table schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Table ID (unique within the catalog)
    id: TableId,
    /// Table name
    name: String,
    /// Columns in the table
    columns: Vec<Column>,
}

impl Table {
    /// Create a new table with the given name and columns
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Table {
            id: 0, // Assigned by the Catalog
            name: name.into(),
            columns,
        }
    }

    /// Get the table ID
    pub fn id(&self) -> TableId {
        self.id
    }

    /// Set the table ID (used by Catalog during creation)
    pub(crate) fn set_id(&mut self, id: TableId) {
        self.id = id;
    }

    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all columns
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name() == name)
    }

    /// Check if the table has a column with the given name
    pub fn has_column(&self, name: &str) -> bool {
        self.get_column(name).is_some()
    }

    /// Name of the primary key column, if the table declares one.
    ///
    /// Only single-column keys are modelled; the first flagged column wins.
    pub fn primary_key(&self) -> Option<&str> {
        self.columns
            .iter()
            .find(|col| col.is_primary_key())
            .map(|col| col.name())
    }
}
