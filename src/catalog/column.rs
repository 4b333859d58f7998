// Column Management Module
//
// This module defines the Column type that describes one column of a table.

use serde::{Serialize, Deserialize};

/// Represents a column in a database table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name
    name: String,
    /// Whether this column is the table's primary key
    #[serde(default)]
    primary_key: bool,
}

impl Column {
    /// Create a new column
    pub fn new(name: impl Into<String>, primary_key: bool) -> Self {
        Column {
            name: name.into(),
            primary_key,
        }
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if the column is the primary key
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }
}
