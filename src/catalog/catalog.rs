use std::collections::HashMap;
use thiserror::Error;

use crate::common::types::TableId;
use super::table::Table;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Table {0} already exists")]
    TableAlreadyExists(String),
    #[error("Table {0} not found")]
    TableNotFound(String),
}

/// The Catalog is the repository of table names and primary keys the
/// optimizer consults. It is an owned value handed to the planner by
/// reference; there is no process-wide instance.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: HashMap<TableId, Table>,
    name_to_id: HashMap<String, TableId>,
    table_id_counter: TableId,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Catalog {
            tables: HashMap::new(),
            name_to_id: HashMap::new(),
            table_id_counter: 1,
        }
    }

    /// Register a table and return the id assigned to it
    pub fn create_table(&mut self, mut table: Table) -> Result<TableId, CatalogError> {
        if self.name_to_id.contains_key(table.name()) {
            return Err(CatalogError::TableAlreadyExists(table.name().to_string()));
        }
        let new_id = self.table_id_counter;
        self.table_id_counter += 1;
        table.set_id(new_id);
        self.name_to_id.insert(table.name().to_string(), new_id);
        self.tables.insert(new_id, table);
        Ok(new_id)
    }

    pub fn get_table(&self, table_name: &str) -> Option<&Table> {
        self.name_to_id
            .get(table_name)
            .and_then(|id| self.tables.get(id))
    }

    pub fn get_table_id(&self, table_name: &str) -> Option<TableId> {
        self.name_to_id.get(table_name).copied()
    }

    /// Base table name for an id
    pub fn table_name(&self, id: TableId) -> Option<&str> {
        self.tables.get(&id).map(|t| t.name())
    }

    /// Primary key field of a table, if it declares one
    pub fn primary_key(&self, id: TableId) -> Option<&str> {
        self.tables.get(&id).and_then(|t| t.primary_key())
    }
}
