//! Workload Files
//!
//! A workload is a JSON description of one join query: the tables it reads
//! with their statistics, the scans (aliases and filter selectivities) and
//! the join conditions. It stands in for the parser, catalog and statistics
//! collector a full database would provide.
//!
//! ```json
//! {
//!   "tables": [
//!     { "name": "a", "primary_key": "id", "tuples": 100, "pages": 100 },
//!     { "name": "b", "tuples": 10, "pages": 10 }
//!   ],
//!   "scans": [ { "table": "a", "selectivity": 0.5 }, { "table": "b" } ],
//!   "joins": [ { "left": "a.id", "op": "=", "right": "b.a_id" } ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, Column, Table};
use crate::common::types::{Selectivity, FULL_SELECTIVITY};
use crate::query::planner::error::OptimizerError;
use crate::query::planner::join_node::{split_qualified, JoinNode, JoinOp};
use crate::query::planner::logical::LogicalPlan;
use crate::query::planner::optimizer::{JoinOptimizer, JoinPlan, OptimizerConfig};
use crate::stats::SimpleTableStats;

#[derive(Error, Debug)]
pub enum WorkloadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid workload JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid column reference '{0}', expected alias.field")]
    InvalidColumnRef(String),
}

fn full_selectivity() -> Selectivity {
    FULL_SELECTIVITY
}

fn equals() -> JoinOp {
    JoinOp::Equals
}

/// A base table and its statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub primary_key: Option<String>,
    #[serde(flatten)]
    pub stats: SimpleTableStats,
}

/// One table in the FROM clause
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSpec {
    pub table: String,
    /// Defaults to the table name
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default = "full_selectivity")]
    pub selectivity: Selectivity,
}

/// One join condition; a missing `right` makes it a sub-query join
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinSpec {
    pub left: String,
    #[serde(default = "equals")]
    pub op: JoinOp,
    #[serde(default)]
    pub right: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workload {
    #[serde(default)]
    pub query: Option<String>,
    pub tables: Vec<TableSpec>,
    /// When empty, every table is scanned once under its own name
    #[serde(default)]
    pub scans: Vec<ScanSpec>,
    pub joins: Vec<JoinSpec>,
    #[serde(default)]
    pub config: OptimizerConfig,
}

impl Workload {
    pub fn from_json(json: &str) -> Result<Self, WorkloadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, WorkloadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Build the catalog, logical plan and statistics the optimizer reads
    pub fn prepare(&self) -> Result<PreparedWorkload, WorkloadError> {
        let mut catalog = Catalog::new();
        let mut stats = HashMap::new();
        for spec in &self.tables {
            catalog.create_table(spec.to_table())?;
            stats.insert(spec.name.clone(), spec.stats.clone());
        }

        let mut plan = match &self.query {
            Some(query) => LogicalPlan::with_query(query.clone()),
            None => LogicalPlan::new(),
        };
        let mut selectivities = HashMap::new();

        let default_scans: Vec<ScanSpec>;
        let scans = if self.scans.is_empty() {
            default_scans = self
                .tables
                .iter()
                .map(|t| ScanSpec {
                    table: t.name.clone(),
                    alias: None,
                    selectivity: FULL_SELECTIVITY,
                })
                .collect();
            &default_scans
        } else {
            &self.scans
        };

        for scan in scans {
            let table_id = catalog
                .get_table_id(&scan.table)
                .ok_or_else(|| CatalogError::TableNotFound(scan.table.clone()))?;
            let alias = scan.alias.clone().unwrap_or_else(|| scan.table.clone());
            plan.add_scan(table_id, alias.clone());
            selectivities.insert(alias, scan.selectivity);
        }

        for join in &self.joins {
            plan.add_join(join.to_node()?);
        }

        Ok(PreparedWorkload {
            catalog,
            plan,
            stats,
            selectivities,
            config: self.config.clone(),
        })
    }
}

impl TableSpec {
    fn to_table(&self) -> Table {
        let mut columns: Vec<Column> = self
            .columns
            .iter()
            .map(|name| Column::new(name.clone(), self.primary_key.as_deref() == Some(name.as_str())))
            .collect();
        if let Some(pk) = &self.primary_key {
            if !self.columns.contains(pk) {
                columns.push(Column::new(pk.clone(), true));
            }
        }
        Table::new(self.name.clone(), columns)
    }
}

impl JoinSpec {
    fn to_node(&self) -> Result<JoinNode, WorkloadError> {
        let (left_alias, left_field) = split_qualified(&self.left)
            .ok_or_else(|| WorkloadError::InvalidColumnRef(self.left.clone()))?;
        match &self.right {
            Some(right) => {
                let (right_alias, right_field) = split_qualified(right)
                    .ok_or_else(|| WorkloadError::InvalidColumnRef(right.clone()))?;
                Ok(JoinNode::new(left_alias, left_field, self.op, right_alias, right_field))
            }
            None => Ok(JoinNode::subquery(left_alias, left_field, self.op)),
        }
    }
}

/// Optimizer inputs built from a workload
#[derive(Debug, Clone)]
pub struct PreparedWorkload {
    pub catalog: Catalog,
    pub plan: LogicalPlan,
    pub stats: HashMap<String, SimpleTableStats>,
    pub selectivities: HashMap<String, Selectivity>,
    pub config: OptimizerConfig,
}

impl PreparedWorkload {
    pub fn optimizer(&self) -> JoinOptimizer<'_> {
        JoinOptimizer::new(&self.plan, &self.catalog).with_config(self.config.clone())
    }

    /// Order the workload's joins using its own configuration
    pub fn order_joins(&self) -> Result<JoinPlan, OptimizerError> {
        self.optimizer().order_joins(&self.stats, &self.selectivities)
    }
}
