// Logical Query Plan
//
// The slice of a logical plan the join optimizer reads: which table every
// alias in the FROM clause refers to, and the list of join conditions.

use std::fmt;

use linked_hash_map::LinkedHashMap;

use crate::common::types::TableId;
use crate::query::planner::join_node::JoinNode;

#[derive(Debug, Clone, Default)]
pub struct LogicalPlan {
    /// Alias to table id, in FROM-clause order
    table_aliases: LinkedHashMap<String, TableId>,
    /// Join conditions in query order
    joins: Vec<JoinNode>,
    /// Original query text, if known
    query: Option<String>,
}

impl LogicalPlan {
    pub fn new() -> Self {
        LogicalPlan::default()
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        LogicalPlan {
            query: Some(query.into()),
            ..LogicalPlan::default()
        }
    }

    /// Add a scan of `table_id` under `alias`. Re-adding an alias rebinds it.
    pub fn add_scan(&mut self, table_id: TableId, alias: impl Into<String>) {
        self.table_aliases.insert(alias.into(), table_id);
    }

    pub fn add_join(&mut self, join: JoinNode) {
        self.joins.push(join);
    }

    /// Table id bound to an alias
    pub fn table_id(&self, alias: &str) -> Option<TableId> {
        self.table_aliases.get(alias).copied()
    }

    pub fn table_aliases(&self) -> &LinkedHashMap<String, TableId> {
        &self.table_aliases
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.table_aliases.keys().map(|alias| alias.as_str())
    }

    pub fn joins(&self) -> &[JoinNode] {
        &self.joins
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

impl fmt::Display for LogicalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scans: Vec<String> = self
            .table_aliases
            .iter()
            .map(|(alias, id)| format!("{} (table {})", alias, id))
            .collect();
        write!(f, "Scans: {}", scans.join(", "))?;
        for join in &self.joins {
            write!(f, "\n  Join: {}", join)?;
        }
        Ok(())
    }
}
