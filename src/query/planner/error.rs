use thiserror::Error;

use crate::common::types::{Selectivity, TableId};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("Unknown table {0}")]
    UnknownTable(String),

    #[error("Table id {0} is not in the catalog")]
    UnknownTableId(TableId),

    #[error("No statistics for table {0}")]
    MissingStatistics(String),

    #[error("No filter selectivity for table {0}")]
    MissingSelectivity(String),

    #[error("Selectivity {value} for table {alias} is outside [0, 1]")]
    InvalidSelectivity { alias: String, value: Selectivity },

    #[error("No left-deep plan without cross products covers all {joins} joins")]
    NoFeasiblePlan { joins: usize },

    #[error("Joins cannot be connected to the plan without a cross product: {}", remaining.join(", "))]
    DisconnectedJoins { remaining: Vec<String> },

    #[error("Dynamic programming supports at most {max} joins, got {count}")]
    TooManyJoins { count: usize, max: usize },
}
