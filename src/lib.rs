// Join Order Optimizer

pub mod catalog;
pub mod common;
pub mod query;
pub mod stats;
pub mod workload;

// Re-export key items for convenient access
pub use catalog::Catalog;
pub use query::planner::{
    JoinNode, JoinOp, JoinOptimizer, JoinPlan, LogicalPlan, OptimizerConfig, OptimizerError,
    SearchStrategy,
};
pub use stats::{SimpleTableStats, TableStats};
pub use workload::{PreparedWorkload, Workload, WorkloadError};
