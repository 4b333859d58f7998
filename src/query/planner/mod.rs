// Join Order Planner Module
//
// This module decides the order in which a query's joins run. It includes
// the cost model, the join descriptors, the plan cache and the two search
// algorithms that share them.

pub mod cost_model;
pub mod dynamic;
pub mod error;
pub mod explain;
pub mod greedy;
pub mod join_node;
pub mod join_reordering;
pub mod join_set;
pub mod logical;
pub mod optimizer;
pub mod plan_cache;

// Export key types
pub use self::cost_model::CostModel;
pub use self::error::OptimizerError;
pub use self::explain::explain;
pub use self::join_node::{JoinInput, JoinNode, JoinOp};
pub use self::join_reordering::{JoinContext, Orientation, ScanEstimate};
pub use self::join_set::JoinSet;
pub use self::logical::LogicalPlan;
pub use self::optimizer::{JoinOptimizer, JoinPlan, JoinStep, OptimizerConfig, SearchStrategy};
pub use self::plan_cache::{CostCard, PlanCache, PlanStep};
