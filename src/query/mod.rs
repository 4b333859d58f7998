// Query Processing Module
//
// This module contains the query planning components used to order joins.

pub mod planner;

// Export key public interfaces
pub use planner::{JoinOptimizer, JoinPlan, LogicalPlan};
