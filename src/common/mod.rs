// Common Types
//
// Shared aliases used across the catalog, statistics and planner modules.

pub mod types;

pub use self::types::{Cardinality, Cost, Selectivity, TableId, FULL_SELECTIVITY};
