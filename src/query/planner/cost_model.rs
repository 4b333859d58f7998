// Cost Model for Join Ordering
//
// This module estimates the cost and output cardinality of a single join
// between two sub-relations. Both estimates are pure arithmetic over the
// inputs' statistics.

use crate::common::types::{Cardinality, Cost};
use crate::query::planner::join_node::{JoinNode, JoinOp};

/// Fraction of the cross product assumed to survive a non-equality predicate
pub const INEQUALITY_SELECTIVITY: f64 = 0.3;

/// Nested-loop cost model for left-deep join plans
#[derive(Debug, Clone, Copy, Default)]
pub struct CostModel;

impl CostModel {
    /// Create a new cost model
    pub fn new() -> Self {
        CostModel
    }

    /// Estimate the cost of joining an outer relation (`card1`, `cost1`)
    /// with an inner relation (`card2`, `cost2`).
    ///
    /// The outer side is scanned once, the inner side once per outer tuple,
    /// and every pair of tuples pays one unit for the predicate.
    pub fn estimate_join_cost(
        &self,
        join: &JoinNode,
        card1: Cardinality,
        card2: Cardinality,
        cost1: Cost,
        cost2: Cost,
    ) -> Cost {
        let card1 = card1 as f64;
        if join.is_subquery() {
            card1 + cost1 + cost2
        } else {
            cost1 + card1 * cost2 + card1 * card2 as f64
        }
    }

    /// Estimate the number of tuples produced by the join
    pub fn estimate_join_cardinality(
        &self,
        join: &JoinNode,
        card1: Cardinality,
        card2: Cardinality,
        left_pkey: bool,
        right_pkey: bool,
    ) -> Cardinality {
        if join.is_subquery() {
            card1
        } else {
            Self::estimate_table_join_cardinality(join.op(), card1, card2, left_pkey, right_pkey)
        }
    }

    /// Cardinality of a join between two base-table columns.
    ///
    /// A primary key on one side caps the output at the other side's size.
    pub fn estimate_table_join_cardinality(
        op: JoinOp,
        card1: Cardinality,
        card2: Cardinality,
        left_pkey: bool,
        right_pkey: bool,
    ) -> Cardinality {
        if op.is_equality() {
            if left_pkey {
                card2
            } else if right_pkey {
                card1
            } else {
                card1.max(card2)
            }
        } else {
            (INEQUALITY_SELECTIVITY * card1 as f64 * card2 as f64).floor() as Cardinality
        }
    }
}
