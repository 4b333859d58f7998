// Join Reordering Support
//
// Shared machinery for the join order searches. A `JoinContext` resolves
// every join descriptor against the logical plan, catalog, statistics and
// filter selectivities once, up front, so that the searches only work with
// plain indices. It also owns the rule for appending one join to an
// existing left-deep plan, which greedy and dynamic programming share.

use std::collections::HashMap;

use log::trace;

use crate::catalog::Catalog;
use crate::common::types::{Cardinality, Cost, Selectivity};
use crate::query::planner::cost_model::CostModel;
use crate::query::planner::error::OptimizerError;
use crate::query::planner::join_node::JoinNode;
use crate::query::planner::logical::LogicalPlan;
use crate::query::planner::plan_cache::{CostCard, PlanStep};
use crate::stats::TableStats;

/// Which side of a join runs as the outer relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Left side outer, as written in the query
    AsWritten,
    /// Right side outer
    Swapped,
}

/// Scan cost and filtered cardinality of one base relation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanEstimate {
    pub cost: Cost,
    pub cardinality: Cardinality,
}

/// Cost, cardinality and primary-key flag of one join input
#[derive(Debug, Clone, Copy, PartialEq)]
struct SideEstimate {
    cost: Cost,
    cardinality: Cardinality,
    pkey: bool,
}

impl SideEstimate {
    const ABSENT: SideEstimate = SideEstimate {
        cost: 0.0,
        cardinality: 0,
        pkey: false,
    };
}

/// The cheaper of a join's two orientations
#[derive(Debug, Clone, Copy, PartialEq)]
struct OrientedJoin {
    orientation: Orientation,
    outer: SideEstimate,
    inner: SideEstimate,
    cost: Cost,
}

/// Base relation referenced by at least one join
#[derive(Debug, Clone)]
struct Relation {
    alias: String,
    scan: ScanEstimate,
}

#[derive(Debug, Clone)]
struct ResolvedJoin {
    node: JoinNode,
    swapped: JoinNode,
    left: usize,
    right: Option<usize>,
    left_pkey: bool,
    right_pkey: bool,
}

/// Join descriptors resolved against the inputs of one optimization
#[derive(Debug, Clone)]
pub struct JoinContext {
    joins: Vec<ResolvedJoin>,
    relations: Vec<Relation>,
    cost_model: CostModel,
}

impl JoinContext {
    /// Resolve every join of `plan`.
    ///
    /// Fails on the first alias the plan does not bind, and on any table
    /// whose statistics or selectivity are missing.
    pub fn new<S: TableStats>(
        plan: &LogicalPlan,
        catalog: &Catalog,
        stats: &HashMap<String, S>,
        selectivities: &HashMap<String, Selectivity>,
        cost_model: CostModel,
    ) -> Result<Self, OptimizerError> {
        for join in plan.joins() {
            for alias in std::iter::once(join.left_alias()).chain(join.right_alias()) {
                if plan.table_id(alias).is_none() {
                    return Err(OptimizerError::UnknownTable(alias.to_string()));
                }
            }
        }

        let mut resolver = Resolver {
            plan,
            catalog,
            stats,
            selectivities,
            relations: Vec::new(),
        };

        let mut joins = Vec::with_capacity(plan.joins().len());
        for join in plan.joins() {
            let left = resolver.relation(join.left_alias())?;
            let left_pkey = resolver.is_pkey(join.left_alias(), join.left_field())?;
            let (right, right_pkey) = match (join.right_alias(), join.right_field()) {
                (Some(alias), Some(field)) => {
                    (Some(resolver.relation(alias)?), resolver.is_pkey(alias, field)?)
                }
                _ => (None, false),
            };
            joins.push(ResolvedJoin {
                node: join.clone(),
                swapped: join.swap_inner_outer(),
                left,
                right,
                left_pkey,
                right_pkey,
            });
        }

        Ok(JoinContext {
            joins,
            relations: resolver.relations,
            cost_model,
        })
    }

    /// Number of joins to order
    pub fn len(&self) -> usize {
        self.joins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }

    /// The join at `index` in the requested orientation
    pub fn node(&self, index: usize, orientation: Orientation) -> &JoinNode {
        let join = &self.joins[index];
        match orientation {
            Orientation::AsWritten => &join.node,
            Orientation::Swapped => &join.swapped,
        }
    }

    /// Scan estimates of every relation the joins reference, in first-use order
    pub fn scans(&self) -> Vec<(String, ScanEstimate)> {
        self.relations
            .iter()
            .map(|rel| (rel.alias.clone(), rel.scan))
            .collect()
    }

    /// Cost `prefix` extended by the join at `index`.
    ///
    /// An empty prefix treats both sides as base-table scans. Otherwise
    /// exactly one side of the join must already be part of the prefix,
    /// which then stands in for that side; anything else would be a cross
    /// product and yields `None`.
    pub(crate) fn evaluate(&self, prefix: &CostCard, index: usize) -> Option<PlanStep> {
        let join = &self.joins[index];
        let left_scan = self.scan_side(Some(join.left), join.left_pkey);
        let right_scan = self.scan_side(join.right, join.right_pkey);

        let (left, right) = if prefix.is_empty() {
            (left_scan, right_scan)
        } else {
            let left_in_prefix = self.touches(&prefix.plan, join.left);
            let right_in_prefix = join
                .right
                .is_some_and(|rel| self.touches(&prefix.plan, rel));
            let subplan = SideEstimate {
                cost: prefix.cost,
                cardinality: prefix.cardinality,
                pkey: self.has_pkey(&prefix.plan),
            };
            match (left_in_prefix, right_in_prefix) {
                (true, false) => (subplan, right_scan),
                (false, true) => (left_scan, subplan),
                _ => {
                    trace!("rejecting {}: cross product with current plan", join.node);
                    return None;
                }
            }
        };

        let oriented = self.orient(join, left, right);
        let node = self.node(index, oriented.orientation);
        let cardinality = self.cost_model.estimate_join_cardinality(
            node,
            oriented.outer.cardinality,
            oriented.inner.cardinality,
            oriented.outer.pkey,
            oriented.inner.pkey,
        );
        trace!(
            "candidate {} after {} joins: cost = {}, card = {}",
            node,
            prefix.plan.len(),
            oriented.cost,
            cardinality
        );

        Some(PlanStep {
            join: index,
            orientation: oriented.orientation,
            cost: oriented.cost,
            cardinality,
        })
    }

    /// Pick the cheaper orientation; ties keep the query's order.
    /// Sub-query joins always keep the sub-query on the inner side.
    fn orient(&self, join: &ResolvedJoin, left: SideEstimate, right: SideEstimate) -> OrientedJoin {
        let as_written = OrientedJoin {
            orientation: Orientation::AsWritten,
            outer: left,
            inner: right,
            cost: self.cost_model.estimate_join_cost(
                &join.node,
                left.cardinality,
                right.cardinality,
                left.cost,
                right.cost,
            ),
        };
        if join.node.is_subquery() {
            return as_written;
        }

        let swapped_cost = self.cost_model.estimate_join_cost(
            &join.swapped,
            right.cardinality,
            left.cardinality,
            right.cost,
            left.cost,
        );
        if swapped_cost < as_written.cost {
            OrientedJoin {
                orientation: Orientation::Swapped,
                outer: right,
                inner: left,
                cost: swapped_cost,
            }
        } else {
            as_written
        }
    }

    fn scan_side(&self, relation: Option<usize>, pkey: bool) -> SideEstimate {
        match relation {
            Some(rel) => {
                let scan = self.relations[rel].scan;
                SideEstimate {
                    cost: scan.cost,
                    cardinality: scan.cardinality,
                    pkey,
                }
            }
            None => SideEstimate::ABSENT,
        }
    }

    /// True if any join of `plan` reads the relation
    fn touches(&self, plan: &[PlanStep], relation: usize) -> bool {
        plan.iter().any(|step| {
            let join = &self.joins[step.join];
            join.left == relation || join.right == Some(relation)
        })
    }

    /// True if any join of `plan` is on a primary-key field
    fn has_pkey(&self, plan: &[PlanStep]) -> bool {
        plan.iter().any(|step| {
            let join = &self.joins[step.join];
            join.left_pkey || join.right_pkey
        })
    }
}

/// Interns relations by alias while a context is being built
struct Resolver<'a, S> {
    plan: &'a LogicalPlan,
    catalog: &'a Catalog,
    stats: &'a HashMap<String, S>,
    selectivities: &'a HashMap<String, Selectivity>,
    relations: Vec<Relation>,
}

impl<'a, S: TableStats> Resolver<'a, S> {
    fn relation(&mut self, alias: &str) -> Result<usize, OptimizerError> {
        if let Some(pos) = self.relations.iter().position(|rel| rel.alias == alias) {
            return Ok(pos);
        }

        let table_name = self.table_name(alias)?;
        let table_stats = self
            .stats
            .get(table_name)
            .ok_or_else(|| OptimizerError::MissingStatistics(table_name.to_string()))?;
        let selectivity = *self
            .selectivities
            .get(alias)
            .ok_or_else(|| OptimizerError::MissingSelectivity(alias.to_string()))?;
        if !(0.0..=1.0).contains(&selectivity) {
            return Err(OptimizerError::InvalidSelectivity {
                alias: alias.to_string(),
                value: selectivity,
            });
        }

        self.relations.push(Relation {
            alias: alias.to_string(),
            scan: ScanEstimate {
                cost: table_stats.estimate_scan_cost(),
                cardinality: table_stats.estimate_table_cardinality(selectivity),
            },
        });
        Ok(self.relations.len() - 1)
    }

    fn table_name(&self, alias: &str) -> Result<&'a str, OptimizerError> {
        let table_id = self
            .plan
            .table_id(alias)
            .ok_or_else(|| OptimizerError::UnknownTable(alias.to_string()))?;
        self.catalog
            .table_name(table_id)
            .ok_or(OptimizerError::UnknownTableId(table_id))
    }

    fn is_pkey(&self, alias: &str, field: &str) -> Result<bool, OptimizerError> {
        let table_id = self
            .plan
            .table_id(alias)
            .ok_or_else(|| OptimizerError::UnknownTable(alias.to_string()))?;
        Ok(self.catalog.primary_key(table_id) == Some(field))
    }
}
