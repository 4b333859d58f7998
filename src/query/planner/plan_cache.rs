// Plan Cache
//
// Memo table for the dynamic programming join search: for each subset of
// join descriptors it remembers the cheapest left-deep ordering found so
// far, together with that ordering's cost and output cardinality.

use std::collections::HashMap;

use crate::common::types::{Cardinality, Cost};
use crate::query::planner::join_reordering::Orientation;
use crate::query::planner::join_set::JoinSet;

/// One join appended to a left-deep plan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanStep {
    /// Position of the join in the optimizer's join list
    pub join: usize,
    /// Orientation the join runs in
    pub orientation: Orientation,
    /// Cumulative cost of the plan up to and including this join
    pub cost: Cost,
    /// Cardinality of the intermediate result after this join
    pub cardinality: Cardinality,
}

/// A left-deep partial plan with its estimated cost and cardinality
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CostCard {
    pub plan: Vec<PlanStep>,
    pub cost: Cost,
    pub cardinality: Cardinality,
}

impl CostCard {
    /// The plan with no joins in it
    pub fn empty() -> Self {
        CostCard::default()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.is_empty()
    }

    /// A new card whose plan is this one followed by `step`
    pub fn extended(&self, step: PlanStep) -> CostCard {
        let mut plan = Vec::with_capacity(self.plan.len() + 1);
        plan.extend_from_slice(&self.plan);
        plan.push(step);
        CostCard {
            plan,
            cost: step.cost,
            cardinality: step.cardinality,
        }
    }
}

/// Best known plan per join subset
#[derive(Debug, Default)]
pub struct PlanCache {
    best: HashMap<JoinSet, CostCard>,
}

impl PlanCache {
    pub fn new() -> Self {
        PlanCache::default()
    }

    /// Record `card` as the best plan for `set`, replacing any earlier entry
    pub fn add_plan(&mut self, set: JoinSet, card: CostCard) {
        self.best.insert(set, card);
    }

    pub fn get(&self, set: JoinSet) -> Option<&CostCard> {
        self.best.get(&set)
    }

    /// Best ordering for `set`, if one was found
    pub fn get_order(&self, set: JoinSet) -> Option<&[PlanStep]> {
        self.best.get(&set).map(|card| card.plan.as_slice())
    }

    pub fn get_cost(&self, set: JoinSet) -> Option<Cost> {
        self.best.get(&set).map(|card| card.cost)
    }

    pub fn get_cardinality(&self, set: JoinSet) -> Option<Cardinality> {
        self.best.get(&set).map(|card| card.cardinality)
    }

    pub fn contains(&self, set: JoinSet) -> bool {
        self.best.contains_key(&set)
    }

    pub fn remove(&mut self, set: JoinSet) -> Option<CostCard> {
        self.best.remove(&set)
    }

    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }
}
