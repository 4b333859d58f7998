// Dynamic Programming Join Ordering
//
// Computes the best left-deep plan for every subset of joins, smallest
// subsets first. A plan for a subset of size k is always the cached best
// plan for one of its (k - 1)-subsets plus one more join, so each size only
// needs the sizes before it.

use log::{debug, warn};

use crate::common::types::Cost;
use crate::query::planner::error::OptimizerError;
use crate::query::planner::join_reordering::JoinContext;
use crate::query::planner::join_set::{JoinSet, MAX_JOINS};
use crate::query::planner::plan_cache::{CostCard, PlanCache};

pub struct DynamicProgrammingSearch<'a> {
    context: &'a JoinContext,
}

impl<'a> DynamicProgrammingSearch<'a> {
    pub fn new(context: &'a JoinContext) -> Self {
        DynamicProgrammingSearch { context }
    }

    /// Best plan covering every join of the context
    pub fn search(&self) -> Result<CostCard, OptimizerError> {
        let joins = self.context.len();
        if joins == 0 {
            return Ok(CostCard::empty());
        }

        let mut cache = self.build_cache()?;
        cache.remove(JoinSet::full(joins)).ok_or_else(|| {
            warn!("no cross-product-free left-deep plan covers all {} joins", joins);
            OptimizerError::NoFeasiblePlan { joins }
        })
    }

    /// Fill a plan cache with the best plan found for every join subset
    /// that can be built without a cross product.
    pub fn build_cache(&self) -> Result<PlanCache, OptimizerError> {
        let joins = self.context.len();
        if joins > MAX_JOINS {
            return Err(OptimizerError::TooManyJoins {
                count: joins,
                max: MAX_JOINS,
            });
        }

        let empty = CostCard::empty();
        let mut cache = PlanCache::new();

        for size in 1..=joins {
            for set in JoinSet::combinations(joins, size) {
                let mut best_cost = Cost::INFINITY;
                for index in set.iter() {
                    let rest = set.without(index);
                    let prefix = if rest.is_empty() {
                        &empty
                    } else {
                        match cache.get(rest) {
                            Some(card) => card,
                            // only reachable through a cross product
                            None => continue,
                        }
                    };

                    let Some(step) = self.context.evaluate(prefix, index) else {
                        continue;
                    };
                    if step.cost >= best_cost {
                        continue;
                    }
                    best_cost = step.cost;
                    let candidate = prefix.extended(step);
                    cache.add_plan(set, candidate);
                }
            }
            debug!(
                "join subsets of size {} done, {} plans cached",
                size,
                cache.len()
            );
        }

        Ok(cache)
    }
}
