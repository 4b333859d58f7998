// Greedy Join Ordering
//
// Builds a single left-deep plan one join at a time, always appending the
// join that is cheapest to add to the plan built so far. Quadratic in the
// number of joins, so it stays usable where the subset search does not.

use log::{debug, warn};

use crate::query::planner::error::OptimizerError;
use crate::query::planner::join_reordering::{JoinContext, Orientation};
use crate::query::planner::plan_cache::{CostCard, PlanStep};

pub struct GreedySearch<'a> {
    context: &'a JoinContext,
}

impl<'a> GreedySearch<'a> {
    pub fn new(context: &'a JoinContext) -> Self {
        GreedySearch { context }
    }

    /// Order every join of the context.
    ///
    /// Fails with `DisconnectedJoins` when some joins can never be appended
    /// without a cross product; the plan is never silently truncated.
    pub fn search(&self) -> Result<CostCard, OptimizerError> {
        let mut plan = CostCard::empty();
        let mut remaining: Vec<usize> = (0..self.context.len()).collect();

        while !remaining.is_empty() {
            let mut cheapest: Option<(usize, PlanStep)> = None;
            for (pos, &index) in remaining.iter().enumerate() {
                let Some(step) = self.context.evaluate(&plan, index) else {
                    continue;
                };
                if cheapest.is_none_or(|(_, best)| step.cost < best.cost) {
                    cheapest = Some((pos, step));
                }
            }

            let Some((pos, step)) = cheapest else {
                let unreachable: Vec<String> = remaining
                    .iter()
                    .map(|&index| self.context.node(index, Orientation::AsWritten).to_string())
                    .collect();
                warn!(
                    "greedy join search stuck after {} joins; {} joins unreachable",
                    plan.plan.len(),
                    unreachable.len()
                );
                return Err(OptimizerError::DisconnectedJoins { remaining: unreachable });
            };

            remaining.remove(pos);
            debug!(
                "greedy round {}: appending {} (cost = {}, card = {})",
                plan.plan.len() + 1,
                self.context.node(step.join, step.orientation),
                step.cost,
                step.cardinality
            );
            plan = plan.extended(step);
        }

        Ok(plan)
    }
}
