// Join Order Optimizer
//
// Entry point of the join ordering engine. Chooses between the exhaustive
// dynamic programming search and the greedy search based on how many joins
// the query has, and turns the winning partial plan into an ordered list of
// join steps for plan instantiation.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::catalog::Catalog;
use crate::common::types::{Cardinality, Cost, Selectivity};
use crate::query::planner::cost_model::CostModel;
use crate::query::planner::dynamic::DynamicProgrammingSearch;
use crate::query::planner::error::OptimizerError;
use crate::query::planner::greedy::GreedySearch;
use crate::query::planner::join_node::JoinNode;
use crate::query::planner::join_reordering::{JoinContext, ScanEstimate};
use crate::query::planner::logical::LogicalPlan;
use crate::query::planner::plan_cache::CostCard;
use crate::stats::TableStats;

/// Above this many joins the greedy search is used instead of DP
pub const DEFAULT_GREEDY_THRESHOLD: usize = 10;

/// Which search algorithm orders the joins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Dynamic programming up to the greedy threshold, greedy beyond it
    #[default]
    Auto,
    Greedy,
    #[serde(alias = "dp")]
    DynamicProgramming,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Auto => write!(f, "auto"),
            SearchStrategy::Greedy => write!(f, "greedy"),
            SearchStrategy::DynamicProgramming => write!(f, "dynamic programming"),
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(SearchStrategy::Auto),
            "greedy" => Ok(SearchStrategy::Greedy),
            "dp" | "dynamic" | "dynamic_programming" => Ok(SearchStrategy::DynamicProgramming),
            other => Err(format!("Unknown search strategy '{}'", other)),
        }
    }
}

/// Configuration options for the join optimizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Search algorithm, `Auto` picks by join count
    pub strategy: SearchStrategy,
    /// Largest join count still handled by dynamic programming under `Auto`
    pub greedy_threshold: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        OptimizerConfig {
            strategy: SearchStrategy::Auto,
            greedy_threshold: DEFAULT_GREEDY_THRESHOLD,
        }
    }
}

impl OptimizerConfig {
    /// Concrete algorithm for a query with `joins` joins
    pub fn resolve_strategy(&self, joins: usize) -> SearchStrategy {
        match self.strategy {
            SearchStrategy::Auto if joins > self.greedy_threshold => SearchStrategy::Greedy,
            SearchStrategy::Auto => SearchStrategy::DynamicProgramming,
            explicit => explicit,
        }
    }
}

/// One join of the final plan
#[derive(Debug, Clone, PartialEq)]
pub struct JoinStep {
    /// The join, oriented so that its left side is the outer relation
    pub join: JoinNode,
    /// Cumulative cost of the plan up to and including this join
    pub cost: Cost,
    /// Cardinality of the intermediate result after this join
    pub cardinality: Cardinality,
}

/// Left-deep join order produced by the optimizer
#[derive(Debug, Clone, PartialEq)]
pub struct JoinPlan {
    steps: Vec<JoinStep>,
    strategy: SearchStrategy,
    scans: Vec<(String, ScanEstimate)>,
}

impl JoinPlan {
    fn from_card(card: &CostCard, context: &JoinContext, strategy: SearchStrategy) -> Self {
        let steps = card
            .plan
            .iter()
            .map(|step| JoinStep {
                join: context.node(step.join, step.orientation).clone(),
                cost: step.cost,
                cardinality: step.cardinality,
            })
            .collect();
        JoinPlan {
            steps,
            strategy,
            scans: context.scans(),
        }
    }

    pub fn steps(&self) -> &[JoinStep] {
        &self.steps
    }

    /// Joins in execution order
    pub fn joins(&self) -> impl Iterator<Item = &JoinNode> {
        self.steps.iter().map(|step| &step.join)
    }

    /// The algorithm that produced this plan
    pub fn strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Total estimated cost; zero for a plan without joins
    pub fn cost(&self) -> Cost {
        self.steps.last().map_or(0.0, |step| step.cost)
    }

    /// Estimated output cardinality of the last join
    pub fn cardinality(&self) -> Option<Cardinality> {
        self.steps.last().map(|step| step.cardinality)
    }

    /// Scan estimate of a relation referenced by the plan
    pub fn scan(&self, alias: &str) -> Option<ScanEstimate> {
        self.scans
            .iter()
            .find(|(name, _)| name == alias)
            .map(|(_, scan)| *scan)
    }

    pub fn scans(&self) -> &[(String, ScanEstimate)] {
        &self.scans
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for JoinPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Join order ({}):", self.strategy)?;
        for (i, step) in self.steps.iter().enumerate() {
            write!(
                f,
                "\n  {}. {} (cost = {}, card = {})",
                i + 1,
                step.join,
                step.cost,
                step.cardinality
            )?;
        }
        write!(f, "\nTotal cost: {}", self.cost())
    }
}

/// Orders the joins of one logical plan
pub struct JoinOptimizer<'a> {
    plan: &'a LogicalPlan,
    catalog: &'a Catalog,
    config: OptimizerConfig,
    cost_model: CostModel,
}

impl<'a> JoinOptimizer<'a> {
    pub fn new(plan: &'a LogicalPlan, catalog: &'a Catalog) -> Self {
        JoinOptimizer {
            plan,
            catalog,
            config: OptimizerConfig::default(),
            cost_model: CostModel::new(),
        }
    }

    pub fn with_config(mut self, config: OptimizerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Compute a left-deep join order for the plan's joins.
    ///
    /// `stats` is keyed by base table name, `selectivities` by alias.
    pub fn order_joins<S: TableStats>(
        &self,
        stats: &HashMap<String, S>,
        selectivities: &HashMap<String, Selectivity>,
    ) -> Result<JoinPlan, OptimizerError> {
        let strategy = self.config.resolve_strategy(self.plan.joins().len());
        info!(
            "ordering {} joins with {} search",
            self.plan.joins().len(),
            strategy
        );
        self.run(strategy, stats, selectivities)
    }

    /// Order the joins with the greedy search regardless of configuration
    pub fn order_greedy_joins<S: TableStats>(
        &self,
        stats: &HashMap<String, S>,
        selectivities: &HashMap<String, Selectivity>,
    ) -> Result<JoinPlan, OptimizerError> {
        self.run(SearchStrategy::Greedy, stats, selectivities)
    }

    /// Order the joins with the dynamic programming search regardless of
    /// configuration
    pub fn order_dynamic_programming_joins<S: TableStats>(
        &self,
        stats: &HashMap<String, S>,
        selectivities: &HashMap<String, Selectivity>,
    ) -> Result<JoinPlan, OptimizerError> {
        self.run(SearchStrategy::DynamicProgramming, stats, selectivities)
    }

    fn run<S: TableStats>(
        &self,
        strategy: SearchStrategy,
        stats: &HashMap<String, S>,
        selectivities: &HashMap<String, Selectivity>,
    ) -> Result<JoinPlan, OptimizerError> {
        let context = JoinContext::new(
            self.plan,
            self.catalog,
            stats,
            selectivities,
            self.cost_model,
        )?;

        let card = match strategy {
            SearchStrategy::Greedy => GreedySearch::new(&context).search()?,
            SearchStrategy::DynamicProgramming | SearchStrategy::Auto => {
                DynamicProgrammingSearch::new(&context).search()?
            }
        };
        debug!(
            "chose {} joins, cost = {}, card = {}",
            card.plan.len(),
            card.cost,
            card.cardinality
        );

        Ok(JoinPlan::from_card(&card, &context, strategy))
    }
}
