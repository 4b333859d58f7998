#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::Rng;
use tempfile::NamedTempFile;

use joinorder::catalog::{Column, Table};
use joinorder::query::planner::JoinPlan;
use joinorder::{
    Catalog, JoinNode, JoinOp, JoinOptimizer, LogicalPlan, OptimizerConfig, OptimizerError,
    SearchStrategy, SimpleTableStats,
};

// Everything one optimizer run reads
pub struct Fixture {
    pub catalog: Catalog,
    pub plan: LogicalPlan,
    pub stats: HashMap<String, SimpleTableStats>,
    pub selectivities: HashMap<String, f64>,
}

impl Fixture {
    pub fn optimizer(&self, config: OptimizerConfig) -> JoinOptimizer<'_> {
        JoinOptimizer::new(&self.plan, &self.catalog).with_config(config)
    }

    pub fn order(&self, strategy: SearchStrategy) -> Result<JoinPlan, OptimizerError> {
        let config = OptimizerConfig {
            strategy,
            ..OptimizerConfig::default()
        };
        self.optimizer(config)
            .order_joins(&self.stats, &self.selectivities)
    }
}

// Build a fixture from (name, primary key, rows) triples; every table is
// scanned under its own name, one page per row, selectivity 1.0
pub fn build_fixture(tables: &[(&str, Option<&str>, u64)], joins: Vec<JoinNode>) -> Fixture {
    let mut catalog = Catalog::new();
    let mut plan = LogicalPlan::new();
    let mut stats = HashMap::new();
    let mut selectivities = HashMap::new();

    for &(name, pk, rows) in tables {
        let columns = pk.map(|pk| vec![Column::new(pk, true)]).unwrap_or_default();
        let id = catalog.create_table(Table::new(name, columns)).unwrap();
        plan.add_scan(id, name);
        stats.insert(name.to_string(), SimpleTableStats::new(rows, rows));
        selectivities.insert(name.to_string(), 1.0);
    }
    for join in joins {
        plan.add_join(join);
    }

    Fixture {
        catalog,
        plan,
        stats,
        selectivities,
    }
}

// a(100, pk id), b(10, pk bid), c(50, pk cid) joined a-b-c
pub fn abc_fixture() -> Fixture {
    build_fixture(
        &[("a", Some("id"), 100), ("b", Some("bid"), 10), ("c", Some("cid"), 50)],
        vec![
            JoinNode::new("a", "id", JoinOp::Equals, "b", "a_id"),
            JoinNode::new("b", "id", JoinOp::Equals, "c", "b_id"),
        ],
    )
}

// a(10) - b(100) - c(1000) with no primary keys
pub fn chain_fixture() -> Fixture {
    build_fixture(
        &[("a", None, 10), ("b", None, 100), ("c", None, 1000)],
        vec![
            JoinNode::new("a", "x", JoinOp::Equals, "b", "x"),
            JoinNode::new("b", "y", JoinOp::Equals, "c", "y"),
        ],
    )
}

// `tables` tables joined as a random tree: table i joins some table before it
pub fn random_tree_fixture(rng: &mut StdRng, tables: usize) -> Fixture {
    let names: Vec<String> = (0..tables).map(|i| format!("t{}", i)).collect();
    let specs: Vec<(&str, Option<&str>, u64)> = names
        .iter()
        .map(|name| {
            let pk = if rng.gen_bool(0.5) { Some("id") } else { None };
            (name.as_str(), pk, rng.gen_range(1..=1000))
        })
        .collect();

    let ops = [JoinOp::Equals, JoinOp::Equals, JoinOp::LessThan, JoinOp::NotEquals];
    let joins = (1..tables)
        .map(|i| {
            let parent = rng.gen_range(0..i);
            let op = ops[rng.gen_range(0..ops.len())];
            JoinNode::new(names[parent].as_str(), "id", op, names[i].as_str(), "parent_id")
        })
        .collect();

    build_fixture(&specs, joins)
}

// Write a workload JSON document to a temporary file
pub fn write_workload(json: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(json.as_bytes())?;
    file.flush()?;
    Ok(file)
}

pub const ABC_WORKLOAD: &str = r#"{
    "query": "SELECT * FROM a, b, c WHERE a.id = b.a_id AND b.id = c.b_id",
    "tables": [
        { "name": "a", "primary_key": "id", "tuples": 100, "pages": 100 },
        { "name": "b", "primary_key": "bid", "tuples": 10, "pages": 10 },
        { "name": "c", "primary_key": "cid", "tuples": 50, "pages": 50 }
    ],
    "joins": [
        { "left": "a.id", "op": "=", "right": "b.a_id" },
        { "left": "b.id", "op": "=", "right": "c.b_id" }
    ]
}"#;
