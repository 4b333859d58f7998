// Join Plan Explanation
//
// Renders a `JoinPlan` as a tree. Every join node shows its cumulative cost
// and cardinality; leaves show the base relation's scan estimate. When a
// join touches a table already joined earlier, the earlier join's subtree
// becomes its child, so the root is always the final join.

use std::collections::HashMap;

use crate::query::planner::optimizer::JoinPlan;

enum ExplainNode {
    Join { label: String, children: Vec<usize> },
    Leaf { label: String },
}

impl ExplainNode {
    fn label(&self) -> &str {
        match self {
            ExplainNode::Join { label, .. } | ExplainNode::Leaf { label } => label,
        }
    }

    fn children(&self) -> &[usize] {
        match self {
            ExplainNode::Join { children, .. } => children,
            ExplainNode::Leaf { .. } => &[],
        }
    }
}

/// Render the plan as an indented tree
pub fn explain(plan: &JoinPlan) -> String {
    let mut nodes: Vec<ExplainNode> = Vec::new();
    // alias -> root of the subtree that currently contains it
    let mut subtrees: HashMap<&str, usize> = HashMap::new();
    let mut top = None;

    for step in plan.steps() {
        let join = &step.join;
        let mut connected = false;

        let left = match subtrees.get(join.left_alias()) {
            Some(&node) => {
                connected = true;
                node
            }
            None => push_leaf(&mut nodes, scan_label(plan, join.left_alias())),
        };
        let right = match join.right_alias() {
            None => push_leaf(&mut nodes, "Subplan".to_string()),
            Some(alias) => match subtrees.get(alias) {
                Some(&node) if node != left => {
                    connected = true;
                    node
                }
                _ => push_leaf(&mut nodes, scan_label(plan, alias)),
            },
        };

        let root = nodes.len();
        nodes.push(ExplainNode::Join {
            label: format!(
                "Join {} (cost = {}, card = {})",
                join, step.cost, step.cardinality
            ),
            children: vec![left, right],
        });

        subtrees.insert(join.left_alias(), root);
        if let Some(alias) = join.right_alias() {
            subtrees.insert(alias, root);
        }
        if connected {
            for node in subtrees.values_mut() {
                *node = root;
            }
        }
        top = Some(root);
    }

    let Some(top) = top else {
        return "(no joins)".to_string();
    };
    let mut lines = vec![nodes[top].label().to_string()];
    render_children(&nodes, top, "", &mut lines);
    lines.join("\n")
}

fn push_leaf(nodes: &mut Vec<ExplainNode>, label: String) -> usize {
    nodes.push(ExplainNode::Leaf { label });
    nodes.len() - 1
}

fn scan_label(plan: &JoinPlan, alias: &str) -> String {
    match plan.scan(alias) {
        Some(scan) => format!("{} (cost = {}, card = {})", alias, scan.cost, scan.cardinality),
        None => alias.to_string(),
    }
}

fn render_children(nodes: &[ExplainNode], node: usize, prefix: &str, lines: &mut Vec<String>) {
    let children = nodes[node].children();
    for (i, &child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let branch = if last { "└── " } else { "├── " };
        lines.push(format!("{}{}{}", prefix, branch, nodes[child].label()));
        let indent = if last { "    " } else { "│   " };
        render_children(nodes, child, &format!("{}{}", prefix, indent), lines);
    }
}
