// Join Descriptors
//
// A `JoinNode` is one join condition from the query: two column references
// and the comparison between them. The right side is absent when the join
// feeds from an opaque sub-query instead of a base table.

use std::fmt;

use serde::{Serialize, Deserialize};

/// Comparison operator of a join predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinOp {
    #[serde(rename = "=")]
    Equals,
    #[serde(rename = "<>", alias = "!=")]
    NotEquals,
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<=")]
    LessEquals,
    #[serde(rename = ">=")]
    GreaterEquals,
    #[serde(rename = "LIKE", alias = "like")]
    Like,
}

impl JoinOp {
    /// Operator to use once the two operands trade places
    pub fn mirrored(self) -> Self {
        match self {
            JoinOp::LessThan => JoinOp::GreaterThan,
            JoinOp::GreaterThan => JoinOp::LessThan,
            JoinOp::LessEquals => JoinOp::GreaterEquals,
            JoinOp::GreaterEquals => JoinOp::LessEquals,
            other => other,
        }
    }

    pub fn is_equality(self) -> bool {
        self == JoinOp::Equals
    }

    pub fn symbol(self) -> &'static str {
        match self {
            JoinOp::Equals => "=",
            JoinOp::NotEquals => "<>",
            JoinOp::LessThan => "<",
            JoinOp::GreaterThan => ">",
            JoinOp::LessEquals => "<=",
            JoinOp::GreaterEquals => ">=",
            JoinOp::Like => "LIKE",
        }
    }
}

impl fmt::Display for JoinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Right-hand input of a join
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JoinInput {
    /// A column of a base table referenced by alias
    Table { alias: String, field: String },
    /// The output of a nested sub-query
    Subquery,
}

/// Split `alias.field` into its two parts
pub fn split_qualified(name: &str) -> Option<(&str, &str)> {
    match name.split_once('.') {
        Some((alias, field)) if !alias.is_empty() && !field.is_empty() => Some((alias, field)),
        _ => None,
    }
}

/// One join condition between two relations.
///
/// Equality and hashing cover the aliases, field names and operator, so a
/// swapped node is a different value from the node it came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinNode {
    left_alias: String,
    left_field: String,
    op: JoinOp,
    right: JoinInput,
}

impl JoinNode {
    /// Join between two base-table columns
    pub fn new(
        left_alias: impl Into<String>,
        left_field: impl Into<String>,
        op: JoinOp,
        right_alias: impl Into<String>,
        right_field: impl Into<String>,
    ) -> Self {
        JoinNode {
            left_alias: left_alias.into(),
            left_field: left_field.into(),
            op,
            right: JoinInput::Table {
                alias: right_alias.into(),
                field: right_field.into(),
            },
        }
    }

    /// Join between a base-table column and the output of a sub-query
    pub fn subquery(left_alias: impl Into<String>, left_field: impl Into<String>, op: JoinOp) -> Self {
        JoinNode {
            left_alias: left_alias.into(),
            left_field: left_field.into(),
            op,
            right: JoinInput::Subquery,
        }
    }

    /// Build an equi-join from two qualified names such as `a.id` and `b.a_id`
    pub fn equi(left: &str, right: &str) -> Option<Self> {
        let (left_alias, left_field) = split_qualified(left)?;
        let (right_alias, right_field) = split_qualified(right)?;
        Some(JoinNode::new(left_alias, left_field, JoinOp::Equals, right_alias, right_field))
    }

    pub fn left_alias(&self) -> &str {
        &self.left_alias
    }

    pub fn left_field(&self) -> &str {
        &self.left_field
    }

    /// Alias of the right table, `None` for a sub-query join
    pub fn right_alias(&self) -> Option<&str> {
        match &self.right {
            JoinInput::Table { alias, .. } => Some(alias),
            JoinInput::Subquery => None,
        }
    }

    pub fn right_field(&self) -> Option<&str> {
        match &self.right {
            JoinInput::Table { field, .. } => Some(field),
            JoinInput::Subquery => None,
        }
    }

    pub fn right(&self) -> &JoinInput {
        &self.right
    }

    pub fn op(&self) -> JoinOp {
        self.op
    }

    pub fn is_subquery(&self) -> bool {
        matches!(self.right, JoinInput::Subquery)
    }

    pub fn left_qualified_name(&self) -> String {
        format!("{}.{}", self.left_alias, self.left_field)
    }

    pub fn right_qualified_name(&self) -> Option<String> {
        match &self.right {
            JoinInput::Table { alias, field } => Some(format!("{}.{}", alias, field)),
            JoinInput::Subquery => None,
        }
    }

    /// True if either side of the join reads the given alias
    pub fn references(&self, alias: &str) -> bool {
        self.left_alias == alias || self.right_alias() == Some(alias)
    }

    /// The same condition with inner and outer exchanged.
    ///
    /// A sub-query join has no right table to move, so it is returned as is.
    pub fn swap_inner_outer(&self) -> JoinNode {
        match &self.right {
            JoinInput::Table { alias, field } => JoinNode {
                left_alias: alias.clone(),
                left_field: field.clone(),
                op: self.op.mirrored(),
                right: JoinInput::Table {
                    alias: self.left_alias.clone(),
                    field: self.left_field.clone(),
                },
            },
            JoinInput::Subquery => self.clone(),
        }
    }
}

impl fmt::Display for JoinNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.right {
            JoinInput::Table { alias, field } => write!(
                f,
                "{}.{} {} {}.{}",
                self.left_alias, self.left_field, self.op, alias, field
            ),
            JoinInput::Subquery => write!(
                f,
                "{}.{} {} (subquery)",
                self.left_alias, self.left_field, self.op
            ),
        }
    }
}
