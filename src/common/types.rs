/// Catalog table identifier
pub type TableId = u32;

/// Estimated cost of a plan, in abstract I/O + CPU units
pub type Cost = f64;

/// Estimated number of tuples produced by a plan
pub type Cardinality = u64;

/// Fraction of a table's tuples surviving its filter predicates
pub type Selectivity = f64;

/// Selectivity used when a table has no filter at all
pub const FULL_SELECTIVITY: Selectivity = 1.0;
