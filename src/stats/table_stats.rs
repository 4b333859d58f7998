// Table Statistics
//
// Per-table scan cost and filtered cardinality estimates.

use serde::{Serialize, Deserialize};

use crate::common::types::{Cardinality, Cost, Selectivity};

/// Cost of reading one page during a sequential scan
pub const DEFAULT_IO_COST_PER_PAGE: Cost = 1.0;

/// Statistics the join optimizer needs for one base table
pub trait TableStats {
    /// Estimated cost of one full sequential scan of the table
    fn estimate_scan_cost(&self) -> Cost;

    /// Estimated number of tuples left after applying a filter with the
    /// given selectivity
    fn estimate_table_cardinality(&self, selectivity: Selectivity) -> Cardinality;
}

impl<T: TableStats + ?Sized> TableStats for &T {
    fn estimate_scan_cost(&self) -> Cost {
        (**self).estimate_scan_cost()
    }

    fn estimate_table_cardinality(&self, selectivity: Selectivity) -> Cardinality {
        (**self).estimate_table_cardinality(selectivity)
    }
}

impl<T: TableStats + ?Sized> TableStats for Box<T> {
    fn estimate_scan_cost(&self) -> Cost {
        (**self).estimate_scan_cost()
    }

    fn estimate_table_cardinality(&self, selectivity: Selectivity) -> Cardinality {
        (**self).estimate_table_cardinality(selectivity)
    }
}

fn default_io_cost_per_page() -> Cost {
    DEFAULT_IO_COST_PER_PAGE
}

/// Page-count based statistics: a scan reads every page once
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleTableStats {
    /// Number of tuples in the table
    pub tuples: Cardinality,
    /// Number of pages the table occupies
    pub pages: u64,
    /// Cost of reading a single page
    #[serde(default = "default_io_cost_per_page")]
    pub io_cost_per_page: Cost,
}

impl SimpleTableStats {
    pub fn new(tuples: Cardinality, pages: u64) -> Self {
        SimpleTableStats {
            tuples,
            pages,
            io_cost_per_page: DEFAULT_IO_COST_PER_PAGE,
        }
    }

    pub fn with_io_cost(mut self, io_cost_per_page: Cost) -> Self {
        self.io_cost_per_page = io_cost_per_page;
        self
    }
}

impl TableStats for SimpleTableStats {
    fn estimate_scan_cost(&self) -> Cost {
        self.pages as Cost * self.io_cost_per_page
    }

    fn estimate_table_cardinality(&self, selectivity: Selectivity) -> Cardinality {
        (self.tuples as f64 * selectivity).floor() as Cardinality
    }
}
