// Table Statistics Module
//
// The optimizer never collects statistics itself; it reads them through the
// `TableStats` trait, keyed by base table name.

pub mod table_stats;

pub use self::table_stats::{SimpleTableStats, TableStats, DEFAULT_IO_COST_PER_PAGE};
