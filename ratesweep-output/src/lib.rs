//! Human-readable output for a sweep: a box-drawn table of every run so
//! far, plus the raw httperf output of runs that saw failures.

pub mod report;
pub mod table;

pub use report::Report;
pub use table::TableFormatter;
