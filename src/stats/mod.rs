//! Statistics aggregation and the rendered report
//!
//! `ModelStatistics` reduces layer records to totals; `SummaryReport`
//! renders them. `units` holds the megabyte and readable-count
//! conversions both rely on.

mod model_statistics;
mod report;
pub mod units;

pub use model_statistics::{ModelStatistics, PrecisionTotals};
pub use report::{SizeEstimate, SummaryReport};
