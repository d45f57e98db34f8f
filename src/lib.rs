//! Bitsummary - model summaries for mixed precision networks
//!
//! Turns an ordered sequence of per-layer records into a text table with
//! parameter counts, output shapes and mult-adds, followed by totals and
//! memory estimates. Full precision and quantized (1-bit) layers are
//! tracked separately.
//!
//! # Pipeline
//!
//! - Records come from an external producer, or from a serialized
//!   `ModuleNode` tree via `flatten_modules`
//! - `ModelStatistics` aggregates them in one pass
//! - `SummaryReport` renders the table and totals

pub mod cli;
pub mod error;
pub mod formatting;
pub mod layer;
pub mod stats;

pub use error::{Result, SummaryError};
pub use formatting::{Column, FormattingOptions, RowSetting, Verbosity, HEADER_TITLES};
pub use layer::{flatten_modules, load_records, LayerRecord, ModuleNode, VisitedModules};
pub use stats::{ModelStatistics, PrecisionTotals, SizeEstimate, SummaryReport};
