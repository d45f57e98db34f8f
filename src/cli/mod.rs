//! CLI Module
//!
//! Command-line interface for rendering model summaries from JSON.

pub mod commands;

use crate::formatting::{Column, RowSetting};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Bitsummary - layer-by-layer summaries of mixed precision models
#[derive(Parser, Debug)]
#[command(name = "bitsummary")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Do not print the report
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a JSON array of layer records
    #[command(name = "render")]
    Render {
        /// Path to the layer records
        records: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Summarize a JSON module tree
    #[command(name = "tree")]
    Tree {
        /// Path to the module tree
        tree: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },
}

/// Output encoding of a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Options shared by every summary command
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Input shape, e.g. `1,3,32,32`. Enables mult-adds and size estimates.
    #[arg(short, long, value_delimiter = ',')]
    pub input_size: Vec<usize>,

    /// Input element count (defaults to the product of --input-size)
    #[arg(long)]
    pub total_input: Option<u64>,

    /// Formatting options as JSON
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Columns to show, e.g. `output_size,num_params,mult_adds`
    #[arg(long, value_delimiter = ',')]
    pub columns: Vec<Column>,

    /// Extra layer-name details: `depth`, `var_names`
    #[arg(long, value_delimiter = ',')]
    pub row_settings: Vec<RowSetting>,

    #[arg(long)]
    pub col_width: Option<usize>,

    #[arg(short = 'd', long)]
    pub max_depth: Option<usize>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// List parameter shapes under each layer
    #[arg(long)]
    pub verbose_table: bool,
}
