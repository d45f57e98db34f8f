//! Table layout for model summaries
//!
//! `FormattingOptions` decides which columns are shown, how wide they are
//! and how each layer row is drawn. The layer-name column is sized from the
//! records before anything is rendered, so every divider matches the rows.

use crate::error::{Result, SummaryError};
use crate::layer::{shape_to_str, LayerRecord};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Column header text keyed by statistic name
pub const HEADER_TITLES: [(&str, &str); 5] = [
    ("kernel_size", "Kernel Shape"),
    ("input_size", "Input Shape"),
    ("output_size", "Output Shape"),
    ("num_params", "Param #"),
    ("mult_adds", "Mult-Adds"),
];

/// Layer-name widths are rounded up to a multiple of this
const NAME_ALIGN: usize = 5;

/// Per-depth indentation of the tree prefix
const TREE_INDENT: &str = "│    ";
const TREE_BRANCH: &str = "└─";

/// Look up the header text for a statistic name
pub fn header_title(key: &str) -> Option<&'static str> {
    HEADER_TITLES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, title)| *title)
}

/// A statistic column of the summary table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    KernelSize,
    InputSize,
    OutputSize,
    NumParams,
    MultAdds,
}

impl Column {
    /// Stable key used in configuration and `HEADER_TITLES`
    pub fn key(&self) -> &'static str {
        match self {
            Column::KernelSize => "kernel_size",
            Column::InputSize => "input_size",
            Column::OutputSize => "output_size",
            Column::NumParams => "num_params",
            Column::MultAdds => "mult_adds",
        }
    }

    pub fn title(&self) -> &'static str {
        header_title(self.key()).unwrap_or_default()
    }

    /// Cell text for one record
    fn value(&self, record: &LayerRecord, reached_max_depth: bool) -> String {
        match self {
            Column::KernelSize => {
                if record.kernel_size.is_empty() {
                    "--".to_string()
                } else {
                    shape_to_str(&record.kernel_size)
                }
            }
            Column::InputSize => shape_to_str(&record.input_size),
            Column::OutputSize => shape_to_str(&record.output_size),
            Column::NumParams => record.num_params_to_str(reached_max_depth),
            Column::MultAdds => record.macs_to_str(reached_max_depth),
        }
    }
}

impl FromStr for Column {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "kernel_size" => Ok(Column::KernelSize),
            "input_size" => Ok(Column::InputSize),
            "output_size" => Ok(Column::OutputSize),
            "num_params" => Ok(Column::NumParams),
            "mult_adds" => Ok(Column::MultAdds),
            _ => Err(SummaryError::UnknownColumn {
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Extra information shown in the layer-name column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowSetting {
    /// Append `: depth-index`
    Depth,
    /// Append ` (var_name)`
    VarNames,
}

impl FromStr for RowSetting {
    type Err = SummaryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "depth" => Ok(RowSetting::Depth),
            "var_names" => Ok(RowSetting::VarNames),
            _ => Err(SummaryError::UnknownRowSetting {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Quiet,
    #[default]
    Default,
    /// Also list parameter shapes under each layer
    Verbose,
}

/// Column selection and layout of the summary table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormattingOptions {
    /// Deepest nesting level that gets its own row
    pub max_depth: usize,
    pub verbose: Verbosity,
    pub col_names: Vec<Column>,
    pub col_width: usize,
    pub row_settings: Vec<RowSetting>,
    /// Width of the layer-name column, grown by `set_layer_name_width`
    pub layer_name_width: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            max_depth: 3,
            verbose: Verbosity::Default,
            col_names: vec![Column::OutputSize, Column::NumParams],
            col_width: 25,
            row_settings: vec![RowSetting::Depth],
            layer_name_width: 40,
        }
    }
}

impl FormattingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(mut self, col_names: Vec<Column>) -> Self {
        self.col_names = col_names;
        self
    }

    pub fn with_col_width(mut self, col_width: usize) -> Self {
        self.col_width = col_width;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_row_settings(mut self, row_settings: Vec<RowSetting>) -> Self {
        self.row_settings = row_settings;
        self
    }

    pub fn with_verbosity(mut self, verbose: Verbosity) -> Self {
        self.verbose = verbose;
        self
    }

    /// Load options from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| SummaryError::from_read(path, e))?;
        serde_json::from_str(&json).map_err(|source| SummaryError::InvalidConfig {
            path: path.to_path_buf(),
            source,
        })
    }

    fn shows(&self, setting: RowSetting) -> bool {
        self.row_settings.contains(&setting)
    }

    /// Grow the layer-name column to fit the longest indented name.
    pub fn set_layer_name_width(&mut self, records: &[LayerRecord]) {
        let max_length = records
            .iter()
            .map(|record| record.to_string().chars().count() + record.depth * NAME_ALIGN + 1)
            .max()
            .unwrap_or(0);

        if max_length >= self.layer_name_width {
            let width = max_length.div_ceil(NAME_ALIGN) * NAME_ALIGN;
            log::debug!(
                "Layer name column grows from {} to {}",
                self.layer_name_width,
                width
            );
            self.layer_name_width = width;
        }
    }

    /// Width of the whole table, also the divider length
    pub fn total_width(&self) -> usize {
        self.col_names.len() * self.col_width + self.layer_name_width
    }

    /// Lay out one row: padded name, then each column in `col_names` order
    pub fn format_row(&self, layer_name: &str, values: &[(Column, String)]) -> String {
        let mut line = format!("{:<width$} ", layer_name, width = self.layer_name_width);
        for column in &self.col_names {
            let cell = values
                .iter()
                .find(|(c, _)| c == column)
                .map(|(_, v)| v.as_str())
                .unwrap_or("");
            line.push_str(&format!("{:<width$} ", cell, width = self.col_width));
        }
        let mut line = line.trim_end().to_string();
        line.push('\n');
        line
    }

    /// Column titles row
    pub fn header_row(&self) -> String {
        let mut layer_header = String::new();
        if self.shows(RowSetting::VarNames) {
            layer_header.push_str(" (var_name)");
        }
        if self.shows(RowSetting::Depth) {
            layer_header.push_str(":depth-idx");
        }
        let titles: Vec<(Column, String)> = self
            .col_names
            .iter()
            .map(|c| (*c, c.title().to_string()))
            .collect();
        self.format_row(&format!("Layer (type{})", layer_header), &titles)
    }

    /// Render one layer, plus its parameter shapes in verbose mode
    pub fn layer_to_row(&self, record: &LayerRecord, reached_max_depth: bool) -> String {
        let values: Vec<(Column, String)> = self
            .col_names
            .iter()
            .map(|c| (*c, c.value(record, reached_max_depth)))
            .collect();
        let name = format!(
            "{}{}",
            tree_prefix(record.depth),
            record.layer_name(self.shows(RowSetting::VarNames), self.shows(RowSetting::Depth))
        );
        let mut row = self.format_row(&name, &values);

        if self.verbose == Verbosity::Verbose {
            let shape_column = if self.col_names.contains(&Column::KernelSize) {
                Column::KernelSize
            } else {
                Column::OutputSize
            };
            for (inner_name, inner_shape) in &record.inner_layers {
                let name = format!("{}{}", tree_prefix(record.depth + 1), inner_name);
                row.push_str(&self.format_row(&name, &[(shape_column, shape_to_str(inner_shape))]));
            }
        }
        row
    }

    /// Render every record down to `max_depth`
    pub fn layers_to_str(&self, records: &[LayerRecord]) -> String {
        records
            .iter()
            .filter(|record| record.depth <= self.max_depth)
            .map(|record| self.layer_to_row(record, record.depth == self.max_depth))
            .collect()
    }
}

fn tree_prefix(depth: usize) -> String {
    if depth == 0 {
        return String::new();
    }
    format!("{}{}", TREE_INDENT.repeat(depth - 1), TREE_BRANCH)
}
