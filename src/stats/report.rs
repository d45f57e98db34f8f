//! Summary report rendering
//!
//! A report is either `ParamsOnly`, when the input shape is unknown, or
//! `WithSizeEstimate`, which adds mult-add totals and memory estimates.
//! The shape is decided once from the statistics; rendering then draws
//! the table, the parameter blocks and, if present, the estimate block.

use super::model_statistics::{ModelStatistics, PrecisionTotals};
use super::units::{bit_to_megabytes, float_to_megabytes, format_count, to_megabytes, to_readable};
use serde::Serialize;
use std::fmt;

/// Mult-adds and memory estimates, all sizes in megabytes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeEstimate {
    pub full_precision_mult_adds: String,
    pub quantized_mult_adds: String,
    pub input_mb: f64,
    pub full_precision_pass_mb: f64,
    /// Assumes 1 bit per quantized value
    pub quantized_pass_mb: f64,
    pub total_pass_mb: f64,
    pub full_precision_params_mb: f64,
    pub quantized_params_mb: f64,
    pub total_params_mb: f64,
    pub total_size_mb: f64,
}

impl SizeEstimate {
    pub fn new(total_input: u64, fp: &PrecisionTotals, quantized: &PrecisionTotals) -> Self {
        let input_mb = to_megabytes(total_input);
        let full_precision_pass_mb = float_to_megabytes(fp.output);
        let quantized_pass_mb = bit_to_megabytes(quantized.output);
        let full_precision_params_mb = float_to_megabytes(fp.params);
        let quantized_params_mb = bit_to_megabytes(quantized.params);
        let total_size_mb = input_mb
            + float_to_megabytes(fp.output.saturating_add(fp.params))
            + bit_to_megabytes(quantized.output.saturating_add(quantized.params));

        Self {
            full_precision_mult_adds: to_readable(fp.mult_adds),
            quantized_mult_adds: to_readable(quantized.mult_adds),
            input_mb,
            full_precision_pass_mb,
            quantized_pass_mb,
            total_pass_mb: full_precision_pass_mb + quantized_pass_mb,
            full_precision_params_mb,
            quantized_params_mb,
            total_params_mb: full_precision_params_mb + quantized_params_mb,
            total_size_mb,
        }
    }
}

/// Rendered shape of a summary
#[derive(Debug, Clone)]
pub enum SummaryReport<'a> {
    WithSizeEstimate {
        stats: &'a ModelStatistics,
        estimate: SizeEstimate,
    },
    ParamsOnly {
        stats: &'a ModelStatistics,
    },
}

impl<'a> SummaryReport<'a> {
    pub fn from_statistics(stats: &'a ModelStatistics) -> Self {
        if stats.has_input_size() {
            SummaryReport::WithSizeEstimate {
                stats,
                estimate: SizeEstimate::new(
                    stats.total_input(),
                    stats.full_precision(),
                    stats.quantized(),
                ),
            }
        } else {
            SummaryReport::ParamsOnly { stats }
        }
    }

    pub fn stats(&self) -> &'a ModelStatistics {
        match self {
            SummaryReport::WithSizeEstimate { stats, .. } => *stats,
            SummaryReport::ParamsOnly { stats } => *stats,
        }
    }

    pub fn size_estimate(&self) -> Option<&SizeEstimate> {
        match self {
            SummaryReport::WithSizeEstimate { estimate, .. } => Some(estimate),
            SummaryReport::ParamsOnly { .. } => None,
        }
    }
}

/// `non_trainable_label` is separate from `label`: both blocks print
/// `Non-trainable full precision params` on their third line.
fn write_params_block(
    f: &mut fmt::Formatter<'_>,
    label: &str,
    non_trainable_label: &str,
    totals: &PrecisionTotals,
    divider: &str,
) -> fmt::Result {
    writeln!(f, "Total {} params: {}", label, format_count(totals.params))?;
    writeln!(f, "Trainable {} params: {}", label, format_count(totals.trainable_params))?;
    writeln!(
        f,
        "Non-trainable {} params: {}",
        non_trainable_label,
        format_count(totals.non_trainable_params())
    )?;
    writeln!(f, "{}", divider)
}

fn write_size_estimate(
    f: &mut fmt::Formatter<'_>,
    estimate: &SizeEstimate,
    divider: &str,
) -> fmt::Result {
    writeln!(f, "Total full precision mult-adds: {}", estimate.full_precision_mult_adds)?;
    writeln!(f, "Total quantized mult-adds: {}", estimate.quantized_mult_adds)?;
    writeln!(f, "{}", divider)?;
    writeln!(f, "Input size (MB): {:.2}", estimate.input_mb)?;
    writeln!(
        f,
        "Forward/backward pass size full precision (MB): {:.2}",
        estimate.full_precision_pass_mb
    )?;
    writeln!(
        f,
        "Estimated Forward/backward pass size quantized (assuming 1 bit resolution) (MB): {:.2}",
        estimate.quantized_pass_mb
    )?;
    writeln!(f, "Forward/backward pass size total (MB): {:.2}", estimate.total_pass_mb)?;
    writeln!(
        f,
        "Params size full precision (MB): {:.2}",
        estimate.full_precision_params_mb
    )?;
    writeln!(
        f,
        "Params size quantized (assuming 1 bit resolution) (MB): {:.2}",
        estimate.quantized_params_mb
    )?;
    writeln!(f, "Params size total (MB): {:.2}", estimate.total_params_mb)?;
    writeln!(f, "Estimated Total Size (MB): {:.2}", estimate.total_size_mb)
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        let formatting = stats.formatting();
        let divider = "=".repeat(formatting.total_width());

        writeln!(f, "{}", divider)?;
        writeln!(f, "{}{}", formatting.header_row(), divider)?;
        writeln!(f, "{}{}", formatting.layers_to_str(stats.summary_list()), divider)?;
        write_params_block(
            f,
            "full precision",
            "full precision",
            stats.full_precision(),
            &divider,
        )?;
        write_params_block(f, "quantized", "full precision", stats.quantized(), &divider)?;

        if let Some(estimate) = self.size_estimate() {
            write_size_estimate(f, estimate, &divider)?;
        }
        write!(f, "{}", divider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::{Column, FormattingOptions};
    use crate::layer::LayerRecord;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    fn options() -> FormattingOptions {
        FormattingOptions::default()
            .with_columns(vec![Column::NumParams, Column::MultAdds])
            .with_col_width(10)
    }

    fn records() -> Vec<LayerRecord> {
        vec![
            LayerRecord::new("Linear", 0)
                .with_params(1_000_000)
                .with_macs(2_000_000)
                .with_output_size(vec![1, 500_000]),
            LayerRecord::new("BitLinear", 0)
                .quantized(true)
                .trainable(false)
                .with_params(8_000_000)
                .with_macs(3_000_000_000)
                .with_output_size(vec![4, 1_000_000]),
        ]
    }

    #[test]
    fn test_size_estimate_mixes_units_per_precision() {
        let stats = ModelStatistics::new(records(), vec![vec![1, 100]], 2_000_000, options());
        let report = stats.report();
        let estimate = report.size_estimate().unwrap();

        assert_eq!(estimate.full_precision_mult_adds, "2.00 million");
        assert_eq!(estimate.quantized_mult_adds, "3.00 billion");
        assert_relative_eq!(estimate.input_mb, 2.0);
        // 1_000_000 fp outputs * 4 bytes
        assert_relative_eq!(estimate.full_precision_pass_mb, 4.0);
        // 8_000_000 quantized outputs at 1 bit
        assert_relative_eq!(estimate.quantized_pass_mb, 1.0);
        assert_relative_eq!(estimate.total_pass_mb, 5.0);
        assert_relative_eq!(estimate.full_precision_params_mb, 4.0);
        assert_relative_eq!(estimate.quantized_params_mb, 1.0);
        assert_relative_eq!(estimate.total_params_mb, 5.0);
        assert_relative_eq!(estimate.total_size_mb, 12.0);
    }

    #[test]
    fn test_params_only_without_input_size() {
        let stats = ModelStatistics::new(records(), vec![], 2_000_000, options());
        let report = stats.report();

        assert!(matches!(report, SummaryReport::ParamsOnly { .. }));
        assert!(report.size_estimate().is_none());
    }

    #[test]
    fn test_render_params_only() {
        let stats = ModelStatistics::new(records(), vec![], 0, options());
        let divider = "=".repeat(60);
        let expected = [
            divider.clone(),
            format!("{:<40} {:<10} Mult-Adds", "Layer (type:depth-idx)", "Param #"),
            divider.clone(),
            format!("{:<40} {:<10} 2,000,000", "Linear", "1,000,000"),
            format!("{:<40} {:<10} 3,000,000,000", "BitLinear", "(8,000,000)"),
            divider.clone(),
            "Total full precision params: 1,000,000".to_string(),
            "Trainable full precision params: 1,000,000".to_string(),
            "Non-trainable full precision params: 0".to_string(),
            divider.clone(),
            "Total quantized params: 8,000,000".to_string(),
            "Trainable quantized params: 0".to_string(),
            "Non-trainable full precision params: 8,000,000".to_string(),
            divider.clone(),
            divider.clone(),
        ]
        .join("\n");

        assert_eq!(stats.to_string(), expected);
    }

    #[test]
    fn test_quantized_non_trainable_line_keeps_full_precision_label() {
        let records = vec![LayerRecord::new("BitLinear", 0)
            .quantized(true)
            .trainable(false)
            .with_params(8)];
        let stats = ModelStatistics::new(records, vec![], 0, options());
        let lines: Vec<String> = stats.to_string().lines().map(String::from).collect();
        let quantized_block = lines
            .iter()
            .position(|line| line == "Total quantized params: 8")
            .unwrap();

        assert_eq!(lines[quantized_block + 1], "Trainable quantized params: 0");
        assert_eq!(
            lines[quantized_block + 2],
            "Non-trainable full precision params: 8"
        );
        assert!(!stats.to_string().contains("Non-trainable quantized"));
    }

    #[test]
    fn test_render_with_size_estimate() {
        let stats = ModelStatistics::new(records(), vec![vec![1, 100]], 2_000_000, options());
        let rendered = stats.to_string();
        let divider = "=".repeat(60);

        let tail: Vec<&str> = rendered.lines().skip(14).collect();
        assert_eq!(
            tail,
            vec![
                "Total full precision mult-adds: 2.00 million",
                "Total quantized mult-adds: 3.00 billion",
                divider.as_str(),
                "Input size (MB): 2.00",
                "Forward/backward pass size full precision (MB): 4.00",
                "Estimated Forward/backward pass size quantized (assuming 1 bit resolution) (MB): 1.00",
                "Forward/backward pass size total (MB): 5.00",
                "Params size full precision (MB): 4.00",
                "Params size quantized (assuming 1 bit resolution) (MB): 1.00",
                "Params size total (MB): 5.00",
                "Estimated Total Size (MB): 12.00",
                divider.as_str(),
            ]
        );
        assert!(!rendered.ends_with('\n'));
    }
}
