//! Model statistics aggregation
//!
//! Reduces an ordered sequence of layer records to parameter, output and
//! mult-add totals, kept separately for full precision and quantized
//! layers. Only leaf or quantized records count. A recursive record (a
//! module instance seen earlier) adds its mult-adds, since the work runs
//! again, but never its parameters or outputs.

use super::report::SummaryReport;
use crate::formatting::FormattingOptions;
use crate::layer::LayerRecord;
use serde::Serialize;
use std::fmt;

/// Running totals for one precision class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PrecisionTotals {
    pub params: u64,
    pub trainable_params: u64,
    /// Output elements of parameter-owning layers, doubled for gradients
    pub output: u64,
    pub mult_adds: u64,
}

impl PrecisionTotals {
    /// Total minus trainable. Negative only for malformed records.
    pub fn non_trainable_params(&self) -> i128 {
        self.params as i128 - self.trainable_params as i128
    }
}

/// Results of a model summary
#[derive(Debug, Clone)]
pub struct ModelStatistics {
    summary_list: Vec<LayerRecord>,
    input_size: Vec<Vec<usize>>,
    total_input: u64,
    formatting: FormattingOptions,
    full_precision: PrecisionTotals,
    quantized: PrecisionTotals,
}

impl ModelStatistics {
    /// Aggregate `summary_list` in one pass.
    ///
    /// An empty `input_size` means the input shape is unknown; the report
    /// then leaves out mult-adds and memory estimates. Also sizes the
    /// layer-name column of `formatting` to fit the records.
    pub fn new(
        summary_list: Vec<LayerRecord>,
        input_size: Vec<Vec<usize>>,
        total_input: u64,
        mut formatting: FormattingOptions,
    ) -> Self {
        let mut full_precision = PrecisionTotals::default();
        let mut quantized = PrecisionTotals::default();

        for record in &summary_list {
            if !(record.is_leaf_layer || record.quantized) {
                continue;
            }
            let totals = if record.quantized {
                &mut quantized
            } else {
                &mut full_precision
            };

            totals.mult_adds = totals.mult_adds.saturating_add(record.macs);
            if record.is_recursive {
                log::trace!("Skipping params of recursive layer {}", record);
                continue;
            }

            totals.params = totals.params.saturating_add(record.num_params);
            if record.trainable {
                totals.trainable_params = totals.trainable_params.saturating_add(record.num_params);
            }
            // x2 for gradients, frozen layers included
            if record.num_params > 0 {
                let gradients = record.output_elements().saturating_mul(2);
                totals.output = totals.output.saturating_add(gradients);
            }
        }

        formatting.set_layer_name_width(&summary_list);

        log::debug!(
            "Summarized {} layers: {} full precision params, {} quantized params",
            summary_list.len(),
            full_precision.params,
            quantized.params
        );

        Self {
            summary_list,
            input_size,
            total_input,
            formatting,
            full_precision,
            quantized,
        }
    }

    pub fn full_precision(&self) -> &PrecisionTotals {
        &self.full_precision
    }

    pub fn quantized(&self) -> &PrecisionTotals {
        &self.quantized
    }

    pub fn total_input(&self) -> u64 {
        self.total_input
    }

    pub fn input_size(&self) -> &[Vec<usize>] {
        &self.input_size
    }

    /// Whether input-size metadata was supplied
    pub fn has_input_size(&self) -> bool {
        !self.input_size.is_empty()
    }

    pub fn summary_list(&self) -> &[LayerRecord] {
        &self.summary_list
    }

    pub fn formatting(&self) -> &FormattingOptions {
        &self.formatting
    }

    /// Pick the report shape for this summary
    pub fn report(&self) -> SummaryReport<'_> {
        SummaryReport::from_statistics(self)
    }
}

impl fmt::Display for ModelStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.report())
    }
}
