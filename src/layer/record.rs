//! Layer records
//!
//! A `LayerRecord` is the contract between whatever walks a model and the
//! statistics aggregator. Records arrive as a flat, ordered sequence in
//! depth-first order and are never modified by this crate.

use crate::stats::units::format_count;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row of a model summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerRecord {
    /// Layer type name (e.g., "Linear", "Conv2d")
    pub class_name: String,

    /// Attribute name of this layer inside its parent
    pub var_name: Option<String>,

    /// Nesting depth, 0 for the model itself
    pub depth: usize,

    /// 1-based position among the parent's children
    pub depth_index: Option<usize>,

    /// No children whose stats are counted separately
    pub is_leaf_layer: bool,

    /// Parameters/activations use a reduced-bit representation
    pub quantized: bool,

    /// This module instance was already counted earlier in the traversal
    pub is_recursive: bool,

    pub trainable: bool,

    /// Learnable scalars owned directly by this layer
    pub num_params: u64,

    /// Multiply-accumulate operations of one forward pass
    pub macs: u64,

    pub input_size: Vec<usize>,
    pub output_size: Vec<usize>,
    pub kernel_size: Vec<usize>,

    /// Parameter name and shape pairs, shown in verbose mode
    pub inner_layers: Vec<(String, Vec<usize>)>,
}

impl Default for LayerRecord {
    fn default() -> Self {
        Self {
            class_name: String::new(),
            var_name: None,
            depth: 0,
            depth_index: None,
            is_leaf_layer: true,
            quantized: false,
            is_recursive: false,
            trainable: true,
            num_params: 0,
            macs: 0,
            input_size: Vec::new(),
            output_size: Vec::new(),
            kernel_size: Vec::new(),
            inner_layers: Vec::new(),
        }
    }
}

impl LayerRecord {
    /// Create a leaf, trainable, full precision record
    pub fn new(class_name: impl Into<String>, depth: usize) -> Self {
        Self {
            class_name: class_name.into(),
            depth,
            ..Self::default()
        }
    }

    pub fn with_var_name(mut self, var_name: impl Into<String>) -> Self {
        self.var_name = Some(var_name.into());
        self
    }

    pub fn with_depth_index(mut self, depth_index: usize) -> Self {
        self.depth_index = Some(depth_index);
        self
    }

    pub fn with_params(mut self, num_params: u64) -> Self {
        self.num_params = num_params;
        self
    }

    pub fn with_macs(mut self, macs: u64) -> Self {
        self.macs = macs;
        self
    }

    pub fn with_input_size(mut self, shape: Vec<usize>) -> Self {
        self.input_size = shape;
        self
    }

    pub fn with_output_size(mut self, shape: Vec<usize>) -> Self {
        self.output_size = shape;
        self
    }

    pub fn with_kernel_size(mut self, shape: Vec<usize>) -> Self {
        self.kernel_size = shape;
        self
    }

    pub fn with_inner_layer(mut self, name: impl Into<String>, shape: Vec<usize>) -> Self {
        self.inner_layers.push((name.into(), shape));
        self
    }

    pub fn trainable(mut self, trainable: bool) -> Self {
        self.trainable = trainable;
        self
    }

    pub fn quantized(mut self, quantized: bool) -> Self {
        self.quantized = quantized;
        self
    }

    pub fn recursive(mut self, is_recursive: bool) -> Self {
        self.is_recursive = is_recursive;
        self
    }

    /// Mark as a container whose children carry the stats
    pub fn container(mut self) -> Self {
        self.is_leaf_layer = false;
        self
    }

    /// Number of elements in the output tensor, saturating at `u64::MAX`
    pub fn output_elements(&self) -> u64 {
        self.output_size
            .iter()
            .fold(1u64, |acc, &d| acc.saturating_mul(d as u64))
    }

    /// Display name for the layer column
    pub fn layer_name(&self, show_var_name: bool, show_depth: bool) -> String {
        let mut name = self.class_name.clone();
        if show_var_name {
            if let Some(var_name) = &self.var_name {
                name.push_str(&format!(" ({})", var_name));
            }
        }
        if show_depth && self.depth > 0 {
            name.push_str(&format!(": {}", self.depth));
            if let Some(index) = self.depth_index {
                name.push_str(&format!("-{}", index));
            }
        }
        name
    }

    /// Param # column value
    ///
    /// Frozen counts are wrapped in parentheses.
    pub fn num_params_to_str(&self, reached_max_depth: bool) -> String {
        if self.is_recursive {
            return "(recursive)".to_string();
        }
        if self.num_params > 0 && (reached_max_depth || self.is_leaf_layer) {
            let count = format_count(self.num_params);
            return if self.trainable {
                count
            } else {
                format!("({})", count)
            };
        }
        "--".to_string()
    }

    /// Mult-Adds column value
    pub fn macs_to_str(&self, reached_max_depth: bool) -> String {
        if self.macs > 0 && (reached_max_depth || self.is_leaf_layer) {
            return format_count(self.macs);
        }
        "--".to_string()
    }
}

impl fmt::Display for LayerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class_name, self.depth)
    }
}

/// Render a shape the way the summary table shows it: `[1, 10]`
pub fn shape_to_str(shape: &[usize]) -> String {
    format!("{:?}", shape)
}
