//! Serialized module trees
//!
//! A `ModuleNode` is a model description that has already been extracted
//! from a framework: per-module parameter counts, shapes and mult-adds with
//! the children nested inside. `flatten_modules` turns it into the ordered
//! record sequence the aggregator consumes.

use super::cache::VisitedModules;
use super::record::LayerRecord;
use crate::error::{Result, SummaryError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One module in a serialized model tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleNode {
    /// Instance identity. Nodes sharing an id are the same module reused.
    pub id: String,
    pub class_name: String,
    pub var_name: Option<String>,
    pub num_params: u64,
    pub trainable: bool,
    pub quantized: bool,
    pub macs: u64,
    pub input_size: Vec<usize>,
    pub output_size: Vec<usize>,
    pub kernel_size: Vec<usize>,
    pub inner_layers: Vec<(String, Vec<usize>)>,
    pub children: Vec<ModuleNode>,
}

impl Default for ModuleNode {
    fn default() -> Self {
        Self {
            id: String::new(),
            class_name: String::new(),
            var_name: None,
            num_params: 0,
            trainable: true,
            quantized: false,
            macs: 0,
            input_size: Vec::new(),
            output_size: Vec::new(),
            kernel_size: Vec::new(),
            inner_layers: Vec::new(),
            children: Vec::new(),
        }
    }
}

impl ModuleNode {
    pub fn new(id: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class_name: class_name.into(),
            ..Self::default()
        }
    }

    pub fn with_var_name(mut self, var_name: impl Into<String>) -> Self {
        self.var_name = Some(var_name.into());
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

    pub fn trainable(mut self, trainable: bool) -> Self {
        self.trainable = trainable;
        self
    }

    pub fn quantized(mut self, quantized: bool) -> Self {
        self.quantized = quantized;
        self
    }

    pub fn with_child(mut self, child: ModuleNode) -> Self {
        self.children.push(child);
        self
    }

    /// Load a tree from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| SummaryError::from_read(path, e))?;
        serde_json::from_str(&json).map_err(|source| SummaryError::InvalidTree {
            path: path.to_path_buf(),
            source,
        })
    }

    fn to_record(&self, depth: usize, depth_index: Option<usize>, is_recursive: bool) -> LayerRecord {
        LayerRecord {
            class_name: self.class_name.clone(),
            var_name: self.var_name.clone(),
            depth,
            depth_index,
            is_leaf_layer: self.children.is_empty(),
            quantized: self.quantized,
            is_recursive,
            trainable: self.trainable,
            num_params: self.num_params,
            macs: self.macs,
            input_size: self.input_size.clone(),
            output_size: self.output_size.clone(),
            kernel_size: self.kernel_size.clone(),
            inner_layers: self.inner_layers.clone(),
        }
    }
}

/// Flatten a module tree into depth-first layer records.
///
/// Modules whose id is already in `visited` are emitted with
/// `is_recursive` set. Their children are still walked, since a reused
/// container runs its children again. Call `visited.clear()` between
/// independent runs.
pub fn flatten_modules(root: &ModuleNode, visited: &mut VisitedModules) -> Vec<LayerRecord> {
    let mut records = Vec::new();
    visit(root, 0, None, visited, &mut records);
    log::debug!(
        "Flattened '{}' into {} layer records ({} unique modules)",
        root.class_name,
        records.len(),
        visited.len()
    );
    records
}

fn visit(
    node: &ModuleNode,
    depth: usize,
    depth_index: Option<usize>,
    visited: &mut VisitedModules,
    records: &mut Vec<LayerRecord>,
) {
    let is_recursive = !visited.mark(&node.id);
    if is_recursive {
        log::trace!("Module '{}' ({}) already counted", node.id, node.class_name);
    }
    records.push(node.to_record(depth, depth_index, is_recursive));

    for (i, child) in node.children.iter().enumerate() {
        visit(child, depth + 1, Some(i + 1), visited, records);
    }
}
