//! Layer records and their producers
//!
//! This module provides:
//! - `LayerRecord`, the flat per-layer input of the aggregator
//! - `ModuleNode` trees and `flatten_modules` to produce records from them
//! - `VisitedModules`, the explicit cache that flags reused modules

mod cache;
mod record;
mod tree;

pub use cache::VisitedModules;
pub use record::{shape_to_str, LayerRecord};
pub use tree::{flatten_modules, ModuleNode};

use crate::error::{Result, SummaryError};
use std::path::Path;

/// Load an ordered JSON array of layer records
pub fn load_records(path: &Path) -> Result<Vec<LayerRecord>> {
    let json = std::fs::read_to_string(path).map_err(|e| SummaryError::from_read(path, e))?;
    let records: Vec<LayerRecord> =
        serde_json::from_str(&json).map_err(|source| SummaryError::InvalidRecords {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!("Loaded {} layer records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layers.json");
        std::fs::write(
            &path,
            r#"[
                {"class_name": "Net", "is_leaf_layer": false},
                {"class_name": "Linear", "depth": 1, "num_params": 110, "macs": 100}
            ]"#,
        )
        .unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert!(!records[0].is_leaf_layer);
        assert_eq!(records[1].macs, 100);
    }

    #[test]
    fn test_load_records_from_directory_is_read_error() {
        let dir = tempdir().unwrap();

        let err = load_records(dir.path()).unwrap_err();
        assert_eq!(err.error_code(), "FILE_READ_ERROR");
        assert!(matches!(err, SummaryError::FileReadError { .. }));
    }

    #[test]
    fn test_load_records_rejects_bad_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layers.json");
        std::fs::write(&path, r#"{"class_name": "Net"}"#).unwrap();

        let err = load_records(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_RECORDS");
    }
}
