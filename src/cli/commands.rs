//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::Path;

use log::info;

use super::{OutputFormat, ReportArgs};
use crate::error::Result;
use crate::formatting::{FormattingOptions, Verbosity};
use crate::layer::{flatten_modules, load_records, LayerRecord, ModuleNode, VisitedModules};
use crate::stats::ModelStatistics;

/// Summarize a JSON array of layer records.
pub fn render(path: &Path, args: &ReportArgs, quiet: bool) -> Result<()> {
    info!("Rendering summary for: {}", path.display());

    let records = load_records(path)?;
    let options = formatting_options(args)?;
    let quiet = quiet || options.verbose == Verbosity::Quiet;
    let summary = build_summary(records, args, options)?;

    if !quiet {
        println!("{}", summary);
    }

    Ok(())
}

/// Flatten a JSON module tree and summarize it.
pub fn render_tree(path: &Path, args: &ReportArgs, quiet: bool) -> Result<()> {
    info!("Rendering summary for module tree: {}", path.display());

    let tree = ModuleNode::from_json_file(path)?;
    let mut visited = VisitedModules::new();
    let records = flatten_modules(&tree, &mut visited);
    info!("{} layers, {} unique modules", records.len(), visited.len());

    let options = formatting_options(args)?;
    let quiet = quiet || options.verbose == Verbosity::Quiet;
    let summary = build_summary(records, args, options)?;

    if !quiet {
        println!("{}", summary);
    }

    Ok(())
}

/// Aggregate records and render them in the requested format.
pub fn build_summary(
    records: Vec<LayerRecord>,
    args: &ReportArgs,
    formatting: FormattingOptions,
) -> Result<String> {
    let input_size = if args.input_size.is_empty() {
        Vec::new()
    } else {
        vec![args.input_size.clone()]
    };
    let total_input = match args.total_input {
        Some(total) => total,
        None if input_size.is_empty() => 0,
        None => args
            .input_size
            .iter()
            .fold(1u64, |acc, &d| acc.saturating_mul(d as u64)),
    };

    let stats = ModelStatistics::new(records, input_size, total_input, formatting);

    match args.format {
        OutputFormat::Text => Ok(stats.to_string()),
        OutputFormat::Json => {
            let report = stats.report();
            let result = serde_json::json!({
                "layers": stats.summary_list().len(),
                "total_input": stats.total_input(),
                "full_precision": stats.full_precision(),
                "quantized": stats.quantized(),
                "size_estimate": report.size_estimate(),
            });
            Ok(serde_json::to_string_pretty(&result)?)
        }
    }
}

/// Config file first, then command-line overrides.
pub fn formatting_options(args: &ReportArgs) -> Result<FormattingOptions> {
    let mut options = match &args.config {
        Some(path) => FormattingOptions::from_json_file(path)?,
        None => FormattingOptions::default(),
    };

    if !args.columns.is_empty() {
        options.col_names = args.columns.clone();
    }
    if !args.row_settings.is_empty() {
        options.row_settings = args.row_settings.clone();
    }
    if let Some(col_width) = args.col_width {
        options.col_width = col_width;
    }
    if let Some(max_depth) = args.max_depth {
        options.max_depth = max_depth;
    }
    if args.verbose_table {
        options.verbose = Verbosity::Verbose;
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::Column;
    use tempfile::tempdir;

    fn records() -> Vec<LayerRecord> {
        vec![
            LayerRecord::new("Net", 0).container(),
            LayerRecord::new("Linear", 1)
                .with_depth_index(1)
                .with_params(110)
                .with_macs(100)
                .with_output_size(vec![1, 10]),
        ]
    }

    #[test]
    fn test_params_only_without_input_size() {
        let summary = build_summary(records(), &ReportArgs::default(), FormattingOptions::default()).unwrap();
        assert!(summary.contains("Total full precision params: 110"));
        assert!(!summary.contains("mult-adds"));
    }

    #[test]
    fn test_total_input_defaults_to_shape_product() {
        let args = ReportArgs {
            input_size: vec![1, 500_000],
            ..ReportArgs::default()
        };
        let summary = build_summary(records(), &args, FormattingOptions::default()).unwrap();
        assert!(summary.contains("Input size (MB): 0.50"));
        assert!(summary.contains("Total full precision mult-adds: 0.00 million"));
    }

    #[test]
    fn test_json_output() {
        let args = ReportArgs {
            input_size: vec![1, 10],
            format: OutputFormat::Json,
            ..ReportArgs::default()
        };
        let summary = build_summary(records(), &args, FormattingOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&summary).unwrap();

        assert_eq!(value["layers"], 2);
        assert_eq!(value["full_precision"]["params"], 110);
        assert_eq!(value["full_precision"]["output"], 20);
        assert_eq!(value["size_estimate"]["full_precision_mult_adds"], "0.00 million");
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("format.json");
        std::fs::write(&config, r#"{"col_names": ["output_size"], "col_width": 30, "max_depth": 5}"#)
            .unwrap();

        let args = ReportArgs {
            config: Some(config),
            columns: vec![Column::NumParams, Column::MultAdds],
            verbose_table: true,
            ..ReportArgs::default()
        };
        let options = formatting_options(&args).unwrap();

        assert_eq!(options.col_names, vec![Column::NumParams, Column::MultAdds]);
        assert_eq!(options.col_width, 30);
        assert_eq!(options.max_depth, 5);
        assert_eq!(options.verbose, Verbosity::Verbose);
    }

    #[test]
    fn test_quiet_config_is_read() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("format.json");
        std::fs::write(&config, r#"{"verbose": "quiet"}"#).unwrap();

        let args = ReportArgs {
            config: Some(config),
            ..ReportArgs::default()
        };
        let options = formatting_options(&args).unwrap();
        assert_eq!(options.verbose, Verbosity::Quiet);
    }

    #[test]
    fn test_table_verbosity_only_from_verbose_table() {
        let options = formatting_options(&ReportArgs::default()).unwrap();
        assert_eq!(options.verbose, Verbosity::Default);

        let args = ReportArgs {
            verbose_table: true,
            ..ReportArgs::default()
        };
        assert_eq!(formatting_options(&args).unwrap().verbose, Verbosity::Verbose);
    }

    #[test]
    fn test_render_missing_file() {
        let dir = tempdir().unwrap();
        let err = render(&dir.path().join("missing.json"), &ReportArgs::default(), true)
            .unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }
}
