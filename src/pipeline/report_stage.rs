//! Report output stage.

use super::{should_use_color, write_output, OutputTarget};
use super::ComputedDiff;
use crate::config::{AppConfig, DiffPaths};
use crate::reports::{create_reporter_with_options, ReportConfig};
use anyhow::{Context, Result};

/// Render a computed diff in the configured format.
///
/// Reported counts cover the unfiltered comparison, so they agree with the
/// exit code even when the filter hides every node.
pub fn render_report(
    config: &AppConfig,
    paths: &DiffPaths,
    diff: &ComputedDiff,
    use_color: bool,
) -> Result<String> {
    let report_config = ReportConfig::for_files(
        paths.old.to_string_lossy(),
        paths.new.to_string_lossy(),
    )
    .with_summary(diff.summary.clone());
    let reporter =
        create_reporter_with_options(config.output.format, use_color, config.output.compact);
    reporter
        .generate(diff.result.as_ref(), &report_config)
        .with_context(|| format!("Failed to generate {} report", config.output.format))
}

/// Render a computed diff and write it to the configured destination.
pub fn output_report(config: &AppConfig, paths: &DiffPaths, diff: &ComputedDiff) -> Result<()> {
    let target = OutputTarget::from_option(config.output.file.clone());
    let use_color = should_use_color(config.output.no_color, &target);
    let report = render_report(config, paths, diff, use_color)?;
    write_output(&report, &target, config.behavior.quiet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffSummary;
    use crate::pipeline::compute_diff;
    use crate::reports::ReportFormat;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn paths() -> DiffPaths {
        DiffPaths {
            old: PathBuf::from("old.json"),
            new: PathBuf::from("new.json"),
        }
    }

    #[test]
    fn test_render_summary_without_result() {
        let config = AppConfig::builder()
            .output_format(ReportFormat::Summary)
            .build();
        let empty = ComputedDiff {
            result: None,
            summary: DiffSummary::default(),
        };
        let report = render_report(&config, &paths(), &empty, false).unwrap();
        assert!(report.contains("old.json → new.json"));
    }

    #[test]
    fn test_filtered_out_changes_still_counted() {
        let config = AppConfig::builder()
            .quiet(true)
            .path_pattern(Some("^unrelated".to_string()))
            .build();
        let diff = compute_diff(&config, br#"{"a":1}"#, br#"{"a":2}"#).unwrap();
        assert!(diff.result.is_none());

        let report = render_report(&config, &paths(), &diff, false).unwrap();
        let json: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert!(json["result"].is_null());
        assert_eq!(json["summary"]["replaced"], 2);
        assert_eq!(json["summary"]["leaf_changes"], 1);
    }

    #[test]
    fn test_output_report_to_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("report.json");
        let config = AppConfig::builder()
            .output_file(Some(out.clone()))
            .quiet(true)
            .build();
        let diff = compute_diff(&config, b"[1]", b"[2]").unwrap();
        output_report(&config, &paths(), &diff).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(json["metadata"]["new_path"], "new.json");
    }
}
