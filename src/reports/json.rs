//! JSON report generator.

use super::{ReportConfig, ReportError, ReportFormat, ReportGenerator};
use crate::diff::{DiffNode, DiffSummary};
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(
        &self,
        result: Option<&DiffNode>,
        config: &ReportConfig,
    ) -> Result<String, ReportError> {
        let report = JsonDiffReport {
            metadata: JsonReportMetadata {
                tool: ToolInfo {
                    name: "json-diff-tree",
                    version: if config.metadata.tool_version.is_empty() {
                        env!("CARGO_PKG_VERSION")
                    } else {
                        &config.metadata.tool_version
                    },
                },
                title: config.title.as_deref(),
                generated_at: config
                    .metadata
                    .generated_at
                    .clone()
                    .unwrap_or_else(|| Utc::now().to_rfc3339()),
                old_path: config.metadata.old_path.as_deref(),
                new_path: config.metadata.new_path.as_deref(),
            },
            summary: config.summary_for(result).unwrap_or_default(),
            result,
        };

        let json = if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
        .map_err(|e| ReportError::SerializationError(e.to_string()))?;

        Ok(json)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

#[derive(Serialize)]
struct JsonDiffReport<'a> {
    metadata: JsonReportMetadata<'a>,
    summary: DiffSummary,
    result: Option<&'a DiffNode>,
}

#[derive(Serialize)]
struct JsonReportMetadata<'a> {
    tool: ToolInfo<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    generated_at: String,
    old_path: Option<&'a str>,
    new_path: Option<&'a str>,
}

#[derive(Serialize)]
struct ToolInfo<'a> {
    name: &'static str,
    version: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiffConfig;
    use crate::diff::compare_documents;

    fn result() -> DiffNode {
        compare_documents(br#"{"x":1}"#, br#"{"x":1,"y":2}"#, &DiffConfig::default())
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_report_layout() {
        let config = ReportConfig::for_files("old.json", "new.json");
        let output = JsonReporter::new().generate(Some(&result()), &config).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["metadata"]["tool"]["name"], "json-diff-tree");
        assert_eq!(json["metadata"]["tool"]["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["metadata"]["old_path"], "old.json");
        assert!(chrono::DateTime::parse_from_rfc3339(
            json["metadata"]["generated_at"].as_str().unwrap()
        )
        .is_ok());
        assert_eq!(json["summary"]["added"], 1);
        assert_eq!(json["result"]["relation"], "replace");
        assert_eq!(json["result"]["object_sub_result"]["y"]["new"], 2);
    }

    #[test]
    fn test_compact() {
        let node = result();
        let compact = JsonReporter::new()
            .pretty(false)
            .generate(Some(&node), &ReportConfig::default())
            .unwrap();
        assert!(!compact.contains('\n'));
        let json: serde_json::Value = serde_json::from_str(&compact).unwrap();
        assert_eq!(json["summary"]["total_nodes"], 3);
    }

    #[test]
    fn test_supplied_summary_outlives_filtering() {
        let unfiltered = result().summary();
        let config = ReportConfig::default().with_summary(unfiltered);
        let output = JsonReporter::new().generate(None, &config).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(json["result"].is_null());
        assert_eq!(json["summary"]["added"], 1);
        assert_eq!(json["summary"]["leaf_changes"], 1);
        assert_eq!(json["summary"]["total_nodes"], 3);
    }

    #[test]
    fn test_absent_result() {
        let output = JsonReporter::new()
            .generate(None, &ReportConfig::default())
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(json["result"].is_null());
        assert_eq!(json["summary"]["total_nodes"], 0);
    }
}
