//! Report type definitions.

use crate::diff::{DiffNode, DiffSummary};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// The full result tree as JSON
    #[default]
    Json,
    /// Brief relation counts
    Summary,
    /// One row per changed leaf
    Table,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Summary => write!(f, "summary"),
            Self::Table => write!(f, "table"),
        }
    }
}

/// Configuration for report generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Title for the report
    pub title: Option<String>,
    /// Additional metadata to include
    pub metadata: ReportMetadata,
    /// Maximum rows in tabular output
    pub max_items: Option<usize>,
    /// Counts over the whole comparison, before any result filter. When
    /// absent, reporters count the tree they are given.
    pub summary: Option<DiffSummary>,
}

impl ReportConfig {
    /// Config naming the two compared files.
    #[must_use]
    pub fn for_files(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        Self {
            metadata: ReportMetadata {
                old_path: Some(old_path.into()),
                new_path: Some(new_path.into()),
                ..ReportMetadata::new()
            },
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: DiffSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    /// Counts to report for `result`.
    #[must_use]
    pub fn summary_for(&self, result: Option<&DiffNode>) -> Option<DiffSummary> {
        self.summary
            .clone()
            .or_else(|| result.map(DiffNode::summary))
    }
}

/// Metadata included in reports
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Old document path
    pub old_path: Option<String>,
    /// New document path
    pub new_path: Option<String>,
    /// Tool version
    pub tool_version: String,
    /// Generation timestamp
    pub generated_at: Option<String>,
}

impl ReportMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        }
    }
}
