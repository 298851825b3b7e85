//! Diff computation stage.
//!
//! Decodes both documents, runs the engine and applies the result filter.

use crate::config::{AppConfig, Validatable};
use crate::diff::{compare_documents, DiffNode, DiffSummary};
use crate::error::JsonDiffError;
use anyhow::{Context, Result};

/// Outcome of the diff stage.
#[derive(Debug, Clone)]
pub struct ComputedDiff {
    /// Result tree after filtering
    pub result: Option<DiffNode>,
    /// Counts over the unfiltered tree
    pub summary: DiffSummary,
}

impl ComputedDiff {
    /// Whether the documents differ anywhere outside suppressed paths.
    /// Filtering does not affect the answer.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.summary.has_changes()
    }
}

/// Decode and compare two documents under `config`.
pub fn compute_diff(config: &AppConfig, old: &[u8], new: &[u8]) -> Result<ComputedDiff> {
    let quiet = config.behavior.quiet;

    let errors = config.validate();
    if let Some(first) = errors.first() {
        for error in &errors {
            tracing::error!("{}", error);
        }
        return Err(JsonDiffError::config(first.to_string()).into());
    }

    let filter = config
        .filter
        .to_result_filter()
        .map_err(|e| JsonDiffError::config(format!("path_pattern: {e}")))?;

    if !quiet {
        tracing::info!("Computing structural diff...");
    }

    let result =
        compare_documents(old, new, &config.diff).context("Failed to compute diff")?;
    let summary = result.as_ref().map(DiffNode::summary).unwrap_or_default();

    if !quiet {
        tracing::info!(
            "Diff complete: {} nodes, {} changed leaves ({} added, {} deleted, {} replaced, {} mismatched)",
            summary.total_nodes,
            summary.leaf_changes,
            summary.added,
            summary.deleted,
            summary.replaced,
            summary.mismatched
        );
    }

    let result = if filter.is_empty() {
        result
    } else {
        let filtered = result.and_then(|root| root.filtered(&filter));
        if !quiet {
            tracing::info!(
                "Filter kept {} nodes",
                filtered.as_ref().map_or(0, |r| r.summary().total_nodes)
            );
        }
        filtered
    };

    Ok(ComputedDiff { result, summary })
}
