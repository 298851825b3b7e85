//! Pipeline orchestration for document comparison.
//!
//! This module provides the read → diff → report workflow shared by the CLI
//! command handlers.

mod diff_stage;
mod output;
mod parse;
mod report_stage;

pub use diff_stage::{compute_diff, ComputedDiff};
pub use output::{should_use_color, write_output, OutputTarget};
pub use parse::{read_document, read_pair};
pub use report_stage::{output_report, render_report};

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success - no changes detected (or no --fail-on-change)
    pub const SUCCESS: i32 = 0;
    /// Changes were detected
    pub const CHANGES_DETECTED: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
