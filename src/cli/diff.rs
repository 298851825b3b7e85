//! Diff command handler.
//!
//! Implements the `diff` subcommand for comparing two JSON documents.

use crate::config::{AppConfig, DiffPaths};
use crate::pipeline::{compute_diff, exit_codes, output_report, read_pair, ComputedDiff};
use anyhow::Result;

/// Run the diff command, returning the desired exit code.
///
/// The caller is responsible for calling `std::process::exit()` with the
/// returned code when it is non-zero.
pub fn run_diff(config: &AppConfig, paths: &DiffPaths) -> Result<i32> {
    let quiet = config.behavior.quiet;

    let (old, new) = read_pair(paths, quiet)?;
    let diff = compute_diff(config, &old, &new)?;
    let exit_code = determine_exit_code(config, &diff);

    output_report(config, paths, &diff)?;

    Ok(exit_code)
}

/// Determine the appropriate exit code based on diff results and config flags.
const fn determine_exit_code(config: &AppConfig, diff: &ComputedDiff) -> i32 {
    if config.behavior.fail_on_change && diff.has_changes() {
        return exit_codes::CHANGES_DETECTED;
    }
    exit_codes::SUCCESS
}
