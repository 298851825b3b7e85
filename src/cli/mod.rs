//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.

mod diff;

pub use diff::run_diff;

// Re-export config types used by handlers
pub use crate::config::{AppConfig, DiffPaths};
