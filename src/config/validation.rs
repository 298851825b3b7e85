//! Configuration validation for json-diff-tree.
//!
//! Provides validation traits and implementations for all configuration types.

use super::defaults::MAX_SUPPORTED_DEPTH;
use super::types::{AppConfig, BehaviorConfig, DiffConfig, FilterConfig, OutputConfig};
use std::collections::HashSet;

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.diff.validate());
        errors.extend(self.output.validate());
        errors.extend(self.filter.validate());
        errors.extend(self.behavior.validate());
        errors
    }
}

impl Validatable for DiffConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.max_depth == 0 {
            errors.push(ConfigError::new(
                "diff.max_depth",
                "Max depth must be at least 1",
            ));
        } else if self.max_depth > MAX_SUPPORTED_DEPTH {
            errors.push(ConfigError::new(
                "diff.max_depth",
                format!("Max depth must be at most {MAX_SUPPORTED_DEPTH}"),
            ));
        }

        errors.extend(find_duplicates("diff.ignore_paths", &self.ignore_paths));
        errors.extend(find_duplicates(
            "diff.ignore_array_order_paths",
            &self.ignore_array_order_paths,
        ));

        let ignored: HashSet<&str> = self.ignore_paths.iter().map(String::as_str).collect();
        for path in &self.ignore_array_order_paths {
            if ignored.contains(path.as_str()) {
                errors.push(ConfigError::new(
                    "diff.ignore_array_order_paths",
                    format!(
                        "Path '{path}' is also in ignore_paths; its order setting never applies"
                    ),
                ));
            }
        }

        errors
    }
}

fn find_duplicates(field: &str, paths: &[String]) -> Vec<ConfigError> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut errors = Vec::new();
    for path in paths {
        if !seen.insert(path.as_str()) && reported.insert(path.as_str()) {
            errors.push(ConfigError::new(
                field,
                format!("Duplicate path '{path}'"),
            ));
        }
    }
    errors
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for FilterConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref pattern) = self.path_pattern {
            if let Err(e) = regex::Regex::new(pattern) {
                errors.push(ConfigError::new(
                    "filter.path_pattern",
                    format!("Invalid regular expression '{pattern}': {e}"),
                ));
            }
        }
        errors
    }
}

impl Validatable for BehaviorConfig {
    fn validate(&self) -> Vec<ConfigError> {
        // Only boolean flags
        Vec::new()
    }
}
