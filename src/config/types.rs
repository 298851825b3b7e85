//! Configuration types for json-diff-tree operations.
//!
//! [`DiffConfig`] is the comparison surface consumed by the engine; the other
//! types configure the pipeline around it (rendering, filtering, exit codes).

use super::defaults::{DEFAULT_MAX_DEPTH, DEFAULT_PARALLEL_THRESHOLD};
use crate::diff::{Relation, ResultFilter};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Diff Configuration
// ============================================================================

/// Comparison policy settings.
///
/// Every field is optional in config files; the defaults suppress nothing,
/// preserve array order, treat numeric subtypes as distinct and keep equal
/// nodes in the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DiffConfig {
    /// Paths excluded from comparison and output (exact match)
    pub ignore_paths: Vec<String>,
    /// Array paths compared without regard to element order (exact match,
    /// `""` is the root)
    pub ignore_array_order_paths: Vec<String>,
    /// Sort every array while decoding
    pub global_ignore_array_order: bool,
    /// Compare int, uint and float values by numeric value
    pub global_ignore_number_type: bool,
    /// Drop EQUAL nodes from the result tree
    pub omit_equal: bool,
    /// Maximum nesting depth before the comparison fails
    #[schemars(range(min = 1))]
    pub max_depth: usize,
    /// Minimum child count for comparing children on the thread pool
    /// (0 disables parallel comparison)
    pub parallel_threshold: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            ignore_paths: Vec::new(),
            ignore_array_order_paths: Vec::new(),
            global_ignore_array_order: false,
            global_ignore_number_type: false,
            omit_equal: false,
            max_depth: DEFAULT_MAX_DEPTH,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl DiffConfig {
    /// Create a `DiffConfig` builder.
    pub fn builder() -> DiffConfigBuilder {
        DiffConfigBuilder::default()
    }
}

/// Builder for [`DiffConfig`].
#[derive(Debug, Default)]
#[must_use]
pub struct DiffConfigBuilder {
    config: DiffConfig,
}

impl DiffConfigBuilder {
    /// Suppress a path.
    pub fn ignore_path(mut self, path: impl Into<String>) -> Self {
        self.config.ignore_paths.push(path.into());
        self
    }

    /// Suppress several paths.
    pub fn ignore_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config
            .ignore_paths
            .extend(paths.into_iter().map(Into::into));
        self
    }

    /// Compare the array at `path` without regard to element order.
    pub fn ignore_array_order_path(mut self, path: impl Into<String>) -> Self {
        self.config.ignore_array_order_paths.push(path.into());
        self
    }

    /// Sort every array while decoding.
    pub const fn global_ignore_array_order(mut self, enabled: bool) -> Self {
        self.config.global_ignore_array_order = enabled;
        self
    }

    /// Compare numbers across subtypes by value.
    pub const fn global_ignore_number_type(mut self, enabled: bool) -> Self {
        self.config.global_ignore_number_type = enabled;
        self
    }

    /// Drop EQUAL nodes from the output.
    pub const fn omit_equal(mut self, enabled: bool) -> Self {
        self.config.omit_equal = enabled;
        self
    }

    /// Set the maximum nesting depth.
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the parallel fan-out threshold.
    pub const fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    #[must_use]
    pub fn build(self) -> DiffConfig {
        self.config
    }
}

// ============================================================================
// Output / Filter / Behavior
// ============================================================================

/// Output rendering options.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Report format
    pub format: ReportFormat,
    /// Output file (stdout when unset)
    pub file: Option<PathBuf>,
    /// Disable ANSI colors
    pub no_color: bool,
    /// Compact rather than pretty JSON
    pub compact: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Json,
            file: None,
            no_color: false,
            compact: false,
        }
    }
}

/// Post-comparison filtering of the result tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterConfig {
    /// Keep only nodes with these relations (empty keeps all)
    pub relations: Vec<Relation>,
    /// Keep only nodes whose path matches this regular expression
    pub path_pattern: Option<String>,
}

impl FilterConfig {
    /// Whether this filter would keep every node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty() && self.path_pattern.is_none()
    }

    /// Compile into a [`ResultFilter`].
    pub fn to_result_filter(&self) -> Result<ResultFilter, regex::Error> {
        let mut filter = ResultFilter::new().with_relations(self.relations.iter().copied());
        if let Some(ref pattern) = self.path_pattern {
            filter = filter.with_path_pattern(pattern)?;
        }
        Ok(filter)
    }
}

/// Behavior flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Exit with a non-zero code when any difference is found
    pub fail_on_change: bool,
    /// Suppress progress logging
    pub quiet: bool,
}

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or
/// config files, with CLI values overriding file settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Comparison policy
    pub diff: DiffConfig,
    /// Output configuration
    pub output: OutputConfig,
    /// Result filtering
    pub filter: FilterConfig,
    /// Behavior flags
    pub behavior: BehaviorConfig,
}

impl AppConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Replace the comparison policy.
    pub fn diff(mut self, diff: DiffConfig) -> Self {
        self.config.diff = diff;
        self
    }

    /// Set the output format.
    pub const fn output_format(mut self, format: ReportFormat) -> Self {
        self.config.output.format = format;
        self
    }

    /// Set the output file.
    pub fn output_file(mut self, file: Option<PathBuf>) -> Self {
        self.config.output.file = file;
        self
    }

    /// Disable colored output.
    pub const fn no_color(mut self, no_color: bool) -> Self {
        self.config.output.no_color = no_color;
        self
    }

    /// Keep only nodes with the given relations.
    pub fn relations(mut self, relations: Vec<Relation>) -> Self {
        self.config.filter.relations = relations;
        self
    }

    /// Keep only nodes whose path matches `pattern`.
    pub fn path_pattern(mut self, pattern: Option<String>) -> Self {
        self.config.filter.path_pattern = pattern;
        self
    }

    /// Enable fail-on-change mode.
    pub const fn fail_on_change(mut self, fail: bool) -> Self {
        self.config.behavior.fail_on_change = fail;
        self
    }

    /// Enable quiet mode.
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.config.behavior.quiet = quiet;
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

/// Paths of the two documents to compare.
#[derive(Debug, Clone)]
pub struct DiffPaths {
    /// Baseline document
    pub old: PathBuf,
    /// Document compared against the baseline
    pub new: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_config_defaults() {
        let config = DiffConfig::default();
        assert!(config.ignore_paths.is_empty());
        assert!(config.ignore_array_order_paths.is_empty());
        assert!(!config.global_ignore_array_order);
        assert!(!config.global_ignore_number_type);
        assert!(!config.omit_equal);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.parallel_threshold, 0);
    }

    #[test]
    fn test_diff_config_builder() {
        let config = DiffConfig::builder()
            .ignore_path("a")
            .ignore_paths(["b", "c[#1]"])
            .ignore_array_order_path("")
            .global_ignore_number_type(true)
            .omit_equal(true)
            .max_depth(16)
            .build();

        assert_eq!(config.ignore_paths, vec!["a", "b", "c[#1]"]);
        assert_eq!(config.ignore_array_order_paths, vec![""]);
        assert!(config.global_ignore_number_type);
        assert!(config.omit_equal);
        assert_eq!(config.max_depth, 16);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig = serde_yaml::from_str("diff:\n  omit_equal: true\n").unwrap();
        assert!(config.diff.omit_equal);
        assert_eq!(config.diff.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.output.format, ReportFormat::Json);
    }

    #[test]
    fn test_filter_config_compiles() {
        let filter = FilterConfig {
            relations: vec![Relation::Add],
            path_pattern: Some("^detail".to_string()),
        };
        assert!(!filter.is_empty());
        assert!(filter.to_result_filter().is_ok());

        let bad = FilterConfig {
            relations: Vec::new(),
            path_pattern: Some("(".to_string()),
        };
        assert!(bad.to_result_filter().is_err());
        assert!(FilterConfig::default().is_empty());
    }

    #[test]
    fn test_app_config_builder() {
        let config = AppConfig::builder()
            .output_format(ReportFormat::Table)
            .fail_on_change(true)
            .relations(vec![Relation::Delete])
            .build();
        assert_eq!(config.output.format, ReportFormat::Table);
        assert!(config.behavior.fail_on_change);
        assert_eq!(config.filter.relations, vec![Relation::Delete]);
    }
}
