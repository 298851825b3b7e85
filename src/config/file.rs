//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::defaults::{DEFAULT_MAX_DEPTH, DEFAULT_PARALLEL_THRESHOLD};
use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".json-diff-tree.yaml",
    ".json-diff-tree.yml",
    "json-diff-tree.yaml",
    "json-diff-tree.yml",
];

/// Directory name under the user config directory.
const CONFIG_DIR_NAME: &str = "json-diff-tree";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/json-diff-tree/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Some(path) = std::env::current_dir()
        .ok()
        .and_then(|cwd| find_config_in_dir(&cwd))
    {
        return Some(path);
    }

    if let Some(path) = find_git_root().and_then(|root| find_config_in_dir(&root)) {
        return Some(path);
    }

    if let Some(path) =
        dirs::config_dir().and_then(|dir| find_config_in_dir(&dir.join(CONFIG_DIR_NAME)))
    {
        return Some(path);
    }

    dirs::home_dir().and_then(|home| find_config_in_dir(&home))
}

/// Directories searched by [`discover_config_file`], in order.
#[must_use]
pub fn config_search_dirs() -> Vec<PathBuf> {
    let mut dirs_out = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs_out.push(cwd);
    }
    if let Some(root) = find_git_root() {
        if !dirs_out.contains(&root) {
            dirs_out.push(root);
        }
    }
    if let Some(dir) = dirs::config_dir() {
        dirs_out.push(dir.join(CONFIG_DIR_NAME));
    }
    if let Some(home) = dirs::home_dir() {
        dirs_out.push(home);
    }
    dirs_out
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => {
                tracing::debug!("Loaded config from {}", path.display());
                (config, Some(path))
            }
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Path lists are unioned; flags set in `other` win; numeric limits and
    /// optional values override only when `other` moved them off their
    /// defaults.
    pub fn merge(&mut self, other: &Self) {
        extend_unique(&mut self.diff.ignore_paths, &other.diff.ignore_paths);
        extend_unique(
            &mut self.diff.ignore_array_order_paths,
            &other.diff.ignore_array_order_paths,
        );
        if other.diff.global_ignore_array_order {
            self.diff.global_ignore_array_order = true;
        }
        if other.diff.global_ignore_number_type {
            self.diff.global_ignore_number_type = true;
        }
        if other.diff.omit_equal {
            self.diff.omit_equal = true;
        }
        if other.diff.max_depth != DEFAULT_MAX_DEPTH {
            self.diff.max_depth = other.diff.max_depth;
        }
        if other.diff.parallel_threshold != DEFAULT_PARALLEL_THRESHOLD {
            self.diff.parallel_threshold = other.diff.parallel_threshold;
        }

        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        if other.output.no_color {
            self.output.no_color = true;
        }
        if other.output.compact {
            self.output.compact = true;
        }

        if !other.filter.relations.is_empty() {
            self.filter.relations.clone_from(&other.filter.relations);
        }
        if other.filter.path_pattern.is_some() {
            self.filter.path_pattern.clone_from(&other.filter.path_pattern);
        }

        if other.behavior.fail_on_change {
            self.behavior.fail_on_change = true;
        }
        if other.behavior.quiet {
            self.behavior.quiet = true;
        }
    }
}

fn extend_unique(target: &mut Vec<String>, extra: &[String]) {
    for path in extra {
        if !target.contains(path) {
            target.push(path.clone());
        }
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file from the defaults.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        "# json-diff-tree configuration\n# Place this file at .json-diff-tree.yaml in your project root or ~/.config/json-diff-tree/\n\n{}",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r#"# json-diff-tree configuration file
# ==================================
#
# Place it at:
#   - .json-diff-tree.yaml in your project root
#   - ~/.config/json-diff-tree/json-diff-tree.yaml for global config
#
# CLI arguments always override file settings.

# Comparison policy
diff:
  # Paths left out of the comparison entirely (exact match).
  # Object members are `a.b`, array elements `a.list[#1]` (1-based).
  ignore_paths: []
  # Arrays compared without regard to element order ("" is the root)
  ignore_array_order_paths: []
  # Sort every array in both documents before comparing
  global_ignore_array_order: false
  # Treat 100, 100.0 and 1e2 as the same number
  global_ignore_number_type: false
  # Leave equal nodes out of the result
  omit_equal: false
  # Fail on documents nested deeper than this
  max_depth: 512
  # Compare children on a thread pool once a node has this many (0 = never)
  parallel_threshold: 0

# Output configuration
output:
  # Format: json, summary, table
  format: json
  # Output file path (omit for stdout)
  # file: diff.json
  no_color: false
  compact: false

# Result filtering
filter:
  # Keep only these relations: add, equal, delete, replace, mismatch
  relations: []
  # Keep only paths matching this regular expression
  # path_pattern: "^detail\\."

# Behavior flags
behavior:
  # Exit with code 1 if any difference is found
  fail_on_change: false
  # Suppress progress logging
  quiet: false
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
