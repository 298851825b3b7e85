//! Configuration module for json-diff-tree.
//!
//! This module provides:
//! - [`DiffConfig`], the comparison policy consumed by the engine
//! - [`DiffPolicy`], its compiled read-only form
//! - Named presets for common use cases
//! - YAML config file loading, discovery and CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use json_diff_tree::config::{AppConfig, ConfigPreset, DiffConfig};
//!
//! let config = AppConfig::from_preset(ConfigPreset::Lenient);
//!
//! let diff = DiffConfig::builder()
//!     .ignore_path("metadata.generated_at")
//!     .ignore_array_order_path("tags")
//!     .omit_equal(true)
//!     .build();
//!
//! use json_diff_tree::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.json-diff-tree.yaml` file in your project root or
//! `~/.config/json-diff-tree/`:
//!
//! ```yaml
//! diff:
//!   ignore_paths: [metadata.generated_at]
//!   global_ignore_number_type: true
//! behavior:
//!   fail_on_change: true
//! ```

mod defaults;
pub mod file;
mod policy;
mod types;
mod validation;

pub use defaults::{
    ConfigPreset, DEFAULT_MAX_DEPTH, DEFAULT_PARALLEL_THRESHOLD, MAX_SUPPORTED_DEPTH,
    STRICT_MAX_DEPTH,
};
pub use policy::DiffPolicy;
pub use types::{
    AppConfig, AppConfigBuilder, BehaviorConfig, DiffConfig, DiffConfigBuilder, DiffPaths,
    FilterConfig, OutputConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    config_search_dirs, discover_config_file, CONFIG_FILE_NAMES, generate_example_config,
    generate_full_example_config, load_config_file, load_or_default, ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and autocomplete `.json-diff-tree.yaml`.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}
