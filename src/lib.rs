//! **Structural, path-addressed diffs of JSON documents.**
//!
//! `json-diff-tree` compares two JSON documents node by node and returns a
//! result tree that mirrors their shape. Every node carries the path it was
//! found at and one relation: `add`, `delete`, `equal`, `replace` or
//! `mismatch` (the two sides have different types).
//!
//! It classifies differences; it does not compute a minimal edit script.
//! Arrays are compared index by index, and arrays of differing length are a
//! single `replace`.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the decoded [`Value`] tree, the decoders that produce it
//!   and the path syntax (`a.b`, `a.list[#1]`, the root is `""`).
//! - **[`config`]**: [`DiffConfig`], the comparison policy: suppressed paths,
//!   order-insensitive arrays, numeric subtype coercion and omission of equal
//!   nodes. Also the YAML config file layer used by the CLI.
//! - **[`diff`]**: the [`DiffEngine`], the [`DiffNode`] result tree and
//!   post-comparison filtering.
//! - **[`reports`]**: JSON, summary and table renderings of a result tree.
//! - **[`pipeline`]**: read → diff → report orchestration used by the CLI.
//!
//! ## Comparing Two Documents
//!
//! ```
//! use json_diff_tree::{compare_documents, DiffConfig, Relation};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DiffConfig::builder()
//!         .ignore_path("meta.generated_at")
//!         .build();
//!
//!     let old = br#"{"x":1,"meta":{"generated_at":"monday"}}"#;
//!     let new = br#"{"x":1,"y":2,"meta":{"generated_at":"tuesday"}}"#;
//!
//!     let result = compare_documents(old, new, &config)?.expect("root is kept");
//!     assert_eq!(result.relation, Relation::Replace);
//!
//!     let changes = result.leaf_changes();
//!     assert_eq!(changes.len(), 1);
//!     assert_eq!(changes[0].path, "y");
//!     assert_eq!(changes[0].relation, Relation::Add);
//!     Ok(())
//! }
//! ```
//!
//! ## Numbers and Array Order
//!
//! ```
//! use json_diff_tree::{compare_documents, DiffConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let old = br#"{"price":100,"tags":["b","a"]}"#;
//!     let new = br#"{"price":100.0,"tags":["a","b"]}"#;
//!
//!     let strict = compare_documents(old, new, &DiffConfig::default())?.expect("root is kept");
//!     assert!(!strict.is_equal());
//!
//!     let relaxed = DiffConfig::builder()
//!         .global_ignore_number_type(true)
//!         .ignore_array_order_path("tags")
//!         .build();
//!     let result = compare_documents(old, new, &relaxed)?.expect("root is kept");
//!     assert!(result.is_equal());
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `json-diff-tree` binary wraps this library:
//! `json-diff-tree diff old.json new.json -o table --omit-equal`.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::struct_excessive_bools,
    // Variable names like `old`/`new` are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod reports;

// Re-export main types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigPreset, DiffConfig, DiffPolicy};
pub use config::{BehaviorConfig, FilterConfig, OutputConfig};
pub use config::{ConfigError, Validatable};
pub use diff::{
    compare_documents, compare_values, DiffEngine, DiffNode, DiffSummary, Relation, ResultFilter,
};
pub use error::{DocumentSide, JsonDiffError, Result};
pub use model::{decode, decode_bounded, DecodeError, DecodeMode, Value, ValueType};
pub use reports::{ReportFormat, ReportGenerator};
