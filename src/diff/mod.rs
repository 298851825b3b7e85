//! Structural diff of two value trees.
//!
//! The engine walks both documents in lockstep and produces a [`DiffNode`]
//! tree mirroring their shape, one node per compared path:
//!
//! - objects are compared key by key (added, deleted, then common members)
//! - arrays of equal length are compared index by index; arrays of differing
//!   length are a single REPLACE
//! - scalars are compared by native equality, numbers optionally across
//!   int/uint/float subtypes
//!
//! A composite node is EQUAL iff every attached child is EQUAL. Suppressed
//! paths produce no node at all; with `omit_equal`, EQUAL nodes are dropped
//! after their parent's relation has been decided.
//!
//! # Example
//!
//! ```ignore
//! use json_diff_tree::config::DiffConfig;
//! use json_diff_tree::diff::compare_documents;
//!
//! let config = DiffConfig::builder().ignore_path("updated_at").build();
//! let result = compare_documents(br#"{"x":1}"#, br#"{"x":1,"y":2}"#, &config)?;
//! for change in result.as_ref().map(|r| r.leaf_changes()).unwrap_or_default() {
//!     println!("{} {}", change.relation, change.path);
//! }
//! ```

mod engine;
mod filter;
mod result;

pub use engine::DiffEngine;
pub use filter::ResultFilter;
pub use result::{DiffNode, DiffSummary, Relation};

use crate::config::DiffConfig;
use crate::error::{DocumentSide, JsonDiffError, Result};
use crate::model::{decode_bounded, DecodeError, DecodeMode, Value};

/// Decode two JSON documents and compare them.
///
/// Both sides are decoded with the variant selected by
/// `global_ignore_array_order`. A decode failure names the side that failed;
/// a document nested deeper than `max_depth` is `StructureTooDeep`.
pub fn compare_documents(
    old: &[u8],
    new: &[u8],
    config: &DiffConfig,
) -> Result<Option<DiffNode>> {
    let mode = DecodeMode::from_config(config);
    let mut old = decode_side(old, mode, config.max_depth, DocumentSide::Old)?;
    let mut new = decode_side(new, mode, config.max_depth, DocumentSide::New)?;
    DiffEngine::new(config).compare(&mut old, &mut new)
}

fn decode_side(
    bytes: &[u8],
    mode: DecodeMode,
    max_depth: usize,
    side: DocumentSide,
) -> Result<Value> {
    decode_bounded(bytes, mode, max_depth).map_err(|err| match err {
        DecodeError::Syntax(source) => JsonDiffError::decode(side, source),
        DecodeError::TooDeep { path, limit } => JsonDiffError::too_deep(path, limit),
    })
}

/// Compare two already-decoded documents.
///
/// With `global_ignore_array_order`, every array in both trees is sorted
/// first, as the sorting decoder would have done.
pub fn compare_values(
    mut old: Value,
    mut new: Value,
    config: &DiffConfig,
) -> Result<Option<DiffNode>> {
    if config.global_ignore_array_order {
        old.sort_arrays_recursive();
        new.sort_arrays_recursive();
    }
    DiffEngine::new(config).compare(&mut old, &mut new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_failure_names_side() {
        let config = DiffConfig::default();

        let err = compare_documents(b"{bad", b"{}", &config).unwrap_err();
        assert_eq!(err.failed_side(), Some(DocumentSide::Old));

        let err = compare_documents(b"{}", b"[1,", &config).unwrap_err();
        assert_eq!(err.failed_side(), Some(DocumentSide::New));
    }

    #[test]
    fn test_global_array_order_applies_while_decoding() {
        let old = br#"{"a":[3,1,2],"b":{"c":["y","x"]}}"#;
        let new = br#"{"a":[1,2,3],"b":{"c":["x","y"]}}"#;

        let strict = compare_documents(old, new, &DiffConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(strict.relation, Relation::Replace);

        let config = DiffConfig::builder().global_ignore_array_order(true).build();
        let relaxed = compare_documents(old, new, &config).unwrap().unwrap();
        assert!(relaxed.is_equal());
    }

    #[test]
    fn test_compare_values_sorts_when_order_is_global() {
        let old = Value::Array(vec![Value::Int(2), Value::Array(vec![Value::Int(4), Value::Int(3)])]);
        let new = Value::Array(vec![Value::Array(vec![Value::Int(3), Value::Int(4)]), Value::Int(2)]);
        let config = DiffConfig::builder().global_ignore_array_order(true).build();
        assert!(compare_values(old, new, &config).unwrap().unwrap().is_equal());
    }

    #[test]
    fn test_document_deeper_than_bound() {
        let config = DiffConfig::builder().max_depth(2).build();
        let err = compare_documents(br#"{"a":1}"#, br#"{"a":{"b":{"c":1}}}"#, &config).unwrap_err();
        assert!(matches!(
            err,
            JsonDiffError::StructureTooDeep { ref path, limit: 2 } if path == "a.b.c"
        ));
        assert_eq!(err.failed_side(), None);
    }

    #[test]
    fn test_compare_values() {
        let result = compare_values(Value::Int(1), Value::from("1"), &DiffConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(result.relation, Relation::Mismatch);
        assert_eq!(result.path, "");
    }
}
