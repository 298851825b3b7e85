//! Unified error types for json-diff-tree.
//!
//! Comparison itself never fails on differing input: suppressed paths vanish,
//! type mismatches become [`Relation::Mismatch`](crate::diff::Relation) nodes.
//! The errors here cover decoding, structural limits and the outer layers
//! (configuration and IO).

use std::path::PathBuf;
use thiserror::Error;

/// Which of the two compared documents an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSide {
    /// The baseline document
    Old,
    /// The document compared against the baseline
    New,
}

impl DocumentSide {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }
}

impl std::fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Main error type for json-diff-tree operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum JsonDiffError {
    /// One of the two inputs is not valid JSON
    #[error("Failed to decode {side} document: {source}")]
    Decode {
        side: DocumentSide,
        #[source]
        source: serde_json::Error,
    },

    /// Nesting exceeded the configured recursion bound
    #[error("Structure too deep at '{path}': nesting exceeds limit of {limit}")]
    StructureTooDeep { path: String, limit: usize },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for json-diff-tree operations
pub type Result<T> = std::result::Result<T, JsonDiffError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl JsonDiffError {
    /// Create a decode error for one side of the comparison
    pub const fn decode(side: DocumentSide, source: serde_json::Error) -> Self {
        Self::Decode { side, source }
    }

    /// Create a recursion limit error
    pub fn too_deep(path: impl Into<String>, limit: usize) -> Self {
        Self::StructureTooDeep {
            path: path.into(),
            limit,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// The side that failed to decode, if this is a decode error
    #[must_use]
    pub const fn failed_side(&self) -> Option<DocumentSide> {
        match self {
            Self::Decode { side, .. } => Some(*side),
            _ => None,
        }
    }
}
