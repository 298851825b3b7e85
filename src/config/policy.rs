//! Compiled comparison policy.
//!
//! A [`DiffPolicy`] is built once from a [`DiffConfig`] and answers the three
//! questions the engine asks at every node: skip this path, omit this result,
//! normalize the order of this array. It holds no mutable state and is shared
//! read-only across parallel child comparisons.

use super::DiffConfig;
use crate::diff::{DiffNode, Relation};
use std::collections::HashSet;

/// Read-only predicates over a [`DiffConfig`].
#[derive(Debug, Clone)]
pub struct DiffPolicy {
    ignore_paths: HashSet<String>,
    order_insensitive_paths: HashSet<String>,
    ignore_number_type: bool,
    omit_equal: bool,
    max_depth: usize,
    parallel_threshold: usize,
}

impl DiffPolicy {
    #[must_use]
    pub fn new(config: &DiffConfig) -> Self {
        Self {
            ignore_paths: config.ignore_paths.iter().cloned().collect(),
            order_insensitive_paths: config.ignore_array_order_paths.iter().cloned().collect(),
            ignore_number_type: config.global_ignore_number_type,
            omit_equal: config.omit_equal,
            max_depth: config.max_depth,
            parallel_threshold: config.parallel_threshold,
        }
    }

    /// Whether `path` is suppressed: no result is built for it and nothing
    /// beneath it is visited.
    #[must_use]
    pub fn should_skip(&self, path: &str) -> bool {
        self.ignore_paths.contains(path)
    }

    /// Whether a computed result stays out of the output tree.
    ///
    /// Absent results are always omitted; EQUAL results only with
    /// `omit_equal`.
    #[must_use]
    pub fn should_omit(&self, result: Option<&DiffNode>) -> bool {
        match result {
            None => true,
            Some(node) => self.omit_equal && node.relation == Relation::Equal,
        }
    }

    /// Whether the array at `path` is sorted before element-wise comparison.
    #[must_use]
    pub fn is_order_insensitive(&self, path: &str) -> bool {
        self.order_insensitive_paths.contains(path)
    }

    #[must_use]
    pub const fn ignore_number_type(&self) -> bool {
        self.ignore_number_type
    }

    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Whether `children` comparisons at one node run on the thread pool.
    #[must_use]
    pub const fn fan_out(&self, children: usize) -> bool {
        self.parallel_threshold > 0 && children >= self.parallel_threshold
    }
}

impl Default for DiffPolicy {
    fn default() -> Self {
        Self::new(&DiffConfig::default())
    }
}

impl From<&DiffConfig> for DiffPolicy {
    fn from(config: &DiffConfig) -> Self {
        Self::new(config)
    }
}
