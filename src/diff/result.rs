//! Diff result structures.

use crate::model::{Value, ValueType};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Classification of one compared node.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Present only in the new document
    Add,
    /// Unchanged
    Equal,
    /// Present only in the old document
    Delete,
    /// Same type, different value
    Replace,
    /// The two sides have different types
    Mismatch,
}

impl Relation {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Equal => "equal",
            Self::Delete => "delete",
            Self::Replace => "replace",
            Self::Mismatch => "mismatch",
        }
    }

    /// One-character marker used by the text reports.
    #[must_use]
    pub const fn marker(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Equal => '=',
            Self::Delete => '-',
            Self::Replace => '~',
            Self::Mismatch => '!',
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Add,
            Self::Equal,
            Self::Delete,
            Self::Replace,
            Self::Mismatch,
        ]
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the result tree.
///
/// Exactly one of the scalar pair (`old`/`new`), `object_sub_result` and
/// `array_sub_result` carries the node's information:
///
/// - Object nodes hold their children keyed by member name.
/// - Array nodes of equal length hold their children in index order. Skipped
///   and omitted elements leave no entry; each child's `path` names its index.
/// - Every other node (scalars, ADD/DELETE, MISMATCH, arrays of differing
///   length) holds whole values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[must_use]
pub struct DiffNode {
    /// Address of this node in both documents
    pub path: String,
    /// Classification of this node
    pub relation: Relation,
    /// Resolved type (the old side's, except for ADD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_type: Option<ValueType>,
    /// Value in the old document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<Value>,
    /// Value in the new document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<Value>,
    /// Children of an object node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_sub_result: Option<IndexMap<String, DiffNode>>,
    /// Children of an array node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_sub_result: Option<Vec<DiffNode>>,
}

impl DiffNode {
    /// A node carrying whole values and no children.
    ///
    /// The type is taken from `old` when present, otherwise from `new`.
    pub fn scalar(
        path: impl Into<String>,
        relation: Relation,
        old: Option<Value>,
        new: Option<Value>,
    ) -> Self {
        let data_type = old.as_ref().or(new.as_ref()).map(Value::value_type);
        Self {
            path: path.into(),
            relation,
            data_type,
            old,
            new,
            object_sub_result: None,
            array_sub_result: None,
        }
    }

    /// A member present only in the new document.
    pub fn added(path: impl Into<String>, value: Value) -> Self {
        Self::scalar(path, Relation::Add, None, Some(value))
    }

    /// A member present only in the old document.
    pub fn deleted(path: impl Into<String>, value: Value) -> Self {
        Self::scalar(path, Relation::Delete, Some(value), None)
    }

    /// An object node; EQUAL iff every attached child is EQUAL.
    pub fn object(path: impl Into<String>, children: IndexMap<String, Self>) -> Self {
        let relation = aggregate(children.values());
        Self {
            path: path.into(),
            relation,
            data_type: Some(ValueType::Object),
            old: None,
            new: None,
            object_sub_result: Some(children),
            array_sub_result: None,
        }
    }

    /// An array node of matching length; EQUAL iff every attached child is
    /// EQUAL.
    pub fn array(path: impl Into<String>, children: Vec<Self>) -> Self {
        let relation = aggregate(children.iter());
        Self {
            path: path.into(),
            relation,
            data_type: Some(ValueType::Array),
            old: None,
            new: None,
            object_sub_result: None,
            array_sub_result: Some(children),
        }
    }

    #[must_use]
    pub fn is_equal(&self) -> bool {
        self.relation == Relation::Equal
    }

    /// Whether this node has a child container (object or same-length array).
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        self.object_sub_result.is_some() || self.array_sub_result.is_some()
    }

    /// Attached children, in output order.
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        self.object_sub_result
            .iter()
            .flat_map(IndexMap::values)
            .chain(self.array_sub_result.iter().flatten())
    }

    /// Visit every node depth-first, parents before children. The root has
    /// depth 0.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&Self, usize),
    {
        self.walk_inner(0, &mut visit);
    }

    fn walk_inner<F>(&self, depth: usize, visit: &mut F)
    where
        F: FnMut(&Self, usize),
    {
        visit(self, depth);
        for child in self.children() {
            child.walk_inner(depth + 1, visit);
        }
    }

    /// Find a node by its exact path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Self> {
        if self.path == path {
            return Some(self);
        }
        self.children().find_map(|child| child.find(path))
    }

    /// Non-EQUAL nodes without children, depth-first.
    #[must_use]
    pub fn leaf_changes(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_leaf_changes(&mut out);
        out
    }

    fn collect_leaf_changes<'a>(&'a self, out: &mut Vec<&'a Self>) {
        if self.is_composite() {
            for child in self.children() {
                child.collect_leaf_changes(out);
            }
        } else if !self.is_equal() {
            out.push(self);
        }
    }

    /// Counts over every node in this tree.
    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        self.walk(|node, depth| {
            summary.record(node.relation);
            summary.max_depth = summary.max_depth.max(depth);
            if !node.is_composite() && !node.is_equal() {
                summary.leaf_changes += 1;
            }
        });
        summary
    }
}

fn aggregate<'a>(mut children: impl Iterator<Item = &'a DiffNode>) -> Relation {
    if children.all(DiffNode::is_equal) {
        Relation::Equal
    } else {
        Relation::Replace
    }
}

/// Per-relation counts over a result tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub struct DiffSummary {
    /// Nodes in the tree
    pub total_nodes: usize,
    pub added: usize,
    pub equal: usize,
    pub deleted: usize,
    pub replaced: usize,
    pub mismatched: usize,
    /// Non-EQUAL nodes without children
    pub leaf_changes: usize,
    /// Deepest node, with the root at 0
    pub max_depth: usize,
}

impl DiffSummary {
    fn record(&mut self, relation: Relation) {
        self.total_nodes += 1;
        match relation {
            Relation::Add => self.added += 1,
            Relation::Equal => self.equal += 1,
            Relation::Delete => self.deleted += 1,
            Relation::Replace => self.replaced += 1,
            Relation::Mismatch => self.mismatched += 1,
        }
    }

    /// Count for one relation.
    #[must_use]
    pub const fn count(&self, relation: Relation) -> usize {
        match relation {
            Relation::Add => self.added,
            Relation::Equal => self.equal,
            Relation::Delete => self.deleted,
            Relation::Replace => self.replaced,
            Relation::Mismatch => self.mismatched,
        }
    }

    /// Whether any node differs.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        self.leaf_changes > 0
    }
}
