//! Post-comparison filtering of result trees.

use super::{DiffNode, Relation};
use regex::Regex;

/// Selects nodes of a result tree by relation and path.
///
/// An empty filter keeps everything. Filtering never recomputes a parent's
/// relation: ancestors of kept nodes stay in the tree as they were.
#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    /// Relations to keep (empty keeps all)
    pub relations: Vec<Relation>,
    /// Paths to keep
    pub path_pattern: Option<Regex>,
}

impl ResultFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_relations(mut self, relations: impl IntoIterator<Item = Relation>) -> Self {
        for relation in relations {
            if !self.relations.contains(&relation) {
                self.relations.push(relation);
            }
        }
        self
    }

    /// Keep only paths matching the regular expression `pattern`.
    pub fn with_path_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.path_pattern = Some(Regex::new(pattern)?);
        Ok(self)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty() && self.path_pattern.is_none()
    }

    /// Whether `node` itself is selected, ignoring its descendants.
    #[must_use]
    pub fn matches(&self, node: &DiffNode) -> bool {
        let relation_ok = self.relations.is_empty() || self.relations.contains(&node.relation);
        let path_ok = self
            .path_pattern
            .as_ref()
            .map_or(true, |re| re.is_match(&node.path));
        relation_ok && path_ok
    }
}

impl DiffNode {
    /// Copy of this tree keeping matching nodes and their ancestors.
    ///
    /// Returns `None` when nothing in the tree matches.
    #[must_use]
    pub fn filtered(&self, filter: &ResultFilter) -> Option<Self> {
        if filter.is_empty() {
            return Some(self.clone());
        }

        let self_matches = filter.matches(self);
        let mut node = self.clone_header();

        let mut kept_child = false;
        if let Some(ref members) = self.object_sub_result {
            let kept: indexmap::IndexMap<String, Self> = members
                .iter()
                .filter_map(|(key, child)| child.filtered(filter).map(|c| (key.clone(), c)))
                .collect();
            kept_child = !kept.is_empty();
            node.object_sub_result = Some(kept);
        }
        if let Some(ref elements) = self.array_sub_result {
            let kept: Vec<Self> = elements
                .iter()
                .filter_map(|child| child.filtered(filter))
                .collect();
            kept_child = !kept.is_empty();
            node.array_sub_result = Some(kept);
        }

        (self_matches || kept_child).then_some(node)
    }

    fn clone_header(&self) -> Self {
        Self {
            path: self.path.clone(),
            relation: self.relation,
            data_type: self.data_type,
            old: self.old.clone(),
            new: self.new.clone(),
            object_sub_result: None,
            array_sub_result: None,
        }
    }
}
