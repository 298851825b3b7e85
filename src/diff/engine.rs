//! Structural diff engine.

use super::{DiffNode, Relation};
use crate::config::{DiffConfig, DiffPolicy};
use crate::error::{JsonDiffError, Result};
use crate::model::{array_path, object_path, Map, Value};
use indexmap::IndexMap;
use rayon::prelude::*;
use std::collections::HashMap;

/// One pending child comparison: the key it is attached under, its path and
/// the two values.
type ChildPair<'a, K> = (K, String, &'a mut Value, &'a mut Value);

/// Recursive comparator over two value trees.
///
/// The engine holds only the compiled [`DiffPolicy`]; every call owns its
/// own trees, so one engine can serve concurrent comparisons.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    policy: DiffPolicy,
}

impl DiffEngine {
    /// Create an engine for the given configuration
    #[must_use]
    pub fn new(config: &DiffConfig) -> Self {
        Self::from_policy(DiffPolicy::new(config))
    }

    #[must_use]
    pub const fn from_policy(policy: DiffPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &DiffPolicy {
        &self.policy
    }

    /// Compare two documents from the root.
    ///
    /// Arrays at order-insensitive paths are sorted in place. Returns `None`
    /// when the root is suppressed or omitted.
    pub fn compare(&self, old: &mut Value, new: &mut Value) -> Result<Option<DiffNode>> {
        self.compare_at(old, new, "")
    }

    /// Compare two subtrees as if they were found at `path`.
    pub fn compare_at(
        &self,
        old: &mut Value,
        new: &mut Value,
        path: &str,
    ) -> Result<Option<DiffNode>> {
        let result = self.compare_node(old, new, path, 0)?;
        match result {
            Some(ref node) => {
                let summary = node.summary();
                tracing::debug!(
                    "Compared '{}': {} nodes, {} leaf changes, root {}",
                    path,
                    summary.total_nodes,
                    summary.leaf_changes,
                    node.relation
                );
            }
            None => tracing::debug!("Compared '{}': root suppressed or omitted", path),
        }
        Ok(result)
    }

    fn compare_node(
        &self,
        old: &mut Value,
        new: &mut Value,
        path: &str,
        depth: usize,
    ) -> Result<Option<DiffNode>> {
        if self.policy.should_skip(path) {
            tracing::trace!("Skipping ignored path '{}'", path);
            return Ok(None);
        }
        if depth > self.policy.max_depth() {
            return Err(JsonDiffError::too_deep(path, self.policy.max_depth()));
        }

        let old_type = old.value_type();
        let new_type = new.value_type();
        let both_numbers = old_type.is_number() && new_type.is_number();

        if self.policy.ignore_number_type() && both_numbers && numbers_equal(old, new) {
            let node = DiffNode::scalar(path, Relation::Equal, Some(old.clone()), Some(new.clone()));
            return Ok(self.finish(node));
        }

        if old_type != new_type {
            // Unequal numbers of different subtypes read as a value change
            // under coercion, and as a type change without it.
            let relation = if self.policy.ignore_number_type() && both_numbers {
                Relation::Replace
            } else {
                Relation::Mismatch
            };
            let node = DiffNode::scalar(path, relation, Some(old.clone()), Some(new.clone()));
            return Ok(self.finish(node));
        }

        if matches!(old, Value::Array(_)) && self.policy.is_order_insensitive(path) {
            tracing::trace!("Sorting arrays at order-insensitive path '{}'", path);
            old.sort_elements();
            new.sort_elements();
        }

        let node = match (old, new) {
            (Value::Object(old_map), Value::Object(new_map)) => {
                self.compare_objects(old_map, new_map, path, depth)?
            }
            (Value::Array(old_items), Value::Array(new_items)) => {
                self.compare_arrays(old_items, new_items, path, depth)?
            }
            (old, new) => {
                let relation = if old == new {
                    Relation::Equal
                } else {
                    Relation::Replace
                };
                DiffNode::scalar(path, relation, Some(old.clone()), Some(new.clone()))
            }
        };
        Ok(self.finish(node))
    }

    fn compare_objects(
        &self,
        old: &mut Map,
        new: &mut Map,
        path: &str,
        depth: usize,
    ) -> Result<DiffNode> {
        let mut children = IndexMap::new();

        for (key, value) in new.iter() {
            if old.contains_key(key) {
                continue;
            }
            let child_path = object_path(path, key);
            if self.skip_child(&child_path) {
                continue;
            }
            children.insert(key.clone(), DiffNode::added(child_path, value.clone()));
        }

        for (key, value) in old.iter() {
            if new.contains_key(key) {
                continue;
            }
            let child_path = object_path(path, key);
            if self.skip_child(&child_path) {
                continue;
            }
            children.insert(key.clone(), DiffNode::deleted(child_path, value.clone()));
        }

        let mut new_members: HashMap<&str, &mut Value> =
            new.iter_mut().map(|(k, v)| (k.as_str(), v)).collect();
        let pairs: Vec<ChildPair<'_, &String>> = old
            .iter_mut()
            .filter_map(|(key, old_child)| {
                new_members
                    .remove(key.as_str())
                    .map(|new_child| (key, object_path(path, key), old_child, new_child))
            })
            .collect();

        for (key, result) in self.compare_children(pairs, depth)? {
            if let Some(node) = result {
                children.insert(key.clone(), node);
            }
        }

        Ok(DiffNode::object(path, children))
    }

    fn compare_arrays(
        &self,
        old: &mut [Value],
        new: &mut [Value],
        path: &str,
        depth: usize,
    ) -> Result<DiffNode> {
        if old.len() != new.len() {
            return Ok(DiffNode::scalar(
                path,
                Relation::Replace,
                Some(Value::Array(old.to_vec())),
                Some(Value::Array(new.to_vec())),
            ));
        }

        let pairs: Vec<ChildPair<'_, usize>> = old
            .iter_mut()
            .zip(new.iter_mut())
            .enumerate()
            .map(|(i, (o, n))| (i, array_path(path, i), o, n))
            .collect();

        let children = self
            .compare_children(pairs, depth)?
            .into_iter()
            .filter_map(|(_, result)| result)
            .collect();

        Ok(DiffNode::array(path, children))
    }

    /// Compare children in order, on the thread pool once there are enough
    /// of them. Results come back in input order.
    fn compare_children<K: Send>(
        &self,
        pairs: Vec<ChildPair<'_, K>>,
        depth: usize,
    ) -> Result<Vec<(K, Option<DiffNode>)>> {
        let compare = |(key, child_path, old, new): ChildPair<'_, K>| {
            self.compare_node(old, new, &child_path, depth + 1)
                .map(|result| (key, result))
        };

        if self.policy.fan_out(pairs.len()) {
            tracing::trace!("Comparing {} children in parallel", pairs.len());
            pairs.into_par_iter().map(compare).collect()
        } else {
            pairs.into_iter().map(compare).collect()
        }
    }

    fn skip_child(&self, path: &str) -> bool {
        let skip = self.policy.should_skip(path);
        if skip {
            tracing::trace!("Skipping ignored path '{}'", path);
        }
        skip
    }

    fn finish(&self, node: DiffNode) -> Option<DiffNode> {
        if self.policy.should_omit(Some(&node)) {
            None
        } else {
            Some(node)
        }
    }
}

/// Numeric equality after widening both sides to `f64`.
fn numbers_equal(old: &Value, new: &Value) -> bool {
    match (old.as_number_f64(), new.as_number_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{decode, DecodeMode, ValueType};

    fn parse(json: &str) -> Value {
        decode(json.as_bytes(), DecodeMode::PreserveOrder).unwrap()
    }

    fn run(old: &str, new: &str, config: &DiffConfig) -> Option<DiffNode> {
        let mut old = parse(old);
        let mut new = parse(new);
        DiffEngine::new(config).compare(&mut old, &mut new).unwrap()
    }

    fn run_default(old: &str, new: &str) -> DiffNode {
        run(old, new, &DiffConfig::default()).unwrap()
    }

    #[test]
    fn test_identical_documents_are_equal_throughout() {
        let doc = r#"{"a":[1,{"b":null}],"c":"x","d":1.5,"e":true}"#;
        let root = run_default(doc, doc);
        let mut all_equal = true;
        root.walk(|node, _| all_equal &= node.is_equal());
        assert!(all_equal);
        assert_eq!(root.summary().total_nodes, 8);
    }

    #[test]
    fn test_add_and_delete() {
        let root = run_default(r#"{"x":1}"#, r#"{"x":1,"y":2}"#);
        assert_eq!(root.relation, Relation::Replace);
        let y = root.find("y").unwrap();
        assert_eq!(y.relation, Relation::Add);
        assert_eq!(y.new, Some(Value::Int(2)));
        assert_eq!(y.old, None);

        let root = run_default(r#"{"x":1,"z":{"k":[1]}}"#, r#"{"x":1}"#);
        let z = root.find("z").unwrap();
        assert_eq!(z.relation, Relation::Delete);
        assert_eq!(z.data_type, Some(ValueType::Object));
        assert!(z.new.is_none());
        assert!(!z.is_composite());
    }

    #[test]
    fn test_object_children_discovery_order() {
        let root = run_default(r#"{"a":1,"gone":1,"b":2}"#, r#"{"b":3,"a":1,"fresh":0}"#);
        let keys: Vec<&String> = root.object_sub_result.as_ref().unwrap().keys().collect();
        assert_eq!(keys, vec!["fresh", "gone", "a", "b"]);
    }

    #[test]
    fn test_type_mismatch_keeps_both_values() {
        let root = run_default(r#"{"v":"1"}"#, r#"{"v":1}"#);
        let v = root.find("v").unwrap();
        assert_eq!(v.relation, Relation::Mismatch);
        assert_eq!(v.data_type, Some(ValueType::String));
        assert_eq!(v.old, Some(Value::from("1")));
        assert_eq!(v.new, Some(Value::Int(1)));

        let root = run_default(r#"{"v":null}"#, r#"{"v":{}}"#);
        assert_eq!(root.find("v").unwrap().relation, Relation::Mismatch);
    }

    #[test]
    fn test_numeric_coercion() {
        let lenient = DiffConfig::builder().global_ignore_number_type(true).build();

        let node = run("5", "5.0", &lenient).unwrap();
        assert_eq!(node.relation, Relation::Equal);
        assert_eq!(node.data_type, Some(ValueType::NumberInt));

        let node = run("5", "5.0", &DiffConfig::default()).unwrap();
        assert_eq!(node.relation, Relation::Mismatch);
    }

    #[test]
    fn test_unequal_numbers_of_different_subtypes() {
        let lenient = DiffConfig::builder().global_ignore_number_type(true).build();
        let node = run("5", "5.5", &lenient).unwrap();
        assert_eq!(node.relation, Relation::Replace);
        assert_eq!(node.data_type, Some(ValueType::NumberInt));

        let node = run("5", "5.5", &DiffConfig::default()).unwrap();
        assert_eq!(node.relation, Relation::Mismatch);
    }

    #[test]
    fn test_uint_and_int_coercion() {
        let lenient = DiffConfig::builder().global_ignore_number_type(true).build();
        let node = run("18446744073709551615", "1.8446744073709552e19", &lenient).unwrap();
        assert_eq!(node.relation, Relation::Equal);
        assert_eq!(node.data_type, Some(ValueType::NumberUint));
    }

    #[test]
    fn test_same_subtype_floats_are_exact() {
        let node = run_default("0.1", "0.10000000000000002");
        assert_eq!(node.relation, Relation::Replace);
        assert!(run_default("null", "null").is_equal());
    }

    #[test]
    fn test_array_length_mismatch_is_whole_replace() {
        let node = run_default("[1,2]", "[1,2,3]");
        assert_eq!(node.relation, Relation::Replace);
        assert!(node.array_sub_result.is_none());
        assert_eq!(node.data_type, Some(ValueType::Array));
        assert_eq!(node.old.as_ref().and_then(Value::len), Some(2));
        assert_eq!(node.new.as_ref().and_then(Value::len), Some(3));
    }

    #[test]
    fn test_order_insensitivity_is_scoped() {
        let node = run_default("[1,2,3]", "[3,2,1]");
        assert_eq!(node.relation, Relation::Replace);
        let children = node.array_sub_result.as_ref().unwrap();
        assert_eq!(children.len(), 3);
        assert_eq!(children[0].relation, Relation::Replace);
        assert_eq!(children[1].relation, Relation::Equal);
        assert_eq!(children[1].path, "[#2]");

        let root_unordered = DiffConfig::builder().ignore_array_order_path("").build();
        assert!(run("[1,2,3]", "[3,2,1]", &root_unordered).unwrap().is_equal());

        // The root entry does not reach nested arrays
        let node = run(r#"{"a":[1,2]}"#, r#"{"a":[2,1]}"#, &root_unordered).unwrap();
        assert_eq!(node.relation, Relation::Replace);

        let nested = DiffConfig::builder().ignore_array_order_path("a").build();
        assert!(run(r#"{"a":[1,2]}"#, r#"{"a":[2,1]}"#, &nested).unwrap().is_equal());
    }

    #[test]
    fn test_order_insensitive_sort_mutates_inputs() {
        let config = DiffConfig::builder().ignore_array_order_path("").build();
        let mut old = parse("[3,1,2]");
        let mut new = parse("[2,3,1]");
        DiffEngine::new(&config).compare(&mut old, &mut new).unwrap();
        assert_eq!(old, parse("[1,2,3]"));
        assert_eq!(new, parse("[1,2,3]"));
    }

    #[test]
    fn test_skipped_paths_vanish() {
        let config = DiffConfig::builder()
            .ignore_paths(["gone", "kept.inner", "list[#2]"])
            .build();
        let root = run(
            r#"{"kept":{"inner":1,"other":1},"list":[1,2,3]}"#,
            r#"{"gone":true,"kept":{"inner":2,"other":1},"list":[1,5,3]}"#,
            &config,
        )
        .unwrap();

        assert!(root.find("gone").is_none());
        assert!(root.find("kept.inner").is_none());
        assert!(root.find("list[#2]").is_none());
        assert!(root.is_equal());

        let list = root.find("list").unwrap();
        let paths: Vec<&str> = list.children().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["list[#1]", "list[#3]"]);
    }

    #[test]
    fn test_skipped_root() {
        let config = DiffConfig::builder().ignore_path("").build();
        assert!(run("1", "2", &config).is_none());
    }

    #[test]
    fn test_omit_equal_preserves_relations() {
        let old = r#"{"a":1,"b":{"c":1,"d":2},"e":[1,2]}"#;
        let new = r#"{"a":1,"b":{"c":1,"d":3},"e":[1,2]}"#;

        let full = run(old, new, &DiffConfig::default()).unwrap();
        let omitted = run(old, new, &DiffConfig::builder().omit_equal(true).build()).unwrap();

        assert_eq!(full.relation, omitted.relation);
        assert_eq!(full.find("b").unwrap().relation, omitted.find("b").unwrap().relation);
        assert!(omitted.find("a").is_none());
        assert!(omitted.find("e").is_none());
        assert!(omitted.find("b.c").is_none());
        assert_eq!(omitted.find("b.d").unwrap().relation, Relation::Replace);
    }

    #[test]
    fn test_end_to_end_example() {
        let old = r#"{"test":123,"a":"s1","b":100,"detail":{"arr":[1,"1",true]}}"#;
        let new = r#"{"test":123,"a":"s2","b":100.00,"detail":{"arr":[1,"1",false]}}"#;
        let config = DiffConfig::builder()
            .ignore_paths(["a", "detail.arr[#3]"])
            .global_ignore_number_type(true)
            .omit_equal(true)
            .build();

        // Everything visible is equal, so the root itself is omitted
        assert!(run(old, new, &config).is_none());

        let keep_equal = DiffConfig {
            omit_equal: false,
            ..config
        };
        let root = run(old, new, &keep_equal).unwrap();
        assert!(root.is_equal());
        assert!(root.find("a").is_none());
        assert!(root.find("detail.arr[#3]").is_none());
        assert_eq!(root.find("b").unwrap().data_type, Some(ValueType::NumberInt));
        assert_eq!(root.find("detail.arr").unwrap().children().count(), 2);
    }

    #[test]
    fn test_depth_limit() {
        let config = DiffConfig::builder().max_depth(2).build();
        let doc = r#"{"a":{"b":{"c":1}}}"#;
        let mut old = parse(doc);
        let mut new = parse(doc);
        let err = DiffEngine::new(&config)
            .compare(&mut old, &mut new)
            .unwrap_err();
        assert!(matches!(
            err,
            JsonDiffError::StructureTooDeep { ref path, limit: 2 } if path == "a.b.c"
        ));

        let shallow = DiffConfig::builder().max_depth(3).build();
        assert!(run(doc, doc, &shallow).unwrap().is_equal());
    }

    #[test]
    fn test_default_engine_compares_nested_documents() {
        let mut old = parse(r#"{"a":{"b":[1,{"c":null}]}}"#);
        let mut new = parse(r#"{"a":{"b":[1,{"c":false}]}}"#);
        let root = DiffEngine::default()
            .compare(&mut old, &mut new)
            .unwrap()
            .unwrap();
        assert_eq!(root.relation, Relation::Replace);
        assert_eq!(
            root.find("a.b[#2].c").unwrap().relation,
            Relation::Mismatch
        );
        assert_eq!(root.find("a.b[#1]").unwrap().relation, Relation::Equal);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let old = r#"{"k1":[1,2,3,4],"k2":{"x":1},"k3":"a","k4":null,"k5":[{"z":1},{"z":2}]}"#;
        let new = r#"{"k1":[1,2,4,4],"k2":{"x":2},"k3":"a","k4":0,"k5":[{"z":1},{"z":3}]}"#;

        let sequential = run(old, new, &DiffConfig::default()).unwrap();
        let parallel = run(
            old,
            new,
            &DiffConfig::builder().parallel_threshold(2).build(),
        )
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_compare_at_uses_base_path() {
        let config = DiffConfig::builder().ignore_path("root.skip").build();
        let mut old = parse(r#"{"skip":1,"keep":1}"#);
        let mut new = parse(r#"{"skip":2,"keep":1}"#);
        let node = DiffEngine::new(&config)
            .compare_at(&mut old, &mut new, "root")
            .unwrap()
            .unwrap();
        assert!(node.is_equal());
        assert_eq!(node.find("root.keep").unwrap().path, "root.keep");
    }
}
