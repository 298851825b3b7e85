//! Tagged JSON value tree.
//!
//! Numbers keep their decoded subtype (signed, unsigned, float) so the diff
//! engine can tell `100` from `100.0` unless numeric coercion is enabled.
//! Objects are insertion-ordered.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Serialize, Serializer};
use std::cmp::Ordering;

/// Object representation: key order is the document order.
pub type Map = IndexMap<String, Value>;

/// Type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Null,
    Bool,
    String,
    NumberInt,
    NumberUint,
    NumberFloat,
    Array,
    Object,
}

impl ValueType {
    /// Whether this tag is one of the three numeric subtypes.
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::NumberInt | Self::NumberUint | Self::NumberFloat)
    }

    /// Whether this tag is an array or object.
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::String => "string",
            Self::NumberInt => "int",
            Self::NumberUint => "uint",
            Self::NumberFloat => "float",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Rank used by [`Value::total_cmp`]; all numbers share one rank.
    const fn order_rank(self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool => 1,
            Self::NumberInt | Self::NumberUint | Self::NumberFloat => 2,
            Self::String => 3,
            Self::Array => 4,
            Self::Object => 5,
        }
    }

    /// Tie-break between numeric subtypes holding the same double value.
    const fn number_rank(self) -> u8 {
        match self {
            Self::NumberInt => 0,
            Self::NumberUint => 1,
            _ => 2,
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A decoded JSON document node.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Null => ValueType::Null,
            Self::Bool(_) => ValueType::Bool,
            Self::String(_) => ValueType::String,
            Self::Int(_) => ValueType::NumberInt,
            Self::Uint(_) => ValueType::NumberUint,
            Self::Float(_) => ValueType::NumberFloat,
            Self::Array(_) => ValueType::Array,
            Self::Object(_) => ValueType::Object,
        }
    }

    #[must_use]
    pub const fn is_number(&self) -> bool {
        self.value_type().is_number()
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Any numeric subtype widened to double precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_number_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Uint(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Object member lookup; `None` when absent or when `self` is not an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Array element lookup by zero-based index.
    #[must_use]
    pub fn index(&self, idx: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(idx))
    }

    /// Number of elements or members; `None` for scalars.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Array(items) => Some(items.len()),
            Self::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Total order over all values, used to normalize array order.
    ///
    /// Types rank null < bool < number < string < array < object. Numbers
    /// compare by double value first, then by subtype, then exactly within a
    /// subtype. Objects compare their entries in ascending key order, so two
    /// objects differing only in key order compare equal.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        let (ta, tb) = (self.value_type(), other.value_type());
        match ta.order_rank().cmp(&tb.order_rank()) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::String(a), Self::String(b)) => a.cmp(b),
            (Self::Array(a), Self::Array(b)) => cmp_arrays(a, b),
            (Self::Object(a), Self::Object(b)) => cmp_objects(a, b),
            _ if ta.is_number() => {
                let (fa, fb) = (
                    self.as_number_f64().unwrap_or_default(),
                    other.as_number_f64().unwrap_or_default(),
                );
                fa.total_cmp(&fb)
                    .then_with(|| ta.number_rank().cmp(&tb.number_rank()))
                    .then_with(|| match (self, other) {
                        (Self::Int(a), Self::Int(b)) => a.cmp(b),
                        (Self::Uint(a), Self::Uint(b)) => a.cmp(b),
                        _ => Ordering::Equal,
                    })
            }
            // Null vs null
            _ => Ordering::Equal,
        }
    }

    /// Sort this array's own elements in place; no-op for non-arrays.
    ///
    /// Nested arrays are left in their current order.
    pub fn sort_elements(&mut self) {
        if let Self::Array(items) = self {
            items.sort_by(Self::total_cmp);
        }
    }

    /// Sort every array in this tree in place, innermost arrays first.
    pub fn sort_arrays_recursive(&mut self) {
        match self {
            Self::Array(items) => {
                for item in items.iter_mut() {
                    item.sort_arrays_recursive();
                }
                items.sort_by(Self::total_cmp);
            }
            Self::Object(map) => {
                for value in map.values_mut() {
                    value.sort_arrays_recursive();
                }
            }
            _ => {}
        }
    }
}

fn cmp_arrays(a: &[Value], b: &[Value]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.total_cmp(y) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    a.len().cmp(&b.len())
}

fn cmp_objects(a: &Map, b: &Map) -> Ordering {
    let mut a_entries: Vec<(&String, &Value)> = a.iter().collect();
    let mut b_entries: Vec<(&String, &Value)> = b.iter().collect();
    a_entries.sort_by(|x, y| x.0.cmp(y.0));
    b_entries.sort_by(|x, y| x.0.cmp(y.0));

    for ((ka, va), (kb, vb)) in a_entries.iter().zip(&b_entries) {
        match ka.cmp(kb).then_with(|| va.total_cmp(vb)) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    a_entries.len().cmp(&b_entries.len())
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Uint(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(a) => Self::Array(a.into_iter().map(Self::from).collect()),
            serde_json::Value::Object(o) => {
                Self::Object(o.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Uint(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Self::Object(map)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::String(s) => serializer.serialize_str(s),
            Self::Int(n) => serializer.serialize_i64(*n),
            Self::Uint(n) => serializer.serialize_u64(*n),
            Self::Float(n) => serializer.serialize_f64(*n),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

impl std::fmt::Display for Value {
    /// Compact JSON rendering.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| std::fmt::Error)?;
        f.write_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Value {
        Value::from(serde_json::from_str::<serde_json::Value>(s).unwrap())
    }

    #[test]
    fn test_number_subtypes() {
        assert_eq!(parse("123"), Value::Int(123));
        assert_eq!(parse("-7"), Value::Int(-7));
        assert_eq!(parse("18446744073709551615"), Value::Uint(u64::MAX));
        assert_eq!(parse("100.00"), Value::Float(100.0));
        assert_eq!(parse("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn test_object_preserves_key_order() {
        let v = parse(r#"{"z":1,"a":2,"m":3}"#);
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_accessors() {
        let v = parse(r#"{"s":"x","b":true,"arr":[1,2]}"#);
        assert_eq!(v.get("s").and_then(Value::as_str), Some("x"));
        assert_eq!(v.get("b").and_then(Value::as_bool), Some(true));
        assert_eq!(v.get("arr").and_then(Value::len), Some(2));
        assert_eq!(v.get("arr").and_then(|a| a.index(1)), Some(&Value::Int(2)));
        assert!(v.get("missing").is_none());
        assert_eq!(v.len(), Some(3));
        assert_eq!(Value::Int(1).len(), None);
    }

    #[test]
    fn test_type_rank_order() {
        let mut items = vec![
            parse(r#"{"a":1}"#),
            parse("[1]"),
            parse(r#""s""#),
            parse("3"),
            parse("true"),
            Value::Null,
        ];
        items.sort_by(Value::total_cmp);
        let types: Vec<ValueType> = items.iter().map(Value::value_type).collect();
        assert_eq!(
            types,
            vec![
                ValueType::Null,
                ValueType::Bool,
                ValueType::NumberInt,
                ValueType::String,
                ValueType::Array,
                ValueType::Object,
            ]
        );
    }

    #[test]
    fn test_numbers_order_across_subtypes() {
        let mut items = vec![Value::Float(2.5), Value::Int(3), Value::Uint(1), Value::Int(-4)];
        items.sort_by(Value::total_cmp);
        assert_eq!(
            items,
            vec![Value::Int(-4), Value::Uint(1), Value::Float(2.5), Value::Int(3)]
        );

        // Same numeric value: int before float
        assert_eq!(Value::Int(5).total_cmp(&Value::Float(5.0)), Ordering::Less);
        assert_eq!(Value::Float(5.0).total_cmp(&Value::Int(5)), Ordering::Greater);
    }

    #[test]
    fn test_large_ints_distinguished() {
        let a = Value::Int(9_007_199_254_740_993);
        let b = Value::Int(9_007_199_254_740_992);
        assert_eq!(a.total_cmp(&b), Ordering::Greater);
    }

    #[test]
    fn test_objects_compare_ignoring_key_order() {
        let a = parse(r#"{"a":1,"b":2}"#);
        let b = parse(r#"{"b":2,"a":1}"#);
        assert_eq!(a.total_cmp(&b), Ordering::Equal);
        let c = parse(r#"{"a":1,"b":3}"#);
        assert_eq!(a.total_cmp(&c), Ordering::Less);
    }

    #[test]
    fn test_sort_elements_is_shallow() {
        let mut v = parse("[[3,1],2,[2,1]]");
        v.sort_elements();
        assert_eq!(v, parse("[2,[2,1],[3,1]]"));
    }

    #[test]
    fn test_sort_arrays_recursive() {
        let mut v = parse(r#"{"k":[[3,1],2,{"x":[9,8]}]}"#);
        v.sort_arrays_recursive();
        assert_eq!(v, parse(r#"{"k":[2,[1,3],{"x":[8,9]}]}"#));
    }

    #[test]
    fn test_serialize_keeps_subtypes_and_order() {
        let v = parse(r#"{"b":1,"a":1.5,"c":[null,"x"]}"#);
        assert_eq!(v.to_string(), r#"{"b":1,"a":1.5,"c":[null,"x"]}"#);
    }
}
