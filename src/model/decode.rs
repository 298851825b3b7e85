//! Decoding raw document bytes into the [`Value`] tree.
//!
//! Two decoder variants exist: one keeps every array in document order, the
//! other sorts all arrays bottom-up after decoding so that element order never
//! produces a difference. Which one runs is chosen by
//! [`DiffConfig::global_ignore_array_order`](crate::config::DiffConfig).

use super::{array_path, object_path, Map, Value};
use crate::config::{DiffConfig, DEFAULT_MAX_DEPTH};
use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use std::fmt;
use thiserror::Error;

/// How a document is normalized while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodeMode {
    /// Keep arrays in document order
    #[default]
    PreserveOrder,
    /// Sort every array in the tree by [`Value::total_cmp`]
    SortArrays,
}

impl DecodeMode {
    /// Select the decoder variant requested by a diff configuration.
    #[must_use]
    pub const fn from_config(config: &DiffConfig) -> Self {
        if config.global_ignore_array_order {
            Self::SortArrays
        } else {
            Self::PreserveOrder
        }
    }
}

/// Why a document could not be turned into a [`Value`].
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not valid JSON
    #[error(transparent)]
    Syntax(#[from] serde_json::Error),

    /// A node sits deeper than the nesting bound
    #[error("nesting exceeds limit of {limit} at '{path}'")]
    TooDeep { path: String, limit: usize },
}

/// Decode a JSON document with the default nesting bound.
pub fn decode(bytes: &[u8], mode: DecodeMode) -> Result<Value, DecodeError> {
    decode_bounded(bytes, mode, DEFAULT_MAX_DEPTH)
}

/// Decode a JSON document, rejecting any node deeper than `max_depth`.
///
/// The root has depth 0. The bound replaces the JSON parser's fixed nesting
/// limit, so any syntactically valid document within `max_depth` decodes.
pub fn decode_bounded(
    bytes: &[u8],
    mode: DecodeMode,
    max_depth: usize,
) -> Result<Value, DecodeError> {
    let mut state = Nesting {
        segments: Vec::new(),
        max_depth,
        overflow: None,
    };
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();

    let decoded = NodeSeed { state: &mut state }
        .deserialize(&mut de)
        .and_then(|value| de.end().map(|()| value));
    let mut value = match decoded {
        Ok(value) => value,
        Err(err) => {
            return Err(match state.overflow {
                Some(path) => DecodeError::TooDeep {
                    path,
                    limit: max_depth,
                },
                None => DecodeError::Syntax(err),
            })
        }
    };

    if mode == DecodeMode::SortArrays {
        value.sort_arrays_recursive();
    }
    Ok(value)
}

enum Segment {
    Key(String),
    Index(usize),
}

/// Position of the decoder inside the document.
struct Nesting {
    segments: Vec<Segment>,
    max_depth: usize,
    overflow: Option<String>,
}

impl Nesting {
    fn path(&self) -> String {
        self.segments
            .iter()
            .fold(String::new(), |base, segment| match segment {
                Segment::Key(key) => object_path(&base, key),
                Segment::Index(index) => array_path(&base, *index),
            })
    }
}

struct NodeSeed<'s> {
    state: &'s mut Nesting,
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_> {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if self.state.segments.len() > self.state.max_depth {
            self.state.overflow = Some(self.state.path());
            return Err(de::Error::custom("nesting limit exceeded"));
        }
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for NodeSeed<'_> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        Ok(i64::try_from(n).map_or(Value::Uint(n), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> Result<Value, E> {
        Ok(Value::Float(n))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::String(s.to_owned()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::String(s))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        loop {
            self.state.segments.push(Segment::Index(items.len()));
            let item = seq.next_element_seed(NodeSeed {
                state: &mut *self.state,
            })?;
            self.state.segments.pop();
            match item {
                Some(item) => items.push(item),
                None => return Ok(Value::Array(items)),
            }
        }
    }

    fn visit_map<M>(self, mut map: M) -> Result<Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut members = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            self.state.segments.push(Segment::Key(key));
            let member = map.next_value_seed(NodeSeed {
                state: &mut *self.state,
            })?;
            // Pushed just above
            if let Some(Segment::Key(key)) = self.state.segments.pop() {
                members.insert(key, member);
            }
        }
        Ok(Value::Object(members))
    }
}
