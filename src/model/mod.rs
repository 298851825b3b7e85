//! Input data model.
//!
//! [`Value`] is the decoded document tree the diff engine walks; [`decode`]
//! turns raw bytes into it and [`path`] builds the string addresses used for
//! configuration lookups and result identification.

mod decode;
pub mod path;
mod value;

pub use decode::{decode, decode_bounded, DecodeError, DecodeMode};
pub use path::{array_path, object_path};
pub use value::{Map, Value, ValueType};
