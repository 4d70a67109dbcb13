//! Core types for tracked containers: values, property keys, type tags, and errors.

/// Administration errors and the result alias.
pub mod error;
/// Numeric index coercion for indexed sequences.
pub mod index;
/// Property keys, symbols, and property descriptors.
pub mod key;
/// Container type tags and generic operation names.
pub mod tag;
/// Dynamic values stored in tracked containers.
pub mod value;

pub use error::{AdminError, Result};
pub use index::{MAX_INDEX, coerce_index, coerce_write_index, lookup_index, parse_int_prefix};
pub use key::{PropertyDescriptor, PropertyKey, SymbolId};
pub use tag::{Operation, TypeTag};
pub use value::Value;
