use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Unique symbol identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SymbolId(pub u32);

/// A property key on an object container: either a string or a symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PropertyKey {
	String(String),
	Symbol(SymbolId),
}

impl PropertyKey {
	/// Converts an arbitrary value into a property key.
	///
	/// Symbols stay symbols; every other value is keyed by its display form,
	/// so `Int(1)` and `Str("1")` name the same property.
	pub fn from_value(value: &Value) -> Self {
		match value {
			Value::Symbol(id) => Self::Symbol(*id),
			Value::Str(s) => Self::String(s.clone()),
			other => Self::String(other.to_string()),
		}
	}

	/// Returns this key as a value, as seen by enumeration.
	pub fn to_value(&self) -> Value {
		match self {
			Self::String(s) => Value::Str(s.clone()),
			Self::Symbol(id) => Value::Symbol(*id),
		}
	}

	#[inline]
	pub fn is_symbol(&self) -> bool {
		matches!(self, Self::Symbol(_))
	}
}

impl fmt::Display for PropertyKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::String(s) => f.write_str(s),
			Self::Symbol(id) => write!(f, "Symbol({})", id.0),
		}
	}
}

impl From<&str> for PropertyKey {
	fn from(s: &str) -> Self {
		Self::String(s.to_owned())
	}
}

impl From<String> for PropertyKey {
	fn from(s: String) -> Self {
		Self::String(s)
	}
}

impl From<SymbolId> for PropertyKey {
	fn from(id: SymbolId) -> Self {
		Self::Symbol(id)
	}
}

/// A (possibly partial) data property descriptor.
///
/// Absent fields mean "unspecified": when defining a new property they default
/// to `Undefined` / `false`, when redefining an existing one they keep the
/// current setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
	pub value: Option<Value>,
	pub writable: Option<bool>,
	pub enumerable: Option<bool>,
	pub configurable: Option<bool>,
}

impl PropertyDescriptor {
	/// A fully specified writable, enumerable, configurable data descriptor.
	pub fn data(value: impl Into<Value>) -> Self {
		Self {
			value: Some(value.into()),
			writable: Some(true),
			enumerable: Some(true),
			configurable: Some(true),
		}
	}

	/// A fully specified read-only, non-enumerable, non-configurable descriptor.
	pub fn frozen(value: impl Into<Value>) -> Self {
		Self {
			value: Some(value.into()),
			writable: Some(false),
			enumerable: Some(false),
			configurable: Some(false),
		}
	}

	pub fn with_value(mut self, value: impl Into<Value>) -> Self {
		self.value = Some(value.into());
		self
	}

	pub fn with_writable(mut self, writable: bool) -> Self {
		self.writable = Some(writable);
		self
	}

	pub fn with_enumerable(mut self, enumerable: bool) -> Self {
		self.enumerable = Some(enumerable);
		self
	}

	pub fn with_configurable(mut self, configurable: bool) -> Self {
		self.configurable = Some(configurable);
		self
	}
}
