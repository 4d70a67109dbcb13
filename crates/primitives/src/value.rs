use std::fmt;

use serde::{Deserialize, Serialize};

use crate::key::SymbolId;

/// A dynamic value held by a tracked container.
///
/// Values are totally ordered and hashable so they can serve as map keys and
/// set members directly. `Undefined` is the result of reading a key that is
/// not present and the fill value for auto-extended sequences.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Value {
	#[default]
	Undefined,
	Null,
	Bool(bool),
	Int(i64),
	Str(String),
	Symbol(SymbolId),
}

impl Value {
	/// Returns `true` for [`Value::Undefined`].
	#[inline]
	pub fn is_undefined(&self) -> bool {
		matches!(self, Self::Undefined)
	}

	/// Returns the string payload, if this is a [`Value::Str`].
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Str(s) => Some(s),
			_ => None,
		}
	}

	/// Returns the integer payload, if this is a [`Value::Int`].
	pub fn as_int(&self) -> Option<i64> {
		match self {
			Self::Int(n) => Some(*n),
			_ => None,
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Undefined => "undefined",
			Self::Null => "null",
			Self::Bool(_) => "boolean",
			Self::Int(_) => "number",
			Self::Str(_) => "string",
			Self::Symbol(_) => "symbol",
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Undefined => f.write_str("undefined"),
			Self::Null => f.write_str("null"),
			Self::Bool(b) => write!(f, "{b}"),
			Self::Int(n) => write!(f, "{n}"),
			Self::Str(s) => f.write_str(s),
			Self::Symbol(id) => write!(f, "Symbol({})", id.0),
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

impl From<i32> for Value {
	fn from(n: i32) -> Self {
		Self::Int(i64::from(n))
	}
}

impl From<usize> for Value {
	fn from(n: usize) -> Self {
		Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::Str(s.to_owned())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::Str(s)
	}
}

impl From<SymbolId> for Value {
	fn from(id: SymbolId) -> Self {
		Self::Symbol(id)
	}
}
