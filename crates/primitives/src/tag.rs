use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed classification of the administration a container is governed by.
///
/// A tag is stamped on an administration when it is created and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
	/// Public object wrapper.
	Object,
	/// Raw object administration handed around directly.
	ObjectAdministration,
	Map,
	Set,
	/// Indexed sequence.
	Array,
	/// Single boxed value.
	Value,
}

impl TypeTag {
	/// Returns `true` for both object forms.
	#[inline]
	pub const fn is_object(self) -> bool {
		matches!(self, Self::Object | Self::ObjectAdministration)
	}

	pub const fn name(self) -> &'static str {
		match self {
			Self::Object => "object",
			Self::ObjectAdministration => "object administration",
			Self::Map => "map",
			Self::Set => "set",
			Self::Array => "array",
			Self::Value => "value",
		}
	}
}

impl fmt::Display for TypeTag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Generic operation names, carried by errors to identify what was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
	Keys,
	Values,
	Entries,
	Has,
	Get,
	Set,
	SetMany,
	Remove,
	DefineProperty,
	OwnKeys,
	InterceptReads,
}

impl Operation {
	pub const fn name(self) -> &'static str {
		match self {
			Self::Keys => "keys",
			Self::Values => "values",
			Self::Entries => "entries",
			Self::Has => "has",
			Self::Get => "get",
			Self::Set => "set",
			Self::SetMany => "set_many",
			Self::Remove => "remove",
			Self::DefineProperty => "define_property",
			Self::OwnKeys => "own_keys",
			Self::InterceptReads => "intercept_reads",
		}
	}
}

impl fmt::Display for Operation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
