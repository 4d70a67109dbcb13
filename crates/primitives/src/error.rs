use crate::key::PropertyKey;
use crate::tag::{Operation, TypeTag};
use crate::value::Value;

/// Usage errors raised by administrations and the generic operations.
///
/// Every variant signals a bug in the calling code rather than a condition to
/// branch on at runtime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminError {
	/// The container kind could not be resolved, or the operation does not
	/// apply to the resolved kind.
	#[error("{operation} is not supported on {}", kind_name(.kind))]
	UnsupportedContainerKind {
		operation: Operation,
		kind: Option<TypeTag>,
	},

	/// A negative or non-numeric index was used on an indexed sequence.
	#[error("invalid index: {key:?}")]
	InvalidIndex { key: Value },

	/// A primitive sequence write landed past the end of the sequence.
	#[error("index {index} out of bounds for length {len}")]
	IndexOutOfBounds { index: usize, len: usize },

	/// The read-interceptor slot already holds a handler.
	#[error("a read interceptor is already installed")]
	InterceptorAlreadyInstalled,

	/// Object containers are intercepted per property; none was named.
	#[error("read interception on an object requires a property name")]
	PropertyRequired,

	/// The named property does not exist on the object.
	#[error("no property {key} on object")]
	MissingProperty { key: PropertyKey },

	/// Write to a read-only property.
	#[error("property {key} is not writable")]
	NotWritable { key: PropertyKey },

	/// Delete or redefinition of a non-configurable property.
	#[error("property {key} is not configurable")]
	NotConfigurable { key: PropertyKey },
}

impl AdminError {
	/// Shorthand for [`AdminError::UnsupportedContainerKind`].
	pub fn unsupported(operation: Operation, kind: impl Into<Option<TypeTag>>) -> Self {
		Self::UnsupportedContainerKind {
			operation,
			kind: kind.into(),
		}
	}
}

fn kind_name(kind: &Option<TypeTag>) -> &'static str {
	kind.map_or("an untracked value", TypeTag::name)
}

/// Result type for administration operations.
pub type Result<T> = std::result::Result<T, AdminError>;
