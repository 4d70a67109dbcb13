//! Generic operations over tracked containers.
//!
//! Every operation takes a [`Container`], resolves its [`TypeTag`] once, and
//! dispatches to the matching administration:
//!
//! | operation | object | map | set | array |
//! |-----------|--------|-----|-----|-------|
//! | [`keys`] | enumerable keys | keys | members | `0..len` |
//! | [`values`] | property reads | `get_` per key | members | copy |
//! | [`entries`] | `(key, value)` | `(key, value)` | `(member, member)` | `(index, value)` |
//! | [`has`] | own property | membership | membership | bounds check |
//! | [`get`] | property read | map read | member | index read |
//! | [`set`] | property write | insert | add key | auto-extending write |
//! | [`remove`] | delete | delete | delete | splice one |
//!
//! [`define_property`] and [`own_keys`] apply to objects only.
//! [`set_many`] wraps one [`set`] per entry in a single batch so observers see
//! one coalesced change. [`intercept_reads`] installs a read interceptor.
//!
//! Values read through any of these pass through installed interceptors.

mod container;
mod intercept;
mod ops;

pub use container::Container;
pub use intercept::intercept_reads;
pub use ops::{define_property, entries, get, has, keys, own_keys, remove, set, set_many, values};
pub use ripple_admin::{
	ObservableArray, ObservableMap, ObservableObject, ObservableSet, ObservableValue,
	TeardownHandle,
};
pub use ripple_primitives::{
	AdminError, Operation, PropertyDescriptor, PropertyKey, Result, SymbolId, TypeTag, Value,
};
pub use ripple_reactor::{ReactionHandle, autorun, batch, batch_depth, start_batch};
