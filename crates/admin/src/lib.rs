//! Administrations: the per-container control objects behind tracked containers.
//!
//! Each tracked container owns exactly one administration. The administration
//! stores the data, reports reads and writes to the thread's
//! [`Reactor`](ripple_reactor::Reactor) through its atoms, and holds the read
//! interceptor slot that transforms values on their way out.
//!
//! Public wrappers ([`ObservableObject`], [`ObservableMap`], [`ObservableSet`],
//! [`ObservableArray`], [`ObservableValue`]) are cheap `Rc` handles around their
//! administration.

/// Indexed sequence administration.
pub mod array;
/// Read interception slots and teardown handles.
pub mod intercept;
/// Keyed map administration.
pub mod map;
/// Object administration with per-property value boxes.
pub mod object;
/// The administration protocol trait.
pub mod protocol;
/// Set administration.
pub mod set;
/// Single boxed value administration.
pub mod value;

use std::sync::atomic::{AtomicU64, Ordering};

pub use array::{ArrayAdministration, ObservableArray};
pub use intercept::{InterceptorSlot, ReadInterceptor, TeardownHandle};
pub use map::{MapAdministration, ObservableMap};
pub use object::{ObjectAdministration, ObservableObject};
pub use protocol::Administration;
pub use set::{ObservableSet, SetAdministration};
pub use value::{ObservableValue, ValueAdministration};

static NEXT_CONTAINER: AtomicU64 = AtomicU64::new(1);

/// Default debug name for an unnamed container, e.g. `ObservableMap@3`.
pub(crate) fn debug_name(prefix: &str) -> String {
	format!("{prefix}@{}", NEXT_CONTAINER.fetch_add(1, Ordering::Relaxed))
}
