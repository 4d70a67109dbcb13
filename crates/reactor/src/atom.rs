use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::batch::start_batch;
use crate::reactor::Reactor;

static NEXT_ATOM: AtomicU64 = AtomicU64::new(1);

/// Process-unique atom identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AtomId(u64);

impl fmt::Display for AtomId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "atom#{}", self.0)
	}
}

/// A change source owned by one administration.
///
/// Administrations call [`report_observed`](Self::report_observed) on every
/// read and [`report_changed`](Self::report_changed) on every write; the
/// reactor turns those into dependency edges and scheduled reactions.
pub struct Atom {
	id: AtomId,
	name: Box<str>,
}

impl Atom {
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			id: AtomId(NEXT_ATOM.fetch_add(1, Ordering::Relaxed)),
			name: name.into(),
		}
	}

	#[inline]
	pub fn id(&self) -> AtomId {
		self.id
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Records this atom as a dependency of the reaction currently tracking, if any.
	pub fn report_observed(&self) {
		Reactor::with(|r| r.report_observed(self.id));
	}

	/// Schedules every reaction observing this atom.
	///
	/// The schedule is opened and closed as its own batch, so outside any
	/// enclosing batch the observers run before this returns.
	pub fn report_changed(&self) {
		let _batch = start_batch();
		let scheduled = Reactor::with(|r| r.schedule_observers(self.id));
		trace!(atom = %self.name, id = %self.id, scheduled, "atom changed");
	}
}

impl fmt::Debug for Atom {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Atom")
			.field("id", &self.id)
			.field("name", &self.name)
			.finish()
	}
}

impl Drop for Atom {
	fn drop(&mut self) {
		Reactor::try_with(|r| r.forget_atom(self.id));
	}
}
