use std::marker::PhantomData;

use crate::reactor::Reactor;

/// Scoped batch epoch.
///
/// Created by [`start_batch`]; dropping it closes the epoch on every exit path,
/// including `?` propagation and unwinding. Closing the outermost guard flushes
/// pending reactions. Guards are tied to the thread whose reactor they entered.
#[must_use = "dropping the guard closes the batch immediately"]
pub struct BatchGuard {
	_thread_bound: PhantomData<*const ()>,
}

impl Drop for BatchGuard {
	fn drop(&mut self) {
		Reactor::with(Reactor::close_batch);
	}
}

/// Opens a (possibly nested) batch epoch.
pub fn start_batch() -> BatchGuard {
	Reactor::with(Reactor::open_batch);
	BatchGuard {
		_thread_bound: PhantomData,
	}
}

/// Runs `f` inside one batch epoch.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
	let _guard = start_batch();
	f()
}

/// Current batch nesting depth on this thread.
pub fn batch_depth() -> u32 {
	Reactor::with(Reactor::depth)
}
