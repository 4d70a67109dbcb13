use std::cell::RefCell;
use std::rc::Rc;

use ripple_api::{Container, ReactionHandle, Value, autorun, values};

pub fn init_tracing() {
	let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Reaction that snapshots `target`'s values on every run.
pub fn spy(target: &Container) -> (ReactionHandle, Rc<RefCell<Vec<Vec<Value>>>>) {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let handle = {
		let target = target.clone();
		let seen = Rc::clone(&seen);
		autorun("spy", move || {
			seen.borrow_mut().push(values(&target).unwrap_or_default());
		})
	};
	(handle, seen)
}
