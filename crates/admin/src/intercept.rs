use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use ripple_primitives::{AdminError, Result, Value};
use tracing::debug;

/// Hook applied to every value read through an administration.
pub type ReadInterceptor = Rc<dyn Fn(Value) -> Value>;

/// Single-slot interceptor store owned by one administration.
///
/// At most one interceptor is live at a time; installing over an occupied slot
/// fails instead of replacing. Writes are never intercepted.
#[derive(Default)]
pub struct InterceptorSlot {
	handler: RefCell<Option<ReadInterceptor>>,
}

impl InterceptorSlot {
	pub fn new() -> Rc<Self> {
		Rc::default()
	}

	#[inline]
	pub fn is_installed(&self) -> bool {
		self.handler.borrow().is_some()
	}

	/// Installs `handler`, returning the handle that removes it.
	///
	/// # Errors
	///
	/// [`AdminError::InterceptorAlreadyInstalled`] if the slot is occupied.
	pub fn install(self: &Rc<Self>, handler: ReadInterceptor) -> Result<TeardownHandle> {
		{
			let mut slot = self.handler.borrow_mut();
			if slot.is_some() {
				return Err(AdminError::InterceptorAlreadyInstalled);
			}
			*slot = Some(handler);
		}
		debug!("read interceptor installed");
		Ok(TeardownHandle {
			slot: Rc::downgrade(self),
			spent: Cell::new(false),
		})
	}

	/// Passes a raw stored value through the installed interceptor, if any.
	pub fn apply(&self, raw: Value) -> Value {
		// Clone the handler out so it may itself read through this slot.
		let handler = self.handler.borrow().clone();
		match handler {
			Some(handler) => handler(raw),
			None => raw,
		}
	}

	pub fn apply_all(&self, raw: Vec<Value>) -> Vec<Value> {
		let handler = self.handler.borrow().clone();
		match handler {
			Some(handler) => raw.into_iter().map(|v| handler(v)).collect(),
			None => raw,
		}
	}

	fn clear(&self) {
		self.handler.borrow_mut().take();
	}
}

impl fmt::Debug for InterceptorSlot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("InterceptorSlot")
			.field("installed", &self.is_installed())
			.finish()
	}
}

/// One-shot capability that clears the interceptor it was returned for.
///
/// Holds a non-owning reference to the slot: the handle never keeps an
/// administration alive, and tearing down after the administration is gone is
/// a no-op.
pub struct TeardownHandle {
	slot: Weak<InterceptorSlot>,
	spent: Cell<bool>,
}

impl TeardownHandle {
	/// Clears the slot. Only the first call has an effect.
	pub fn teardown(&self) {
		if self.spent.replace(true) {
			return;
		}
		if let Some(slot) = self.slot.upgrade() {
			slot.clear();
			debug!("read interceptor removed");
		}
	}

	/// Returns `true` once [`teardown`](Self::teardown) has been called.
	pub fn is_spent(&self) -> bool {
		self.spent.get()
	}
}

impl fmt::Debug for TeardownHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TeardownHandle")
			.field("spent", &self.spent.get())
			.field("attached", &(self.slot.strong_count() > 0))
			.finish()
	}
}
