use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ripple_primitives::{TypeTag, Value};
use ripple_reactor::Atom;

use crate::debug_name;
use crate::intercept::InterceptorSlot;

/// Administration of a single boxed value.
///
/// Also used for every property of an object administration, which is what
/// makes object interception per-property.
pub struct ValueAdministration {
	atom: Atom,
	value: RefCell<Value>,
	interceptor: Rc<InterceptorSlot>,
}

impl ValueAdministration {
	pub fn new(name: impl Into<Box<str>>, value: Value) -> Self {
		Self {
			atom: Atom::new(name),
			value: RefCell::new(value),
			interceptor: InterceptorSlot::new(),
		}
	}

	#[inline]
	pub fn type_tag(&self) -> TypeTag {
		TypeTag::Value
	}

	pub fn name(&self) -> &str {
		self.atom.name()
	}

	pub fn atom(&self) -> &Atom {
		&self.atom
	}

	/// Tracked, intercepted read.
	pub fn get(&self) -> Value {
		self.atom.report_observed();
		let raw = self.value.borrow().clone();
		self.interceptor.apply(raw)
	}

	/// Untracked, unintercepted read of the stored value.
	pub(crate) fn raw(&self) -> Value {
		self.value.borrow().clone()
	}

	/// Stores `value`, reporting a change only if it differs from the current one.
	/// Returns whether the value changed.
	pub fn set(&self, value: Value) -> bool {
		{
			let mut current = self.value.borrow_mut();
			if *current == value {
				return false;
			}
			*current = value;
		}
		self.atom.report_changed();
		true
	}

	pub fn interceptor_slot(&self) -> &Rc<InterceptorSlot> {
		&self.interceptor
	}
}

impl fmt::Debug for ValueAdministration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ValueAdministration")
			.field("name", &self.name())
			.field("value", &self.value.borrow())
			.finish()
	}
}

/// Public handle to a tracked boxed value.
#[derive(Clone, Debug)]
pub struct ObservableValue(Rc<ValueAdministration>);

impl ObservableValue {
	pub fn new(value: impl Into<Value>) -> Self {
		Self::named(debug_name("ObservableValue"), value)
	}

	pub fn named(name: impl Into<Box<str>>, value: impl Into<Value>) -> Self {
		Self(Rc::new(ValueAdministration::new(name, value.into())))
	}

	pub fn from_administration(admin: Rc<ValueAdministration>) -> Self {
		Self(admin)
	}

	pub fn get(&self) -> Value {
		self.0.get()
	}

	pub fn set(&self, value: impl Into<Value>) -> bool {
		self.0.set(value.into())
	}

	pub fn administration(&self) -> &Rc<ValueAdministration> {
		&self.0
	}

	pub fn type_tag(&self) -> TypeTag {
		self.0.type_tag()
	}
}

#[cfg(test)]
mod tests;
