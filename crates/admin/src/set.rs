use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexSet;
use ripple_primitives::{Result, TypeTag, Value};
use ripple_reactor::Atom;
use rustc_hash::FxBuildHasher;

use crate::debug_name;
use crate::intercept::InterceptorSlot;
use crate::protocol::Administration;

/// Administration of an insertion-ordered set. A set's keys are its members.
pub struct SetAdministration {
	atom: Atom,
	members: RefCell<IndexSet<Value, FxBuildHasher>>,
	interceptor: Rc<InterceptorSlot>,
}

impl SetAdministration {
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			atom: Atom::new(name),
			members: RefCell::default(),
			interceptor: InterceptorSlot::new(),
		}
	}

	pub fn atom(&self) -> &Atom {
		&self.atom
	}

	pub fn len(&self) -> usize {
		self.atom.report_observed();
		self.members.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Adds `value`. Returns whether it was newly inserted.
	pub fn add(&self, value: Value) -> bool {
		if !self.members.borrow_mut().insert(value) {
			return false;
		}
		self.atom.report_changed();
		true
	}

	/// Removes `value`. Returns whether it was present.
	pub fn remove(&self, value: &Value) -> bool {
		if !self.members.borrow_mut().shift_remove(value) {
			return false;
		}
		self.atom.report_changed();
		true
	}

	/// Intercepted members in insertion order.
	pub fn values(&self) -> Vec<Value> {
		self.atom.report_observed();
		let raw: Vec<Value> = self.members.borrow().iter().cloned().collect();
		self.interceptor.apply_all(raw)
	}

	/// `(member, member)` pairs: sets have no keys independent of their values.
	pub fn entries(&self) -> Vec<(Value, Value)> {
		self.values().into_iter().map(|v| (v.clone(), v)).collect()
	}
}

impl Administration for SetAdministration {
	fn type_tag(&self) -> TypeTag {
		TypeTag::Set
	}

	fn name(&self) -> &str {
		self.atom.name()
	}

	fn get_(&self, key: &Value) -> Option<Value> {
		self.atom.report_observed();
		let raw = self.members.borrow().get(key).cloned()?;
		Some(self.interceptor.apply(raw))
	}

	fn has_(&self, key: &Value) -> bool {
		self.atom.report_observed();
		self.members.borrow().contains(key)
	}

	/// Adds `key`; the value argument is ignored because a member is its own key.
	fn set_(&self, key: Value, _value: Value) -> Result<()> {
		self.add(key);
		Ok(())
	}

	fn delete_(&self, key: &Value) -> Result<()> {
		self.remove(key);
		Ok(())
	}

	fn keys_(&self) -> Vec<Value> {
		self.values()
	}

	fn interceptor_slot(&self) -> Option<&Rc<InterceptorSlot>> {
		Some(&self.interceptor)
	}
}

impl fmt::Debug for SetAdministration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SetAdministration")
			.field("name", &self.atom.name())
			.field("members", &self.members.borrow())
			.finish()
	}
}

/// Public handle to a tracked set.
#[derive(Clone, Debug)]
pub struct ObservableSet(Rc<SetAdministration>);

impl ObservableSet {
	pub fn new() -> Self {
		Self::named(debug_name("ObservableSet"))
	}

	pub fn named(name: impl Into<Box<str>>) -> Self {
		Self(Rc::new(SetAdministration::new(name)))
	}

	pub fn from_administration(admin: Rc<SetAdministration>) -> Self {
		Self(admin)
	}

	pub fn add(&self, value: impl Into<Value>) -> bool {
		self.0.add(value.into())
	}

	pub fn has(&self, value: impl Into<Value>) -> bool {
		self.0.has_(&value.into())
	}

	pub fn remove(&self, value: impl Into<Value>) -> bool {
		self.0.remove(&value.into())
	}

	pub fn values(&self) -> Vec<Value> {
		self.0.values()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn administration(&self) -> &Rc<SetAdministration> {
		&self.0
	}

	pub fn type_tag(&self) -> TypeTag {
		self.0.type_tag()
	}
}

impl Default for ObservableSet {
	fn default() -> Self {
		Self::new()
	}
}

impl<V: Into<Value>> FromIterator<V> for ObservableSet {
	fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
		let set = Self::new();
		for v in iter {
			set.add(v);
		}
		set
	}
}

#[cfg(test)]
mod tests;
