use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use ripple_primitives::{AdminError, Result, TypeTag, Value, coerce_index, lookup_index};
use ripple_reactor::Atom;

use crate::debug_name;
use crate::intercept::InterceptorSlot;
use crate::protocol::Administration;

/// Administration of a contiguous indexed sequence.
pub struct ArrayAdministration {
	atom: Atom,
	values: RefCell<Vec<Value>>,
	interceptor: Rc<InterceptorSlot>,
}

impl ArrayAdministration {
	pub fn new(name: impl Into<Box<str>>, values: Vec<Value>) -> Self {
		Self {
			atom: Atom::new(name),
			values: RefCell::new(values),
			interceptor: InterceptorSlot::new(),
		}
	}

	pub fn atom(&self) -> &Atom {
		&self.atom
	}

	pub fn len(&self) -> usize {
		self.atom.report_observed();
		self.values.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Grows (filling with [`Value::Undefined`]) or truncates to `len`.
	pub fn set_len(&self, len: usize) {
		{
			let mut values = self.values.borrow_mut();
			if values.len() == len {
				return;
			}
			values.resize(len, Value::Undefined);
		}
		self.atom.report_changed();
	}

	/// Tracked, intercepted read of `index`.
	pub fn get(&self, index: usize) -> Option<Value> {
		self.atom.report_observed();
		let raw = self.values.borrow().get(index).cloned()?;
		Some(self.interceptor.apply(raw))
	}

	/// Writes `index`.
	///
	/// An index equal to the length appends. Anything further out fails; use
	/// [`set_len`](Self::set_len) to grow the sequence first.
	pub fn set(&self, index: usize, value: Value) -> Result<()> {
		{
			let mut values = self.values.borrow_mut();
			let len = values.len();
			match index.cmp(&len) {
				std::cmp::Ordering::Less => {
					if values[index] == value {
						return Ok(());
					}
					values[index] = value;
				}
				std::cmp::Ordering::Equal => values.push(value),
				std::cmp::Ordering::Greater => {
					return Err(AdminError::IndexOutOfBounds { index, len });
				}
			}
		}
		self.atom.report_changed();
		Ok(())
	}

	pub fn push(&self, value: Value) {
		self.values.borrow_mut().push(value);
		self.atom.report_changed();
	}

	/// Removes `delete_count` values at `start` and inserts `items` in their
	/// place, reported as a single change.
	///
	/// `start` is clamped to the length. Returns the removed values, intercepted.
	pub fn splice(&self, start: usize, delete_count: usize, items: Vec<Value>) -> Vec<Value> {
		let removed: Vec<Value> = {
			let mut values = self.values.borrow_mut();
			let start = start.min(values.len());
			let end = start.saturating_add(delete_count).min(values.len());
			if start == end && items.is_empty() {
				return Vec::new();
			}
			values.splice(start..end, items).collect()
		};
		self.atom.report_changed();
		self.interceptor.apply_all(removed)
	}

	/// Disconnected, intercepted copy of the whole sequence.
	pub fn to_vec(&self) -> Vec<Value> {
		self.atom.report_observed();
		let raw = self.values.borrow().clone();
		self.interceptor.apply_all(raw)
	}
}

impl Administration for ArrayAdministration {
	fn type_tag(&self) -> TypeTag {
		TypeTag::Array
	}

	fn name(&self) -> &str {
		self.atom.name()
	}

	/// Reads use whole-number keys only; `"2px"` is never an index.
	fn get_(&self, key: &Value) -> Option<Value> {
		let index = lookup_index(key)?;
		self.get(index)
	}

	fn has_(&self, key: &Value) -> bool {
		match lookup_index(key) {
			Some(index) => index < self.len(),
			None => false,
		}
	}

	fn set_(&self, key: Value, value: Value) -> Result<()> {
		self.set(coerce_index(&key)?, value)
	}

	fn delete_(&self, key: &Value) -> Result<()> {
		self.splice(coerce_index(key)?, 1, Vec::new());
		Ok(())
	}

	fn keys_(&self) -> Vec<Value> {
		(0..self.len()).map(Value::from).collect()
	}

	fn interceptor_slot(&self) -> Option<&Rc<InterceptorSlot>> {
		Some(&self.interceptor)
	}
}

impl fmt::Debug for ArrayAdministration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ArrayAdministration")
			.field("name", &self.atom.name())
			.field("values", &self.values.borrow())
			.finish()
	}
}

/// Public handle to a tracked indexed sequence.
#[derive(Clone, Debug)]
pub struct ObservableArray(Rc<ArrayAdministration>);

impl ObservableArray {
	pub fn new() -> Self {
		Self::from_values(Vec::new())
	}

	pub fn from_values(values: Vec<Value>) -> Self {
		Self::named(debug_name("ObservableArray"), values)
	}

	pub fn named(name: impl Into<Box<str>>, values: Vec<Value>) -> Self {
		Self(Rc::new(ArrayAdministration::new(name, values)))
	}

	pub fn from_administration(admin: Rc<ArrayAdministration>) -> Self {
		Self(admin)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<Value> {
		self.0.get(index)
	}

	pub fn set(&self, index: usize, value: impl Into<Value>) -> Result<()> {
		self.0.set(index, value.into())
	}

	pub fn push(&self, value: impl Into<Value>) {
		self.0.push(value.into());
	}

	pub fn splice(&self, start: usize, delete_count: usize, items: Vec<Value>) -> Vec<Value> {
		self.0.splice(start, delete_count, items)
	}

	pub fn to_vec(&self) -> Vec<Value> {
		self.0.to_vec()
	}

	pub fn administration(&self) -> &Rc<ArrayAdministration> {
		&self.0
	}

	pub fn type_tag(&self) -> TypeTag {
		self.0.type_tag()
	}
}

impl Default for ObservableArray {
	fn default() -> Self {
		Self::new()
	}
}

impl<V: Into<Value>> FromIterator<V> for ObservableArray {
	fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
		Self::from_values(iter.into_iter().map(Into::into).collect())
	}
}
