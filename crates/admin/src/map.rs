use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use ripple_primitives::{Result, TypeTag, Value};
use ripple_reactor::{Atom, start_batch};
use rustc_hash::FxBuildHasher;

use crate::debug_name;
use crate::intercept::InterceptorSlot;
use crate::protocol::Administration;

/// Administration of an insertion-ordered key/value map.
pub struct MapAdministration {
	atom: Atom,
	entries: RefCell<IndexMap<Value, Value, FxBuildHasher>>,
	interceptor: Rc<InterceptorSlot>,
}

impl MapAdministration {
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			atom: Atom::new(name),
			entries: RefCell::default(),
			interceptor: InterceptorSlot::new(),
		}
	}

	pub fn atom(&self) -> &Atom {
		&self.atom
	}

	pub fn len(&self) -> usize {
		self.atom.report_observed();
		self.entries.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Inserts or updates `key`. Returns whether the map changed.
	pub fn insert(&self, key: Value, value: Value) -> bool {
		{
			let mut entries = self.entries.borrow_mut();
			if entries.get(&key) == Some(&value) {
				return false;
			}
			entries.insert(key, value);
		}
		self.atom.report_changed();
		true
	}

	/// Removes `key`, preserving the order of the remaining entries.
	pub fn remove(&self, key: &Value) -> Option<Value> {
		let removed = self.entries.borrow_mut().shift_remove(key)?;
		self.atom.report_changed();
		Some(self.interceptor.apply(removed))
	}

	pub fn clear(&self) {
		let had_entries = {
			let mut entries = self.entries.borrow_mut();
			let had_entries = !entries.is_empty();
			entries.clear();
			had_entries
		};
		if had_entries {
			self.atom.report_changed();
		}
	}

	/// Intercepted values in key order.
	pub fn values(&self) -> Vec<Value> {
		self.atom.report_observed();
		let raw: Vec<Value> = self.entries.borrow().values().cloned().collect();
		self.interceptor.apply_all(raw)
	}

	/// `(key, value)` pairs in key order, values intercepted.
	pub fn entries(&self) -> Vec<(Value, Value)> {
		self.atom.report_observed();
		let raw: Vec<(Value, Value)> = self
			.entries
			.borrow()
			.iter()
			.map(|(k, v)| (k.clone(), v.clone()))
			.collect();
		raw.into_iter()
			.map(|(k, v)| (k, self.interceptor.apply(v)))
			.collect()
	}

	/// Replaces the whole content as one change.
	pub fn replace<I>(&self, entries: I)
	where
		I: IntoIterator<Item = (Value, Value)>,
	{
		let _batch = start_batch();
		self.clear();
		for (k, v) in entries {
			self.insert(k, v);
		}
	}
}

impl Administration for MapAdministration {
	fn type_tag(&self) -> TypeTag {
		TypeTag::Map
	}

	fn name(&self) -> &str {
		self.atom.name()
	}

	fn get_(&self, key: &Value) -> Option<Value> {
		self.atom.report_observed();
		let raw = self.entries.borrow().get(key).cloned()?;
		Some(self.interceptor.apply(raw))
	}

	fn has_(&self, key: &Value) -> bool {
		self.atom.report_observed();
		self.entries.borrow().contains_key(key)
	}

	fn set_(&self, key: Value, value: Value) -> Result<()> {
		self.insert(key, value);
		Ok(())
	}

	fn delete_(&self, key: &Value) -> Result<()> {
		self.remove(key);
		Ok(())
	}

	fn keys_(&self) -> Vec<Value> {
		self.atom.report_observed();
		self.entries.borrow().keys().cloned().collect()
	}

	fn interceptor_slot(&self) -> Option<&Rc<InterceptorSlot>> {
		Some(&self.interceptor)
	}
}

impl fmt::Debug for MapAdministration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MapAdministration")
			.field("name", &self.atom.name())
			.field("entries", &self.entries.borrow())
			.finish()
	}
}

/// Public handle to a tracked map.
#[derive(Clone, Debug)]
pub struct ObservableMap(Rc<MapAdministration>);

impl ObservableMap {
	pub fn new() -> Self {
		Self::named(debug_name("ObservableMap"))
	}

	pub fn named(name: impl Into<Box<str>>) -> Self {
		Self(Rc::new(MapAdministration::new(name)))
	}

	pub fn from_administration(admin: Rc<MapAdministration>) -> Self {
		Self(admin)
	}

	pub fn get(&self, key: impl Into<Value>) -> Option<Value> {
		self.0.get_(&key.into())
	}

	pub fn has(&self, key: impl Into<Value>) -> bool {
		self.0.has_(&key.into())
	}

	pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) -> bool {
		self.0.insert(key.into(), value.into())
	}

	pub fn remove(&self, key: impl Into<Value>) -> Option<Value> {
		self.0.remove(&key.into())
	}

	pub fn keys(&self) -> Vec<Value> {
		self.0.keys_()
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

	pub fn administration(&self) -> &Rc<MapAdministration> {
		&self.0
	}

	pub fn type_tag(&self) -> TypeTag {
		self.0.type_tag()
	}
}

impl Default for ObservableMap {
	fn default() -> Self {
		Self::new()
	}
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for ObservableMap {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let map = Self::new();
		for (k, v) in iter {
			map.insert(k, v);
		}
		map
	}
}
