use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use ripple_primitives::{AdminError, PropertyDescriptor, PropertyKey, Result, TypeTag, Value};
use ripple_reactor::{Atom, start_batch};
use rustc_hash::FxBuildHasher;
use tracing::trace;

use crate::debug_name;
use crate::protocol::Administration;
use crate::value::ValueAdministration;

/// One own property: a tracked value box plus its attribute flags.
struct Property {
	value: Rc<ValueAdministration>,
	writable: bool,
	enumerable: bool,
	configurable: bool,
}

impl Property {
	/// Whether every attribute `descriptor` specifies already matches.
	fn matches(&self, descriptor: &PropertyDescriptor, current: &Value) -> bool {
		descriptor.value.as_ref().is_none_or(|v| v == current)
			&& descriptor.writable.is_none_or(|w| w == self.writable)
			&& descriptor.enumerable.is_none_or(|e| e == self.enumerable)
			&& descriptor.configurable.is_none_or(|c| c == self.configurable)
	}
}

/// Administration of an object container.
///
/// Properties keep insertion order. Each property value lives in its own
/// [`ValueAdministration`], so reads of one property are tracked (and
/// intercepted) independently of the others; the `keys` atom covers the
/// property set itself.
pub struct ObjectAdministration {
	name: Box<str>,
	keys: Atom,
	properties: RefCell<IndexMap<PropertyKey, Property, FxBuildHasher>>,
}

impl ObjectAdministration {
	pub fn new(name: impl Into<Box<str>>) -> Self {
		let name = name.into();
		Self {
			keys: Atom::new(format!("{name}.keys")),
			name,
			properties: RefCell::default(),
		}
	}

	/// The atom reporting structural changes (properties added, removed, or
	/// redefined).
	pub fn keys_atom(&self) -> &Atom {
		&self.keys
	}

	/// The per-property administration, which owns that property's
	/// interceptor slot.
	pub fn property_administration(&self, key: &PropertyKey) -> Option<Rc<ValueAdministration>> {
		self.properties
			.borrow()
			.get(key)
			.map(|p| Rc::clone(&p.value))
	}

	/// Own keys in enumeration order: string keys in insertion order, then symbols.
	fn ordered_keys(&self, enumerable_only: bool) -> Vec<PropertyKey> {
		let properties = self.properties.borrow();
		let visible = properties
			.iter()
			.filter(|(_, p)| !enumerable_only || p.enumerable);
		let (mut strings, symbols): (Vec<_>, Vec<_>) = visible
			.map(|(k, _)| k.clone())
			.partition(|k| !k.is_symbol());
		if !enumerable_only {
			strings.extend(symbols);
		}
		strings
	}

	fn add_property(&self, key: PropertyKey, value: Value, descriptor: &PropertyDescriptor) {
		let property = Property {
			value: Rc::new(ValueAdministration::new(format!("{}.{key}", self.name), value)),
			writable: descriptor.writable.unwrap_or(false),
			enumerable: descriptor.enumerable.unwrap_or(false),
			configurable: descriptor.configurable.unwrap_or(false),
		};
		trace!(object = %self.name, %key, "property added");
		self.properties.borrow_mut().insert(key, property);
		self.keys.report_changed();
	}
}

impl Administration for ObjectAdministration {
	fn type_tag(&self) -> TypeTag {
		TypeTag::ObjectAdministration
	}

	fn name(&self) -> &str {
		&self.name
	}

	fn get_(&self, key: &Value) -> Option<Value> {
		let key = PropertyKey::from_value(key);
		match self.property_administration(&key) {
			Some(value) => Some(value.get()),
			None => {
				// Readers of a missing key must re-run once it appears.
				self.keys.report_observed();
				None
			}
		}
	}

	fn has_(&self, key: &Value) -> bool {
		self.keys.report_observed();
		self.properties
			.borrow()
			.contains_key(&PropertyKey::from_value(key))
	}

	/// Writes an existing property, or adds a writable, enumerable,
	/// configurable one.
	fn set_(&self, key: Value, value: Value) -> Result<()> {
		let key = PropertyKey::from_value(&key);
		let existing = {
			let properties = self.properties.borrow();
			properties.get(&key).map(|p| (Rc::clone(&p.value), p.writable))
		};
		match existing {
			Some((_, false)) => Err(AdminError::NotWritable { key }),
			Some((slot, true)) => {
				slot.set(value);
				Ok(())
			}
			None => {
				self.add_property(key, value, &PropertyDescriptor::data(Value::Undefined));
				Ok(())
			}
		}
	}

	fn delete_(&self, key: &Value) -> Result<()> {
		let key = PropertyKey::from_value(key);
		let removed = {
			let mut properties = self.properties.borrow_mut();
			let configurable = match properties.get(&key) {
				None => return Ok(()),
				Some(p) => p.configurable,
			};
			if !configurable {
				return Err(AdminError::NotConfigurable { key });
			}
			properties.shift_remove(&key)
		};
		if let Some(removed) = removed {
			let _batch = start_batch();
			trace!(object = %self.name, %key, "property deleted");
			self.keys.report_changed();
			removed.value.atom().report_changed();
		}
		Ok(())
	}

	fn keys_(&self) -> Vec<Value> {
		self.keys.report_observed();
		self.ordered_keys(true)
			.iter()
			.map(PropertyKey::to_value)
			.collect()
	}

	fn own_keys_(&self) -> Result<Vec<PropertyKey>> {
		self.keys.report_observed();
		Ok(self.ordered_keys(false))
	}

	/// Defines a new property or redefines an existing one.
	///
	/// A non-configurable property may only be "redefined" with attributes it
	/// already has.
	fn define_property_(&self, key: PropertyKey, descriptor: PropertyDescriptor) -> Result<()> {
		let existing = self.property_administration(&key);
		let Some(slot) = existing else {
			let value = descriptor.value.clone().unwrap_or_default();
			self.add_property(key, value, &descriptor);
			return Ok(());
		};

		let current = slot.raw();
		let structural = {
			let mut properties = self.properties.borrow_mut();
			let Some(property) = properties.get_mut(&key) else {
				return Ok(());
			};
			if !property.configurable && !property.matches(&descriptor, &current) {
				return Err(AdminError::NotConfigurable { key });
			}
			let before = (property.writable, property.enumerable, property.configurable);
			property.writable = descriptor.writable.unwrap_or(property.writable);
			property.enumerable = descriptor.enumerable.unwrap_or(property.enumerable);
			property.configurable = descriptor.configurable.unwrap_or(property.configurable);
			before != (property.writable, property.enumerable, property.configurable)
		};

		let _batch = start_batch();
		if let Some(value) = descriptor.value {
			slot.set(value);
		}
		if structural {
			self.keys.report_changed();
		}
		Ok(())
	}
}

impl fmt::Debug for ObjectAdministration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ObjectAdministration")
			.field("name", &self.name)
			.field("properties", &self.properties.borrow().len())
			.finish()
	}
}

/// Public handle to a tracked object.
#[derive(Clone, Debug)]
pub struct ObservableObject(Rc<ObjectAdministration>);

impl ObservableObject {
	pub fn new() -> Self {
		Self::named(debug_name("ObservableObject"))
	}

	pub fn named(name: impl Into<Box<str>>) -> Self {
		Self(Rc::new(ObjectAdministration::new(name)))
	}

	pub fn from_administration(admin: Rc<ObjectAdministration>) -> Self {
		Self(admin)
	}

	pub fn get(&self, key: impl Into<Value>) -> Option<Value> {
		self.0.get_(&key.into())
	}

	pub fn has(&self, key: impl Into<Value>) -> bool {
		self.0.has_(&key.into())
	}

	pub fn set(&self, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
		self.0.set_(key.into(), value.into())
	}

	pub fn remove(&self, key: impl Into<Value>) -> Result<()> {
		self.0.delete_(&key.into())
	}

	pub fn keys(&self) -> Vec<Value> {
		self.0.keys_()
	}

	pub fn administration(&self) -> &Rc<ObjectAdministration> {
		&self.0
	}

	/// The wrapper form; the raw administration reports
	/// [`TypeTag::ObjectAdministration`].
	pub fn type_tag(&self) -> TypeTag {
		TypeTag::Object
	}
}

impl Default for ObservableObject {
	fn default() -> Self {
		Self::new()
	}
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for ObservableObject {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		let object = Self::new();
		for (k, v) in iter {
			// Fresh properties are always writable.
			let _ = object.set(k, v);
		}
		object
	}
}
