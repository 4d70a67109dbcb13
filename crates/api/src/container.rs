use std::any::Any;
use std::rc::Rc;

use ripple_admin::{
	ArrayAdministration, MapAdministration, ObjectAdministration, ObservableArray, ObservableMap,
	ObservableObject, ObservableSet, ObservableValue, SetAdministration, ValueAdministration,
};
use ripple_primitives::{AdminError, Operation, Result, TypeTag};

/// Any tracked container, in public wrapper or raw administration form.
///
/// Matching on this enum is exhaustive, so a well-typed caller can never hand
/// the generic operations an unrecognized kind. Values of unknown static type
/// enter through [`Container::resolve`].
#[derive(Clone, Debug)]
pub enum Container {
	Object(ObservableObject),
	/// A raw object administration passed directly.
	ObjectAdministration(Rc<ObjectAdministration>),
	Map(ObservableMap),
	Set(ObservableSet),
	Array(ObservableArray),
	/// A boxed value; not keyed, only interceptable.
	Value(ObservableValue),
}

impl Container {
	pub fn type_tag(&self) -> TypeTag {
		match self {
			Self::Object(_) => TypeTag::Object,
			Self::ObjectAdministration(_) => TypeTag::ObjectAdministration,
			Self::Map(_) => TypeTag::Map,
			Self::Set(_) => TypeTag::Set,
			Self::Array(_) => TypeTag::Array,
			Self::Value(_) => TypeTag::Value,
		}
	}

	/// Classifies a dynamically typed value as a container.
	///
	/// Public wrappers are recognized first (their administration carries the
	/// stamped tag), then raw administrations. Anything else fails with
	/// [`AdminError::UnsupportedContainerKind`] naming `operation`.
	pub fn resolve(operation: Operation, value: &dyn Any) -> Result<Self> {
		if let Some(container) = value.downcast_ref::<Container>() {
			return Ok(container.clone());
		}
		if let Some(object) = value.downcast_ref::<ObservableObject>() {
			return Ok(Self::Object(object.clone()));
		}
		if let Some(map) = value.downcast_ref::<ObservableMap>() {
			return Ok(Self::Map(map.clone()));
		}
		if let Some(set) = value.downcast_ref::<ObservableSet>() {
			return Ok(Self::Set(set.clone()));
		}
		if let Some(array) = value.downcast_ref::<ObservableArray>() {
			return Ok(Self::Array(array.clone()));
		}
		if let Some(boxed) = value.downcast_ref::<ObservableValue>() {
			return Ok(Self::Value(boxed.clone()));
		}

		if let Some(admin) = value.downcast_ref::<Rc<ObjectAdministration>>() {
			return Ok(Self::ObjectAdministration(Rc::clone(admin)));
		}
		if let Some(admin) = value.downcast_ref::<Rc<MapAdministration>>() {
			return Ok(Self::Map(ObservableMap::from_administration(Rc::clone(admin))));
		}
		if let Some(admin) = value.downcast_ref::<Rc<SetAdministration>>() {
			return Ok(Self::Set(ObservableSet::from_administration(Rc::clone(admin))));
		}
		if let Some(admin) = value.downcast_ref::<Rc<ArrayAdministration>>() {
			return Ok(Self::Array(ObservableArray::from_administration(Rc::clone(admin))));
		}
		if let Some(admin) = value.downcast_ref::<Rc<ValueAdministration>>() {
			return Ok(Self::Value(ObservableValue::from_administration(Rc::clone(admin))));
		}

		Err(AdminError::unsupported(operation, None))
	}

	/// Collapses the two object forms and rejects the value kind, which has no
	/// keyed operations.
	pub(crate) fn keyed(&self, operation: Operation) -> Result<Keyed<'_>> {
		Ok(match self {
			Self::Object(object) => Keyed::Object(object.administration()),
			Self::ObjectAdministration(admin) => Keyed::Object(admin),
			Self::Map(map) => Keyed::Map(map.administration()),
			Self::Set(set) => Keyed::Set(set.administration()),
			Self::Array(array) => Keyed::Array(array.administration()),
			Self::Value(_) => return Err(AdminError::unsupported(operation, TypeTag::Value)),
		})
	}
}

/// The four keyed container kinds, borrowed for one dispatch.
#[derive(Clone, Copy)]
pub(crate) enum Keyed<'a> {
	Object(&'a ObjectAdministration),
	Map(&'a MapAdministration),
	Set(&'a SetAdministration),
	Array(&'a ArrayAdministration),
}

impl From<ObservableObject> for Container {
	fn from(object: ObservableObject) -> Self {
		Self::Object(object)
	}
}

impl From<Rc<ObjectAdministration>> for Container {
	fn from(admin: Rc<ObjectAdministration>) -> Self {
		Self::ObjectAdministration(admin)
	}
}

impl From<ObservableMap> for Container {
	fn from(map: ObservableMap) -> Self {
		Self::Map(map)
	}
}

impl From<ObservableSet> for Container {
	fn from(set: ObservableSet) -> Self {
		Self::Set(set)
	}
}

impl From<ObservableArray> for Container {
	fn from(array: ObservableArray) -> Self {
		Self::Array(array)
	}
}

impl From<ObservableValue> for Container {
	fn from(value: ObservableValue) -> Self {
		Self::Value(value)
	}
}
