use std::rc::Rc;

use ripple_admin::{Administration, InterceptorSlot, ObjectAdministration, TeardownHandle};
use ripple_primitives::{AdminError, Operation, PropertyKey, Result, Value};
use tracing::debug;

use crate::container::Container;

/// Installs a read interceptor on `target`.
///
/// Objects are intercepted per property, so `property` must name an existing
/// one. Every other kind is intercepted as a whole and `property` is ignored.
/// The handler sees every value read out of the target afterwards; writes are
/// never intercepted.
///
/// # Errors
///
/// * [`AdminError::PropertyRequired`] for an object target without `property`.
/// * [`AdminError::MissingProperty`] if the named property does not exist.
/// * [`AdminError::InterceptorAlreadyInstalled`] if the slot is occupied; tear
///   the existing interceptor down first.
pub fn intercept_reads<F>(
	target: &Container,
	property: Option<PropertyKey>,
	handler: F,
) -> Result<TeardownHandle>
where
	F: Fn(Value) -> Value + 'static,
{
	let slot = match target {
		Container::Object(object) => property_slot(object.administration(), property)?,
		Container::ObjectAdministration(admin) => property_slot(admin, property)?,
		Container::Map(map) => whole_slot(&**map.administration())?,
		Container::Set(set) => whole_slot(&**set.administration())?,
		Container::Array(array) => whole_slot(&**array.administration())?,
		Container::Value(value) => Rc::clone(value.administration().interceptor_slot()),
	};
	debug!(kind = %target.type_tag(), "installing read interceptor");
	slot.install(Rc::new(handler))
}

fn property_slot(
	admin: &ObjectAdministration,
	property: Option<PropertyKey>,
) -> Result<Rc<InterceptorSlot>> {
	let key = property.ok_or(AdminError::PropertyRequired)?;
	let Some(value) = admin.property_administration(&key) else {
		return Err(AdminError::MissingProperty { key });
	};
	Ok(Rc::clone(value.interceptor_slot()))
}

fn whole_slot(admin: &dyn Administration) -> Result<Rc<InterceptorSlot>> {
	admin
		.interceptor_slot()
		.cloned()
		.ok_or_else(|| AdminError::unsupported(Operation::InterceptReads, admin.type_tag()))
}

#[cfg(test)]
mod tests;
