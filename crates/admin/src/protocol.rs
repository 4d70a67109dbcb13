use std::rc::Rc;

use ripple_primitives::{
	AdminError, Operation, PropertyDescriptor, PropertyKey, Result, TypeTag, Value,
};

use crate::intercept::InterceptorSlot;

/// Capability set every keyed tracked container implements.
///
/// Reads (`get_`, `has_`, `keys_`) report the container as observed; writes
/// (`set_`, `delete_`) report it as changed, which schedules dependent
/// reactions (deferred while a batch is open). Values returned by reads have
/// already passed through any installed read interceptor.
pub trait Administration {
	/// Tag stamped at creation. Never changes.
	fn type_tag(&self) -> TypeTag;

	/// Debug name used in logs.
	fn name(&self) -> &str;

	/// Reads the value under `key`, or `None` when absent.
	fn get_(&self, key: &Value) -> Option<Value>;

	fn has_(&self, key: &Value) -> bool;

	fn set_(&self, key: Value, value: Value) -> Result<()>;

	/// Removes `key`. Removing an absent key is a no-op.
	fn delete_(&self, key: &Value) -> Result<()>;

	/// Enumerable keys in iteration order.
	fn keys_(&self) -> Vec<Value>;

	/// Every own key, including non-enumerable and symbol keys.
	fn own_keys_(&self) -> Result<Vec<PropertyKey>> {
		Err(AdminError::unsupported(Operation::OwnKeys, self.type_tag()))
	}

	fn define_property_(&self, key: PropertyKey, descriptor: PropertyDescriptor) -> Result<()> {
		let _ = (key, descriptor);
		Err(AdminError::unsupported(Operation::DefineProperty, self.type_tag()))
	}

	/// The whole-container interceptor slot. Object administrations have none;
	/// they are intercepted per property.
	fn interceptor_slot(&self) -> Option<&Rc<InterceptorSlot>> {
		None
	}
}
