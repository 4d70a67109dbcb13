use ripple_admin::Administration;
use ripple_primitives::{
	AdminError, Operation, PropertyDescriptor, PropertyKey, Result, Value, coerce_write_index,
};
use ripple_reactor::start_batch;
use tracing::trace;

use crate::container::{Container, Keyed};

/// Enumerable keys in iteration order.
///
/// Sets report their members; arrays report `0..len`.
pub fn keys(target: &Container) -> Result<Vec<Value>> {
	Ok(match target.keyed(Operation::Keys)? {
		Keyed::Object(admin) => admin.keys_(),
		Keyed::Map(admin) => admin.keys_(),
		Keyed::Set(admin) => admin.values(),
		Keyed::Array(admin) => admin.keys_(),
	})
}

/// Snapshot of the values, in key order.
pub fn values(target: &Container) -> Result<Vec<Value>> {
	Ok(match target.keyed(Operation::Values)? {
		Keyed::Object(admin) => admin
			.keys_()
			.iter()
			.map(|key| admin.get_(key).unwrap_or_default())
			.collect(),
		Keyed::Map(admin) => admin.values(),
		Keyed::Set(admin) => admin.values(),
		Keyed::Array(admin) => admin.to_vec(),
	})
}

/// `(key, value)` pairs. Arrays key by index; sets pair each member with itself.
pub fn entries(target: &Container) -> Result<Vec<(Value, Value)>> {
	Ok(match target.keyed(Operation::Entries)? {
		Keyed::Object(admin) => admin
			.keys_()
			.into_iter()
			.map(|key| {
				let value = admin.get_(&key).unwrap_or_default();
				(key, value)
			})
			.collect(),
		Keyed::Map(admin) => admin.entries(),
		Keyed::Set(admin) => admin.entries(),
		Keyed::Array(admin) => admin
			.to_vec()
			.into_iter()
			.enumerate()
			.map(|(index, value)| (Value::from(index), value))
			.collect(),
	})
}

/// Whether `key` is present. For arrays this is a bounds check; a key that is
/// not a whole non-negative number is never present.
pub fn has(target: &Container, key: impl Into<Value>) -> Result<bool> {
	let key = key.into();
	Ok(match target.keyed(Operation::Has)? {
		Keyed::Object(admin) => admin.has_(&key),
		Keyed::Map(admin) => admin.has_(&key),
		Keyed::Set(admin) => admin.has_(&key),
		Keyed::Array(admin) => admin.has_(&key),
	})
}

/// Reads `key`, or [`Value::Undefined`] when it is absent.
pub fn get(target: &Container, key: impl Into<Value>) -> Result<Value> {
	let key = key.into();
	let keyed = target.keyed(Operation::Get)?;
	let present = match keyed {
		Keyed::Object(admin) => admin.has_(&key),
		Keyed::Map(admin) => admin.has_(&key),
		Keyed::Set(admin) => admin.has_(&key),
		Keyed::Array(admin) => admin.has_(&key),
	};
	if !present {
		return Ok(Value::Undefined);
	}
	let value = match keyed {
		Keyed::Object(admin) => admin.get_(&key),
		Keyed::Map(admin) => admin.get_(&key),
		Keyed::Set(admin) => admin.get_(&key),
		Keyed::Array(admin) => admin.get_(&key),
	};
	Ok(value.unwrap_or_default())
}

/// Writes a single entry.
///
/// Sets add `key` and ignore `value`. Arrays coerce `key` to an index and grow
/// to fit, filling the gap with [`Value::Undefined`]; the growth and the write
/// notify as one change.
///
/// # Errors
///
/// [`AdminError::InvalidIndex`] for a negative, non-numeric, or oversized
/// (past [`MAX_INDEX`](ripple_primitives::MAX_INDEX)) array index, and
/// whatever the object protocol rejects (e.g. [`AdminError::NotWritable`]).
pub fn set(target: &Container, key: impl Into<Value>, value: impl Into<Value>) -> Result<()> {
	let key = key.into();
	let value = value.into();
	match target.keyed(Operation::Set)? {
		Keyed::Object(admin) => admin.set_(key, value),
		Keyed::Map(admin) => admin.set_(key, value),
		Keyed::Set(admin) => {
			admin.add(key);
			Ok(())
		}
		Keyed::Array(admin) => {
			let index = coerce_write_index(&key)?;
			let _batch = start_batch();
			if index >= admin.len() {
				admin.set_len(index + 1);
			}
			admin.set(index, value)
		}
	}
}

/// Writes every entry of `entries`, in iteration order, inside one batch so
/// observers see a single coalesced change.
///
/// Not applicable to sets, which have no independent keys; use [`set`].
///
/// Entries written before a failing one stay written.
pub fn set_many<I, K, V>(target: &Container, entries: I) -> Result<()>
where
	I: IntoIterator<Item = (K, V)>,
	K: Into<Value>,
	V: Into<Value>,
{
	match target.keyed(Operation::SetMany)? {
		Keyed::Set(_) => return Err(AdminError::unsupported(Operation::SetMany, target.type_tag())),
		Keyed::Object(_) | Keyed::Map(_) | Keyed::Array(_) => {}
	}

	let _batch = start_batch();
	let mut written = 0usize;
	for (key, value) in entries {
		set(target, key, value)?;
		written += 1;
	}
	trace!(kind = %target.type_tag(), written, "bulk write");
	Ok(())
}

/// Removes `key`. Removing an absent key is a no-op.
///
/// Arrays splice out the element at the coerced index, shifting the rest down,
/// as one change.
pub fn remove(target: &Container, key: impl Into<Value>) -> Result<()> {
	let key = key.into();
	match target.keyed(Operation::Remove)? {
		Keyed::Object(admin) => admin.delete_(&key),
		Keyed::Map(admin) => admin.delete_(&key),
		Keyed::Set(admin) => admin.delete_(&key),
		Keyed::Array(admin) => admin.delete_(&key),
	}
}

/// Defines or redefines an own property. Objects only.
pub fn define_property(
	target: &Container,
	key: impl Into<PropertyKey>,
	descriptor: PropertyDescriptor,
) -> Result<()> {
	match target.keyed(Operation::DefineProperty)? {
		Keyed::Object(admin) => admin.define_property_(key.into(), descriptor),
		Keyed::Map(_) | Keyed::Set(_) | Keyed::Array(_) => Err(AdminError::unsupported(
			Operation::DefineProperty,
			target.type_tag(),
		)),
	}
}

/// Every own key, including non-enumerable and symbol keys. Objects only.
pub fn own_keys(target: &Container) -> Result<Vec<PropertyKey>> {
	match target.keyed(Operation::OwnKeys)? {
		Keyed::Object(admin) => admin.own_keys_(),
		Keyed::Map(_) | Keyed::Set(_) | Keyed::Array(_) => Err(AdminError::unsupported(
			Operation::OwnKeys,
			target.type_tag(),
		)),
	}
}

#[cfg(test)]
mod tests;
