//! Behavioral invariants of the generic operations.

mod common;

use std::rc::Rc;

use pretty_assertions::assert_eq;
use ripple_api::{
	AdminError, Container, ObservableArray, ObservableMap, ObservableObject, Operation, TypeTag,
	Value, batch_depth, get, intercept_reads, set, set_many, start_batch, values,
};

/// Must return the batch depth to zero when an operation fails inside its own batch.
///
/// - Enforced in: `ops::set`, `ops::set_many`, `BatchGuard::drop`
/// - Failure symptom: Every later write stays deferred forever and observers stop running.
#[test]
fn failed_writes_restore_batch_depth() {
	common::init_tracing();
	let array: Container = ObservableArray::new().into();

	assert!(set(&array, "not-a-number", 1).is_err());
	assert!(set_many(&array, [(Value::Int(0), 1), (Value::Int(-3), 2)]).is_err());
	assert_eq!(batch_depth(), 0);

	let outer = start_batch();
	assert!(set(&array, -1, 1).is_err());
	assert_eq!(batch_depth(), 1);
	drop(outer);
	assert_eq!(batch_depth(), 0);
}

/// Must deliver observers the final state once per outermost batch, not each intermediate write.
///
/// - Enforced in: `Reactor::close_batch`, `Reactor::flush`
/// - Failure symptom: Observers run once per key in a bulk update and see half-applied state.
#[test]
fn observers_see_only_final_state() {
	common::init_tracing();
	let map: Container = ObservableMap::new().into();
	let (spy, seen) = common::spy(&map);

	set_many(&map, [("a", 1), ("b", 2), ("a", 3)]).unwrap();

	assert_eq!(spy.run_count(), 2);
	assert_eq!(
		seen.borrow().clone(),
		vec![vec![], vec![Value::Int(3), Value::Int(2)]]
	);
	spy.dispose();
}

/// Must grow a sequence and write the new slot as one change.
///
/// - Enforced in: `ops::set`
/// - Failure symptom: Observers see a length-11 sequence whose last slot is still `Undefined`.
#[test]
fn auto_extension_notifies_once() {
	common::init_tracing();
	let array: Container =
		ObservableArray::from_values(vec![Value::from("a"), Value::from("b"), Value::from("c")])
			.into();
	let (spy, seen) = common::spy(&array);

	set(&array, 10, "x").unwrap();

	assert_eq!(spy.run_count(), 2);
	let last = seen.borrow().last().cloned().unwrap();
	assert_eq!(last.len(), 11);
	assert!(last[3..10].iter().all(Value::is_undefined));
	assert_eq!(last[10], Value::from("x"));
	spy.dispose();
}

/// Must refuse a second interceptor rather than replace the live one.
///
/// - Enforced in: `InterceptorSlot::install`
/// - Failure symptom: A later installer silently hides the first transformation.
#[test]
fn single_interceptor_per_slot() {
	let object: ObservableObject = [("name", "ada")].into_iter().collect();
	let target = Container::from(object);

	let first = intercept_reads(&target, Some("name".into()), |_: Value| Value::from("first"))
		.unwrap();
	assert_eq!(
		intercept_reads(&target, Some("name".into()), |_: Value| Value::from("second"))
			.unwrap_err(),
		AdminError::InterceptorAlreadyInstalled
	);
	assert_eq!(get(&target, "name").unwrap(), Value::from("first"));

	first.teardown();
	intercept_reads(&target, Some("name".into()), |_: Value| Value::from("second")).unwrap();
	assert_eq!(get(&target, "name").unwrap(), Value::from("second"));
}

/// Must not keep an administration alive through a teardown handle.
///
/// - Enforced in: `TeardownHandle`
/// - Failure symptom: Containers leak for as long as any interceptor handle is held.
#[test]
fn teardown_handle_does_not_own_the_container() {
	let map = ObservableMap::new();
	let admin = Rc::downgrade(map.administration());
	let handle = intercept_reads(&Container::from(map), None, |v: Value| v).unwrap();

	assert!(admin.upgrade().is_none());
	handle.teardown();
	assert!(handle.is_spent());
}

/// Must reject unknown dynamic values at the resolution boundary.
///
/// - Enforced in: `Container::resolve`
/// - Failure symptom: Foreign values reach an administration method and misbehave.
#[test]
fn resolution_boundary_rejects_foreign_values() {
	let plain = String::from("not a container");
	assert_eq!(
		Container::resolve(Operation::Keys, &plain).unwrap_err(),
		AdminError::UnsupportedContainerKind { operation: Operation::Keys, kind: None }
	);

	let array = ObservableArray::new();
	let resolved = Container::resolve(Operation::Values, &array).unwrap();
	assert_eq!(resolved.type_tag(), TypeTag::Array);
	assert_eq!(values(&resolved).unwrap(), Vec::<Value>::new());
}
