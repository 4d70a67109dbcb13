use pretty_assertions::assert_eq;
use ripple_admin::{ObservableArray, ObservableMap, ObservableObject, ObservableValue};

use super::*;
use crate::ops::{get, set, values};

fn shout(value: Value) -> Value {
	match value.as_str() {
		Some(s) => Value::from(s.to_uppercase()),
		None => value,
	}
}

#[test]
fn object_interception_needs_a_property() {
	let object: ObservableObject = [("name", "ada")].into_iter().collect();
	let target = Container::from(object);

	assert_eq!(
		intercept_reads(&target, None, shout).unwrap_err(),
		AdminError::PropertyRequired
	);
	assert_eq!(
		intercept_reads(&target, Some("age".into()), shout).unwrap_err(),
		AdminError::MissingProperty { key: "age".into() }
	);

	let handle = intercept_reads(&target, Some("name".into()), shout).unwrap();
	assert_eq!(get(&target, "name").unwrap(), Value::from("ADA"));
	handle.teardown();
	assert_eq!(get(&target, "name").unwrap(), Value::from("ada"));
}

#[test]
fn object_interception_is_per_property() {
	let object: ObservableObject = [("first", "ada"), ("last", "lovelace")].into_iter().collect();
	let target = Container::from(object);

	let _handle = intercept_reads(&target, Some("first".into()), shout).unwrap();
	assert_eq!(values(&target).unwrap(), vec![Value::from("ADA"), Value::from("lovelace")]);
	intercept_reads(&target, Some("last".into()), shout).unwrap();
}

#[test]
fn whole_container_interception_ignores_property() {
	let map: ObservableMap = [("k", "v")].into_iter().collect();
	let target = Container::from(map);

	let _handle = intercept_reads(&target, Some("unrelated".into()), shout).unwrap();
	assert_eq!(get(&target, "k").unwrap(), Value::from("V"));
}

#[test]
fn second_install_fails_until_torn_down() {
	let target = Container::from(ObservableArray::from_values(vec![Value::from("x")]));

	let first = intercept_reads(&target, None, shout).unwrap();
	assert_eq!(
		intercept_reads(&target, None, |v: Value| v).unwrap_err(),
		AdminError::InterceptorAlreadyInstalled
	);
	first.teardown();
	first.teardown();
	assert!(first.is_spent());

	let second = intercept_reads(&target, None, |_: Value| Value::Null).unwrap();
	first.teardown();
	assert_eq!(
		get(&target, 0).unwrap(),
		Value::Null,
		"stale handle must not clear a newer interceptor"
	);
	second.teardown();
	assert_eq!(get(&target, 0).unwrap(), Value::from("x"));
}

#[test]
fn writes_are_not_intercepted() {
	let target = Container::from(ObservableMap::new());
	let handle = intercept_reads(&target, None, shout).unwrap();

	set(&target, "k", "lower").unwrap();
	assert_eq!(get(&target, "k").unwrap(), Value::from("LOWER"));
	handle.teardown();
	assert_eq!(get(&target, "k").unwrap(), Value::from("lower"));
}

#[test]
fn value_holder_can_be_intercepted() {
	let boxed = ObservableValue::new(2);
	let target = Container::from(boxed.clone());

	let handle = intercept_reads(&target, None, |v: Value| {
		Value::Int(v.as_int().unwrap_or(0) * 10)
	})
	.unwrap();
	assert_eq!(boxed.get(), Value::Int(20));
	handle.teardown();
	assert_eq!(boxed.get(), Value::Int(2));
}
