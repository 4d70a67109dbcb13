use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn members_are_their_own_keys() {
	let set: ObservableSet = ["x", "y"].into_iter().collect();
	let admin = set.administration();
	assert_eq!(admin.keys_(), set.values());
	assert_eq!(
		admin.entries(),
		vec![
			(Value::from("x"), Value::from("x")),
			(Value::from("y"), Value::from("y")),
		]
	);
}

#[test]
fn set_adds_the_key_and_ignores_the_value() {
	let set = ObservableSet::new();
	set.administration()
		.set_(Value::from("k"), Value::from("ignored"))
		.expect("sets accept any member");
	assert!(set.has("k"));
	assert!(!set.has("ignored"));
}

#[test]
fn duplicate_add_reports_no_change() {
	let set = ObservableSet::new();
	assert!(set.add(1));
	assert!(!set.add(1));
	assert_eq!(set.len(), 1);
}

#[test]
fn values_pass_through_interceptor() {
	let set: ObservableSet = [1, 2].into_iter().collect();
	let slot = set.administration().interceptor_slot().expect("sets have a slot");
	let _handle = slot
		.install(Rc::new(|v: Value| match v {
			Value::Int(n) => Value::Int(-n),
			other => other,
		}))
		.expect("empty slot");
	assert_eq!(set.values(), vec![Value::Int(-1), Value::Int(-2)]);
}
