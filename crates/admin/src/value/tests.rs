use std::cell::Cell;
use std::rc::Rc;

use ripple_reactor::autorun;

use super::*;

#[test]
fn equal_write_is_not_a_change() {
	let value = ObservableValue::new(1);
	let runs = Rc::new(Cell::new(0));
	let (v, counter) = (value.clone(), Rc::clone(&runs));
	let _reaction = autorun("watch", move || {
		let _ = v.get();
		counter.set(counter.get() + 1);
	});

	assert!(!value.set(1));
	assert_eq!(runs.get(), 1);
	assert!(value.set(2));
	assert_eq!(runs.get(), 2);
}

#[test]
fn reads_are_intercepted_but_storage_is_not() {
	let value = ObservableValue::new("raw");
	let handle = value
		.administration()
		.interceptor_slot()
		.install(Rc::new(|v: Value| Value::from(format!("{v}!"))))
		.expect("empty slot");
	assert_eq!(value.get(), Value::from("raw!"));
	assert_eq!(value.administration().raw(), Value::from("raw"));
	handle.teardown();
	assert_eq!(value.get(), Value::from("raw"));
}
