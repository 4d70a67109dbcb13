use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use ripple_admin::{
	ObservableArray, ObservableMap, ObservableObject, ObservableSet, ObservableValue,
};
use ripple_primitives::{SymbolId, TypeTag};
use ripple_reactor::{autorun, batch_depth};
use rstest::{fixture, rstest};

use super::*;

fn strs(items: &[&str]) -> Vec<Value> {
	items.iter().copied().map(Value::from).collect()
}

#[fixture]
fn object() -> Container {
	let object: ObservableObject = [("a", Value::Int(1)), ("b", Value::Int(2))]
		.into_iter()
		.collect();
	object.into()
}

#[fixture]
fn map() -> Container {
	let map: ObservableMap = [("x", 10), ("y", 20)].into_iter().collect();
	map.into()
}

#[fixture]
fn set_container() -> Container {
	let set: ObservableSet = ["red", "green"].into_iter().collect();
	set.into()
}

#[fixture]
fn array() -> Container {
	ObservableArray::from_values(strs(&["a", "b", "c"])).into()
}

#[rstest]
fn keys_per_kind(object: Container, map: Container, set_container: Container, array: Container) {
	assert_eq!(keys(&object).unwrap(), strs(&["a", "b"]));
	assert_eq!(keys(&map).unwrap(), strs(&["x", "y"]));
	assert_eq!(keys(&set_container).unwrap(), strs(&["red", "green"]));
	assert_eq!(
		keys(&array).unwrap(),
		vec![Value::Int(0), Value::Int(1), Value::Int(2)]
	);
}

#[rstest]
fn values_per_kind(object: Container, map: Container, set_container: Container, array: Container) {
	assert_eq!(values(&object).unwrap(), vec![Value::Int(1), Value::Int(2)]);
	assert_eq!(values(&map).unwrap(), vec![Value::Int(10), Value::Int(20)]);
	assert_eq!(values(&set_container).unwrap(), strs(&["red", "green"]));
	assert_eq!(values(&array).unwrap(), strs(&["a", "b", "c"]));
}

#[rstest]
fn entries_pair_keys_with_values(set_container: Container, array: Container, map: Container) {
	assert_eq!(
		entries(&set_container).unwrap(),
		vec![
			(Value::from("red"), Value::from("red")),
			(Value::from("green"), Value::from("green")),
		]
	);
	assert_eq!(
		entries(&array).unwrap()[2],
		(Value::Int(2), Value::from("c"))
	);
	assert_eq!(
		entries(&map).unwrap(),
		vec![
			(Value::from("x"), Value::Int(10)),
			(Value::from("y"), Value::Int(20)),
		]
	);
}

#[rstest]
fn values_snapshot_is_disconnected(array: Container) {
	let mut snapshot = values(&array).unwrap();
	snapshot.clear();
	assert_eq!(values(&array).unwrap().len(), 3);
}

#[rstest]
fn get_of_absent_key_is_undefined(object: Container, map: Container, array: Container) {
	assert_eq!(get(&object, "missing").unwrap(), Value::Undefined);
	assert_eq!(get(&map, "missing").unwrap(), Value::Undefined);
	assert_eq!(get(&array, 3).unwrap(), Value::Undefined);
	assert_eq!(get(&array, "nope").unwrap(), Value::Undefined);
}

#[rstest]
fn array_reads_need_whole_number_keys(array: Container) {
	assert!(has(&array, "1").unwrap());
	assert!(has(&array, " 2 ").unwrap());
	assert!(!has(&array, " 2px").unwrap());
	assert_eq!(get(&array, " 2px").unwrap(), Value::Undefined);
	assert!(!has(&array, "3").unwrap());
	assert!(!has(&array, -1).unwrap());
	assert_eq!(get(&array, "1").unwrap(), Value::from("b"));
}

#[rstest]
fn array_writes_coerce_like_parse_int(array: Container) {
	set(&array, "1px", "x").unwrap();
	assert_eq!(values(&array).unwrap(), strs(&["a", "x", "c"]));
	remove(&array, " 2px").unwrap();
	assert_eq!(values(&array).unwrap(), strs(&["a", "x"]));
}

#[rstest]
fn set_adds_member_and_ignores_value(set_container: Container) {
	set(&set_container, "blue", "ignored").unwrap();
	assert!(has(&set_container, "blue").unwrap());
	assert_eq!(get(&set_container, "blue").unwrap(), Value::from("blue"));
}

#[rstest]
fn array_write_past_end_extends_with_undefined(array: Container) {
	set(&array, 5, "f").unwrap();
	assert_eq!(
		values(&array).unwrap(),
		vec![
			Value::from("a"),
			Value::from("b"),
			Value::from("c"),
			Value::Undefined,
			Value::Undefined,
			Value::from("f"),
		]
	);
}

#[rstest]
fn negative_array_index_is_rejected(array: Container) {
	assert_eq!(
		set(&array, -1, "x").unwrap_err(),
		AdminError::InvalidIndex { key: Value::Int(-1) }
	);
	assert_eq!(
		remove(&array, "-2").unwrap_err(),
		AdminError::InvalidIndex { key: Value::from("-2") }
	);
	assert_eq!(values(&array).unwrap(), strs(&["a", "b", "c"]));
	assert_eq!(batch_depth(), 0);
}

#[rstest]
#[case::i64_max(Value::Int(i64::MAX))]
#[case::u32_max(Value::Int(i64::from(u32::MAX)))]
#[case::long_string(Value::from("10000000000"))]
fn oversized_array_index_is_rejected(array: Container, #[case] key: Value) {
	assert_eq!(
		set(&array, key.clone(), "x").unwrap_err(),
		AdminError::InvalidIndex { key }
	);
	assert_eq!(values(&array).unwrap(), strs(&["a", "b", "c"]));
	assert_eq!(batch_depth(), 0);
}

#[rstest]
fn array_remove_splices_and_shifts(array: Container) {
	remove(&array, 0).unwrap();
	assert_eq!(values(&array).unwrap(), strs(&["b", "c"]));
	remove(&array, 9).unwrap();
	assert_eq!(values(&array).unwrap(), strs(&["b", "c"]));
}

#[rstest]
fn remove_then_has_is_false(object: Container, map: Container, set_container: Container) {
	remove(&object, "a").unwrap();
	remove(&map, "x").unwrap();
	remove(&set_container, "red").unwrap();
	assert!(!has(&object, "a").unwrap());
	assert!(!has(&map, "x").unwrap());
	assert!(!has(&set_container, "red").unwrap());
}

#[rstest]
fn set_many_writes_in_order_inside_one_batch(map: Container) {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let reaction = {
		let map = map.clone();
		let seen = Rc::clone(&seen);
		autorun("map-watcher", move || {
			seen.borrow_mut().push(values(&map).unwrap_or_default());
		})
	};

	set_many(&map, [("x", 1), ("z", 3), ("y", 2)]).unwrap();

	assert_eq!(reaction.run_count(), 2);
	assert_eq!(keys(&map).unwrap(), strs(&["x", "y", "z"]));
	assert_eq!(
		seen.borrow().last().cloned().unwrap(),
		vec![Value::Int(1), Value::Int(2), Value::Int(3)]
	);
	reaction.dispose();
}

#[rstest]
fn set_many_on_a_set_is_unsupported(set_container: Container) {
	assert_eq!(
		set_many(&set_container, [("a", "a")]).unwrap_err(),
		AdminError::UnsupportedContainerKind {
			operation: Operation::SetMany,
			kind: Some(TypeTag::Set),
		}
	);
}

#[rstest]
fn set_many_keeps_earlier_writes_when_one_fails(array: Container) {
	let err = set_many(&array, [(Value::Int(0), "z"), (Value::Int(-1), "bad")]).unwrap_err();
	assert_eq!(err, AdminError::InvalidIndex { key: Value::Int(-1) });
	assert_eq!(get(&array, 0).unwrap(), Value::from("z"));
	assert_eq!(batch_depth(), 0);
}

#[rstest]
fn structural_operations_are_object_only(
	object: Container,
	map: Container,
	set_container: Container,
	array: Container,
) {
	define_property(&object, SymbolId(7), PropertyDescriptor::data(true)).unwrap();
	assert_eq!(
		own_keys(&object).unwrap(),
		vec![
			PropertyKey::from("a"),
			PropertyKey::from("b"),
			PropertyKey::Symbol(SymbolId(7)),
		]
	);

	for other in [map, set_container, array] {
		let kind = other.type_tag();
		assert_eq!(
			own_keys(&other).unwrap_err(),
			AdminError::UnsupportedContainerKind {
				operation: Operation::OwnKeys,
				kind: Some(kind),
			}
		);
		assert_eq!(
			define_property(&other, "k", PropertyDescriptor::data(1)).unwrap_err(),
			AdminError::UnsupportedContainerKind {
				operation: Operation::DefineProperty,
				kind: Some(kind),
			}
		);
	}
}

#[test]
fn value_kind_has_no_keyed_operations() {
	let boxed: Container = ObservableValue::new(1).into();
	assert_eq!(
		get(&boxed, "k").unwrap_err(),
		AdminError::UnsupportedContainerKind {
			operation: Operation::Get,
			kind: Some(TypeTag::Value),
		}
	);
	assert!(keys(&boxed).is_err());
	assert!(set(&boxed, "k", 1).is_err());
}

#[test]
fn raw_object_administration_dispatches_like_the_wrapper() {
	let object = ObservableObject::new();
	let raw = Container::ObjectAdministration(Rc::clone(object.administration()));
	set(&raw, "k", 1).unwrap();
	assert_eq!(object.get("k"), Some(Value::Int(1)));
	assert_eq!(raw.type_tag(), TypeTag::ObjectAdministration);
}
