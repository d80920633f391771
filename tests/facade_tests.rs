//! Facade re-export tests

use std::rc::Rc;

use fielder::prelude::*;
use fielder::testing::{MemoryStore, MockElement};
use fielder::{extract_value, toggle};
use rstest::rstest;
use serde_json::json;

#[rstest]
fn test_prelude_wires_a_field() {
	let store = Rc::new(MemoryStore::new());
	let binding = FieldBinding::<MockElement>::mount(
		store.clone(),
		FieldConfig::new("agree").with_validate(Validator::new(|_| Ok(()))),
	);

	let (props, meta): UseFieldResponse<MockElement> = binding.response();

	assert_eq!(props.name, "agree");
	assert!(!props.valid);
	assert_eq!(meta, FieldMeta::default());
	assert_eq!(binding.phase(), BindingPhase::Active);
	assert!(store.field("agree").is_some());
}

#[rstest]
fn test_root_reexports_extraction() {
	let update = extract_value(&ChangeEvent::input("checkbox", "a"));

	assert_eq!(update.resolve(Some(&json!(["a"]))), json!([]));
	assert_eq!(toggle(None, &json!("a")), json!(["a"]));
}
