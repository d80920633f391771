//! Value extraction from input-change occurrences.
//!
//! | Element kind | Produced update |
//! |--------------|-----------------|
//! | checkbox | [`FieldValueUpdate::Transform`] toggling the value in a sequence |
//! | radio, text, textarea, select, other | [`FieldValueUpdate::Literal`] raw string |
//!
//! Radio buttons take the literal path: a radio field stores one scalar, and
//! group exclusivity is purely a display concern of the
//! [`GroupSynchronizer`](crate::GroupSynchronizer).
//!
//! Extraction has no side effects. Issuing the request is the binding's job.

use serde_json::Value;

use crate::element::{ChangeEvent, InputKind};
use crate::store::{FieldValueUpdate, SetFieldValueRequest, ValueTransform};

/// Maps a change occurrence to the update it implies.
///
/// # Examples
///
/// ```
/// use fielder_binding::{ChangeEvent, extract_value};
/// use serde_json::json;
///
/// let text = extract_value(&ChangeEvent::input("text", "hello"));
/// assert_eq!(text.as_literal(), Some(&json!("hello")));
///
/// let checkbox = extract_value(&ChangeEvent::input("checkbox", "b"));
/// let toggle = checkbox.as_transform().unwrap();
/// assert_eq!(toggle.apply(Some(&json!(["a"]))), json!(["a", "b"]));
/// ```
pub fn extract_value(event: &ChangeEvent) -> FieldValueUpdate {
	match event.kind() {
		InputKind::Checkbox => FieldValueUpdate::Transform(toggle_membership(event.value.as_str())),
		InputKind::Radio | InputKind::PlainValue => {
			FieldValueUpdate::Literal(Value::String(event.value.clone()))
		}
	}
}

/// Builds the full change request for field `name`.
pub fn extract_change(name: &str, event: &ChangeEvent) -> SetFieldValueRequest {
	SetFieldValueRequest {
		name: name.to_string(),
		value: extract_value(event),
	}
}

/// Transform adding `member` to a sequence value, or removing it when present.
pub fn toggle_membership(member: impl Into<Value>) -> ValueTransform {
	let member = member.into();
	ValueTransform::new(move |current| toggle(current, &member))
}

/// Toggles `member` in `current`.
///
/// - unset (or anything that is not a sequence): `[member]`
/// - sequence containing `member`: every occurrence removed, order kept
/// - other sequences: `member` appended
///
/// Membership uses exact `Value` equality, so `"1"` and `1` are distinct.
pub fn toggle(current: Option<&Value>, member: &Value) -> Value {
	match current {
		Some(Value::Array(items)) if items.contains(member) => Value::Array(
			items
				.iter()
				.filter(|item| *item != member)
				.cloned()
				.collect(),
		),
		Some(Value::Array(items)) => {
			let mut next = items.clone();
			next.push(member.clone());
			Value::Array(next)
		}
		_ => Value::Array(vec![member.clone()]),
	}
}
