//! Store contract consumed by field bindings.
//!
//! The store owns the authoritative field-state mapping. Bindings never
//! mutate it directly; they only issue the four requests below and read the
//! current [`FieldState`] for their own name.
//!
//! ```text
//! FieldBinding ──mount_field──────▶ ┌──────────────┐
//!              ──set_field_value──▶ │  FieldStore  │
//!              ──blur_field───────▶ │              │
//!              ──unmount_field────▶ │ fields: name │
//!              ◀──field(name)────── │   → state    │
//!                                   └──────────────┘
//! ```

use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Validator;

/// Snapshot of one field as held by the store.
///
/// `value: None` means the field has never been given a value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldState {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	pub valid: bool,
	pub touched: bool,
}

/// Field name to state mapping, as exposed by stores.
pub type FieldsSnapshot = HashMap<String, FieldState>;

/// Event that may warrant re-validating a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationTrigger {
	Blur,
	Change,
	/// Any other store update touching the form.
	Update,
}

/// Registration payload, sent exactly once per binding lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct MountRequest {
	pub name: String,
	pub initial_value: Option<Value>,
	pub initial_error: Option<String>,
	pub initial_valid: bool,
	pub initial_touched: bool,
	pub validate: Option<Validator>,
	pub validate_on_blur: bool,
	pub validate_on_change: bool,
	pub validate_on_update: bool,
}

impl MountRequest {
	/// Whether the field asked to be validated on `trigger`.
	///
	/// A field without a validation rule never needs validating.
	pub fn should_validate(&self, trigger: ValidationTrigger) -> bool {
		if self.validate.is_none() {
			return false;
		}
		match trigger {
			ValidationTrigger::Blur => self.validate_on_blur,
			ValidationTrigger::Change => self.validate_on_change,
			ValidationTrigger::Update => self.validate_on_update,
		}
	}

	/// Initial store entry for this field.
	pub fn initial_state(&self) -> FieldState {
		FieldState {
			value: self.initial_value.clone(),
			error: self.initial_error.clone(),
			valid: self.initial_valid,
			touched: self.initial_touched,
		}
	}
}

/// Teardown payload. `destroy` asks the store to drop the field's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmountRequest {
	pub name: String,
	pub destroy: bool,
}

/// Blur payload. Carries the field name and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlurRequest {
	pub name: String,
}

/// Function computing a field's next value from its current one.
///
/// Stores apply it against their own current value, so a toggle never races
/// with a concurrent write between read and update.
#[derive(Clone)]
pub struct ValueTransform(Rc<dyn Fn(Option<&Value>) -> Value>);

impl ValueTransform {
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Option<&Value>) -> Value + 'static,
	{
		Self(Rc::new(f))
	}

	/// Computes the next value from `current` (`None` when never set).
	pub fn apply(&self, current: Option<&Value>) -> Value {
		(self.0)(current)
	}
}

impl std::fmt::Debug for ValueTransform {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("ValueTransform(<function>)")
	}
}

/// New value for a field: either final, or computed from the current value.
#[derive(Debug, Clone)]
pub enum FieldValueUpdate {
	Literal(Value),
	Transform(ValueTransform),
}

impl FieldValueUpdate {
	/// Resolves the update against the store's current value.
	pub fn resolve(&self, current: Option<&Value>) -> Value {
		match self {
			Self::Literal(value) => value.clone(),
			Self::Transform(transform) => transform.apply(current),
		}
	}

	pub fn as_literal(&self) -> Option<&Value> {
		match self {
			Self::Literal(value) => Some(value),
			Self::Transform(_) => None,
		}
	}

	pub fn as_transform(&self) -> Option<&ValueTransform> {
		match self {
			Self::Literal(_) => None,
			Self::Transform(transform) => Some(transform),
		}
	}
}

/// Change payload.
#[derive(Debug, Clone)]
pub struct SetFieldValueRequest {
	pub name: String,
	pub value: FieldValueUpdate,
}

/// The form-state store a binding reports to.
///
/// Methods take `&self`: stores are shared between every binding of a form
/// and manage their own interior mutability.
pub trait FieldStore {
	fn mount_field(&self, request: MountRequest);

	fn unmount_field(&self, request: UnmountRequest);

	fn blur_field(&self, request: BlurRequest);

	fn set_field_value(&self, request: SetFieldValueRequest);

	/// Current state of `name`, or `None` when the store has no entry.
	fn field(&self, name: &str) -> Option<FieldState>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn mount_request(validate: Option<Validator>) -> MountRequest {
		MountRequest {
			name: "age".to_string(),
			initial_value: Some(json!("42")),
			initial_error: None,
			initial_valid: true,
			initial_touched: false,
			validate,
			validate_on_blur: true,
			validate_on_change: false,
			validate_on_update: true,
		}
	}

	#[rstest]
	#[case(ValidationTrigger::Blur, true)]
	#[case(ValidationTrigger::Change, false)]
	#[case(ValidationTrigger::Update, true)]
	fn test_should_validate_follows_flags(
		#[case] trigger: ValidationTrigger,
		#[case] expected: bool,
	) {
		let request = mount_request(Some(Validator::new(|_| Ok(()))));

		assert_eq!(request.should_validate(trigger), expected);
	}

	#[rstest]
	fn test_should_validate_without_rule_is_false() {
		let request = mount_request(None);

		assert!(!request.should_validate(ValidationTrigger::Blur));
		assert!(!request.should_validate(ValidationTrigger::Update));
	}

	#[rstest]
	fn test_initial_state_copies_initial_fields() {
		let state = mount_request(None).initial_state();

		assert_eq!(
			state,
			FieldState {
				value: Some(json!("42")),
				error: None,
				valid: true,
				touched: false,
			}
		);
	}

	#[rstest]
	fn test_literal_update_ignores_current() {
		let update = FieldValueUpdate::Literal(json!("new"));

		assert_eq!(update.resolve(Some(&json!("old"))), json!("new"));
		assert!(update.as_transform().is_none());
	}

	#[rstest]
	fn test_transform_update_sees_current() {
		let update = FieldValueUpdate::Transform(ValueTransform::new(|current| {
			json!(current.and_then(Value::as_i64).unwrap_or(0) + 1)
		}));

		assert_eq!(update.resolve(None), json!(1));
		assert_eq!(update.resolve(Some(&json!(4))), json!(5));
		assert!(update.as_literal().is_none());
	}

	#[rstest]
	fn test_field_state_serialization_skips_absent_value() {
		let state = FieldState {
			valid: true,
			..Default::default()
		};

		let json = serde_json::to_value(&state).unwrap();

		assert_eq!(json, json!({ "valid": true, "touched": false }));
	}
}
