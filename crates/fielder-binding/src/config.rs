//! Per-field configuration.
//!
//! A [`FieldConfig`] is supplied on every render. Only the first one is used
//! to build the [`MountRequest`]; later ones are observed by the lifecycle
//! tracker (for `destroy_on_unmount`) and provide defaults for fields the
//! store has not registered yet.

use std::rc::Rc;

use serde_json::Value;

use crate::store::{FieldState, MountRequest};

type ValidationFn = dyn Fn(Option<&Value>) -> Result<(), String>;

/// A field validation rule.
///
/// Compared by identity: two validators are equal only when they wrap the
/// same closure, which is what a store needs to tell a re-supplied rule
/// from a new one.
#[derive(Clone)]
pub struct Validator(Rc<ValidationFn>);

impl Validator {
	/// Wraps a rule returning `Err(message)` for invalid values.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Option<&Value>) -> Result<(), String> + 'static,
	{
		Self(Rc::new(f))
	}

	/// Runs the rule against `value` (`None` when the field is unset).
	pub fn validate(&self, value: Option<&Value>) -> Result<(), String> {
		(self.0)(value)
	}
}

impl PartialEq for Validator {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl std::fmt::Debug for Validator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("Validator(<function>)")
	}
}

/// Configuration of one field binding.
///
/// # Examples
///
/// ```
/// use fielder_binding::FieldConfig;
/// use serde_json::json;
///
/// let config = FieldConfig::new("email")
///     .with_initial_value(json!("a@example.com"))
///     .with_validate_on_change(false);
///
/// let request = config.mount_request();
/// assert_eq!(request.name, "email");
/// assert!(request.initial_valid);
/// assert!(!request.validate_on_change);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
	/// Field key in the store. Must stay the same for a binding's lifetime.
	pub name: String,
	pub initial_value: Option<Value>,
	pub initial_error: Option<String>,
	/// Explicit initial validity. `None` derives it from `validate`.
	pub initial_valid: Option<bool>,
	pub initial_touched: bool,
	pub validate: Option<Validator>,
	pub validate_on_blur: bool,
	pub validate_on_change: bool,
	pub validate_on_update: bool,
	pub destroy_on_unmount: bool,
}

impl FieldConfig {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			initial_value: None,
			initial_error: None,
			initial_valid: None,
			initial_touched: false,
			validate: None,
			validate_on_blur: true,
			validate_on_change: true,
			validate_on_update: false,
			destroy_on_unmount: false,
		}
	}

	pub fn with_initial_value(mut self, value: Value) -> Self {
		self.initial_value = Some(value);
		self
	}

	pub fn with_initial_error(mut self, error: impl Into<String>) -> Self {
		self.initial_error = Some(error.into());
		self
	}

	pub fn with_initial_valid(mut self, valid: bool) -> Self {
		self.initial_valid = Some(valid);
		self
	}

	pub fn with_initial_touched(mut self, touched: bool) -> Self {
		self.initial_touched = touched;
		self
	}

	pub fn with_validate(mut self, validator: Validator) -> Self {
		self.validate = Some(validator);
		self
	}

	pub fn with_validate_on_blur(mut self, enabled: bool) -> Self {
		self.validate_on_blur = enabled;
		self
	}

	pub fn with_validate_on_change(mut self, enabled: bool) -> Self {
		self.validate_on_change = enabled;
		self
	}

	pub fn with_validate_on_update(mut self, enabled: bool) -> Self {
		self.validate_on_update = enabled;
		self
	}

	pub fn with_destroy_on_unmount(mut self, destroy: bool) -> Self {
		self.destroy_on_unmount = destroy;
		self
	}

	/// Initial validity after applying the default.
	///
	/// A field without a validation rule starts valid; one with a rule starts
	/// invalid until the store has run it.
	pub fn resolved_initial_valid(&self) -> bool {
		self.initial_valid.unwrap_or(self.validate.is_none())
	}

	/// Builds the registration payload from this configuration.
	pub fn mount_request(&self) -> MountRequest {
		MountRequest {
			name: self.name.clone(),
			initial_value: self.initial_value.clone(),
			initial_error: self.initial_error.clone(),
			initial_valid: self.resolved_initial_valid(),
			initial_touched: self.initial_touched,
			validate: self.validate.clone(),
			validate_on_blur: self.validate_on_blur,
			validate_on_change: self.validate_on_change,
			validate_on_update: self.validate_on_update,
		}
	}

	/// State to display while the store has no entry for this field.
	pub fn default_state(&self) -> FieldState {
		FieldState {
			value: self.initial_value.clone(),
			error: self.initial_error.clone(),
			valid: self.resolved_initial_valid(),
			touched: self.initial_touched,
		}
	}
}
