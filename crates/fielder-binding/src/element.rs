//! Input element classification and widget handle abstraction.
//!
//! Native inputs are loosely typed: whether an element behaves like a
//! checkbox, a radio button or a plain value input is decided by its `type`
//! attribute. This module turns that attribute into an [`InputKind`] once, so
//! the extractor and the group synchronizer can match on it exhaustively
//! instead of sniffing attributes repeatedly.
//!
//! ## Widget handles
//!
//! [`InputElement`] is the handle the rendering layer passes to a binding's
//! `node_ref` callback. On `wasm32` with the `web` feature it is implemented
//! for `web_sys::HtmlInputElement`; tests use
//! [`MockElement`](crate::testing::MockElement).

use serde::{Deserialize, Serialize};

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web;

/// Behavioural classification of an input element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
	/// `<input type="checkbox">`: toggles membership in a sequence value.
	Checkbox,
	/// `<input type="radio">`: selects one scalar value out of a group.
	Radio,
	/// Anything else reporting a value (text, textarea, select, ...).
	PlainValue,
}

impl InputKind {
	/// Classifies an element from its `type` attribute.
	///
	/// `type` is an enumerated attribute and matches ASCII case-insensitively,
	/// so `"CHECKBOX"` is a checkbox too. Anything else, including a value
	/// padded with whitespace, renders as a text input in browsers and falls
	/// back to [`InputKind::PlainValue`], as does a missing type.
	///
	/// # Examples
	///
	/// ```
	/// use fielder_binding::InputKind;
	///
	/// assert_eq!(InputKind::classify(Some("checkbox")), InputKind::Checkbox);
	/// assert_eq!(InputKind::classify(Some("radio")), InputKind::Radio);
	/// assert_eq!(InputKind::classify(Some("email")), InputKind::PlainValue);
	/// assert_eq!(InputKind::classify(None), InputKind::PlainValue);
	/// ```
	pub fn classify(type_attribute: Option<&str>) -> Self {
		match type_attribute {
			Some(t) if t.eq_ignore_ascii_case("checkbox") => Self::Checkbox,
			Some(t) if t.eq_ignore_ascii_case("radio") => Self::Radio,
			_ => Self::PlainValue,
		}
	}

	/// Whether elements of this kind take part in group synchronization.
	pub fn is_group(self) -> bool {
		matches!(self, Self::Checkbox | Self::Radio)
	}
}

impl std::fmt::Display for InputKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Checkbox => write!(f, "checkbox"),
			Self::Radio => write!(f, "radio"),
			Self::PlainValue => write!(f, "plain"),
		}
	}
}

/// A handle to one physical input element.
///
/// Equality is element identity: two handles compare equal when they refer to
/// the same element. The group registry relies on this to keep `node_ref`
/// idempotent.
pub trait InputElement: Clone + PartialEq + 'static {
	/// Classification of the element, usually derived from its `type`.
	fn kind(&self) -> InputKind;

	/// The element's own value attribute.
	fn value(&self) -> String;

	/// Writes the element's checked display state.
	fn set_checked(&self, checked: bool);

	/// Whether the element is still part of the rendered tree.
	///
	/// Handles reporting `false` are pruned when `node_ref(None)` runs.
	fn is_attached(&self) -> bool {
		true
	}
}

/// A normalized input-change occurrence.
///
/// Carries what the extractor needs from the element that triggered the
/// change: its tag, its `type` attribute and its raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
	pub tag_name: String,
	pub type_attribute: Option<String>,
	pub value: String,
}

impl ChangeEvent {
	/// Creates a change event for an arbitrary element.
	pub fn new(
		tag_name: impl Into<String>,
		type_attribute: Option<&str>,
		value: impl Into<String>,
	) -> Self {
		Self {
			tag_name: tag_name.into(),
			type_attribute: type_attribute.map(str::to_string),
			value: value.into(),
		}
	}

	/// Change on an `<input>` with the given `type` attribute.
	///
	/// # Examples
	///
	/// ```
	/// use fielder_binding::{ChangeEvent, InputKind};
	///
	/// let event = ChangeEvent::input("checkbox", "newsletter");
	/// assert_eq!(event.tag_name, "INPUT");
	/// assert_eq!(event.kind(), InputKind::Checkbox);
	/// ```
	pub fn input(type_attribute: &str, value: impl Into<String>) -> Self {
		Self::new("INPUT", Some(type_attribute), value)
	}

	/// Change on a `<textarea>`.
	pub fn textarea(value: impl Into<String>) -> Self {
		Self::new("TEXTAREA", None, value)
	}

	/// Change on a `<select>`.
	pub fn select(value: impl Into<String>) -> Self {
		Self::new("SELECT", None, value)
	}

	/// Builds the occurrence from a widget handle's current state.
	pub fn from_element<E: InputElement>(element: &E) -> Self {
		let type_attribute = match element.kind() {
			InputKind::Checkbox => Some("checkbox".to_string()),
			InputKind::Radio => Some("radio".to_string()),
			InputKind::PlainValue => None,
		};
		Self {
			tag_name: "INPUT".to_string(),
			type_attribute,
			value: element.value(),
		}
	}

	/// Classification of the triggering element.
	pub fn kind(&self) -> InputKind {
		InputKind::classify(self.type_attribute.as_deref())
	}
}
