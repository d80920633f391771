//! web-sys integration for browser builds.

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use super::{ChangeEvent, InputElement, InputKind};

impl InputElement for HtmlInputElement {
	fn kind(&self) -> InputKind {
		InputKind::classify(self.get_attribute("type").as_deref())
	}

	fn value(&self) -> String {
		HtmlInputElement::value(self)
	}

	fn set_checked(&self, checked: bool) {
		HtmlInputElement::set_checked(self, checked);
	}

	fn is_attached(&self) -> bool {
		self.is_connected()
	}
}

impl ChangeEvent {
	/// Reads the change occurrence from a DOM event's `currentTarget`.
	///
	/// Returns `None` when the event has no element target. Elements other
	/// than `<input>`, `<textarea>` and `<select>` report their `value`
	/// attribute.
	pub fn from_event(event: &Event) -> Option<Self> {
		let target = event.current_target()?;
		let element = target.dyn_ref::<Element>()?;

		let value = if let Some(input) = target.dyn_ref::<HtmlInputElement>() {
			input.value()
		} else if let Some(textarea) = target.dyn_ref::<HtmlTextAreaElement>() {
			textarea.value()
		} else if let Some(select) = target.dyn_ref::<HtmlSelectElement>() {
			select.value()
		} else {
			element.get_attribute("value").unwrap_or_default()
		};

		Some(Self {
			tag_name: element.tag_name(),
			type_attribute: element.get_attribute("type"),
			value,
		})
	}
}
