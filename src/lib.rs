//! # Fielder
//!
//! Field bindings between a form-state store and loosely-typed input widgets.
//!
//! The store owns every field's value, error and flags. Widgets render those
//! fields as text inputs, selects, or groups of checkboxes and radio buttons
//! that share one logical value. Fielder binds the two: each mounted field gets
//! `on_change`, `on_blur` and `node_ref` handlers, change occurrences become
//! store requests, and checkbox/radio groups are kept consistent with the
//! stored value.
//!
//! ## Feature Flags
//!
//! - `web` - `web-sys` integration (`HtmlInputElement` handles, DOM change
//!   events). Only takes effect on `wasm32` targets.
//!
//! ## Quick Example
//!
//! ```
//! use std::rc::Rc;
//! use fielder::prelude::*;
//! use fielder::testing::{MemoryStore, MockElement};
//! use serde_json::json;
//!
//! let store = Rc::new(MemoryStore::new());
//! let topics = FieldConfig::new("topics").with_initial_value(json!(["rust"]));
//! let binding = FieldBinding::<MockElement>::mount(store.clone(), topics.clone());
//!
//! let (props, _) = binding.response();
//! let rust = MockElement::checkbox("rust");
//! let wasm = MockElement::checkbox("wasm");
//! props.node_ref.call(Some(rust.clone()));
//! props.node_ref.call(Some(wasm.clone()));
//!
//! props.on_change.call(ChangeEvent::input("checkbox", "wasm"));
//! let (props, _) = binding.render(topics);
//!
//! assert_eq!(props.value, Some(json!(["rust", "wasm"])));
//! assert!(rust.checked() && wasm.checked());
//! ```

pub use fielder_binding::*;

/// Commonly used types for wiring a field.
pub mod prelude {
	pub use fielder_binding::{
		BindingError, BindingPhase, BindingResult, Callback, ChangeEvent, FieldBinding,
		FieldConfig, FieldMeta, FieldProps, FieldState, FieldStore, InputElement, InputKind,
		UseFieldResponse, ValidationTrigger, Validator,
	};
}
