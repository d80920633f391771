//! Field bindings between a form-state store and input widgets.
//!
//! A form-state store owns the authoritative value, error and flags of every
//! field. The widgets rendering those fields are loosely typed: a field may be
//! one text input, a group of checkboxes sharing a sequence value, or a group
//! of radio buttons sharing a scalar. This crate is the per-field glue:
//!
//! - [`extract`]: turns a native change occurrence into a literal value or,
//!   for checkboxes, a toggle transform applied by the store
//! - [`sync`]: keeps checkbox/radio handles' checked state consistent with
//!   the field value
//! - [`binding`]: mounts the field, hands out `on_change`/`on_blur`/`node_ref`
//!   handlers and unmounts it
//! - [`lifecycle`]: tracks the mount window and the latest
//!   `destroy_on_unmount` decision
//!
//! The store itself is an injected [`FieldStore`] implementation; this crate
//! never owns form state.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use fielder_binding::testing::{MemoryStore, MockElement};
//! use fielder_binding::{ChangeEvent, FieldBinding, FieldConfig, FieldStore};
//! use serde_json::json;
//!
//! let store = Rc::new(MemoryStore::new());
//! let config = FieldConfig::new("plan").with_initial_value(json!("free"));
//! let binding = FieldBinding::<MockElement>::mount(store.clone(), config.clone());
//!
//! let (props, _) = binding.response();
//! let free = MockElement::radio("free");
//! let pro = MockElement::radio("pro");
//! props.node_ref.call(Some(free.clone()));
//! props.node_ref.call(Some(pro.clone()));
//! assert!(free.checked());
//!
//! props.on_change.call(ChangeEvent::input("radio", "pro"));
//! binding.render(config);
//! assert!(!free.checked());
//! assert!(pro.checked());
//!
//! drop(binding);
//! assert_eq!(store.field("plan").unwrap().value, Some(json!("pro")));
//! ```
//!
//! ## Feature Flags
//!
//! - `web`: `web-sys` integration on `wasm32` (`InputElement` for
//!   `HtmlInputElement`, `ChangeEvent::from_event`)

pub mod binding;
pub mod callback;
pub mod config;
pub mod element;
pub mod error;
pub mod extract;
pub mod lifecycle;
pub mod store;
pub mod sync;
pub mod testing;

pub use binding::{FieldBinding, FieldMeta, FieldProps, UseFieldResponse};
pub use callback::Callback;
pub use config::{FieldConfig, Validator};
pub use element::{ChangeEvent, InputElement, InputKind};
pub use error::{BindingError, BindingResult};
pub use extract::{extract_change, extract_value, toggle, toggle_membership};
pub use lifecycle::{BindingPhase, LifecycleTracker};
pub use store::{
	BlurRequest, FieldState, FieldStore, FieldValueUpdate, FieldsSnapshot, MountRequest,
	SetFieldValueRequest, UnmountRequest, ValidationTrigger, ValueTransform,
};
pub use sync::{GroupSynchronizer, is_checked};
