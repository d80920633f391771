//! Test doubles for stores and widget handles.
//!
//! - [`RecordingStore`]: records every request in order and serves a
//!   hand-set `fields` snapshot. Requests are not applied.
//! - [`MemoryStore`]: applies requests to an in-memory mapping, enough to
//!   drive a binding end to end.
//! - [`MockElement`]: a shared widget handle with observable checked state.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use fielder_binding::testing::{MockElement, RecordingStore};
//! use fielder_binding::{FieldBinding, FieldConfig};
//!
//! let store = Rc::new(RecordingStore::new());
//! let binding = FieldBinding::<MockElement>::mount(store.clone(), FieldConfig::new("name"));
//! binding.response().0.on_blur.call(());
//!
//! assert_eq!(store.mount_requests().len(), 1);
//! assert_eq!(store.blur_requests().len(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::Rc;

use serde_json::Value;

use crate::element::{InputElement, InputKind};
use crate::store::{
	BlurRequest, FieldState, FieldStore, FieldsSnapshot, MountRequest, SetFieldValueRequest,
	UnmountRequest,
};

/// One request received by a [`RecordingStore`].
#[derive(Debug, Clone)]
pub enum StoreCall {
	Mount(MountRequest),
	Unmount(UnmountRequest),
	Blur(BlurRequest),
	SetValue(SetFieldValueRequest),
}

/// Store that records requests without applying them.
#[derive(Debug, Default)]
pub struct RecordingStore {
	calls: RefCell<Vec<StoreCall>>,
	fields: RefCell<FieldsSnapshot>,
}

impl RecordingStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Every request received so far, oldest first.
	pub fn calls(&self) -> Vec<StoreCall> {
		self.calls.borrow().clone()
	}

	pub fn clear_calls(&self) {
		self.calls.borrow_mut().clear();
	}

	pub fn mount_requests(&self) -> Vec<MountRequest> {
		self.calls
			.borrow()
			.iter()
			.filter_map(|call| match call {
				StoreCall::Mount(request) => Some(request.clone()),
				_ => None,
			})
			.collect()
	}

	pub fn unmount_requests(&self) -> Vec<UnmountRequest> {
		self.calls
			.borrow()
			.iter()
			.filter_map(|call| match call {
				StoreCall::Unmount(request) => Some(request.clone()),
				_ => None,
			})
			.collect()
	}

	pub fn blur_requests(&self) -> Vec<BlurRequest> {
		self.calls
			.borrow()
			.iter()
			.filter_map(|call| match call {
				StoreCall::Blur(request) => Some(request.clone()),
				_ => None,
			})
			.collect()
	}

	pub fn change_requests(&self) -> Vec<SetFieldValueRequest> {
		self.calls
			.borrow()
			.iter()
			.filter_map(|call| match call {
				StoreCall::SetValue(request) => Some(request.clone()),
				_ => None,
			})
			.collect()
	}

	/// Replaces the snapshot entry for `name`.
	pub fn set_field_state(&self, name: &str, state: FieldState) {
		self.fields.borrow_mut().insert(name.to_string(), state);
	}

	/// Sets only the value of `name`, keeping or defaulting the other flags.
	pub fn set_field_value_snapshot(&self, name: &str, value: Value) {
		self.fields
			.borrow_mut()
			.entry(name.to_string())
			.or_default()
			.value = Some(value);
	}

	pub fn remove_field_state(&self, name: &str) {
		self.fields.borrow_mut().remove(name);
	}
}

impl FieldStore for RecordingStore {
	fn mount_field(&self, request: MountRequest) {
		self.calls.borrow_mut().push(StoreCall::Mount(request));
	}

	fn unmount_field(&self, request: UnmountRequest) {
		self.calls.borrow_mut().push(StoreCall::Unmount(request));
	}

	fn blur_field(&self, request: BlurRequest) {
		self.calls.borrow_mut().push(StoreCall::Blur(request));
	}

	fn set_field_value(&self, request: SetFieldValueRequest) {
		self.calls.borrow_mut().push(StoreCall::SetValue(request));
	}

	fn field(&self, name: &str) -> Option<FieldState> {
		self.fields.borrow().get(name).cloned()
	}
}

/// Minimal store applying requests to an in-memory field mapping.
///
/// - mount inserts the initial state unless the field kept state from an
///   earlier non-destroying unmount
/// - change resolves literals and transforms against the stored value
/// - blur marks the field touched
/// - unmount drops the state only when `destroy` is set
///
/// Validation rules are not run.
#[derive(Debug, Default)]
pub struct MemoryStore {
	fields: RefCell<FieldsSnapshot>,
	mounted: RefCell<HashSet<String>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Copy of the whole field mapping.
	pub fn fields(&self) -> FieldsSnapshot {
		self.fields.borrow().clone()
	}

	pub fn is_mounted(&self, name: &str) -> bool {
		self.mounted.borrow().contains(name)
	}
}

impl FieldStore for MemoryStore {
	fn mount_field(&self, request: MountRequest) {
		self.mounted.borrow_mut().insert(request.name.clone());
		self.fields
			.borrow_mut()
			.entry(request.name.clone())
			.or_insert_with(|| request.initial_state());
	}

	fn unmount_field(&self, request: UnmountRequest) {
		self.mounted.borrow_mut().remove(&request.name);
		if request.destroy {
			self.fields.borrow_mut().remove(&request.name);
		}
	}

	fn blur_field(&self, request: BlurRequest) {
		if let Some(state) = self.fields.borrow_mut().get_mut(&request.name) {
			state.touched = true;
		}
	}

	fn set_field_value(&self, request: SetFieldValueRequest) {
		let mut fields = self.fields.borrow_mut();
		let state = fields.entry(request.name).or_default();
		state.value = Some(request.value.resolve(state.value.as_ref()));
	}

	fn field(&self, name: &str) -> Option<FieldState> {
		self.fields.borrow().get(name).cloned()
	}
}

#[derive(Debug)]
struct MockElementInner {
	kind: InputKind,
	value: String,
	checked: Cell<bool>,
	attached: Cell<bool>,
}

/// Widget handle double. Clones refer to the same element.
#[derive(Debug, Clone)]
pub struct MockElement(Rc<MockElementInner>);

impl MockElement {
	pub fn new(kind: InputKind, value: impl Into<String>) -> Self {
		Self(Rc::new(MockElementInner {
			kind,
			value: value.into(),
			checked: Cell::new(false),
			attached: Cell::new(true),
		}))
	}

	pub fn checkbox(value: impl Into<String>) -> Self {
		Self::new(InputKind::Checkbox, value)
	}

	pub fn radio(value: impl Into<String>) -> Self {
		Self::new(InputKind::Radio, value)
	}

	pub fn text(value: impl Into<String>) -> Self {
		Self::new(InputKind::PlainValue, value)
	}

	pub fn checked(&self) -> bool {
		self.0.checked.get()
	}

	/// Simulates the element leaving (or rejoining) the rendered tree.
	pub fn set_attached(&self, attached: bool) {
		self.0.attached.set(attached);
	}
}

impl PartialEq for MockElement {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

impl InputElement for MockElement {
	fn kind(&self) -> InputKind {
		self.0.kind
	}

	fn value(&self) -> String {
		self.0.value.clone()
	}

	fn set_checked(&self, checked: bool) {
		self.0.checked.set(checked);
	}

	fn is_attached(&self) -> bool {
		self.0.attached.get()
	}
}
