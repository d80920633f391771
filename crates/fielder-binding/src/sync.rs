//! Checkbox and radio group synchronization.
//!
//! Several physical inputs can render one logical field: a set of checkboxes
//! sharing a sequence value, or a set of radio buttons sharing a scalar. The
//! [`GroupSynchronizer`] keeps a registry of those handles per field name and
//! rewrites their checked state from the field's authoritative value.
//!
//! ## Invariants
//!
//! 1. A handle's checked state is a pure function of its own value and the
//!    field value; the element's current checked state is never read.
//! 2. Only checkbox and radio handles are registered. Other kinds are
//!    ignored and never marked checked.
//! 3. Registering the same handle twice keeps a single registry entry.
//! 4. Recomputation writes display state only. It never calls the store.

use std::collections::HashMap;

use serde_json::Value;

use crate::element::{InputElement, InputKind};

/// Whether a handle of `kind` valued `handle_value` shows as checked for the
/// field value `current`.
///
/// # Examples
///
/// ```
/// use fielder_binding::{InputKind, is_checked};
/// use serde_json::json;
///
/// assert!(is_checked(InputKind::Checkbox, "b", Some(&json!(["a", "b"]))));
/// assert!(is_checked(InputKind::Radio, "b", Some(&json!("b"))));
/// assert!(!is_checked(InputKind::Radio, "b", None));
/// assert!(!is_checked(InputKind::PlainValue, "b", Some(&json!("b"))));
/// ```
pub fn is_checked(kind: InputKind, handle_value: &str, current: Option<&Value>) -> bool {
	match (kind, current) {
		(InputKind::Checkbox, Some(Value::Array(items))) => {
			items.iter().any(|item| item.as_str() == Some(handle_value))
		}
		(InputKind::Radio, Some(Value::String(selected))) => selected == handle_value,
		_ => false,
	}
}

/// Registry of checkbox/radio handles keyed by field name.
#[derive(Debug)]
pub struct GroupSynchronizer<H> {
	groups: HashMap<String, Vec<H>>,
}

impl<H> Default for GroupSynchronizer<H> {
	fn default() -> Self {
		Self {
			groups: HashMap::new(),
		}
	}
}

impl<H: InputElement> GroupSynchronizer<H> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `handle` under field `name` and resyncs the whole group.
	///
	/// Returns `true` when the handle was not registered before. Handles
	/// that are neither checkbox nor radio are ignored and return `false`.
	pub fn register(&mut self, name: &str, handle: H, current: Option<&Value>) -> bool {
		if !handle.kind().is_group() {
			tracing::trace!(field = %name, "ignoring non-group handle");
			return false;
		}

		let group = self.groups.entry(name.to_string()).or_default();
		let added = match group.iter_mut().find(|existing| **existing == handle) {
			Some(slot) => {
				*slot = handle;
				false
			}
			None => {
				group.push(handle);
				true
			}
		};

		self.recompute(name, current);
		added
	}

	/// Removes `handle` from field `name`. Returns whether it was registered.
	pub fn detach(&mut self, name: &str, handle: &H) -> bool {
		let Some(group) = self.groups.get_mut(name) else {
			return false;
		};
		let before = group.len();
		group.retain(|existing| existing != handle);
		let removed = group.len() != before;
		if group.is_empty() {
			self.groups.remove(name);
		}
		removed
	}

	/// Drops handles of field `name` that are no longer attached.
	///
	/// Returns the number of handles removed.
	pub fn prune_detached(&mut self, name: &str) -> usize {
		let Some(group) = self.groups.get_mut(name) else {
			return 0;
		};
		let before = group.len();
		group.retain(|handle| handle.is_attached());
		let removed = before - group.len();
		if group.is_empty() {
			self.groups.remove(name);
		}
		removed
	}

	/// Rewrites the checked state of every handle registered under `name`.
	pub fn recompute(&self, name: &str, current: Option<&Value>) {
		let Some(group) = self.groups.get(name) else {
			return;
		};
		tracing::debug!(field = %name, handles = group.len(), "recomputing group");
		for handle in group {
			handle.set_checked(is_checked(handle.kind(), &handle.value(), current));
		}
	}

	/// Handles currently registered under `name`.
	pub fn handles(&self, name: &str) -> &[H] {
		self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Forgets every handle of field `name`.
	pub fn clear(&mut self, name: &str) {
		self.groups.remove(name);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::MockElement;
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn checkboxes() -> (MockElement, MockElement, MockElement) {
		(
			MockElement::checkbox("notmatching"),
			MockElement::checkbox("matching"),
			MockElement::text("matching"),
		)
	}

	#[fixture]
	fn radios() -> (MockElement, MockElement, MockElement) {
		(
			MockElement::radio("notmatching"),
			MockElement::radio("matching"),
			MockElement::text("matching"),
		)
	}

	fn register_all(
		sync: &mut GroupSynchronizer<MockElement>,
		handles: &(MockElement, MockElement, MockElement),
		current: Option<&Value>,
	) {
		sync.register("someField", handles.0.clone(), current);
		sync.register("someField", handles.1.clone(), current);
		sync.register("someField", handles.2.clone(), current);
	}

	#[rstest]
	fn test_checkbox_group_marks_matching(checkboxes: (MockElement, MockElement, MockElement)) {
		let mut sync = GroupSynchronizer::new();

		register_all(&mut sync, &checkboxes, Some(&json!(["matching"])));

		assert!(!checkboxes.0.checked());
		assert!(checkboxes.1.checked());
		assert!(!checkboxes.2.checked());
	}

	#[rstest]
	fn test_radio_group_marks_matching(radios: (MockElement, MockElement, MockElement)) {
		let mut sync = GroupSynchronizer::new();

		register_all(&mut sync, &radios, Some(&json!("matching")));

		assert!(!radios.0.checked());
		assert!(radios.1.checked());
		assert!(!radios.2.checked());
	}

	#[rstest]
	fn test_unset_value_unchecks_everything(checkboxes: (MockElement, MockElement, MockElement)) {
		let mut sync = GroupSynchronizer::new();
		checkboxes.1.set_checked(true);

		register_all(&mut sync, &checkboxes, None);

		assert!(!checkboxes.0.checked());
		assert!(!checkboxes.1.checked());
		assert!(!checkboxes.2.checked());
	}

	#[rstest]
	fn test_text_handle_is_not_registered(checkboxes: (MockElement, MockElement, MockElement)) {
		let mut sync = GroupSynchronizer::new();

		register_all(&mut sync, &checkboxes, None);

		assert_eq!(sync.handles("someField").len(), 2);
	}

	#[rstest]
	fn test_recompute_follows_new_value(checkboxes: (MockElement, MockElement, MockElement)) {
		let mut sync = GroupSynchronizer::new();
		register_all(&mut sync, &checkboxes, None);

		sync.recompute("someField", Some(&json!(["notmatching", "matching"])));
		assert!(checkboxes.0.checked());
		assert!(checkboxes.1.checked());

		sync.recompute("someField", Some(&json!([])));
		assert!(!checkboxes.0.checked());
		assert!(!checkboxes.1.checked());
	}

	#[rstest]
	fn test_register_twice_keeps_one_entry() {
		let mut sync = GroupSynchronizer::new();
		let handle = MockElement::checkbox("a");

		assert!(sync.register("f", handle.clone(), Some(&json!(["a"]))));
		assert!(!sync.register("f", handle.clone(), Some(&json!(["a"]))));

		assert_eq!(sync.handles("f").len(), 1);
		assert!(handle.checked());
	}

	#[rstest]
	fn test_register_overrides_stale_widget_state() {
		let mut sync = GroupSynchronizer::new();
		let handle = MockElement::radio("a");
		handle.set_checked(true);

		sync.register("f", handle.clone(), Some(&json!("b")));

		assert!(!handle.checked());
	}

	#[rstest]
	fn test_groups_are_keyed_by_field_name() {
		let mut sync = GroupSynchronizer::new();
		let first = MockElement::radio("x");
		let second = MockElement::radio("x");
		sync.register("first", first.clone(), Some(&json!("x")));
		sync.register("second", second.clone(), None);

		sync.recompute("second", Some(&json!("y")));

		assert!(first.checked());
		assert!(!second.checked());
	}

	#[rstest]
	fn test_detach_removes_handle() {
		let mut sync = GroupSynchronizer::new();
		let handle = MockElement::checkbox("a");
		sync.register("f", handle.clone(), None);

		assert!(sync.detach("f", &handle));
		assert!(!sync.detach("f", &handle));
		assert!(sync.handles("f").is_empty());
	}

	#[rstest]
	fn test_prune_detached_drops_only_detached() {
		let mut sync = GroupSynchronizer::new();
		let kept = MockElement::checkbox("a");
		let gone = MockElement::checkbox("b");
		sync.register("f", kept.clone(), None);
		sync.register("f", gone.clone(), None);
		gone.set_attached(false);

		assert_eq!(sync.prune_detached("f"), 1);
		assert_eq!(sync.handles("f"), &[kept]);
	}

	#[rstest]
	#[case(InputKind::Checkbox, json!([1, "1"]), true)]
	#[case(InputKind::Checkbox, json!([1]), false)]
	#[case(InputKind::Checkbox, json!("1"), false)]
	#[case(InputKind::Radio, json!(1), false)]
	#[case(InputKind::Radio, json!(["1"]), false)]
	#[case(InputKind::Radio, json!("1"), true)]
	fn test_is_checked_uses_strict_equality(
		#[case] kind: InputKind,
		#[case] current: Value,
		#[case] expected: bool,
	) {
		assert_eq!(is_checked(kind, "1", Some(&current)), expected);
	}
}
