//! Field binding controller.
//!
//! A [`FieldBinding`] connects one field's configuration to the shared
//! [`FieldStore`] and to the widgets rendering it.
//!
//! ## Lifecycle
//!
//! ```text
//! FieldBinding::mount ──▶ store.mount_field (exactly once)
//!        │
//!        ├─ render(config) ──▶ observe config, resync groups, fresh response
//!        ├─ on_change ───────▶ extract_value ──▶ store.set_field_value
//!        ├─ on_blur ─────────▶ store.blur_field
//!        ├─ node_ref ────────▶ GroupSynchronizer::register / prune
//!        │
//! unmount() / Drop ──▶ store.unmount_field (at most once, latest destroy flag)
//! ```
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use fielder_binding::testing::{MemoryStore, MockElement};
//! use fielder_binding::{ChangeEvent, FieldBinding, FieldConfig};
//! use serde_json::json;
//!
//! let store = Rc::new(MemoryStore::new());
//! let binding = FieldBinding::<MockElement>::mount(store.clone(), FieldConfig::new("colors"));
//!
//! let (props, _) = binding.response();
//! let red = MockElement::checkbox("red");
//! props.node_ref.call(Some(red.clone()));
//! props.on_change.call(ChangeEvent::input("checkbox", "red"));
//!
//! let (props, _) = binding.render(FieldConfig::new("colors"));
//! assert_eq!(props.value, Some(json!(["red"])));
//! assert!(red.checked());
//! ```
//!
//! Handlers hold only a weak reference to the binding. Once the binding is
//! unmounted or dropped they log a warning and do nothing.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::callback::Callback;
use crate::config::FieldConfig;
use crate::element::{ChangeEvent, InputElement};
use crate::error::{BindingError, BindingResult};
use crate::extract::extract_change;
use crate::lifecycle::{BindingPhase, LifecycleTracker};
use crate::store::{BlurRequest, FieldState, FieldStore, UnmountRequest};
use crate::sync::GroupSynchronizer;

/// Reserved second slot of a [`UseFieldResponse`].
///
/// Carries no data yet; it exists so per-field metadata can be added without
/// changing the response shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct FieldMeta {}

/// Current field state plus the handlers to wire into widgets.
#[derive(Debug, Clone)]
pub struct FieldProps<H> {
	pub name: String,
	pub value: Option<Value>,
	pub error: Option<String>,
	pub valid: bool,
	pub touched: bool,
	pub on_blur: Callback<()>,
	pub on_change: Callback<ChangeEvent>,
	/// Element reference callback: `Some(handle)` on attach, `None` on detach.
	pub node_ref: Callback<Option<H>>,
}

/// `(state-and-handlers, reserved)` pair returned on every render.
pub type UseFieldResponse<H> = (FieldProps<H>, FieldMeta);

struct BindingState<H> {
	name: String,
	store: Rc<dyn FieldStore>,
	config: RefCell<FieldConfig>,
	lifecycle: RefCell<LifecycleTracker>,
	groups: RefCell<GroupSynchronizer<H>>,
	/// Field value the group handles were last synced to.
	synced_value: RefCell<Option<Value>>,
}

impl<H: InputElement> BindingState<H> {
	fn ensure_active(&self) -> BindingResult<()> {
		let phase = self.lifecycle.borrow().phase();
		if phase == BindingPhase::Active {
			Ok(())
		} else {
			Err(BindingError::Inactive {
				name: self.name.clone(),
				phase,
			})
		}
	}

	fn current_state(&self) -> FieldState {
		self.store
			.field(&self.name)
			.unwrap_or_else(|| self.config.borrow().default_state())
	}

	fn blur(&self) -> BindingResult<()> {
		self.ensure_active()?;
		tracing::trace!(field = %self.name, "blur");
		self.store.blur_field(BlurRequest {
			name: self.name.clone(),
		});
		Ok(())
	}

	fn change(&self, event: &ChangeEvent) -> BindingResult<()> {
		self.ensure_active()?;
		tracing::trace!(field = %self.name, kind = %event.kind(), "change");
		self.store.set_field_value(extract_change(&self.name, event));
		Ok(())
	}

	fn attach(&self, handle: Option<H>) -> BindingResult<()> {
		let Some(handle) = handle else {
			self.detach_all();
			return Ok(());
		};
		self.ensure_active()?;
		let current = self.current_state().value;
		self.groups
			.borrow_mut()
			.register(&self.name, handle, current.as_ref());
		*self.synced_value.borrow_mut() = current;
		Ok(())
	}

	/// `node_ref(None)`. Renderers release refs after teardown as part of a
	/// normal unmount, so an inactive binding ignores it.
	fn detach_all(&self) {
		if !self.lifecycle.borrow().is_active() {
			tracing::trace!(field = %self.name, "detach after teardown");
			return;
		}
		let removed = self.groups.borrow_mut().prune_detached(&self.name);
		tracing::trace!(field = %self.name, removed, "pruned detached handles");
	}

	fn sync_groups(&self) {
		let current = self.current_state().value;
		if *self.synced_value.borrow() == current {
			return;
		}
		self.groups
			.borrow()
			.recompute(&self.name, current.as_ref());
		*self.synced_value.borrow_mut() = current;
	}
}

/// Wraps a binding operation into a handler holding only a `Weak` reference.
///
/// On an inactive or dropped binding the operation is not run; the failure is
/// logged as a warning instead.
fn guarded<H, Args>(
	state: &Rc<BindingState<H>>,
	op: fn(&BindingState<H>, Args) -> BindingResult<()>,
) -> Callback<Args>
where
	H: InputElement,
	Args: 'static,
{
	let weak: Weak<BindingState<H>> = Rc::downgrade(state);
	let name = state.name.clone();
	Callback::new(move |args| {
		let result = match weak.upgrade() {
			Some(state) => op(&state, args),
			None => Err(BindingError::Dropped { name: name.clone() }),
		};
		if let Err(err) = result {
			tracing::warn!(field = %name, error = %err, "ignoring handler call");
		}
	})
}

/// `node_ref` handler. Renderers release element refs after the binding is
/// gone, so `None` on a dropped binding is ignored without a warning.
fn node_ref_handler<H: InputElement>(state: &Rc<BindingState<H>>) -> Callback<Option<H>> {
	let attach = guarded(state, |state, handle: Option<H>| state.attach(handle));
	let weak = Rc::downgrade(state);
	let name = state.name.clone();
	Callback::new(move |handle: Option<H>| {
		if handle.is_none() && weak.strong_count() == 0 {
			tracing::trace!(field = %name, "detach after drop");
			return;
		}
		attach.call(handle);
	})
}

/// One field's connection to the store and to its widgets.
///
/// `H` is the widget handle type passed to `node_ref`.
pub struct FieldBinding<H: InputElement> {
	state: Rc<BindingState<H>>,
	on_blur: Callback<()>,
	on_change: Callback<ChangeEvent>,
	node_ref: Callback<Option<H>>,
}

impl<H: InputElement> FieldBinding<H> {
	/// Registers the field with `store` and returns the live binding.
	///
	/// The mount request is built from `config` here and never again.
	pub fn mount(store: Rc<dyn FieldStore>, config: FieldConfig) -> Self {
		let request = config.mount_request();
		let state = Rc::new(BindingState {
			name: config.name.clone(),
			store,
			lifecycle: RefCell::new(LifecycleTracker::new(&config)),
			config: RefCell::new(config),
			groups: RefCell::new(GroupSynchronizer::new()),
			synced_value: RefCell::new(None),
		});

		tracing::debug!(
			field = %state.name,
			initial_valid = request.initial_valid,
			"mounting field"
		);
		state.store.mount_field(request);
		state.lifecycle.borrow_mut().activate();

		Self {
			on_blur: guarded(&state, |state, ()| state.blur()),
			on_change: guarded(&state, |state, event: ChangeEvent| state.change(&event)),
			node_ref: node_ref_handler(&state),
			state,
		}
	}

	pub fn name(&self) -> &str {
		&self.state.name
	}

	pub fn phase(&self) -> BindingPhase {
		self.state.lifecycle.borrow().phase()
	}

	pub fn is_active(&self) -> bool {
		self.state.lifecycle.borrow().is_active()
	}

	/// Configuration as of the latest render.
	pub fn config(&self) -> FieldConfig {
		self.state.config.borrow().clone()
	}

	/// Field state from the store, or the configured defaults when absent.
	pub fn field_state(&self) -> FieldState {
		self.state.current_state()
	}

	/// Re-renders with `config`: records it, resyncs groups and returns a
	/// fresh response. Never re-mounts.
	///
	/// The field name cannot change; a config carrying another name is used
	/// for everything except the name.
	pub fn render(&self, config: FieldConfig) -> UseFieldResponse<H> {
		if config.name != self.state.name {
			tracing::warn!(
				field = %self.state.name,
				requested = %config.name,
				"field name changed on a live binding; keeping original"
			);
		}
		self.state.lifecycle.borrow_mut().observe(&config);
		*self.state.config.borrow_mut() = config;
		self.sync_fields();
		self.response()
	}

	/// Reacts to a store update: rewrites group handles if the value moved.
	pub fn sync_fields(&self) {
		if self.is_active() {
			self.state.sync_groups();
		}
	}

	/// Current state-and-handlers pair.
	pub fn response(&self) -> UseFieldResponse<H> {
		let state = self.state.current_state();
		let props = FieldProps {
			name: self.state.name.clone(),
			value: state.value,
			error: state.error,
			valid: state.valid,
			touched: state.touched,
			on_blur: self.on_blur.clone(),
			on_change: self.on_change.clone(),
			node_ref: self.node_ref.clone(),
		};
		(props, FieldMeta::default())
	}

	/// Issues a blur request, reporting misuse instead of logging it.
	pub fn try_blur(&self) -> BindingResult<()> {
		self.state.blur()
	}

	/// Issues the change request implied by `event`.
	pub fn try_change(&self, event: &ChangeEvent) -> BindingResult<()> {
		self.state.change(event)
	}

	/// Registers a widget handle (`Some`) or prunes detached ones (`None`).
	///
	/// `None` on an inactive binding is a no-op rather than an error.
	pub fn try_attach(&self, handle: Option<H>) -> BindingResult<()> {
		self.state.attach(handle)
	}

	/// Removes a specific handle from the field's group.
	pub fn detach(&self, handle: &H) -> bool {
		self.state.groups.borrow_mut().detach(&self.state.name, handle)
	}

	/// Handles currently registered for this field.
	pub fn handles(&self) -> Vec<H> {
		self.state
			.groups
			.borrow()
			.handles(&self.state.name)
			.to_vec()
	}

	/// Unregisters the field from the store.
	///
	/// Returns `true` if this call issued the unmount request. Later calls,
	/// and the eventual drop, are no-ops.
	pub fn unmount(&self) -> bool {
		let Some(destroy) = self.state.lifecycle.borrow_mut().teardown() else {
			return false;
		};
		tracing::debug!(field = %self.state.name, destroy, "unmounting field");
		self.state.groups.borrow_mut().clear(&self.state.name);
		self.state.store.unmount_field(UnmountRequest {
			name: self.state.name.clone(),
			destroy,
		});
		true
	}
}

impl<H: InputElement> Drop for FieldBinding<H> {
	fn drop(&mut self) {
		self.unmount();
	}
}

impl<H: InputElement> std::fmt::Debug for FieldBinding<H> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldBinding")
			.field("name", &self.state.name)
			.field("phase", &self.phase())
			.finish()
	}
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
impl<H> FieldProps<H> {
	/// Adapts `on_change` into a DOM `change`/`input` event listener.
	pub fn dom_change_listener(&self) -> impl Fn(web_sys::Event) + 'static {
		let on_change = self.on_change.clone();
		move |event| {
			if let Some(change) = ChangeEvent::from_event(&event) {
				on_change.call(change);
			}
		}
	}
}
