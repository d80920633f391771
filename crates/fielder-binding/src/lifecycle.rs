//! Binding lifecycle tracking.
//!
//! ```text
//! Pending ──activate()──▶ Active ──teardown()──▶ Unmounted
//! ```
//!
//! Besides the phase, the tracker holds the `destroy_on_unmount` decision as
//! of the most recent configuration. A dynamic form may decide late whether a
//! field's value should survive its widget, so the flag is refreshed on every
//! [`observe`](LifecycleTracker::observe) and read only when teardown runs.

use serde::{Deserialize, Serialize};

use crate::config::FieldConfig;

/// Where a binding is in its mount/unmount window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingPhase {
	/// Created, mount request not yet issued.
	Pending,
	/// Mounted; handlers are live.
	Active,
	/// Unmount request issued; handlers are inert.
	Unmounted,
}

impl std::fmt::Display for BindingPhase {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Pending => write!(f, "pending"),
			Self::Active => write!(f, "active"),
			Self::Unmounted => write!(f, "unmounted"),
		}
	}
}

/// Tracks the phase and latest destroy decision of one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleTracker {
	phase: BindingPhase,
	destroy_on_unmount: bool,
}

impl LifecycleTracker {
	pub fn new(config: &FieldConfig) -> Self {
		Self {
			phase: BindingPhase::Pending,
			destroy_on_unmount: config.destroy_on_unmount,
		}
	}

	/// Records the configuration of the latest render.
	pub fn observe(&mut self, config: &FieldConfig) {
		if self.destroy_on_unmount != config.destroy_on_unmount {
			tracing::debug!(
				field = %config.name,
				destroy = config.destroy_on_unmount,
				"destroy-on-unmount changed"
			);
		}
		self.destroy_on_unmount = config.destroy_on_unmount;
	}

	/// Destroy decision as of the most recently observed configuration.
	pub fn destroy_on_unmount(&self) -> bool {
		self.destroy_on_unmount
	}

	pub fn phase(&self) -> BindingPhase {
		self.phase
	}

	pub fn is_active(&self) -> bool {
		self.phase == BindingPhase::Active
	}

	/// Moves `Pending` to `Active`. Returns `false` from any other phase.
	pub fn activate(&mut self) -> bool {
		if self.phase != BindingPhase::Pending {
			return false;
		}
		self.phase = BindingPhase::Active;
		true
	}

	/// Moves `Active` to `Unmounted` and returns the destroy flag to send.
	///
	/// Returns `None` when the binding is not active, so teardown can run at
	/// most once.
	pub fn teardown(&mut self) -> Option<bool> {
		if self.phase != BindingPhase::Active {
			return None;
		}
		self.phase = BindingPhase::Unmounted;
		Some(self.destroy_on_unmount)
	}
}
