//! Error types for field bindings.
//!
//! Field validity (`error`, `valid`) is domain state owned by the store and
//! never surfaces here. The only failure this crate reports is misuse of a
//! binding outside its mount/unmount window.

use crate::lifecycle::BindingPhase;

/// Errors reported by fallible [`FieldBinding`](crate::FieldBinding) operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
	/// A handler or operation ran while the binding was not mounted.
	#[error("Field `{name}` is not mounted (phase: {phase})")]
	Inactive { name: String, phase: BindingPhase },
	/// A handler outlived the binding it was created from.
	#[error("Field `{name}` binding has been dropped")]
	Dropped { name: String },
}

pub type BindingResult<T> = Result<T, BindingError>;
