//! Cloneable handler wrapper used for `on_blur`, `on_change` and `node_ref`.
//!
//! Bindings live on the UI thread, so unlike the server-side handler types
//! this wrapper is `Rc`-based and carries no `Send + Sync` bounds.
//!
//! ## Example
//!
//! ```
//! use fielder_binding::Callback;
//!
//! let double = Callback::new(|n: i32| n * 2);
//! let shared = double.clone();
//! assert_eq!(shared.call(21), 42);
//! ```

use std::rc::Rc;

/// A cheaply cloneable wrapper around a handler closure.
///
/// Clones share the same underlying closure, so handing a `Callback` to many
/// widgets does not duplicate the captured state.
pub struct Callback<Args, Ret = ()> {
	inner: Rc<dyn Fn(Args) -> Ret + 'static>,
}

impl<Args, Ret> Callback<Args, Ret> {
	/// Creates a new Callback from a function or closure.
	pub fn new<F>(f: F) -> Self
	where
		F: Fn(Args) -> Ret + 'static,
	{
		Self { inner: Rc::new(f) }
	}

	/// Calls the callback with the given arguments.
	pub fn call(&self, args: Args) -> Ret {
		(self.inner)(args)
	}

	/// Returns `true` when both callbacks wrap the same closure allocation.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<Args, Ret> std::fmt::Debug for Callback<Args, Ret> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Callback")
			.field("inner", &"<function>")
			.finish()
	}
}
