//! Reference hooks: use_ref and use_ref_with
//!
//! A [`Ref`] is a stable, mutable single-slot container. Writing to it never
//! schedules anything; it is the place to keep values that must survive
//! renders without taking part in them.

use std::cell::{Ref as CellRef, RefCell, RefMut};
use std::rc::Rc;

use crate::reactive::RenderCx;

/// A mutable container whose identity is stable across renders.
///
/// Clones share the same slot.
pub struct Ref<T> {
	inner: Rc<RefCell<T>>,
}

/// A handle to a target that may not exist yet.
///
/// Pass it to [`use_event_listener`](super::use_event_listener) to subscribe to
/// whatever the handle holds at commit time.
pub type NodeRef<T> = Ref<Option<T>>;

impl<T> Clone for Ref<T> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

impl<T: std::fmt::Debug> std::fmt::Debug for Ref<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Ref").field(&self.inner.borrow()).finish()
	}
}

impl<T: Default> Default for Ref<T> {
	fn default() -> Self {
		Self::new(T::default())
	}
}

impl<T> Ref<T> {
	/// Creates a container holding `value`.
	pub fn new(value: T) -> Self {
		Self {
			inner: Rc::new(RefCell::new(value)),
		}
	}

	/// Replaces the held value.
	pub fn set(&self, value: T) {
		*self.inner.borrow_mut() = value;
	}

	/// Replaces the held value, returning the previous one.
	pub fn replace(&self, value: T) -> T {
		self.inner.replace(value)
	}

	/// Borrows the held value.
	pub fn borrow(&self) -> CellRef<'_, T> {
		self.inner.borrow()
	}

	/// Mutably borrows the held value.
	pub fn borrow_mut(&self) -> RefMut<'_, T> {
		self.inner.borrow_mut()
	}

	/// Returns true if both containers are the same slot.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}
}

impl<T: Clone> Ref<T> {
	/// Returns a clone of the held value.
	pub fn current(&self) -> T {
		self.inner.borrow().clone()
	}
}

impl<T> NodeRef<T> {
	/// Creates an empty handle.
	pub fn empty() -> Self {
		Ref::new(None)
	}

	/// Returns true if the handle holds a value.
	pub fn is_some(&self) -> bool {
		self.inner.borrow().is_some()
	}
}

/// Returns a [`Ref`] that keeps its identity for the lifetime of the scope.
///
/// This is the React-like equivalent of `useRef`. `initial` is only used on
/// the first render; later renders return the same container untouched.
///
/// # Example
///
/// ```ignore
/// use reinhardt_pages_extras::reactive::{HookScope, use_ref};
///
/// let mut scope = HookScope::new();
/// let renders = scope.render(|cx| {
///     let renders = use_ref(cx, 0u32);
///     *renders.borrow_mut() += 1;
///     renders
/// });
/// ```
pub fn use_ref<T: 'static>(cx: &mut RenderCx<'_>, initial: T) -> Ref<T> {
	use_ref_with(cx, move || initial)
}

/// Like [`use_ref`], but builds the initial value lazily.
///
/// Use this when the initial value is expensive to create or owns resources
/// that must not be created on every render.
pub fn use_ref_with<T, F>(cx: &mut RenderCx<'_>, init: F) -> Ref<T>
where
	T: 'static,
	F: FnOnce() -> T,
{
	cx.slot(|| Ref::new(init()))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::HookScope;
	use rstest::rstest;

	#[rstest]
	fn test_ref_clones_share_slot() {
		let a = Ref::new(1);
		let b = a.clone();
		b.set(2);
		assert_eq!(a.current(), 2);
		assert!(a.ptr_eq(&b));
		assert!(!a.ptr_eq(&Ref::new(2)));
	}

	#[rstest]
	fn test_replace_returns_previous() {
		let r = Ref::new("a".to_string());
		assert_eq!(r.replace("b".to_string()), "a");
		assert_eq!(*r.borrow(), "b");
	}

	#[rstest]
	fn test_node_ref_empty() {
		let handle: NodeRef<u8> = NodeRef::empty();
		assert!(!handle.is_some());
		handle.set(Some(3));
		assert!(handle.is_some());
	}

	#[rstest]
	fn test_use_ref_is_stable_across_renders() {
		let mut scope = HookScope::new();
		let first = scope.render(|cx| use_ref(cx, 10));
		first.set(11);

		let second = scope.render(|cx| use_ref(cx, 10));
		assert!(first.ptr_eq(&second));
		assert_eq!(second.current(), 11);
	}

	#[rstest]
	fn test_use_ref_with_initializes_once() {
		let mut scope = HookScope::new();
		let calls = Ref::new(0);
		for _ in 0..3 {
			let calls = calls.clone();
			scope.render(move |cx| {
				use_ref_with(cx, || {
					*calls.borrow_mut() += 1;
				})
			});
		}
		assert_eq!(calls.current(), 1);
	}
}
