//! Event targets, handles and the handler box.
//!
//! [`EventTarget`] is the seam between the subscription lifecycle and the
//! platform: `web_sys::EventTarget` implements it on wasm32 and
//! [`MockNode`](crate::testing::MockNode) implements it everywhere else.

use std::cell::RefCell;
use std::rc::Rc;

use super::options::EffectiveOptions;
use crate::error::ListenerError;
use crate::reactive::NodeRef;

/// A user-supplied event handler.
pub type Handler<E> = Rc<dyn Fn(E) + 'static>;

/// Single-slot holder for the handler of the latest committed render.
///
/// The long-lived listener registered with the target reads from this box on
/// every dispatch, so swapping handlers never requires a resubscription.
pub struct HandlerBox<E> {
	slot: Rc<RefCell<Option<Handler<E>>>>,
}

impl<E> Clone for HandlerBox<E> {
	fn clone(&self) -> Self {
		Self {
			slot: Rc::clone(&self.slot),
		}
	}
}

impl<E> Default for HandlerBox<E> {
	fn default() -> Self {
		Self {
			slot: Rc::new(RefCell::new(None)),
		}
	}
}

impl<E> std::fmt::Debug for HandlerBox<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HandlerBox")
			.field("has_handler", &self.slot.borrow().is_some())
			.finish()
	}
}

impl<E> HandlerBox<E> {
	/// Creates an empty handler box.
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the current handler.
	pub fn set(&self, handler: Handler<E>) {
		*self.slot.borrow_mut() = Some(handler);
	}

	/// Returns true once a handler has been stored.
	pub fn is_set(&self) -> bool {
		self.slot.borrow().is_some()
	}

	/// Invokes the current handler, if any.
	pub fn dispatch(&self, event: E) {
		// Release the borrow first: the handler may re-render and replace itself.
		let handler = self.slot.borrow().clone();
		if let Some(handler) = handler {
			handler(event);
		}
	}
}

/// An object listeners can be registered on.
pub trait EventTarget: Clone + 'static {
	/// The event value handed to handlers.
	type Event: 'static;
	/// The abort signal type accepted in structured options.
	type Signal: Clone + 'static;
	/// The platform listener object registered with the target.
	type Listener: 'static;

	/// Builds the stable listener that forwards every event to `handler`.
	fn create_listener(handler: HandlerBox<Self::Event>) -> Self::Listener;

	/// Registers `listener`. [`EffectiveOptions::Omit`] selects the
	/// two-argument form of the primitive.
	fn add_event_listener(
		&self,
		event_name: &str,
		listener: &Self::Listener,
		options: &EffectiveOptions<Self::Signal>,
	) -> Result<(), ListenerError>;

	/// Unregisters `listener`, matching the options used to register it.
	fn remove_event_listener(
		&self,
		event_name: &str,
		listener: &Self::Listener,
		options: &EffectiveOptions<Self::Signal>,
	) -> Result<(), ListenerError>;

	/// Identity comparison.
	fn same_target(&self, other: &Self) -> bool;

	/// Identity comparison for abort signals.
	fn same_signal(a: &Self::Signal, b: &Self::Signal) -> bool;

	/// The global window, if the environment has one.
	fn global_window() -> Option<Self> {
		None
	}

	/// The global document, if the environment has one.
	fn global_document() -> Option<Self> {
		None
	}
}

/// Where a subscription should be attached.
pub enum TargetInput<T> {
	/// No target (yet). Not an error.
	None,
	/// A concrete target.
	Direct(T),
	/// A handle whose held value is read on every lifecycle pass.
	Handle(NodeRef<T>),
}

impl<T> TargetInput<T> {
	/// Wraps a concrete target.
	pub fn direct(target: T) -> Self {
		Self::Direct(target)
	}

	/// Returns true if the input is a handle.
	pub fn is_handle(&self) -> bool {
		matches!(self, TargetInput::Handle(_))
	}
}

impl<T> Clone for TargetInput<T>
where
	T: Clone,
{
	fn clone(&self) -> Self {
		match self {
			TargetInput::None => TargetInput::None,
			TargetInput::Direct(target) => TargetInput::Direct(target.clone()),
			TargetInput::Handle(handle) => TargetInput::Handle(handle.clone()),
		}
	}
}

impl<T> From<Option<T>> for TargetInput<T> {
	fn from(target: Option<T>) -> Self {
		target.map_or(TargetInput::None, TargetInput::Direct)
	}
}

impl<T> From<NodeRef<T>> for TargetInput<T> {
	fn from(handle: NodeRef<T>) -> Self {
		TargetInput::Handle(handle)
	}
}

impl<T> From<&NodeRef<T>> for TargetInput<T> {
	fn from(handle: &NodeRef<T>) -> Self {
		TargetInput::Handle(handle.clone())
	}
}

/// Resolves the concrete target for this lifecycle pass.
///
/// Handles are read at call time and never cached: the element behind a handle
/// may be created, replaced or removed between renders.
pub fn resolve_target<T: Clone>(input: &TargetInput<T>) -> Option<T> {
	match input {
		TargetInput::None => None,
		TargetInput::Direct(target) => Some(target.clone()),
		TargetInput::Handle(handle) => handle.current(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::Ref;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_resolve_none_and_direct() {
		assert_eq!(resolve_target::<u32>(&TargetInput::None), None);
		assert_eq!(resolve_target(&TargetInput::direct(7u32)), Some(7));
		assert_eq!(resolve_target(&TargetInput::from(None::<u32>)), None);
	}

	#[rstest]
	fn test_resolve_handle_reads_current_value_each_time() {
		let handle: NodeRef<u32> = Ref::new(None);
		let input = TargetInput::from(&handle);
		assert!(input.is_handle());
		assert_eq!(resolve_target(&input), None);

		handle.set(Some(1));
		assert_eq!(resolve_target(&input), Some(1));

		handle.set(Some(2));
		assert_eq!(resolve_target(&input), Some(2));

		handle.set(None);
		assert_eq!(resolve_target(&input), None);
	}

	#[rstest]
	fn test_handler_box_dispatches_latest_handler() {
		let hits = Rc::new(Cell::new(0));
		let handler_box: HandlerBox<u32> = HandlerBox::new();
		assert!(!handler_box.is_set());
		handler_box.dispatch(1);

		let first = {
			let hits = hits.clone();
			Rc::new(move |n: u32| hits.set(hits.get() + n)) as Handler<u32>
		};
		handler_box.set(first);
		handler_box.dispatch(1);
		assert_eq!(hits.get(), 1);

		let second = {
			let hits = hits.clone();
			Rc::new(move |n: u32| hits.set(hits.get() + n * 10)) as Handler<u32>
		};
		handler_box.clone().set(second);
		handler_box.dispatch(1);
		assert_eq!(hits.get(), 11);
	}
}
