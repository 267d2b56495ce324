//! Mock DOM events.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::dom::MockNode;

/// Propagation phase an event is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
	/// Not being dispatched.
	None,
	/// Travelling from the root towards the target.
	Capturing,
	/// At the target itself.
	AtTarget,
	/// Travelling from the target back to the root.
	Bubbling,
}

struct EventInner {
	event_type: String,
	bubbles: bool,
	target: RefCell<Option<MockNode>>,
	current_target: RefCell<Option<MockNode>>,
	phase: Cell<EventPhase>,
	propagation_stopped: Cell<bool>,
	immediate_propagation_stopped: Cell<bool>,
	default_prevented: Cell<bool>,
	in_passive_listener: Cell<bool>,
}

/// An event dispatched through a [`MockNode`] tree.
///
/// Cloning is cheap; all clones observe the same dispatch state.
#[derive(Clone)]
pub struct MockEvent {
	inner: Rc<EventInner>,
}

impl std::fmt::Debug for MockEvent {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockEvent")
			.field("event_type", &self.inner.event_type)
			.field("bubbles", &self.inner.bubbles)
			.field("phase", &self.inner.phase.get())
			.field("default_prevented", &self.inner.default_prevented.get())
			.finish()
	}
}

impl MockEvent {
	/// Creates a bubbling event.
	pub fn new(event_type: impl Into<String>) -> Self {
		Self::with_bubbles(event_type, true)
	}

	/// Creates an event with explicit bubbling behavior.
	pub fn with_bubbles(event_type: impl Into<String>, bubbles: bool) -> Self {
		Self {
			inner: Rc::new(EventInner {
				event_type: event_type.into(),
				bubbles,
				target: RefCell::new(None),
				current_target: RefCell::new(None),
				phase: Cell::new(EventPhase::None),
				propagation_stopped: Cell::new(false),
				immediate_propagation_stopped: Cell::new(false),
				default_prevented: Cell::new(false),
				in_passive_listener: Cell::new(false),
			}),
		}
	}

	/// The event name.
	pub fn event_type(&self) -> &str {
		&self.inner.event_type
	}

	/// Whether the event bubbles.
	pub fn bubbles(&self) -> bool {
		self.inner.bubbles
	}

	/// The node the event was dispatched on.
	pub fn target(&self) -> Option<MockNode> {
		self.inner.target.borrow().clone()
	}

	/// The node whose listener is currently running.
	pub fn current_target(&self) -> Option<MockNode> {
		self.inner.current_target.borrow().clone()
	}

	/// The current propagation phase.
	pub fn phase(&self) -> EventPhase {
		self.inner.phase.get()
	}

	/// Stops propagation after the current node.
	pub fn stop_propagation(&self) {
		self.inner.propagation_stopped.set(true);
	}

	/// Stops propagation immediately, skipping remaining listeners on this node.
	pub fn stop_immediate_propagation(&self) {
		self.inner.propagation_stopped.set(true);
		self.inner.immediate_propagation_stopped.set(true);
	}

	/// Cancels the default action. Ignored inside passive listeners.
	pub fn prevent_default(&self) {
		if !self.inner.in_passive_listener.get() {
			self.inner.default_prevented.set(true);
		}
	}

	/// Whether the default action was cancelled.
	pub fn default_prevented(&self) -> bool {
		self.inner.default_prevented.get()
	}

	pub(super) fn propagation_stopped(&self) -> bool {
		self.inner.propagation_stopped.get()
	}

	pub(super) fn immediate_propagation_stopped(&self) -> bool {
		self.inner.immediate_propagation_stopped.get()
	}

	pub(super) fn begin(&self, target: &MockNode) {
		*self.inner.target.borrow_mut() = Some(target.clone());
	}

	pub(super) fn enter(&self, node: &MockNode, phase: EventPhase, passive: bool) {
		*self.inner.current_target.borrow_mut() = Some(node.clone());
		self.inner.phase.set(phase);
		self.inner.in_passive_listener.set(passive);
	}

	pub(super) fn finish(&self) {
		*self.inner.current_target.borrow_mut() = None;
		self.inner.phase.set(EventPhase::None);
		self.inner.in_passive_listener.set(false);
	}
}
