//! In-memory DOM used on native targets and in tests.
//!
//! [`MockNode`] follows the listener semantics of the DOM closely enough to
//! exercise subscription lifecycles without a browser:
//!
//! - registration is keyed by `(event name, listener identity, capture)` and
//!   duplicates are ignored
//! - dispatch runs capture listeners from the root down, then the target's
//!   listeners (capture first), then bubble listeners back up
//! - `once` listeners are removed before they run, aborted signals silence
//!   their listeners
//! - the most recent primitive calls are recorded as [`ListenerCall`]s

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::rc::{Rc, Weak};

use super::abort::MockAbortSignal;
use super::event::{EventPhase, MockEvent};
use crate::error::{ListenerError, ListenerOperation};
use crate::event::{EffectiveOptions, EventTarget, HandlerBox, TargetInput};

/// Listener object registered with a [`MockNode`].
///
/// Identity, not behavior, decides whether two listeners are the same.
#[derive(Clone)]
pub struct MockListener {
	callback: Rc<dyn Fn(MockEvent)>,
}

impl std::fmt::Debug for MockListener {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockListener").finish_non_exhaustive()
	}
}

impl MockListener {
	/// Wraps a callback.
	pub fn new(callback: impl Fn(MockEvent) + 'static) -> Self {
		Self {
			callback: Rc::new(callback),
		}
	}

	/// Identity comparison.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.callback, &other.callback)
	}
}

/// A recorded call to one of the listener primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenerCall {
	/// `addEventListener`
	Add {
		/// Event name.
		event_name: String,
		/// Number of arguments the primitive received.
		arg_count: usize,
		/// Effective capture flag.
		capture: bool,
		/// Effective once flag.
		once: bool,
		/// Passive flag, `None` when the key was omitted.
		passive: Option<bool>,
		/// Whether an abort signal was passed.
		has_signal: bool,
	},
	/// `removeEventListener`
	Remove {
		/// Event name.
		event_name: String,
		/// Number of arguments the primitive received.
		arg_count: usize,
		/// Effective capture flag.
		capture: bool,
	},
}

/// Number of primitive calls a [`MockNode`] remembers; older ones are dropped.
pub const CALL_LOG_LIMIT: usize = 256;

struct RegisteredListener {
	event_name: String,
	listener: MockListener,
	capture: bool,
	once: bool,
	passive: bool,
	signal: Option<MockAbortSignal>,
	removed: Rc<Cell<bool>>,
}

impl RegisteredListener {
	fn is_live(&self) -> bool {
		!self.removed.get() && !self.signal.as_ref().is_some_and(MockAbortSignal::aborted)
	}
}

/// What kind of node this is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
	/// The global window.
	Window,
	/// The document.
	Document,
	/// An element with the given tag name.
	Element(String),
}

struct NodeInner {
	kind: NodeKind,
	parent: RefCell<Weak<NodeInner>>,
	children: RefCell<Vec<MockNode>>,
	listeners: RefCell<Vec<RegisteredListener>>,
	calls: RefCell<VecDeque<ListenerCall>>,
	classes: RefCell<Vec<String>>,
	attributes: RefCell<BTreeMap<String, String>>,
	styles: RefCell<BTreeMap<String, String>>,
	reject_listeners: Cell<bool>,
}

/// A node of the in-memory DOM.
#[derive(Clone)]
pub struct MockNode {
	inner: Rc<NodeInner>,
}

impl std::fmt::Debug for MockNode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("MockNode")
			.field("kind", &self.inner.kind)
			.field("classes", &self.inner.classes.borrow())
			.field("listeners", &self.inner.listeners.borrow().len())
			.finish()
	}
}

impl MockNode {
	fn with_kind(kind: NodeKind) -> Self {
		Self {
			inner: Rc::new(NodeInner {
				kind,
				parent: RefCell::new(Weak::new()),
				children: RefCell::new(Vec::new()),
				listeners: RefCell::new(Vec::new()),
				calls: RefCell::new(VecDeque::new()),
				classes: RefCell::new(Vec::new()),
				attributes: RefCell::new(BTreeMap::new()),
				styles: RefCell::new(BTreeMap::new()),
				reject_listeners: Cell::new(false),
			}),
		}
	}

	/// Creates a detached element.
	pub fn element(tag: impl Into<String>) -> Self {
		Self::with_kind(NodeKind::Element(tag.into()))
	}

	/// Returns the node kind.
	pub fn kind(&self) -> &NodeKind {
		&self.inner.kind
	}

	/// Returns the tag name of elements.
	pub fn tag_name(&self) -> Option<&str> {
		match &self.inner.kind {
			NodeKind::Element(tag) => Some(tag.as_str()),
			_ => None,
		}
	}

	/// Appends `child`, detaching it from any previous parent.
	pub fn append_child(&self, child: &MockNode) {
		if let Some(old_parent) = child.parent() {
			old_parent.remove_child(child);
		}
		*child.inner.parent.borrow_mut() = Rc::downgrade(&self.inner);
		self.inner.children.borrow_mut().push(child.clone());
	}

	/// Removes `child` if it is a direct child.
	pub fn remove_child(&self, child: &MockNode) {
		self.inner
			.children
			.borrow_mut()
			.retain(|existing| !Rc::ptr_eq(&existing.inner, &child.inner));
		*child.inner.parent.borrow_mut() = Weak::new();
	}

	/// Returns the parent node.
	pub fn parent(&self) -> Option<MockNode> {
		self.inner
			.parent
			.borrow()
			.upgrade()
			.map(|inner| MockNode { inner })
	}

	/// Returns the direct children.
	pub fn children(&self) -> Vec<MockNode> {
		self.inner.children.borrow().clone()
	}

	/// Identity comparison.
	pub fn ptr_eq(&self, other: &MockNode) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// Makes the listener primitives fail until reset.
	pub fn reject_listeners(&self, reject: bool) {
		self.inner.reject_listeners.set(reject);
	}

	/// Returns the recorded primitive calls in order, at most
	/// [`CALL_LOG_LIMIT`] of them.
	pub fn listener_calls(&self) -> Vec<ListenerCall> {
		self.inner.calls.borrow().iter().cloned().collect()
	}

	fn record_call(&self, call: ListenerCall) {
		let mut calls = self.inner.calls.borrow_mut();
		if calls.len() == CALL_LOG_LIMIT {
			calls.pop_front();
		}
		calls.push_back(call);
	}

	/// Forgets the recorded primitive calls.
	pub fn clear_listener_calls(&self) {
		self.inner.calls.borrow_mut().clear();
	}

	/// Number of live listeners for `event_name`.
	pub fn listener_count(&self, event_name: &str) -> usize {
		self.inner
			.listeners
			.borrow()
			.iter()
			.filter(|registered| registered.event_name == event_name && registered.is_live())
			.count()
	}

	/// Registers `listener` the way `addEventListener` would.
	pub fn add_listener(
		&self,
		event_name: &str,
		listener: &MockListener,
		options: &EffectiveOptions<MockAbortSignal>,
	) -> Result<(), ListenerError> {
		let (once, passive, signal) = match options {
			EffectiveOptions::Structured(structured) => {
				(structured.once, structured.passive, structured.signal.clone())
			}
			_ => (false, None, None),
		};
		let capture = options.capture();
		self.record_call(ListenerCall::Add {
			event_name: event_name.to_string(),
			arg_count: options.argument_count(),
			capture,
			once,
			passive,
			has_signal: signal.is_some(),
		});

		if self.inner.reject_listeners.get() {
			return Err(ListenerError::host(
				ListenerOperation::Attach,
				event_name,
				"listener registration rejected by mock target",
			));
		}
		if signal.as_ref().is_some_and(MockAbortSignal::aborted) {
			return Ok(());
		}

		let mut listeners = self.inner.listeners.borrow_mut();
		let duplicate = listeners.iter().any(|registered| {
			registered.is_live()
				&& registered.event_name == event_name
				&& registered.capture == capture
				&& registered.listener.ptr_eq(listener)
		});
		if !duplicate {
			listeners.push(RegisteredListener {
				event_name: event_name.to_string(),
				listener: listener.clone(),
				capture,
				once,
				passive: passive.unwrap_or(false),
				signal,
				removed: Rc::new(Cell::new(false)),
			});
		}
		Ok(())
	}

	/// Unregisters `listener` the way `removeEventListener` would.
	pub fn remove_listener(
		&self,
		event_name: &str,
		listener: &MockListener,
		options: &EffectiveOptions<MockAbortSignal>,
	) -> Result<(), ListenerError> {
		let capture = options.capture();
		self.record_call(ListenerCall::Remove {
			event_name: event_name.to_string(),
			arg_count: options.argument_count(),
			capture,
		});

		if self.inner.reject_listeners.get() {
			return Err(ListenerError::host(
				ListenerOperation::Detach,
				event_name,
				"listener removal rejected by mock target",
			));
		}

		self.inner.listeners.borrow_mut().retain(|registered| {
			let matches = registered.event_name == event_name
				&& registered.capture == capture
				&& registered.listener.ptr_eq(listener);
			if matches {
				registered.removed.set(true);
			}
			!matches
		});
		Ok(())
	}

	/// Dispatches a bubbling event named `event_name` at this node.
	pub fn dispatch(&self, event_name: &str) -> MockEvent {
		let event = MockEvent::new(event_name);
		self.dispatch_event(&event);
		event
	}

	/// Dispatches `event` at this node. Returns false if the default action
	/// was prevented.
	pub fn dispatch_event(&self, event: &MockEvent) -> bool {
		event.begin(self);

		let mut ancestors = Vec::new();
		let mut cursor = self.parent();
		while let Some(node) = cursor {
			cursor = node.parent();
			ancestors.push(node);
		}

		'propagation: {
			for node in ancestors.iter().rev() {
				node.invoke_listeners(event, EventPhase::Capturing, true);
				if event.propagation_stopped() {
					break 'propagation;
				}
			}

			self.invoke_listeners(event, EventPhase::AtTarget, true);
			if !event.immediate_propagation_stopped() {
				self.invoke_listeners(event, EventPhase::AtTarget, false);
			}
			if event.propagation_stopped() || !event.bubbles() {
				break 'propagation;
			}

			for node in &ancestors {
				node.invoke_listeners(event, EventPhase::Bubbling, false);
				if event.propagation_stopped() {
					break 'propagation;
				}
			}
		}

		event.finish();
		!event.default_prevented()
	}

	fn invoke_listeners(&self, event: &MockEvent, phase: EventPhase, capture: bool) {
		// Snapshot: listeners added during dispatch do not run, removed ones are skipped.
		let snapshot: Vec<(MockListener, bool, bool, Option<MockAbortSignal>, Rc<Cell<bool>>)> = self
			.inner
			.listeners
			.borrow()
			.iter()
			.filter(|registered| {
				registered.event_name == event.event_type() && registered.capture == capture
			})
			.map(|registered| {
				(
					registered.listener.clone(),
					registered.once,
					registered.passive,
					registered.signal.clone(),
					registered.removed.clone(),
				)
			})
			.collect();

		for (listener, once, passive, signal, removed) in snapshot {
			if removed.get() || signal.as_ref().is_some_and(MockAbortSignal::aborted) {
				continue;
			}
			if once {
				removed.set(true);
				self.inner
					.listeners
					.borrow_mut()
					.retain(|registered| !Rc::ptr_eq(&registered.removed, &removed));
			}
			event.enter(self, phase, passive);
			(listener.callback)(event.clone());
			if event.immediate_propagation_stopped() {
				break;
			}
		}
	}

	/// Returns the element's classes in insertion order.
	pub fn class_list(&self) -> Vec<String> {
		self.inner.classes.borrow().clone()
	}

	/// Whether the element has `class`.
	pub fn has_class(&self, class: &str) -> bool {
		self.inner.classes.borrow().iter().any(|c| c == class)
	}

	/// Adds `class` unless already present.
	pub fn add_class(&self, class: &str) {
		if !self.has_class(class) {
			self.inner.classes.borrow_mut().push(class.to_string());
		}
	}

	/// Removes `class` if present.
	pub fn remove_class(&self, class: &str) {
		self.inner.classes.borrow_mut().retain(|c| c != class);
	}

	/// Replaces the class list from a space-separated string.
	pub fn set_class_name(&self, class_name: &str) {
		*self.inner.classes.borrow_mut() = class_name.split_whitespace().map(str::to_string).collect();
	}

	/// Returns an attribute value.
	pub fn attribute(&self, name: &str) -> Option<String> {
		self.inner.attributes.borrow().get(name).cloned()
	}

	/// Sets an attribute value.
	pub fn set_attribute(&self, name: &str, value: &str) {
		self.inner
			.attributes
			.borrow_mut()
			.insert(name.to_string(), value.to_string());
	}

	/// Returns an inline style property.
	pub fn style(&self, property: &str) -> Option<String> {
		self.inner.styles.borrow().get(property).cloned()
	}

	/// Sets an inline style property.
	pub fn set_style(&self, property: &str, value: &str) {
		self.inner
			.styles
			.borrow_mut()
			.insert(property.to_string(), value.to_string());
	}
}

thread_local! {
	static INSTALLED: RefCell<Option<MockDocument>> = const { RefCell::new(None) };
}

/// A window/document pair with `<html>` and `<body>` elements.
///
/// Installing a document makes it the global one returned by
/// [`EventTarget::global_window`] and [`EventTarget::global_document`] for
/// [`MockNode`] on the current thread.
#[derive(Clone, Debug)]
pub struct MockDocument {
	window: MockNode,
	document: MockNode,
	root: MockNode,
	body: MockNode,
}

impl Default for MockDocument {
	fn default() -> Self {
		Self::new()
	}
}

impl MockDocument {
	/// Creates `window > document > html > body`.
	pub fn new() -> Self {
		let window = MockNode::with_kind(NodeKind::Window);
		let document = MockNode::with_kind(NodeKind::Document);
		let root = MockNode::element("html");
		let body = MockNode::element("body");
		window.append_child(&document);
		document.append_child(&root);
		root.append_child(&body);
		Self {
			window,
			document,
			root,
			body,
		}
	}

	/// The window node.
	pub fn window(&self) -> MockNode {
		self.window.clone()
	}

	/// The document node.
	pub fn document(&self) -> MockNode {
		self.document.clone()
	}

	/// The `<html>` element.
	pub fn document_element(&self) -> MockNode {
		self.root.clone()
	}

	/// The `<body>` element.
	pub fn body(&self) -> MockNode {
		self.body.clone()
	}

	/// Creates a detached element.
	pub fn create_element(&self, tag: &str) -> MockNode {
		MockNode::element(tag)
	}

	/// Makes this the current thread's global document.
	pub fn install(&self) {
		INSTALLED.with(|installed| *installed.borrow_mut() = Some(self.clone()));
	}

	/// Removes the current thread's global document.
	pub fn uninstall() {
		INSTALLED.with(|installed| *installed.borrow_mut() = None);
	}

	/// Returns the current thread's global document.
	pub fn installed() -> Option<MockDocument> {
		INSTALLED.with(|installed| installed.borrow().clone())
	}
}

impl EventTarget for MockNode {
	type Event = MockEvent;
	type Signal = MockAbortSignal;
	type Listener = MockListener;

	fn create_listener(handler: HandlerBox<MockEvent>) -> MockListener {
		MockListener::new(move |event| handler.dispatch(event))
	}

	fn add_event_listener(
		&self,
		event_name: &str,
		listener: &MockListener,
		options: &EffectiveOptions<MockAbortSignal>,
	) -> Result<(), ListenerError> {
		self.add_listener(event_name, listener, options)
	}

	fn remove_event_listener(
		&self,
		event_name: &str,
		listener: &MockListener,
		options: &EffectiveOptions<MockAbortSignal>,
	) -> Result<(), ListenerError> {
		self.remove_listener(event_name, listener, options)
	}

	fn same_target(&self, other: &Self) -> bool {
		self.ptr_eq(other)
	}

	fn same_signal(a: &MockAbortSignal, b: &MockAbortSignal) -> bool {
		a.ptr_eq(b)
	}

	fn global_window() -> Option<Self> {
		MockDocument::installed().map(|document| document.window())
	}

	fn global_document() -> Option<Self> {
		MockDocument::installed().map(|document| document.document())
	}
}

impl From<MockNode> for TargetInput<MockNode> {
	fn from(node: MockNode) -> Self {
		TargetInput::Direct(node)
	}
}

impl From<&MockNode> for TargetInput<MockNode> {
	fn from(node: &MockNode) -> Self {
		TargetInput::Direct(node.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::event::EffectiveListenerOptions;
	use rstest::rstest;

	fn recording(log: &Rc<RefCell<Vec<String>>>, label: &str) -> MockListener {
		let log = log.clone();
		let label = label.to_string();
		MockListener::new(move |_| log.borrow_mut().push(label.clone()))
	}

	#[rstest]
	fn test_capture_target_bubble_order() {
		let document = MockDocument::new();
		let parent = document.create_element("div");
		let child = document.create_element("button");
		document.body().append_child(&parent);
		parent.append_child(&child);

		let log = Rc::new(RefCell::new(Vec::new()));
		parent
			.add_listener("click", &recording(&log, "parent-bubble"), &EffectiveOptions::Omit)
			.unwrap();
		parent
			.add_listener("click", &recording(&log, "parent-capture"), &EffectiveOptions::Capture(true))
			.unwrap();
		child
			.add_listener("click", &recording(&log, "child"), &EffectiveOptions::Omit)
			.unwrap();
		document
			.window()
			.add_listener("click", &recording(&log, "window-capture"), &EffectiveOptions::Capture(true))
			.unwrap();

		child.dispatch("click");

		assert_eq!(
			*log.borrow(),
			vec!["window-capture", "parent-capture", "child", "parent-bubble"]
		);
	}

	#[rstest]
	fn test_duplicate_registration_is_ignored() {
		let node = MockNode::element("div");
		let listener = MockListener::new(|_| {});
		node.add_listener("click", &listener, &EffectiveOptions::Omit).unwrap();
		node.add_listener("click", &listener, &EffectiveOptions::Omit).unwrap();
		assert_eq!(node.listener_count("click"), 1);

		node.add_listener("click", &listener, &EffectiveOptions::Capture(true)).unwrap();
		assert_eq!(node.listener_count("click"), 2);
	}

	#[rstest]
	fn test_remove_matches_capture_flag() {
		let node = MockNode::element("div");
		let listener = MockListener::new(|_| {});
		node.add_listener("click", &listener, &EffectiveOptions::Capture(true)).unwrap();

		node.remove_listener("click", &listener, &EffectiveOptions::Omit).unwrap();
		assert_eq!(node.listener_count("click"), 1);

		node.remove_listener("click", &listener, &EffectiveOptions::Capture(true)).unwrap();
		assert_eq!(node.listener_count("click"), 0);
	}

	#[rstest]
	fn test_once_listener_runs_once() {
		let node = MockNode::element("div");
		let hits = Rc::new(Cell::new(0));
		let listener = {
			let hits = hits.clone();
			MockListener::new(move |_| hits.set(hits.get() + 1))
		};
		let options = EffectiveOptions::Structured(EffectiveListenerOptions {
			capture: false,
			once: true,
			passive: None,
			signal: None,
		});
		node.add_listener("click", &listener, &options).unwrap();

		node.dispatch("click");
		node.dispatch("click");
		assert_eq!(hits.get(), 1);
		assert_eq!(node.listener_count("click"), 0);
	}

	#[rstest]
	fn test_passive_listener_cannot_prevent_default() {
		let node = MockNode::element("div");
		let listener = MockListener::new(|event| event.prevent_default());
		let options = EffectiveOptions::Structured(EffectiveListenerOptions {
			capture: false,
			once: false,
			passive: Some(true),
			signal: None,
		});
		node.add_listener("wheel", &listener, &options).unwrap();

		let event = node.dispatch("wheel");
		assert!(!event.default_prevented());
	}

	#[rstest]
	fn test_stop_propagation_halts_bubbling() {
		let parent = MockNode::element("div");
		let child = MockNode::element("span");
		parent.append_child(&child);

		let log = Rc::new(RefCell::new(Vec::new()));
		child
			.add_listener("click", &MockListener::new(|event| event.stop_propagation()), &EffectiveOptions::Omit)
			.unwrap();
		parent
			.add_listener("click", &recording(&log, "parent"), &EffectiveOptions::Omit)
			.unwrap();

		child.dispatch("click");
		assert!(log.borrow().is_empty());
	}

	#[rstest]
	fn test_non_bubbling_event_skips_ancestors() {
		let parent = MockNode::element("div");
		let child = MockNode::element("img");
		parent.append_child(&child);

		let log = Rc::new(RefCell::new(Vec::new()));
		parent
			.add_listener("error", &recording(&log, "parent"), &EffectiveOptions::Omit)
			.unwrap();
		child
			.add_listener("error", &recording(&log, "child"), &EffectiveOptions::Omit)
			.unwrap();

		child.dispatch_event(&MockEvent::with_bubbles("error", false));
		assert_eq!(*log.borrow(), vec!["child"]);
	}

	#[rstest]
	fn test_event_reports_target_and_phase() {
		let parent = MockNode::element("div");
		let child = MockNode::element("span");
		parent.append_child(&child);

		let seen = Rc::new(RefCell::new(Vec::new()));
		let listener = {
			let seen = seen.clone();
			MockListener::new(move |event: MockEvent| {
				let current = event.current_target().unwrap();
				seen.borrow_mut()
					.push((current.tag_name().unwrap().to_string(), event.phase()));
			})
		};
		parent.add_listener("click", &listener, &EffectiveOptions::Omit).unwrap();
		child.add_listener("click", &listener, &EffectiveOptions::Omit).unwrap();

		let event = child.dispatch("click");
		assert!(event.target().unwrap().ptr_eq(&child));
		assert_eq!(
			*seen.borrow(),
			vec![
				("span".to_string(), EventPhase::AtTarget),
				("div".to_string(), EventPhase::Bubbling)
			]
		);
		assert_eq!(event.phase(), EventPhase::None);
	}

	#[rstest]
	fn test_class_list_operations() {
		let node = MockNode::element("html");
		node.add_class("foo");
		node.add_class("foo");
		node.add_class("bar");
		assert_eq!(node.class_list(), vec!["foo", "bar"]);

		node.remove_class("foo");
		assert!(!node.has_class("foo"));

		node.set_class_name("  a  b ");
		assert_eq!(node.class_list(), vec!["a", "b"]);
	}

	#[rstest]
	fn test_append_child_reparents() {
		let a = MockNode::element("div");
		let b = MockNode::element("div");
		let child = MockNode::element("span");
		a.append_child(&child);
		b.append_child(&child);
		assert!(a.children().is_empty());
		assert!(child.parent().unwrap().ptr_eq(&b));
	}

	#[rstest]
	fn test_call_log_keeps_most_recent_calls() {
		let node = MockNode::element("button");
		let listener = MockListener::new(|_| {});
		for _ in 0..CALL_LOG_LIMIT {
			node.add_listener("click", &listener, &EffectiveOptions::Omit)
				.unwrap();
			node.remove_listener("click", &listener, &EffectiveOptions::Omit)
				.unwrap();
		}
		node.add_listener("focus", &listener, &EffectiveOptions::Capture(true))
			.unwrap();

		let calls = node.listener_calls();
		assert_eq!(calls.len(), CALL_LOG_LIMIT);
		assert!(matches!(
			calls.last(),
			Some(ListenerCall::Add { event_name, capture: true, .. }) if event_name == "focus"
		));
		assert!(matches!(calls.first(), Some(ListenerCall::Remove { event_name, .. }) if event_name == "click"));
		assert_eq!(node.listener_count("focus"), 1);
	}
}
