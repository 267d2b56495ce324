//! Event listener hooks: use_event_listener, use_window_event, use_document_event
//!
//! Each call site owns one [`EventSubscription`]. The hook registers three
//! layout effects, in this order:
//!
//! 1. refresh the handler (every commit)
//! 2. sync the `(target, event name, options)` triple (every commit)
//! 3. tear the subscription down (mount once, cleanup on unmount)
//!
//! Layout timing keeps the teardown running even when the host skips
//! passive cleanups.

use std::rc::Rc;

use super::effect::{use_layout_effect, use_layout_effect_with_deps};
use super::reference::use_ref_with;
use crate::event::{
	EventSubscription, EventTarget, Handler, ListenerOptions, TargetInput, resolve_target,
};
use crate::reactive::RenderCx;

/// Subscribes `handler` to `event_name` on `target` for the lifetime of the
/// calling component.
///
/// The handler may be a fresh closure every render; the newest committed one
/// is called without re-registering anything. The listener is only
/// re-registered when the resolved target, the event name or the options
/// change. A target given as a [`NodeRef`](crate::reactive::NodeRef) is read
/// on every commit, so the subscription follows the element behind it.
///
/// Failures of the host's listener primitives are returned by the next
/// [`HookScope::commit`](crate::reactive::HookScope::commit) (or
/// [`unmount`](crate::reactive::HookScope::unmount)).
///
/// # Example
///
/// ```ignore
/// use reinhardt_pages_extras::reactive::{use_event_listener, use_ref};
/// use reinhardt_pages_extras::event::ListenerOptionsInit;
///
/// scope.render(|cx| {
///     let button = use_ref(cx, None::<web_sys::EventTarget>);
///     let clicks = use_ref(cx, 0);
///     use_event_listener(
///         cx,
///         &button,
///         "click",
///         move |_event| *clicks.borrow_mut() += 1,
///         ListenerOptionsInit::new().passive(true),
///     );
/// });
/// ```
pub fn use_event_listener<T, I, H, O>(
	cx: &mut RenderCx<'_>,
	target: I,
	event_name: &str,
	handler: H,
	options: O,
) where
	T: EventTarget,
	I: Into<TargetInput<T>>,
	H: Fn(T::Event) + 'static,
	O: Into<ListenerOptions<T::Signal>>,
{
	let subscription = use_ref_with(cx, || Rc::new(EventSubscription::<T>::new())).current();
	let reporter = cx.reporter();

	let handler: Handler<T::Event> = Rc::new(handler);
	use_layout_effect(cx, {
		let subscription = Rc::clone(&subscription);
		move || {
			subscription.set_handler(Rc::clone(&handler));
			None::<fn()>
		}
	});

	let target = target.into();
	let event_name = event_name.to_string();
	let options = options.into();
	use_layout_effect(cx, {
		let subscription = Rc::clone(&subscription);
		let reporter = reporter.clone();
		move || {
			if let Err(err) = subscription.sync(resolve_target(&target), &event_name, &options) {
				reporter.raise(err);
			}
			None::<fn()>
		}
	});

	use_layout_effect_with_deps(cx, (), move || {
		let subscription = Rc::clone(&subscription);
		let reporter = reporter.clone();
		Some(move || {
			if let Err(err) = subscription.teardown() {
				reporter.raise(err);
			}
		})
	});
}

/// [`use_event_listener`] bound to the global window.
///
/// Inert where the environment has no window.
pub fn use_window_event<T, H, O>(cx: &mut RenderCx<'_>, event_name: &str, handler: H, options: O)
where
	T: EventTarget,
	H: Fn(T::Event) + 'static,
	O: Into<ListenerOptions<T::Signal>>,
{
	use_event_listener(cx, TargetInput::from(T::global_window()), event_name, handler, options);
}

/// [`use_event_listener`] bound to the global document.
///
/// Inert where the environment has no document.
pub fn use_document_event<T, H, O>(cx: &mut RenderCx<'_>, event_name: &str, handler: H, options: O)
where
	T: EventTarget,
	H: Fn(T::Event) + 'static,
	O: Into<ListenerOptions<T::Signal>>,
{
	use_event_listener(cx, TargetInput::from(T::global_document()), event_name, handler, options);
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::reactive::HookScope;
	use crate::testing::{ListenerCall, MockDocument, MockNode};
	use rstest::rstest;
	use serial_test::serial;
	use std::cell::Cell;

	#[rstest]
	fn test_registers_on_commit_not_render() {
		let button = MockNode::element("button");
		let mut scope = HookScope::new();

		scope.render(|cx| use_event_listener(cx, &button, "click", |_| {}, ()));
		assert_eq!(button.listener_count("click"), 0);

		scope.commit().unwrap();
		assert_eq!(button.listener_count("click"), 1);
	}

	#[rstest]
	fn test_omitted_options_use_two_argument_form() {
		let button = MockNode::element("button");
		let mut scope = HookScope::new();
		scope.render(|cx| use_event_listener(cx, &button, "click", |_| {}, ()));
		scope.commit().unwrap();
		scope.unmount().unwrap();

		let calls = button.listener_calls();
		assert!(matches!(&calls[0], ListenerCall::Add { arg_count: 2, .. }));
		assert!(matches!(&calls[1], ListenerCall::Remove { arg_count: 2, .. }));
	}

	#[rstest]
	fn test_unmount_detaches() {
		let button = MockNode::element("button");
		let hits = Rc::new(Cell::new(0));
		let mut scope = HookScope::new();
		scope.render(|cx| {
			let hits = Rc::clone(&hits);
			use_event_listener(cx, &button, "click", move |_| hits.set(hits.get() + 1), ())
		});
		scope.commit().unwrap();
		button.dispatch("click");

		scope.unmount().unwrap();
		button.dispatch("click");
		assert_eq!(hits.get(), 1);
		assert_eq!(button.listener_count("click"), 0);
	}

	#[rstest]
	fn test_attach_failure_surfaces_on_commit() {
		let button = MockNode::element("button");
		button.reject_listeners(true);
		let mut scope = HookScope::new();
		scope.render(|cx| use_event_listener(cx, &button, "click", |_| {}, ()));

		let err = scope.commit().unwrap_err();
		assert!(err.to_string().contains("attach"));
	}

	#[rstest]
	#[serial(mock_document)]
	fn test_window_and_document_hooks() {
		let document = MockDocument::new();
		document.install();

		let resized = Rc::new(Cell::new(false));
		let keyed = Rc::new(Cell::new(false));
		let mut scope = HookScope::new();
		scope.render(|cx| {
			let resized = Rc::clone(&resized);
			let keyed = Rc::clone(&keyed);
			use_window_event::<MockNode, _, _>(cx, "resize", move |_| resized.set(true), ());
			use_document_event::<MockNode, _, _>(cx, "keydown", move |_| keyed.set(true), ());
		});
		scope.commit().unwrap();

		document.window().dispatch("resize");
		document.document().dispatch("keydown");
		assert!(resized.get());
		assert!(keyed.get());

		scope.unmount().unwrap();
		MockDocument::uninstall();
		assert_eq!(document.window().listener_count("resize"), 0);
	}

	#[rstest]
	#[serial(mock_document)]
	fn test_window_event_without_window_is_inert() {
		MockDocument::uninstall();
		let mut scope = HookScope::new();
		scope.render(|cx| use_window_event::<MockNode, _, _>(cx, "resize", |_| {}, ()));
		assert!(scope.commit().is_ok());
		assert!(scope.unmount().is_ok());
	}
}
