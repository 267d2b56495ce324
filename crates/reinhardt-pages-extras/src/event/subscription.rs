//! Lifecycle-bound event subscription.
//!
//! An [`EventSubscription`] binds one stable listener to at most one
//! `(target, event name, options)` triple at a time. Each lifecycle pass
//! refreshes the handler, then calls [`EventSubscription::sync`]; the call
//! site's removal calls [`EventSubscription::teardown`].
//!
//! ## Invariants
//!
//! - At most one listener is live per subscription. The previous target is
//!   always detached before the next one is attached.
//! - The listener object never changes, so a detach always matches the
//!   earlier attach.
//! - Re-rendering with an identical triple performs no primitive calls.
//! - Teardown is idempotent and never detaches something that was not attached.

use std::cell::RefCell;

use super::options::{
	ListenerOptions, NormalizedOptions, differs_only_by_signal, normalize_options, options_equal,
};
use super::target::{EventTarget, Handler, HandlerBox};
use crate::error::ListenerError;
use crate::{debug_log, error_log};

/// What a call to [`EventSubscription::sync`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
	/// The triple matched the active subscription; nothing was touched.
	Unchanged,
	/// The triple changed.
	Resubscribed {
		/// A previous listener was detached.
		detached: bool,
		/// A new listener was attached.
		attached: bool,
	},
}

struct ActiveSubscription<T: EventTarget> {
	target: Option<T>,
	event_name: String,
	options: NormalizedOptions<T::Signal>,
}

impl<T: EventTarget> ActiveSubscription<T> {
	fn matches(&self, target: Option<&T>, event_name: &str, options: &NormalizedOptions<T::Signal>) -> bool {
		let same_target = match (self.target.as_ref(), target) {
			(None, None) => true,
			(Some(a), Some(b)) => a.same_target(b),
			_ => false,
		};
		same_target
			&& self.event_name == event_name
			&& options_equal(&self.options, options, T::same_signal)
	}
}

/// One subscription slot, owned by a single call site.
pub struct EventSubscription<T: EventTarget> {
	handler: HandlerBox<T::Event>,
	listener: T::Listener,
	active: RefCell<Option<ActiveSubscription<T>>>,
}

impl<T: EventTarget> Default for EventSubscription<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T: EventTarget> std::fmt::Debug for EventSubscription<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventSubscription")
			.field("event_name", &self.event_name())
			.field("attached", &self.is_attached())
			.field("handler", &self.handler)
			.finish()
	}
}

impl<T: EventTarget> EventSubscription<T> {
	/// Creates an empty subscription with its stable listener.
	pub fn new() -> Self {
		let handler = HandlerBox::new();
		let listener = T::create_listener(handler.clone());
		Self {
			handler,
			listener,
			active: RefCell::new(None),
		}
	}

	/// Makes `handler` the one invoked by the next event.
	pub fn set_handler(&self, handler: Handler<T::Event>) {
		self.handler.set(handler);
	}

	/// Returns the handler box read by the listener.
	pub fn handler_box(&self) -> &HandlerBox<T::Event> {
		&self.handler
	}

	/// Returns true while a listener is registered with a target.
	pub fn is_attached(&self) -> bool {
		self.active
			.borrow()
			.as_ref()
			.is_some_and(|active| active.target.is_some())
	}

	/// Returns the target the listener is registered with.
	pub fn target(&self) -> Option<T> {
		self.active
			.borrow()
			.as_ref()
			.and_then(|active| active.target.clone())
	}

	/// Returns the event name of the recorded subscription.
	pub fn event_name(&self) -> Option<String> {
		self.active
			.borrow()
			.as_ref()
			.map(|active| active.event_name.clone())
	}

	/// Brings the registration in line with the given triple.
	///
	/// `target` must already be resolved for this pass. An absent target
	/// is recorded as "nothing attached" and is not an error.
	///
	/// # Errors
	///
	/// Returns the primitive's error unchanged. If detaching fails the
	/// previous record is kept. If attaching fails the record says nothing
	/// is attached, so the next pass retries.
	pub fn sync(
		&self,
		target: Option<T>,
		event_name: &str,
		options: &ListenerOptions<T::Signal>,
	) -> Result<SyncOutcome, ListenerError> {
		let next_options = normalize_options(options);

		if let Some(previous) = self.active.borrow().as_ref() {
			if previous.matches(target.as_ref(), event_name, &next_options) {
				return Ok(SyncOutcome::Unchanged);
			}
			let same_target = match (previous.target.as_ref(), target.as_ref()) {
				(Some(a), Some(b)) => a.same_target(b),
				_ => false,
			};
			if same_target
				&& previous.event_name == event_name
				&& differs_only_by_signal(&previous.options, &next_options, T::same_signal)
			{
				debug_log!(
					"'{}' listener resubscribing because its abort signal changed identity; keep the signal stable across renders to avoid this",
					event_name
				);
			}
		}

		let previous = self.active.borrow_mut().take();
		let mut detached = false;
		if let Some(previous) = previous {
			if let Some(previous_target) = previous.target.as_ref() {
				let effective = previous.options.to_effective();
				if let Err(err) =
					previous_target.remove_event_listener(&previous.event_name, &self.listener, &effective)
				{
					error_log!("{}", err);
					*self.active.borrow_mut() = Some(previous);
					return Err(err);
				}
				debug_log!("detached '{}' listener", previous.event_name);
				detached = true;
			}
		}

		let mut attached = false;
		if let Some(next_target) = target.as_ref() {
			let effective = next_options.to_effective();
			if let Err(err) = next_target.add_event_listener(event_name, &self.listener, &effective) {
				error_log!("{}", err);
				*self.active.borrow_mut() = Some(ActiveSubscription {
					target: None,
					event_name: event_name.to_string(),
					options: next_options,
				});
				return Err(err);
			}
			debug_log!("attached '{}' listener", event_name);
			attached = true;
		}

		*self.active.borrow_mut() = Some(ActiveSubscription {
			target,
			event_name: event_name.to_string(),
			options: next_options,
		});

		Ok(SyncOutcome::Resubscribed { detached, attached })
	}

	/// Detaches the listener and clears the record.
	///
	/// Safe to call repeatedly; calls after the first are no-ops.
	pub fn teardown(&self) -> Result<(), ListenerError> {
		let current = self.active.borrow_mut().take();
		if let Some(ActiveSubscription {
			target: Some(target),
			event_name,
			options,
		}) = current
		{
			target.remove_event_listener(&event_name, &self.listener, &options.to_effective())?;
			debug_log!("detached '{}' listener on teardown", event_name);
		}
		Ok(())
	}
}

impl<T: EventTarget> Drop for EventSubscription<T> {
	fn drop(&mut self) {
		// The listener field is dropped right after this; it must not stay registered.
		if let Err(err) = self.teardown() {
			error_log!("{}", err);
		}
	}
}
