//! `web_sys::EventTarget` backend (WASM only)

use js_sys::Object;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;

use super::options::EffectiveOptions;
use super::target::{EventTarget, HandlerBox, TargetInput};
use crate::error::{ListenerError, ListenerOperation};
use crate::platform::capabilities;

/// The JavaScript function registered with the browser.
///
/// Owns its closure; dropping the listener frees it, so it must be detached
/// first.
pub struct WebListener {
	closure: Closure<dyn Fn(web_sys::Event)>,
}

impl WebListener {
	fn function(&self) -> &js_sys::Function {
		self.closure.as_ref().unchecked_ref()
	}
}

fn host_error(operation: ListenerOperation, event_name: &str, err: JsValue) -> ListenerError {
	let message = err.as_string().unwrap_or_else(|| format!("{:?}", err));
	ListenerError::host(operation, event_name, message)
}

impl EventTarget for web_sys::EventTarget {
	type Event = web_sys::Event;
	type Signal = web_sys::AbortSignal;
	type Listener = WebListener;

	fn create_listener(handler: HandlerBox<web_sys::Event>) -> WebListener {
		let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
			handler.dispatch(event);
		}) as Box<dyn Fn(web_sys::Event)>);
		WebListener { closure }
	}

	fn add_event_listener(
		&self,
		event_name: &str,
		listener: &WebListener,
		options: &EffectiveOptions<web_sys::AbortSignal>,
	) -> Result<(), ListenerError> {
		let function = listener.function();
		let result = match options {
			EffectiveOptions::Omit => self.add_event_listener_with_callback(event_name, function),
			EffectiveOptions::Capture(capture) => {
				self.add_event_listener_with_callback_and_bool(event_name, function, *capture)
			}
			EffectiveOptions::Structured(structured) => {
				let init = web_sys::AddEventListenerOptions::new();
				init.set_capture(structured.capture);
				init.set_once(structured.once);
				if let Some(passive) = structured.passive {
					init.set_passive(passive);
				}
				if let Some(signal) = structured.signal.as_ref() {
					init.set_signal(signal);
				}
				self.add_event_listener_with_callback_and_add_event_listener_options(
					event_name, function, &init,
				)
			}
		};
		result.map_err(|err| host_error(ListenerOperation::Attach, event_name, err))
	}

	fn remove_event_listener(
		&self,
		event_name: &str,
		listener: &WebListener,
		options: &EffectiveOptions<web_sys::AbortSignal>,
	) -> Result<(), ListenerError> {
		let function = listener.function();
		let result = match options {
			EffectiveOptions::Omit => self.remove_event_listener_with_callback(event_name, function),
			EffectiveOptions::Capture(capture) => {
				self.remove_event_listener_with_callback_and_bool(event_name, function, *capture)
			}
			EffectiveOptions::Structured(structured) => {
				// Only the capture flag takes part in matching a registration.
				let init = web_sys::EventListenerOptions::new();
				init.set_capture(structured.capture);
				self.remove_event_listener_with_callback_and_event_listener_options(
					event_name, function, &init,
				)
			}
		};
		result.map_err(|err| host_error(ListenerOperation::Detach, event_name, err))
	}

	fn same_target(&self, other: &Self) -> bool {
		let a: &JsValue = self.as_ref();
		let b: &JsValue = other.as_ref();
		Object::is(a, b)
	}

	fn same_signal(a: &web_sys::AbortSignal, b: &web_sys::AbortSignal) -> bool {
		let a: &JsValue = a.as_ref();
		let b: &JsValue = b.as_ref();
		Object::is(a, b)
	}

	fn global_window() -> Option<Self> {
		if !capabilities().has_window {
			return None;
		}
		web_sys::window().map(Into::into)
	}

	fn global_document() -> Option<Self> {
		if !capabilities().has_document {
			return None;
		}
		web_sys::window()
			.and_then(|window| window.document())
			.map(Into::into)
	}
}

impl From<web_sys::EventTarget> for TargetInput<web_sys::EventTarget> {
	fn from(target: web_sys::EventTarget) -> Self {
		TargetInput::Direct(target)
	}
}

impl From<&web_sys::EventTarget> for TargetInput<web_sys::EventTarget> {
	fn from(target: &web_sys::EventTarget) -> Self {
		TargetInput::Direct(target.clone())
	}
}

impl From<web_sys::Element> for TargetInput<web_sys::EventTarget> {
	fn from(element: web_sys::Element) -> Self {
		TargetInput::Direct(element.into())
	}
}

impl From<web_sys::Window> for TargetInput<web_sys::EventTarget> {
	fn from(window: web_sys::Window) -> Self {
		TargetInput::Direct(window.into())
	}
}

impl From<web_sys::Document> for TargetInput<web_sys::EventTarget> {
	fn from(document: web_sys::Document) -> Self {
		TargetInput::Direct(document.into())
	}
}
