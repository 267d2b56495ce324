//! Event listener WASM tests
//!
//! Runs the hooks against real `web_sys` targets: the browser performs the
//! registration, deduplication and dispatch.
//!
//! **Run with**: `wasm-pack test --headless --chrome crates/reinhardt-pages-extras`

#![cfg(target_arch = "wasm32")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use wasm_bindgen::JsCast;

use reinhardt_pages_extras::component::{ElementClass, handle_image_error, use_body_class};
use reinhardt_pages_extras::event::{EventTarget, ListenerOptionsInit};
use reinhardt_pages_extras::platform::{can_use_dom, capabilities};
use reinhardt_pages_extras::reactive::{HookScope, NodeRef, use_event_listener, use_window_event};

fn document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

fn mounted_button() -> web_sys::Element {
	let button = document().create_element("button").unwrap();
	document().body().unwrap().append_child(&button).unwrap();
	button
}

fn click(target: &web_sys::EventTarget) {
	let init = web_sys::EventInit::new();
	init.set_bubbles(true);
	let event = web_sys::Event::new_with_event_init_dict("click", &init).unwrap();
	target.dispatch_event(&event).unwrap();
}

fn counter() -> (Rc<Cell<u32>>, impl Fn(web_sys::Event) + 'static) {
	let count = Rc::new(Cell::new(0));
	let handle = Rc::clone(&count);
	(count, move |_event: web_sys::Event| handle.set(handle.get() + 1))
}

// ============================================================================
// Environment
// ============================================================================

/// The browser exposes a usable DOM
#[wasm_bindgen_test]
fn test_can_use_dom_in_browser() {
	assert!(can_use_dom());
}

// ============================================================================
// Subscription lifecycle
// ============================================================================

/// Clicks are counted until the scope unmounts
#[wasm_bindgen_test]
fn test_click_counter() {
	let button = mounted_button();
	let (count, handler) = counter();

	let mut scope = HookScope::new();
	scope.render(|cx| use_event_listener(cx, button.clone(), "click", handler, ()));
	scope.commit().unwrap();

	click(&button);
	click(&button);
	assert_eq!(count.get(), 2);

	scope.unmount().unwrap();
	click(&button);
	assert_eq!(count.get(), 2);
	button.remove();
}

/// Re-renders swap the handler without registering a second listener
#[wasm_bindgen_test]
fn test_rerender_keeps_single_registration() {
	let button = mounted_button();
	let log = Rc::new(RefCell::new(Vec::new()));

	let mut scope = HookScope::new();
	for generation in 0..3 {
		let log = Rc::clone(&log);
		scope.render(|cx| {
			use_event_listener(
				cx,
				button.clone(),
				"click",
				move |_event: web_sys::Event| log.borrow_mut().push(generation),
				ListenerOptionsInit::new().passive(true),
			)
		});
		scope.commit().unwrap();
	}

	click(&button);
	assert_eq!(*log.borrow(), vec![2]);
	button.remove();
}

/// A handle that gains its element later attaches on the next commit
#[wasm_bindgen_test]
fn test_handle_attaches_when_populated() {
	let button = mounted_button();
	let target: web_sys::EventTarget = button.clone().into();
	let handle: NodeRef<web_sys::EventTarget> = NodeRef::empty();
	let (count, handler) = counter();
	let handler = Rc::new(handler);

	let mut scope = HookScope::new();
	let render = |scope: &mut HookScope| {
		let handler = Rc::clone(&handler);
		scope.render(|cx| {
			use_event_listener(cx, &handle, "click", move |event| handler(event), ())
		});
		scope.commit().unwrap();
	};

	render(&mut scope);
	click(&target);
	assert_eq!(count.get(), 0);

	handle.set(Some(target.clone()));
	render(&mut scope);
	click(&target);
	assert_eq!(count.get(), 1);
	button.remove();
}

// ============================================================================
// Options
// ============================================================================

/// `once` listeners are removed by the browser after the first event
#[wasm_bindgen_test]
fn test_once_option() {
	let button = mounted_button();
	let (count, handler) = counter();

	let mut scope = HookScope::new();
	scope.render(|cx| {
		use_event_listener(cx, button.clone(), "click", handler, ListenerOptionsInit::new().once(true))
	});
	scope.commit().unwrap();

	click(&button);
	click(&button);
	assert_eq!(count.get(), 1);

	// Removing an already-consumed listener is harmless.
	assert!(scope.unmount().is_ok());
	button.remove();
}

/// Aborting the signal silences the listener
#[wasm_bindgen_test]
fn test_abort_signal() {
	let button = mounted_button();
	let controller = web_sys::AbortController::new().unwrap();
	let (count, handler) = counter();

	let mut scope = HookScope::new();
	scope.render(|cx| {
		use_event_listener(
			cx,
			button.clone(),
			"click",
			handler,
			ListenerOptionsInit::new().signal(controller.signal()),
		)
	});
	scope.commit().unwrap();

	click(&button);
	controller.abort();
	click(&button);
	assert_eq!(count.get(), 1);
	button.remove();
}

/// Capture listeners on an ancestor run before bubble listeners
#[wasm_bindgen_test]
fn test_capture_before_bubble() {
	let container = mounted_button();
	let child = document().create_element("span").unwrap();
	container.append_child(&child).unwrap();
	let order = Rc::new(RefCell::new(Vec::new()));

	let mut scope = HookScope::new();
	scope.render(|cx| {
		let bubble = Rc::clone(&order);
		let capture = Rc::clone(&order);
		use_event_listener(
			cx,
			container.clone(),
			"click",
			move |_event: web_sys::Event| bubble.borrow_mut().push("bubble"),
			false,
		);
		use_event_listener(
			cx,
			container.clone(),
			"click",
			move |_event: web_sys::Event| capture.borrow_mut().push("capture"),
			true,
		);
	});
	scope.commit().unwrap();

	click(&child);
	assert_eq!(*order.borrow(), vec!["capture", "bubble"]);
	container.remove();
}

// ============================================================================
// Globals
// ============================================================================

/// Window listeners see events dispatched on the window
#[wasm_bindgen_test]
fn test_window_event() {
	let (count, handler) = counter();
	let mut scope = HookScope::new();
	scope.render(|cx| use_window_event::<web_sys::EventTarget, _, _>(cx, "click", handler, ()));
	scope.commit().unwrap();

	let window: web_sys::EventTarget = web_sys::window().unwrap().into();
	click(&window);
	scope.unmount().unwrap();
	click(&window);
	assert_eq!(count.get(), 1);
}

/// Global lookups agree with the cached capability flags
#[wasm_bindgen_test]
fn test_globals_follow_capabilities() {
	let capabilities = capabilities();
	assert_eq!(
		<web_sys::EventTarget as EventTarget>::global_window().is_some(),
		capabilities.has_window
	);
	assert_eq!(
		<web_sys::EventTarget as EventTarget>::global_document().is_some(),
		capabilities.has_document
	);
}

// ============================================================================
// Components
// ============================================================================

/// A relative fallback that also fails hides the image instead of reloading it
#[wasm_bindgen_test]
fn test_failing_relative_fallback_hides_image() {
	let img: web_sys::HtmlImageElement = document()
		.create_element("img")
		.unwrap()
		.dyn_into()
		.unwrap();
	img.set_attribute("src", "missing.png").unwrap();

	handle_image_error(&img, Some("fallback.png"));
	assert_eq!(img.get_attribute("src").as_deref(), Some("fallback.png"));
	assert_ne!(img.src(), "fallback.png");
	assert_eq!(img.style().get_property_value("visibility").unwrap(), "");

	handle_image_error(&img, Some("fallback.png"));
	assert_eq!(img.get_attribute("src").as_deref(), Some("fallback.png"));
	assert_eq!(img.style().get_property_value("visibility").unwrap(), "hidden");
}

/// Body classes are applied while mounted
#[wasm_bindgen_test]
fn test_body_class() {
	let body = document().body().unwrap();
	let mut scope = HookScope::new();
	scope.render(|cx| use_body_class::<web_sys::Element>(cx, ElementClass::new().add("wasm-test")));
	scope.commit().unwrap();
	assert!(body.class_list().contains("wasm-test"));

	scope.unmount().unwrap();
	assert!(!body.class_list().contains("wasm-test"));
}
