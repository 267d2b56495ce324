//! Reinhardt Pages Extras - helper components and hooks for reinhardt-pages
//!
//! A small collection of declarative helpers for component-based frontends,
//! centred on a lifecycle-bound DOM event subscription.
//!
//! ## Features
//!
//! - **Declarative event listeners**: [`use_event_listener`],
//!   [`use_window_event`] and [`use_document_event`] keep exactly one listener
//!   registered per call site, re-registering only when the target, event name
//!   or options change
//! - **Conditional and list rendering**: [`If`](component::If),
//!   [`Choose`](component::Choose), [`For`](component::For)
//! - **DOM helpers**: [`Image`](component::Image) with fallback sources,
//!   root/body class toggling, [`class_names!`], [`intersperse`](component::intersperse)
//! - **Runs everywhere**: `web_sys` on WASM, an in-memory DOM
//!   ([`testing::MockNode`]) on native targets
//!
//! ## Architecture
//!
//! - [`event`]: listener options, target resolution and the subscription lifecycle
//! - [`reactive`]: the hook runtime ([`HookScope`]) and hooks
//! - [`component`]: helper components and the [`View`](component::View) tree
//! - [`class_names`]: CSS class string composition
//! - [`platform`]: environment capability detection
//! - [`testing`]: in-memory DOM backend
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_pages_extras::{HookScope, use_event_listener, use_ref};
//! use reinhardt_pages_extras::event::ListenerOptionsInit;
//!
//! let mut scope = HookScope::new();
//! scope.render(|cx| {
//!     let clicks = use_ref(cx, 0);
//!     use_event_listener(
//!         cx,
//!         &button,
//!         "click",
//!         move |_| *clicks.borrow_mut() += 1,
//!         ListenerOptionsInit::new().passive(true),
//!     );
//! });
//! scope.commit()?;
//! ```

#![warn(missing_docs)]

pub mod class_names;
pub mod component;
pub mod error;
pub mod event;
pub mod logging;
pub mod platform;
pub mod reactive;
pub mod testing;

pub use error::{ExtrasError, ListenerError, ListenerOperation, OptionsError, Result};
pub use event::{EventSubscription, EventTarget, ListenerOptions, ListenerOptionsInit, TargetInput};
pub use platform::{Capabilities, can_use_dom, capabilities};
pub use reactive::{
	HookScope, NodeRef, Ref, ScopeConfig, use_document_event, use_effect, use_event_listener,
	use_layout_effect, use_ref, use_window_event,
};

#[doc(hidden)]
pub mod __private {
	#[cfg(not(target_arch = "wasm32"))]
	pub use tracing;
	#[cfg(target_arch = "wasm32")]
	pub use web_sys;
}
