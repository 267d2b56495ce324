//! Hook runtime for reinhardt-pages-extras
//!
//! A minimal React-style hook runtime: a [`HookScope`] stores per-call-site
//! state for one component instance, and the hooks in [`hooks`] read and
//! schedule against it.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_pages_extras::reactive::{HookScope, use_event_listener};
//!
//! let mut scope = HookScope::new();
//! scope.render(|cx| {
//!     use_event_listener(cx, &button, "click", |_| log!("clicked"), ());
//! });
//! scope.commit()?;
//! ```

pub mod hooks;
mod scope;

pub use hooks::{
	NodeRef, Ref, use_document_event, use_effect, use_effect_with_deps, use_event_listener,
	use_layout_effect, use_layout_effect_with_deps, use_ref, use_ref_with, use_window_event,
};
pub use scope::{EffectTiming, ErrorReporter, HookScope, RenderCx, ScopeConfig};
