//! Helper components and hooks for reinhardt-pages frontends
//!
//! This module provides access to reinhardt-pages-extras: declarative event
//! listeners bound to component lifetime, conditional and list helpers, and
//! small DOM utilities.
//!
//! ## Architecture
//!
//! - **Event listeners**: one registration per call site, refreshed only when
//!   the target, event name or options change
//! - **Hook runtime**: [`HookScope`] drives render, commit and unmount
//! - **Components**: `If`, `Choose`, `For`, `Image`, `Join`
//! - **Testing**: an in-memory DOM for native test runs
//!
//! ## Example
//!
//! ```rust,ignore
//! use reinhardt_extras::pages::{HookScope, use_event_listener, use_ref};
//!
//! let mut scope = HookScope::new();
//! scope.render(|cx| {
//!     let count = use_ref(cx, 0);
//!     use_event_listener(
//!         cx,
//!         &button,
//!         "click",
//!         move |_event: web_sys::Event| *count.borrow_mut() += 1,
//!         (),
//!     );
//! });
//! scope.commit()?;
//! ```

// Re-export all reinhardt-pages-extras functionality
pub use reinhardt_pages_extras::*;
