//! React-like hooks
//!
//! Every hook takes the [`RenderCx`](super::RenderCx) of the render it is
//! called from and must be called in the same order on every render.
//!
//! - [`use_ref`] / [`use_ref_with`]: stable mutable containers
//! - [`use_effect`] / [`use_layout_effect`]: side effects run on commit
//! - [`use_event_listener`], [`use_window_event`], [`use_document_event`]:
//!   lifecycle-bound DOM event subscriptions

mod effect;
mod event_listener;
mod reference;

pub use effect::{use_effect, use_effect_with_deps, use_layout_effect, use_layout_effect_with_deps};
pub use event_listener::{use_document_event, use_event_listener, use_window_event};
pub use reference::{NodeRef, Ref, use_ref, use_ref_with};
