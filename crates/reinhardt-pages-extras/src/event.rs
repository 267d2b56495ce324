//! Declarative DOM event subscriptions
//!
//! - [`options`]: normalization and comparison of listener options
//! - [`target`]: the [`EventTarget`] abstraction and target resolution
//! - [`subscription`]: the per-call-site subscription lifecycle
//!
//! The hooks that drive a subscription from a component live in
//! [`crate::reactive::hooks`].

pub mod options;
pub mod subscription;
pub mod target;

#[cfg(target_arch = "wasm32")]
mod web;

pub use options::{
	EffectiveListenerOptions, EffectiveOptions, ListenerOptions, ListenerOptionsInit,
	NormalizedOptions, normalize_options, options_equal,
};
pub use subscription::{EventSubscription, SyncOutcome};
pub use target::{EventTarget, Handler, HandlerBox, TargetInput, resolve_target};
#[cfg(target_arch = "wasm32")]
pub use web::WebListener;
