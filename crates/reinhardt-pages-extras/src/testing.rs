//! In-memory DOM backend
//!
//! [`MockNode`] implements [`EventTarget`](crate::event::EventTarget),
//! [`ClassListTarget`](crate::component::ClassListTarget) and
//! [`ImageElement`](crate::component::ImageElement), so everything in this
//! crate runs on native targets: in unit tests, in server-side rendering, and
//! in applications that want to drive hooks without a browser.

mod abort;
mod dom;
mod event;

pub use abort::{MockAbortController, MockAbortSignal};
pub use dom::{CALL_LOG_LIMIT, ListenerCall, MockDocument, MockListener, MockNode, NodeKind};
pub use event::{EventPhase, MockEvent};
