//! Error types for reinhardt-pages-extras.
//!
//! An absent event target is never an error: it simply yields no active
//! subscription. The only runtime failures are those reported by the host's
//! listener primitives, which are propagated unchanged.

use thiserror::Error;

/// Which listener primitive reported a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerOperation {
	/// `addEventListener`
	Attach,
	/// `removeEventListener`
	Detach,
}

impl std::fmt::Display for ListenerOperation {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ListenerOperation::Attach => write!(f, "attach"),
			ListenerOperation::Detach => write!(f, "detach"),
		}
	}
}

/// Failure of the underlying attach/detach primitive.
#[derive(Debug, Clone, Error)]
pub enum ListenerError {
	/// The host environment rejected the call.
	#[error("Failed to {operation} '{event_name}' listener: {message}")]
	Host {
		/// The primitive that failed.
		operation: ListenerOperation,
		/// The event the listener was registered for.
		event_name: String,
		/// Host-provided failure description.
		message: String,
	},
}

impl ListenerError {
	/// Creates a host failure for the given primitive.
	pub fn host(
		operation: ListenerOperation,
		event_name: impl Into<String>,
		message: impl Into<String>,
	) -> Self {
		Self::Host {
			operation,
			event_name: event_name.into(),
			message: message.into(),
		}
	}

	/// Returns the primitive that failed.
	pub fn operation(&self) -> ListenerOperation {
		match self {
			ListenerError::Host { operation, .. } => *operation,
		}
	}
}

/// Errors raised while reading listener options from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
	/// The value is neither absent, a boolean, nor an object.
	#[error("Listener options must be null, a boolean, or an object, got {found}")]
	Malformed {
		/// JSON type name of the rejected value.
		found: &'static str,
	},
	/// The object carries a key that is not a listener option.
	#[error("Unknown listener option '{0}'")]
	UnknownField(String),
	/// A known key carries a value of the wrong type.
	#[error("Invalid value for listener option '{field}': {reason}")]
	InvalidField {
		/// The offending key.
		field: String,
		/// Why the value was rejected.
		reason: String,
	},
}

/// Crate-level error returned by the hook runtime.
#[derive(Debug, Clone, Error)]
pub enum ExtrasError {
	/// An event listener primitive failed.
	#[error(transparent)]
	Listener(#[from] ListenerError),
	/// Listener options could not be parsed.
	#[error(transparent)]
	Options(#[from] OptionsError),
}

/// Result alias used by the hook runtime.
pub type Result<T> = std::result::Result<T, ExtrasError>;
