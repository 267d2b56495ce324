//! Listener option normalization and comparison.
//!
//! Callers hand options over in one of three shapes (absent, a bare capture
//! flag, or a structured dictionary). They are normalized into
//! [`NormalizedOptions`], which is the form used for change detection, and
//! turned into [`EffectiveOptions`] right before calling the listener
//! primitive.
//!
//! Omitting the options argument is not the same as passing an empty
//! dictionary, and leaving `passive` unset is not the same as passing
//! `passive: false`. Both distinctions survive normalization.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::OptionsError;

/// Structured listener options as written at a call site.
///
/// Every field is optional; `capture` and `once` default to `false` during
/// normalization while `passive` and `signal` stay unset.
///
/// # Example
///
/// ```ignore
/// let options = ListenerOptionsInit::new().capture(true).passive(true);
/// use_event_listener(cx, &node_ref, "scroll", on_scroll, options);
/// ```
#[derive(Debug, Clone)]
pub struct ListenerOptionsInit<S> {
	/// Listen during the capture phase.
	pub capture: Option<bool>,
	/// Promise not to call `preventDefault`.
	pub passive: Option<bool>,
	/// Remove the listener after its first invocation.
	pub once: Option<bool>,
	/// Abort signal forwarded to the primitive untouched.
	pub signal: Option<S>,
}

impl<S> Default for ListenerOptionsInit<S> {
	fn default() -> Self {
		Self {
			capture: None,
			passive: None,
			once: None,
			signal: None,
		}
	}
}

impl<S> ListenerOptionsInit<S> {
	/// Creates an empty options dictionary.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the capture option.
	pub fn capture(mut self, capture: bool) -> Self {
		self.capture = Some(capture);
		self
	}

	/// Sets the passive option.
	pub fn passive(mut self, passive: bool) -> Self {
		self.passive = Some(passive);
		self
	}

	/// Sets the once option.
	pub fn once(mut self, once: bool) -> Self {
		self.once = Some(once);
		self
	}

	/// Sets the abort signal.
	///
	/// The signal is compared by identity between renders. Keep the same
	/// signal across renders (e.g. in a `use_ref`) unless a resubscription is
	/// intended.
	pub fn signal(mut self, signal: S) -> Self {
		self.signal = Some(signal);
		self
	}
}

/// Listener options as supplied by the caller.
#[derive(Debug, Clone)]
pub enum ListenerOptions<S> {
	/// No options argument.
	Absent,
	/// A bare boolean, interpreted as the capture flag.
	Capture(bool),
	/// An options dictionary.
	Structured(ListenerOptionsInit<S>),
}

impl<S> Default for ListenerOptions<S> {
	fn default() -> Self {
		Self::Absent
	}
}

impl<S> From<bool> for ListenerOptions<S> {
	fn from(capture: bool) -> Self {
		Self::Capture(capture)
	}
}

impl<S> From<ListenerOptionsInit<S>> for ListenerOptions<S> {
	fn from(init: ListenerOptionsInit<S>) -> Self {
		Self::Structured(init)
	}
}

impl<S> From<Option<ListenerOptionsInit<S>>> for ListenerOptions<S> {
	fn from(init: Option<ListenerOptionsInit<S>>) -> Self {
		init.map_or(Self::Absent, Self::Structured)
	}
}

impl<S> From<()> for ListenerOptions<S> {
	fn from(_: ()) -> Self {
		Self::Absent
	}
}

/// The subset of structured options that can come from configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsRepr {
	capture: Option<bool>,
	passive: Option<bool>,
	once: Option<bool>,
}

const KNOWN_FIELDS: [&str; 3] = ["capture", "passive", "once"];

impl<S> ListenerOptions<S> {
	/// Reads listener options from a JSON value.
	///
	/// `null` means absent, a boolean is the capture flag and an object may
	/// carry boolean `capture`, `passive` and `once` keys. Everything else is
	/// rejected. Abort signals are runtime objects and cannot be configured.
	///
	/// # Example
	///
	/// ```ignore
	/// let options = ListenerOptions::from_json(&json!({"passive": true}))?;
	/// ```
	pub fn from_json(value: &Value) -> Result<Self, OptionsError> {
		match value {
			Value::Null => Ok(Self::Absent),
			Value::Bool(capture) => Ok(Self::Capture(*capture)),
			Value::Object(map) => {
				for (key, field) in map {
					if key == "signal" {
						return Err(OptionsError::InvalidField {
							field: key.clone(),
							reason: "abort signals cannot be read from configuration".to_string(),
						});
					}
					if !KNOWN_FIELDS.contains(&key.as_str()) {
						return Err(OptionsError::UnknownField(key.clone()));
					}
					if !(field.is_boolean() || field.is_null()) {
						return Err(OptionsError::InvalidField {
							field: key.clone(),
							reason: format!("expected a boolean, got {}", json_type_name(field)),
						});
					}
				}
				let repr: OptionsRepr =
					serde_json::from_value(value.clone()).map_err(|e| OptionsError::InvalidField {
						field: "<object>".to_string(),
						reason: e.to_string(),
					})?;
				Ok(Self::Structured(ListenerOptionsInit {
					capture: repr.capture,
					passive: repr.passive,
					once: repr.once,
					signal: None,
				}))
			}
			other => Err(OptionsError::Malformed {
				found: json_type_name(other),
			}),
		}
	}
}

impl<'de, S> Deserialize<'de> for ListenerOptions<S> {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let value = Value::deserialize(deserializer)?;
		Self::from_json(&value).map_err(serde::de::Error::custom)
	}
}

fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

/// Canonical form of listener options used for change detection.
#[derive(Debug, Clone)]
pub enum NormalizedOptions<S> {
	/// No options were supplied.
	None,
	/// A bare capture flag was supplied.
	Boolean {
		/// The capture flag.
		capture: bool,
	},
	/// An options dictionary was supplied.
	Structured {
		/// Defaults to `false`.
		capture: bool,
		/// Unset unless provided.
		passive: Option<bool>,
		/// Defaults to `false`.
		once: bool,
		/// Unset unless provided.
		signal: Option<S>,
	},
}

/// Structured options as handed to the listener primitive.
///
/// `capture` and `once` are always present; `passive` and `signal` only when
/// the caller supplied them.
#[derive(Debug, Clone)]
pub struct EffectiveListenerOptions<S> {
	/// Capture flag.
	pub capture: bool,
	/// Once flag.
	pub once: bool,
	/// Passive flag, omitted when `None`.
	pub passive: Option<bool>,
	/// Abort signal, omitted when `None`.
	pub signal: Option<S>,
}

/// The options argument passed to `addEventListener`/`removeEventListener`.
#[derive(Debug, Clone)]
pub enum EffectiveOptions<S> {
	/// Call the two-argument form of the primitive.
	Omit,
	/// Pass a bare boolean.
	Capture(bool),
	/// Pass an options dictionary.
	Structured(EffectiveListenerOptions<S>),
}

impl<S> EffectiveOptions<S> {
	/// Returns the capture flag the primitive will match listeners on.
	pub fn capture(&self) -> bool {
		match self {
			EffectiveOptions::Omit => false,
			EffectiveOptions::Capture(capture) => *capture,
			EffectiveOptions::Structured(options) => options.capture,
		}
	}

	/// Returns the number of arguments the primitive is called with.
	pub fn argument_count(&self) -> usize {
		match self {
			EffectiveOptions::Omit => 2,
			_ => 3,
		}
	}
}

/// Converts caller-supplied options into their canonical form.
pub fn normalize_options<S: Clone>(raw: &ListenerOptions<S>) -> NormalizedOptions<S> {
	match raw {
		ListenerOptions::Absent => NormalizedOptions::None,
		ListenerOptions::Capture(capture) => NormalizedOptions::Boolean { capture: *capture },
		ListenerOptions::Structured(init) => NormalizedOptions::Structured {
			capture: init.capture.unwrap_or(false),
			passive: init.passive,
			once: init.once.unwrap_or(false),
			signal: init.signal.clone(),
		},
	}
}

impl<S: Clone> NormalizedOptions<S> {
	/// Derives the argument passed to the listener primitive.
	pub fn to_effective(&self) -> EffectiveOptions<S> {
		match self {
			NormalizedOptions::None => EffectiveOptions::Omit,
			NormalizedOptions::Boolean { capture } => EffectiveOptions::Capture(*capture),
			NormalizedOptions::Structured {
				capture,
				passive,
				once,
				signal,
			} => EffectiveOptions::Structured(EffectiveListenerOptions {
				capture: *capture,
				once: *once,
				passive: *passive,
				signal: signal.clone(),
			}),
		}
	}
}

impl<S> NormalizedOptions<S> {
	/// Returns the signal carried by structured options, if any.
	pub fn signal(&self) -> Option<&S> {
		match self {
			NormalizedOptions::Structured { signal, .. } => signal.as_ref(),
			_ => None,
		}
	}
}

/// Compares two normalized option sets.
///
/// Signals are compared with `same_signal`, which must be an identity check:
/// an equivalent but freshly created signal counts as a change.
pub fn options_equal<S>(
	a: &NormalizedOptions<S>,
	b: &NormalizedOptions<S>,
	same_signal: impl Fn(&S, &S) -> bool,
) -> bool {
	match (a, b) {
		(NormalizedOptions::None, NormalizedOptions::None) => true,
		(
			NormalizedOptions::Boolean { capture: a_capture },
			NormalizedOptions::Boolean { capture: b_capture },
		) => a_capture == b_capture,
		(
			NormalizedOptions::Structured {
				capture: a_capture,
				passive: a_passive,
				once: a_once,
				signal: a_signal,
			},
			NormalizedOptions::Structured {
				capture: b_capture,
				passive: b_passive,
				once: b_once,
				signal: b_signal,
			},
		) => {
			let same_signals = match (a_signal, b_signal) {
				(None, None) => true,
				(Some(a), Some(b)) => same_signal(a, b),
				_ => false,
			};
			a_capture == b_capture && a_passive == b_passive && a_once == b_once && same_signals
		}
		_ => false,
	}
}

/// Returns true when `a` and `b` differ only in the identity of their signal.
pub(crate) fn differs_only_by_signal<S>(
	a: &NormalizedOptions<S>,
	b: &NormalizedOptions<S>,
	same_signal: impl Fn(&S, &S) -> bool,
) -> bool {
	match (a.signal(), b.signal()) {
		(Some(x), Some(y)) if !same_signal(x, y) => options_equal(a, b, |_, _| true),
		_ => false,
	}
}
