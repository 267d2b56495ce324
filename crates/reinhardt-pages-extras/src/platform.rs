//! Environment capability detection.
//!
//! Capabilities are probed once per process and never change afterwards;
//! code that branches on them may cache the answer freely.

use std::sync::OnceLock;

/// What the current environment offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
	/// A global window object exists.
	pub has_window: bool,
	/// A global document object exists.
	pub has_document: bool,
	/// The DOM can be read and mutated.
	pub can_use_dom: bool,
}

impl Capabilities {
	/// Capabilities of an environment without a DOM (native, workers, SSR).
	pub const HEADLESS: Capabilities = Capabilities {
		has_window: false,
		has_document: false,
		can_use_dom: false,
	};

	#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
	fn from_parts(has_window: bool, has_document: bool) -> Self {
		Self {
			has_window,
			has_document,
			can_use_dom: has_window && has_document,
		}
	}
}

#[cfg(target_arch = "wasm32")]
fn detect() -> Capabilities {
	let window = web_sys::window();
	let has_document = window
		.as_ref()
		.and_then(|window| window.document())
		.is_some();
	Capabilities::from_parts(window.is_some(), has_document)
}

#[cfg(not(target_arch = "wasm32"))]
fn detect() -> Capabilities {
	Capabilities::HEADLESS
}

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

/// Returns the capabilities of the current environment.
pub fn capabilities() -> &'static Capabilities {
	CAPABILITIES.get_or_init(|| {
		let detected = detect();
		crate::debug_log!("Detected environment capabilities: {:?}", detected);
		detected
	})
}

/// Returns true when the DOM is available.
pub fn can_use_dom() -> bool {
	capabilities().can_use_dom
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(false, false, false)]
	#[case(true, false, false)]
	#[case(false, true, false)]
	#[case(true, true, true)]
	fn test_can_use_dom_requires_window_and_document(
		#[case] has_window: bool,
		#[case] has_document: bool,
		#[case] expected: bool,
	) {
		assert_eq!(
			Capabilities::from_parts(has_window, has_document).can_use_dom,
			expected
		);
	}

	#[cfg(not(target_arch = "wasm32"))]
	#[rstest]
	fn test_native_environment_is_headless() {
		assert_eq!(*capabilities(), Capabilities::HEADLESS);
		assert!(!can_use_dom());
	}

	#[rstest]
	fn test_capabilities_are_computed_once() {
		assert!(std::ptr::eq(capabilities(), capabilities()));
	}
}
