//! Mock abort controller and signal.

use std::cell::Cell;
use std::rc::Rc;

/// Signal half of a [`MockAbortController`].
///
/// Clones share identity; two signals from different controllers never
/// compare as the same signal.
#[derive(Clone, Debug)]
pub struct MockAbortSignal {
	aborted: Rc<Cell<bool>>,
}

impl MockAbortSignal {
	/// Whether the owning controller aborted.
	pub fn aborted(&self) -> bool {
		self.aborted.get()
	}

	/// Identity comparison.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.aborted, &other.aborted)
	}
}

/// Controller that can abort listeners registered with its signal.
#[derive(Clone, Debug)]
pub struct MockAbortController {
	signal: MockAbortSignal,
}

impl Default for MockAbortController {
	fn default() -> Self {
		Self::new()
	}
}

impl MockAbortController {
	/// Creates a controller with a fresh signal.
	pub fn new() -> Self {
		Self {
			signal: MockAbortSignal {
				aborted: Rc::new(Cell::new(false)),
			},
		}
	}

	/// Returns the controller's signal.
	pub fn signal(&self) -> MockAbortSignal {
		self.signal.clone()
	}

	/// Aborts; listeners registered with the signal stop receiving events.
	pub fn abort(&self) {
		self.signal.aborted.set(true);
	}
}
