//! Hook scope: the render/commit/unmount cycle of one component instance.
//!
//! Hooks are identified by call order. Every call to a hook inside
//! [`HookScope::render`] claims the next slot of the scope; the slot owns
//! whatever the hook needs to remember between renders (a [`Ref`], an
//! effect and its cleanup).
//!
//! Effects run in two phases on [`HookScope::commit`]:
//!
//! 1. Layout phase: cleanups of all scheduled layout effects, then their
//!    setups, in hook order.
//! 2. Passive phase: the same for passive effects.
//!
//! [`HookScope::unmount`] runs layout cleanups, then passive cleanups unless
//! the scope was configured to skip them.
//!
//! [`Ref`]: super::Ref

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::ExtrasError;
use crate::{debug_log, error_log, warn_log};

/// Behavior switches for a [`HookScope`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeConfig {
	/// Mount effects twice (setup, cleanup, setup), as a strict
	/// development mode does, to surface effects that do not clean up.
	pub strict_effects: bool,
	/// Never run passive-effect cleanups on unmount.
	pub skip_passive_cleanup: bool,
}

impl ScopeConfig {
	/// Enables or disables strict effect double-invocation.
	pub fn strict_effects(mut self, enabled: bool) -> Self {
		self.strict_effects = enabled;
		self
	}

	/// Enables or disables skipping of passive cleanups on unmount.
	pub fn skip_passive_cleanup(mut self, enabled: bool) -> Self {
		self.skip_passive_cleanup = enabled;
		self
	}
}

/// When an effect runs relative to the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTiming {
	/// Synchronously at commit, before passive effects. Cleanups always run.
	Layout,
	/// After layout effects. Cleanups may be skipped on unmount.
	Passive,
}

pub(crate) type Cleanup = Box<dyn FnOnce()>;
pub(crate) type Setup = Box<dyn FnMut() -> Option<Cleanup>>;

/// Collects errors raised by hooks and their effects.
///
/// Clones share the same queue, so an effect closure can hold one and report
/// failures of host primitives that run long after render returned.
#[derive(Clone, Default)]
pub struct ErrorReporter {
	errors: Rc<RefCell<Vec<ExtrasError>>>,
}

impl std::fmt::Debug for ErrorReporter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ErrorReporter")
			.field("pending", &self.errors.borrow().len())
			.finish()
	}
}

impl ErrorReporter {
	/// Queues `err`; it is returned by the next commit or unmount.
	pub fn raise(&self, err: impl Into<ExtrasError>) {
		self.errors.borrow_mut().push(err.into());
	}

	/// Returns the first queued error, logging and discarding the rest.
	fn drain(&self) -> Result<(), ExtrasError> {
		let mut errors = std::mem::take(&mut *self.errors.borrow_mut()).into_iter();
		let Some(first) = errors.next() else {
			return Ok(());
		};
		for extra in errors {
			error_log!("Additional hook error: {}", extra);
		}
		Err(first)
	}
}

struct EffectSlot {
	timing: EffectTiming,
	deps: Option<Box<dyn Any>>,
	setup: Option<Setup>,
	cleanup: Option<Cleanup>,
	scheduled: bool,
}

impl EffectSlot {
	fn run_cleanup(&mut self) {
		if let Some(cleanup) = self.cleanup.take() {
			cleanup();
		}
	}

	fn run_setup(&mut self) {
		if let Some(setup) = self.setup.as_mut() {
			self.cleanup = setup();
		}
	}
}

enum Slot {
	Value(Box<dyn Any>),
	Effect(EffectSlot),
}

impl Slot {
	fn kind(&self) -> &'static str {
		match self {
			Slot::Value(_) => "value",
			Slot::Effect(_) => "effect",
		}
	}
}

#[derive(Default)]
struct ScopeState {
	slots: Vec<Slot>,
	mounted: bool,
}

impl ScopeState {
	fn effects_mut(&mut self, timing: EffectTiming) -> impl Iterator<Item = &mut EffectSlot> {
		self.slots.iter_mut().filter_map(move |slot| match slot {
			Slot::Effect(effect) if effect.timing == timing => Some(effect),
			_ => None,
		})
	}
}

/// Handle passed to the render closure; hooks take it as their first argument.
pub struct RenderCx<'a> {
	state: &'a mut ScopeState,
	index: usize,
	reporter: ErrorReporter,
}

impl RenderCx<'_> {
	/// Returns true while rendering a scope that has not committed yet.
	pub fn is_first_render(&self) -> bool {
		!self.state.mounted
	}

	/// Reports an error from a hook. It is returned by the next commit.
	pub fn raise(&self, err: impl Into<ExtrasError>) {
		self.reporter.raise(err);
	}

	/// Returns a reporter effects can keep to raise errors later.
	pub fn reporter(&self) -> ErrorReporter {
		self.reporter.clone()
	}

	fn next_index(&mut self) -> usize {
		let index = self.index;
		self.index += 1;
		index
	}

	fn replace_slot(&mut self, index: usize, slot: Slot) {
		if let Some(previous) = self.state.slots.get_mut(index) {
			warn_log!(
				"Hook order changed at position {} ({} slot replaced by {} slot)",
				index,
				previous.kind(),
				slot.kind()
			);
			if let Slot::Effect(effect) = previous {
				effect.run_cleanup();
			}
			*previous = slot;
		} else {
			self.state.slots.push(slot);
		}
	}

	/// Returns the value stored at the current slot, creating it on first use.
	pub(crate) fn slot<S, F>(&mut self, init: F) -> S
	where
		S: Clone + 'static,
		F: FnOnce() -> S,
	{
		let index = self.next_index();
		if let Some(Slot::Value(value)) = self.state.slots.get(index) {
			if let Some(value) = value.downcast_ref::<S>() {
				return value.clone();
			}
		}
		let value = init();
		self.replace_slot(index, Slot::Value(Box::new(value.clone())));
		value
	}

	/// Schedules an effect at the current slot.
	///
	/// With `deps == None` the effect is scheduled on every render. Otherwise
	/// it is scheduled on the first render and whenever `deps` differs from
	/// the value seen last time.
	pub(crate) fn effect<D>(&mut self, timing: EffectTiming, deps: Option<D>, setup: Setup)
	where
		D: PartialEq + 'static,
	{
		let index = self.next_index();
		let reusable = matches!(
			self.state.slots.get(index),
			Some(Slot::Effect(effect)) if effect.timing == timing
		);
		if !reusable {
			self.replace_slot(
				index,
				Slot::Effect(EffectSlot {
					timing,
					deps: None,
					setup: None,
					cleanup: None,
					scheduled: false,
				}),
			);
		}

		let Some(Slot::Effect(effect)) = self.state.slots.get_mut(index) else {
			return;
		};
		let changed = match (effect.deps.as_ref(), deps.as_ref()) {
			(Some(previous), Some(next)) => previous.downcast_ref::<D>() != Some(next),
			_ => true,
		};
		if changed || effect.setup.is_none() {
			effect.deps = deps.map(|deps| Box::new(deps) as Box<dyn Any>);
			effect.setup = Some(setup);
			effect.scheduled = true;
		}
	}
}

/// One component instance's hook storage.
///
/// ```ignore
/// use reinhardt_pages_extras::reactive::{HookScope, use_layout_effect};
///
/// let mut scope = HookScope::new();
/// scope.render(|cx| {
///     use_layout_effect(cx, || {
///         log!("committed");
///         None::<fn()>
///     });
/// });
/// scope.commit()?;
/// scope.unmount()?;
/// ```
pub struct HookScope {
	config: ScopeConfig,
	state: ScopeState,
	reporter: ErrorReporter,
}

impl Default for HookScope {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for HookScope {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HookScope")
			.field("config", &self.config)
			.field("slots", &self.state.slots.len())
			.field("mounted", &self.state.mounted)
			.finish()
	}
}

impl HookScope {
	/// Creates a scope with the default configuration.
	pub fn new() -> Self {
		Self::with_config(ScopeConfig::default())
	}

	/// Creates a scope with the given configuration.
	pub fn with_config(config: ScopeConfig) -> Self {
		Self {
			config,
			state: ScopeState::default(),
			reporter: ErrorReporter::default(),
		}
	}

	/// Returns the scope configuration.
	pub fn config(&self) -> &ScopeConfig {
		&self.config
	}

	/// Returns true between the first commit and unmount.
	pub fn is_mounted(&self) -> bool {
		self.state.mounted
	}

	/// Evaluates `f`, letting it call hooks in order.
	///
	/// Nothing scheduled by the hooks runs until [`commit`](Self::commit).
	pub fn render<R>(&mut self, f: impl FnOnce(&mut RenderCx<'_>) -> R) -> R {
		let mut cx = RenderCx {
			state: &mut self.state,
			index: 0,
			reporter: self.reporter.clone(),
		};
		let output = f(&mut cx);
		let used = cx.index;
		if used != self.state.slots.len() {
			warn_log!(
				"Render used {} hooks but the scope holds {} slots",
				used,
				self.state.slots.len()
			);
		}
		output
	}

	/// Runs scheduled effects: layout phase, then passive phase.
	///
	/// # Errors
	///
	/// Returns the first error raised during render or by an effect since
	/// the previous commit.
	pub fn commit(&mut self) -> Result<(), ExtrasError> {
		self.run_phase(EffectTiming::Layout);
		self.run_phase(EffectTiming::Passive);

		if !self.state.mounted {
			self.state.mounted = true;
			if self.config.strict_effects {
				debug_log!("Strict effects: remounting {} slots", self.state.slots.len());
				for timing in [EffectTiming::Layout, EffectTiming::Passive] {
					self.state.effects_mut(timing).for_each(EffectSlot::run_cleanup);
				}
				for timing in [EffectTiming::Layout, EffectTiming::Passive] {
					self.state.effects_mut(timing).for_each(EffectSlot::run_setup);
				}
			}
		}

		self.reporter.drain()
	}

	fn run_phase(&mut self, timing: EffectTiming) {
		for effect in self.state.effects_mut(timing).filter(|effect| effect.scheduled) {
			effect.run_cleanup();
		}
		for effect in self.state.effects_mut(timing) {
			if effect.scheduled {
				effect.scheduled = false;
				effect.run_setup();
			}
		}
	}

	/// Runs cleanups and releases every slot.
	///
	/// Layout cleanups always run; passive cleanups run unless
	/// [`ScopeConfig::skip_passive_cleanup`] is set. Calling this again is a
	/// no-op, and the next render starts a fresh mount.
	///
	/// # Errors
	///
	/// Returns the first error raised by a cleanup.
	pub fn unmount(&mut self) -> Result<(), ExtrasError> {
		if self.state.slots.is_empty() && !self.state.mounted {
			return self.reporter.drain();
		}

		self.state
			.effects_mut(EffectTiming::Layout)
			.for_each(EffectSlot::run_cleanup);
		if self.config.skip_passive_cleanup {
			debug_log!("Skipping passive cleanups on unmount");
		} else {
			self.state
				.effects_mut(EffectTiming::Passive)
				.for_each(EffectSlot::run_cleanup);
		}

		self.state.slots.clear();
		self.state.mounted = false;
		self.reporter.drain()
	}
}

impl Drop for HookScope {
	fn drop(&mut self) {
		if let Err(err) = self.unmount() {
			error_log!("Error while dropping hook scope: {}", err);
		}
	}
}
