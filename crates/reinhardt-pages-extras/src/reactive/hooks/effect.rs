//! Effect hooks: use_effect and use_layout_effect
//!
//! These hooks provide React-like side effect management on top of
//! [`HookScope`](crate::reactive::HookScope). Setups run on commit, in hook
//! order; the cleanup returned by a setup runs before the next setup of the
//! same hook and on unmount.

use crate::reactive::RenderCx;
use crate::reactive::scope::{Cleanup, EffectTiming, Setup};

fn boxed_setup<F, C>(mut f: F) -> Setup
where
	F: FnMut() -> Option<C> + 'static,
	C: FnOnce() + 'static,
{
	Box::new(move || f().map(|cleanup| Box::new(cleanup) as Cleanup))
}

/// Runs a side effect after every commit.
///
/// This is the React-like equivalent of `useEffect` without a dependency
/// array. The effect runs in the passive phase, after all layout effects.
///
/// # Type Parameters
///
/// * `F` - The effect function type
/// * `C` - The optional cleanup function type
///
/// # Arguments
///
/// * `cx` - The render context
/// * `f` - A function that performs the side effect and optionally returns a cleanup function
///
/// # Example
///
/// ```ignore
/// use reinhardt_pages_extras::reactive::{use_effect, use_ref};
///
/// scope.render(|cx| {
///     let renders = use_ref(cx, 0);
///
///     // Effect without cleanup
///     use_effect(cx, {
///         let renders = renders.clone();
///         move || {
///             *renders.borrow_mut() += 1;
///             None::<fn()>
///         }
///     });
///
///     // Effect with cleanup
///     use_effect(cx, move || {
///         let interval_id = set_interval(|| log!("tick"), 1000);
///         Some(move || clear_interval(interval_id))
///     });
/// });
/// ```
///
/// # Note on Cleanup
///
/// Passive cleanups are not guaranteed to run on unmount: a scope configured
/// with [`ScopeConfig::skip_passive_cleanup`](crate::reactive::ScopeConfig)
/// drops them. Resources that must be released belong in
/// [`use_layout_effect`].
pub fn use_effect<F, C>(cx: &mut RenderCx<'_>, f: F)
where
	F: FnMut() -> Option<C> + 'static,
	C: FnOnce() + 'static,
{
	cx.effect::<()>(EffectTiming::Passive, None, boxed_setup(f));
}

/// Runs a side effect after the commits in which `deps` changed.
///
/// Pass `()` to run the effect once on mount and its cleanup once on unmount.
pub fn use_effect_with_deps<D, F, C>(cx: &mut RenderCx<'_>, deps: D, f: F)
where
	D: PartialEq + 'static,
	F: FnMut() -> Option<C> + 'static,
	C: FnOnce() + 'static,
{
	cx.effect(EffectTiming::Passive, Some(deps), boxed_setup(f));
}

/// Runs a side effect synchronously at commit.
///
/// This is the React-like equivalent of `useLayoutEffect`. Layout effects run
/// before any passive effect of the same commit, and their cleanups always
/// run on unmount.
///
/// # When to Use
///
/// Use `use_layout_effect` instead of `use_effect` when you need to:
/// - Read layout from the DOM and synchronously re-render
/// - Attach or detach listeners that must never outlive the component
/// - Apply visual updates that must be synchronous
///
/// # Example
///
/// ```ignore
/// use reinhardt_pages_extras::reactive::{use_layout_effect, use_ref};
///
/// scope.render(|cx| {
///     let element_ref = use_ref(cx, None::<Element>);
///     use_layout_effect(cx, {
///         let element_ref = element_ref.clone();
///         move || {
///             if let Some(el) = element_ref.current() {
///                 log!("width: {}", el.client_width());
///             }
///             None::<fn()>
///         }
///     });
/// });
/// ```
pub fn use_layout_effect<F, C>(cx: &mut RenderCx<'_>, f: F)
where
	F: FnMut() -> Option<C> + 'static,
	C: FnOnce() + 'static,
{
	cx.effect::<()>(EffectTiming::Layout, None, boxed_setup(f));
}

/// Layout-phase counterpart of [`use_effect_with_deps`].
pub fn use_layout_effect_with_deps<D, F, C>(cx: &mut RenderCx<'_>, deps: D, f: F)
where
	D: PartialEq + 'static,
	F: FnMut() -> Option<C> + 'static,
	C: FnOnce() + 'static,
{
	cx.effect(EffectTiming::Layout, Some(deps), boxed_setup(f));
}
