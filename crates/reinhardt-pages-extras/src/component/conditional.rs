//! Conditional rendering: If, Choose, When and Otherwise.
//!
//! Branch content is either eager children or a lazy `render` closure. A lazy
//! closure is only called for the branch that is actually rendered, which
//! matters when building the content is expensive or would fail while the
//! condition is false.

use super::view::{IntoView, View};

enum Content<'a> {
	Empty,
	Children(View),
	Render(Box<dyn FnOnce() -> View + 'a>),
}

impl Content<'_> {
	fn resolve(self) -> View {
		match self {
			Content::Empty => View::Empty,
			Content::Children(view) => view,
			Content::Render(render) => render(),
		}
	}

	fn is_lazy(&self) -> bool {
		matches!(self, Content::Render(_))
	}
}

/// Renders its content only when `condition` holds.
///
/// When both are given, `render` takes precedence over `children`.
///
/// # Example
///
/// ```ignore
/// use reinhardt_pages_extras::component::If;
///
/// let view = If::new(user.is_some())
///     .render(|| profile_card(user.as_ref().unwrap()))
///     .into_view();
/// ```
pub struct If<'a> {
	condition: bool,
	children: Option<View>,
	render: Content<'a>,
}

impl std::fmt::Debug for If<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("If")
			.field("condition", &self.condition)
			.field("has_children", &self.children.is_some())
			.field("lazy", &self.render.is_lazy())
			.finish()
	}
}

impl<'a> If<'a> {
	/// Creates a conditional with no content.
	pub fn new(condition: bool) -> Self {
		Self {
			condition,
			children: None,
			render: Content::Empty,
		}
	}

	/// Sets eager children.
	pub fn children(mut self, children: impl IntoView) -> Self {
		self.children = Some(children.into_view());
		self
	}

	/// Sets a lazy render closure, called only if the condition holds.
	pub fn render<V, F>(mut self, render: F) -> Self
	where
		V: IntoView,
		F: FnOnce() -> V + 'a,
	{
		self.render = Content::Render(Box::new(move || render().into_view()));
		self
	}

	/// Returns the condition.
	pub fn condition(&self) -> bool {
		self.condition
	}

	fn into_content(self) -> Content<'a> {
		match (self.render, self.children) {
			(Content::Empty, Some(children)) => Content::Children(children),
			(render, _) => render,
		}
	}
}

impl IntoView for If<'_> {
	fn into_view(self) -> View {
		if self.condition {
			self.into_content().resolve()
		} else {
			View::Empty
		}
	}
}

/// Shorthand for `If::new(condition).render(render)`.
pub fn if_view<V: IntoView>(condition: bool, render: impl FnOnce() -> V) -> View {
	if condition {
		render().into_view()
	} else {
		View::Empty
	}
}

/// A conditional branch of [`Choose`].
pub type When<'a> = If<'a>;

/// The fallback branch of [`Choose`].
pub struct Otherwise<'a> {
	content: Content<'a>,
}

impl std::fmt::Debug for Otherwise<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Otherwise")
			.field("lazy", &self.content.is_lazy())
			.finish()
	}
}

impl Default for Otherwise<'_> {
	fn default() -> Self {
		Self::new()
	}
}

impl<'a> Otherwise<'a> {
	/// Creates an empty fallback.
	pub fn new() -> Self {
		Self {
			content: Content::Empty,
		}
	}

	/// Sets eager children.
	pub fn children(mut self, children: impl IntoView) -> Self {
		if !self.content.is_lazy() {
			self.content = Content::Children(children.into_view());
		}
		self
	}

	/// Sets a lazy render closure; takes precedence over children.
	pub fn render<V, F>(mut self, render: F) -> Self
	where
		V: IntoView,
		F: FnOnce() -> V + 'a,
	{
		self.content = Content::Render(Box::new(move || render().into_view()));
		self
	}
}

/// One branch of a [`Choose`].
#[derive(Debug)]
pub enum ChooseBranch<'a> {
	/// A conditional branch.
	When(When<'a>),
	/// The fallback branch.
	Otherwise(Otherwise<'a>),
}

impl<'a> From<If<'a>> for ChooseBranch<'a> {
	fn from(when: If<'a>) -> Self {
		ChooseBranch::When(when)
	}
}

impl<'a> From<Otherwise<'a>> for ChooseBranch<'a> {
	fn from(otherwise: Otherwise<'a>) -> Self {
		ChooseBranch::Otherwise(otherwise)
	}
}

/// Renders the first [`When`] whose condition holds, else the [`Otherwise`].
///
/// The fallback may appear anywhere among the branches; if several are
/// given, the last one is used.
///
/// # Example
///
/// ```ignore
/// use reinhardt_pages_extras::component::{Choose, Otherwise, When};
///
/// let view = Choose::new()
///     .branch(When::new(count == 0).children("none"))
///     .branch(When::new(count == 1).children("one"))
///     .branch(Otherwise::new().render(|| format!("{count} items")))
///     .into_view();
/// ```
#[derive(Debug, Default)]
pub struct Choose<'a> {
	branches: Vec<ChooseBranch<'a>>,
}

impl<'a> Choose<'a> {
	/// Creates a `Choose` with no branches.
	pub fn new() -> Self {
		Self {
			branches: Vec::new(),
		}
	}

	/// Appends a branch.
	pub fn branch(mut self, branch: impl Into<ChooseBranch<'a>>) -> Self {
		self.branches.push(branch.into());
		self
	}

	/// Appends a conditional branch.
	pub fn when(self, when: When<'a>) -> Self {
		self.branch(when)
	}

	/// Appends the fallback branch.
	pub fn otherwise(self, otherwise: Otherwise<'a>) -> Self {
		self.branch(otherwise)
	}
}

impl IntoView for Choose<'_> {
	fn into_view(self) -> View {
		let mut chosen = None;
		let mut fallback = None;
		for branch in self.branches {
			match branch {
				ChooseBranch::When(when) if chosen.is_none() && when.condition() => {
					chosen = Some(when.into_content());
				}
				ChooseBranch::When(_) => {}
				ChooseBranch::Otherwise(otherwise) => fallback = Some(otherwise.content),
			}
		}
		chosen
			.or(fallback)
			.map_or(View::Empty, Content::resolve)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	#[case(true, "shown")]
	#[case(false, "")]
	fn test_if_children(#[case] condition: bool, #[case] expected: &str) {
		let view = If::new(condition).children("shown").into_view();
		assert_eq!(view.render_to_string(), expected);
	}

	#[rstest]
	fn test_if_render_is_lazy() {
		let calls = Cell::new(0);
		let render = || {
			calls.set(calls.get() + 1);
			"rendered"
		};

		assert!(If::new(false).render(render).into_view().is_empty());
		assert_eq!(calls.get(), 0);

		let view = If::new(true).render(render).children("ignored").into_view();
		assert_eq!(view.render_to_string(), "rendered");
		assert_eq!(calls.get(), 1);
	}

	#[rstest]
	fn test_if_view_helper() {
		assert_eq!(if_view(true, || "a").render_to_string(), "a");
		assert!(if_view(false, || -> &str { unreachable!() }).is_empty());
	}

	#[rstest]
	#[case(0, "none")]
	#[case(1, "one")]
	#[case(5, "few")]
	#[case(50, "many")]
	fn test_choose_first_matching_when(#[case] count: u32, #[case] expected: &str) {
		let view = Choose::new()
			.when(When::new(count == 0).children("none"))
			.when(When::new(count == 1).children("one"))
			.when(When::new(count < 10).children("few"))
			.otherwise(Otherwise::new().children("many"))
			.into_view();
		assert_eq!(view.render_to_string(), expected);
	}

	#[rstest]
	fn test_choose_otherwise_anywhere() {
		let view = Choose::new()
			.otherwise(Otherwise::new().children("fallback"))
			.when(When::new(false).children("no"))
			.into_view();
		assert_eq!(view.render_to_string(), "fallback");
	}

	#[rstest]
	fn test_choose_without_match_or_fallback_is_empty() {
		let view = Choose::new().when(When::new(false).children("no")).into_view();
		assert!(view.is_empty());
	}

	#[rstest]
	fn test_choose_only_evaluates_chosen_branch() {
		let evaluated = Cell::new(0);
		let view = Choose::new()
			.when(When::new(false).render(|| {
				evaluated.set(evaluated.get() + 1);
				"a"
			}))
			.when(When::new(true).render(|| "b"))
			.otherwise(Otherwise::new().render(|| {
				evaluated.set(evaluated.get() + 1);
				"c"
			}))
			.into_view();
		assert_eq!(view.render_to_string(), "b");
		assert_eq!(evaluated.get(), 0);
	}
}
