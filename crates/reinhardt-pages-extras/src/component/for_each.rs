//! List rendering.

use super::view::{IntoView, View};

/// Renders every item of `of` with `render(item, index)`.
///
/// # Example
///
/// ```ignore
/// use reinhardt_pages_extras::component::For;
///
/// let list = View::element("ul").child(For::new(users, |user, index| {
///     View::element("li").attr("data-index", index.to_string()).child(user.name)
/// }));
/// ```
pub struct For<I, F> {
	of: I,
	render: F,
}

impl<I, F> std::fmt::Debug for For<I, F> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("For").finish_non_exhaustive()
	}
}

impl<I, F, V> For<I, F>
where
	I: IntoIterator,
	F: FnMut(I::Item, usize) -> V,
	V: IntoView,
{
	/// Creates a list renderer.
	pub fn new(of: I, render: F) -> Self {
		Self { of, render }
	}
}

impl<I, F, V> IntoView for For<I, F>
where
	I: IntoIterator,
	F: FnMut(I::Item, usize) -> V,
	V: IntoView,
{
	fn into_view(self) -> View {
		for_each(self.of, self.render)
	}
}

/// Maps `of` through `render(item, index)` into a fragment.
pub fn for_each<I, F, V>(of: I, mut render: F) -> View
where
	I: IntoIterator,
	F: FnMut(I::Item, usize) -> V,
	V: IntoView,
{
	View::Fragment(
		of.into_iter()
			.enumerate()
			.map(|(index, item)| render(item, index).into_view())
			.collect(),
	)
}
