//! Separators between children: intersperse and Join.

use super::view::{IntoView, View};

/// What to put between two adjacent children.
pub enum Separator<'a> {
	/// No separators; children are returned unchanged.
	None,
	/// The same view between every pair.
	View(View),
	/// Computed per position from `(index, count)`, where `index` is the
	/// position of the child before the separator. `None` skips the position.
	With(Box<dyn Fn(usize, usize) -> Option<View> + 'a>),
}

impl std::fmt::Debug for Separator<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Separator::None => f.write_str("None"),
			Separator::View(view) => f.debug_tuple("View").field(view).finish(),
			Separator::With(_) => f.write_str("With(..)"),
		}
	}
}

impl Default for Separator<'_> {
	fn default() -> Self {
		Separator::View(View::text(", "))
	}
}

impl<'a> Separator<'a> {
	/// Builds a per-position separator.
	pub fn with<V, F>(f: F) -> Self
	where
		V: IntoView,
		F: Fn(usize, usize) -> Option<V> + 'a,
	{
		Separator::With(Box::new(move |index, count| {
			f(index, count).map(IntoView::into_view)
		}))
	}

	fn at(&self, index: usize, count: usize) -> Option<View> {
		let view = match self {
			Separator::None => None,
			Separator::View(view) => Some(view.clone()),
			Separator::With(f) => f(index, count),
		};
		// Only `View::Empty` is skipped; empty text still yields a separator.
		view.filter(|view| !view.is_empty())
	}
}

impl From<&'static str> for Separator<'_> {
	fn from(text: &'static str) -> Self {
		Separator::View(View::text(text))
	}
}

impl From<String> for Separator<'_> {
	fn from(text: String) -> Self {
		Separator::View(View::text(text))
	}
}

impl From<View> for Separator<'_> {
	fn from(view: View) -> Self {
		Separator::View(view)
	}
}

impl<T: IntoView> From<Option<T>> for Separator<'_> {
	fn from(view: Option<T>) -> Self {
		view.map_or(Separator::None, |view| Separator::View(view.into_view()))
	}
}

/// Inserts `separator` between adjacent children.
///
/// Empty children are dropped first. Each inserted separator is wrapped in a
/// keyed view (`__separator_{index}`) so siblings stay distinguishable.
///
/// # Example
///
/// ```ignore
/// use reinhardt_pages_extras::component::{Separator, intersperse};
///
/// let items = intersperse(["a", "b", "c"], Separator::default());
/// assert_eq!(View::fragment(items).render_to_string(), "a, b, c");
/// ```
pub fn intersperse<'a>(
	children: impl IntoIterator<Item = impl IntoView>,
	separator: impl Into<Separator<'a>>,
) -> Vec<View> {
	let items: Vec<View> = children
		.into_iter()
		.map(IntoView::into_view)
		.filter(|view| !view.is_empty())
		.collect();
	let separator = separator.into();
	let count = items.len();
	if count <= 1 || matches!(separator, Separator::None) {
		return items;
	}

	let mut result = Vec::with_capacity(count * 2 - 1);
	for (index, child) in items.into_iter().enumerate() {
		result.push(child);
		if index + 1 == count {
			break;
		}
		if let Some(view) = separator.at(index, count) {
			result.push(View::keyed(format!("__separator_{index}"), view));
		}
	}
	result
}

/// Renders children with separators between them.
///
/// ```ignore
/// let tags = Join::new(tag_links).separator(" · ");
/// ```
#[derive(Debug)]
pub struct Join<'a> {
	children: Vec<View>,
	separator: Separator<'a>,
}

impl<'a> Join<'a> {
	/// Joins `children` with the default `", "` separator.
	pub fn new(children: impl IntoIterator<Item = impl IntoView>) -> Self {
		Self {
			children: children.into_iter().map(IntoView::into_view).collect(),
			separator: Separator::default(),
		}
	}

	/// Replaces the separator.
	pub fn separator(mut self, separator: impl Into<Separator<'a>>) -> Self {
		self.separator = separator.into();
		self
	}
}

impl IntoView for Join<'_> {
	fn into_view(self) -> View {
		View::Fragment(intersperse(self.children, self.separator))
	}
}
