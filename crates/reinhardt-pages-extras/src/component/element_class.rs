//! Class toggling on the root and body elements, tied to component lifetime.
//!
//! While the calling component is mounted, the `add` classes are present on
//! the element and the `remove` classes are absent. Unmounting reverts both.

use crate::debug_log;
use crate::reactive::{RenderCx, use_layout_effect_with_deps};
use crate::testing::{MockDocument, MockNode};

/// Class-list operations on an element.
pub trait ClassListTarget: Clone + 'static {
	/// Adds `class`.
	fn add_class(&self, class: &str);
	/// Removes `class`.
	fn remove_class(&self, class: &str);
	/// The document's root (`<html>`) element.
	fn root_element() -> Option<Self>;
	/// The document's `<body>` element.
	fn body_element() -> Option<Self>;
}

/// Classes to add and remove while mounted.
///
/// Both lists are space-separated; surrounding and repeated whitespace is
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementClass {
	add: Vec<String>,
	remove: Vec<String>,
}

fn split_classes(classes: &str) -> Vec<String> {
	classes.split_whitespace().map(str::to_string).collect()
}

impl ElementClass {
	/// Creates an empty toggle.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the classes added on mount.
	pub fn add(mut self, classes: &str) -> Self {
		self.add = split_classes(classes);
		self
	}

	/// Sets the classes removed on mount.
	pub fn remove(mut self, classes: &str) -> Self {
		self.remove = split_classes(classes);
		self
	}

	/// Applies the mount state to `element`.
	pub fn apply<T: ClassListTarget>(&self, element: &T) {
		self.add.iter().for_each(|class| element.add_class(class));
		self.remove.iter().for_each(|class| element.remove_class(class));
	}

	/// Reverts what [`apply`](Self::apply) did.
	pub fn revert<T: ClassListTarget>(&self, element: &T) {
		self.add.iter().for_each(|class| element.remove_class(class));
		self.remove.iter().for_each(|class| element.add_class(class));
	}
}

/// Applies `class` to the element returned by `locate` while mounted.
///
/// The element is looked up once, on mount; later renders do not change the
/// classes.
pub fn use_element_class<T, L>(cx: &mut RenderCx<'_>, locate: L, class: ElementClass)
where
	T: ClassListTarget,
	L: Fn() -> Option<T> + 'static,
{
	use_layout_effect_with_deps(cx, (), move || {
		let element = locate()?;
		debug_log!("Applying element classes {:?}", class);
		class.apply(&element);
		let class = class.clone();
		Some(move || class.revert(&element))
	});
}

/// [`use_element_class`] on the document's root element.
pub fn use_root_class<T: ClassListTarget>(cx: &mut RenderCx<'_>, class: ElementClass) {
	use_element_class(cx, T::root_element, class);
}

/// [`use_element_class`] on the document's body element.
pub fn use_body_class<T: ClassListTarget>(cx: &mut RenderCx<'_>, class: ElementClass) {
	use_element_class(cx, T::body_element, class);
}

impl ClassListTarget for MockNode {
	fn add_class(&self, class: &str) {
		MockNode::add_class(self, class);
	}

	fn remove_class(&self, class: &str) {
		MockNode::remove_class(self, class);
	}

	fn root_element() -> Option<Self> {
		MockDocument::installed().map(|document| document.document_element())
	}

	fn body_element() -> Option<Self> {
		MockDocument::installed().map(|document| document.body())
	}
}

#[cfg(target_arch = "wasm32")]
impl ClassListTarget for web_sys::Element {
	fn add_class(&self, class: &str) {
		if let Err(err) = self.class_list().add_1(class) {
			crate::warn_log!("Failed to add class '{}': {:?}", class, err);
		}
	}

	fn remove_class(&self, class: &str) {
		if let Err(err) = self.class_list().remove_1(class) {
			crate::warn_log!("Failed to remove class '{}': {:?}", class, err);
		}
	}

	fn root_element() -> Option<Self> {
		web_sys::window()?.document()?.document_element()
	}

	fn body_element() -> Option<Self> {
		web_sys::window()?.document()?.body().map(Into::into)
	}
}
