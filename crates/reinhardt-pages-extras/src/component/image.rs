//! Image element with a fallback source.

use std::borrow::Cow;

use super::view::{ElementView, IntoView, View};
use crate::event::{EventTarget, ListenerOptions};
use crate::reactive::{NodeRef, RenderCx, use_event_listener};
use crate::testing::MockNode;
use crate::{debug_log, warn_log};

/// Operations the fallback logic needs from an `<img>` element.
pub trait ImageElement {
	/// Returns the `src` attribute as written, not the resolved URL.
	fn src_attribute(&self) -> Option<String>;
	/// Replaces the source.
	fn set_src(&self, src: &str);
	/// Hides the element while keeping its layout box.
	fn hide(&self);
}

/// An `<img>` whose source is `url`.
///
/// Extra attributes are rendered as given, except `src`, which is always
/// `url`. Pair it with [`use_image_fallback`] to react to load failures.
#[derive(Debug, Clone)]
pub struct Image {
	url: Cow<'static, str>,
	fallback_url: Option<Cow<'static, str>>,
	attrs: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl Image {
	/// Creates an image for `url`.
	pub fn new(url: impl Into<Cow<'static, str>>) -> Self {
		Self {
			url: url.into(),
			fallback_url: None,
			attrs: Vec::new(),
		}
	}

	/// Sets the source used when `url` fails to load.
	pub fn fallback_url(mut self, fallback_url: impl Into<Cow<'static, str>>) -> Self {
		self.fallback_url = Some(fallback_url.into());
		self
	}

	/// Adds a passthrough attribute.
	pub fn attr(
		mut self,
		name: impl Into<Cow<'static, str>>,
		value: impl Into<Cow<'static, str>>,
	) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Returns the primary source.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// Returns the configured fallback source.
	pub fn fallback(&self) -> Option<&str> {
		self.fallback_url.as_deref()
	}
}

impl IntoView for Image {
	fn into_view(self) -> View {
		ElementView::new("img")
			.attrs_from(self.attrs)
			.attr("src", self.url)
			.into_view()
	}
}

/// Handles a load failure of `element`.
///
/// Switches to `fallback_url` when one is configured, otherwise hides the
/// element. A failing fallback hides the element instead of retrying it.
pub fn handle_image_error<E: ImageElement + ?Sized>(element: &E, fallback_url: Option<&str>) {
	match fallback_url.filter(|fallback| !fallback.is_empty()) {
		Some(fallback) if element.src_attribute().as_deref() != Some(fallback) => {
			debug_log!("Image failed to load, switching to fallback {}", fallback);
			element.set_src(fallback);
		}
		Some(fallback) => {
			warn_log!("Fallback image {} failed to load, hiding element", fallback);
			element.hide();
		}
		None => element.hide(),
	}
}

/// Wires [`handle_image_error`] to the `error` event of the image in `image`.
pub fn use_image_fallback<T>(cx: &mut RenderCx<'_>, image: &NodeRef<T>, fallback_url: Option<String>)
where
	T: EventTarget + ImageElement,
{
	let handle = image.clone();
	use_event_listener(
		cx,
		image,
		"error",
		move |_event| {
			if let Some(element) = handle.current() {
				handle_image_error(&element, fallback_url.as_deref());
			}
		},
		ListenerOptions::Absent,
	);
}

impl ImageElement for MockNode {
	fn src_attribute(&self) -> Option<String> {
		self.attribute("src")
	}

	fn set_src(&self, src: &str) {
		self.set_attribute("src", src);
	}

	fn hide(&self) {
		self.set_style("visibility", "hidden");
	}
}

#[cfg(target_arch = "wasm32")]
mod web {
	use wasm_bindgen::JsCast;

	use super::ImageElement;
	use crate::warn_log;

	impl ImageElement for web_sys::HtmlImageElement {
		fn src_attribute(&self) -> Option<String> {
			self.get_attribute("src")
		}

		fn set_src(&self, src: &str) {
			web_sys::HtmlImageElement::set_src(self, src);
		}

		fn hide(&self) {
			if let Err(err) = self.style().set_property("visibility", "hidden") {
				warn_log!("Failed to hide image: {:?}", err);
			}
		}
	}

	impl ImageElement for web_sys::EventTarget {
		fn src_attribute(&self) -> Option<String> {
			self.dyn_ref::<web_sys::HtmlImageElement>()
				.and_then(ImageElement::src_attribute)
		}

		fn set_src(&self, src: &str) {
			if let Some(image) = self.dyn_ref::<web_sys::HtmlImageElement>() {
				ImageElement::set_src(image, src);
			}
		}

		fn hide(&self) {
			if let Some(element) = self.dyn_ref::<web_sys::HtmlElement>() {
				if let Err(err) = element.style().set_property("visibility", "hidden") {
					warn_log!("Failed to hide image: {:?}", err);
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::{Cell, RefCell};

	use crate::reactive::HookScope;
	use crate::testing::MockEvent;
	use rstest::rstest;

	#[rstest]
	fn test_render_puts_src_last() {
		let view = Image::new("a.png")
			.attr("alt", "avatar")
			.attr("src", "ignored.png")
			.into_view();
		assert_eq!(view.render_to_string(), "<img alt=\"avatar\" src=\"a.png\" />");
	}

	#[rstest]
	fn test_error_switches_to_fallback() {
		let img = MockNode::element("img");
		img.set_src("a.png");
		handle_image_error(&img, Some("fallback.png"));
		assert_eq!(img.attribute("src").as_deref(), Some("fallback.png"));
		assert_eq!(img.style("visibility"), None);
	}

	#[rstest]
	#[case::no_fallback(None)]
	#[case::empty_fallback(Some(""))]
	fn test_error_without_fallback_hides(#[case] fallback: Option<&str>) {
		let img = MockNode::element("img");
		img.set_src("a.png");
		handle_image_error(&img, fallback);
		assert_eq!(img.style("visibility").as_deref(), Some("hidden"));
		assert_eq!(img.attribute("src").as_deref(), Some("a.png"));
	}

	#[rstest]
	fn test_failing_fallback_hides() {
		let img = MockNode::element("img");
		img.set_src("fallback.png");
		handle_image_error(&img, Some("fallback.png"));
		assert_eq!(img.style("visibility").as_deref(), Some("hidden"));
	}

	/// Image whose `src` property resolves against a base URL, as browsers do.
	#[derive(Default)]
	struct ResolvingImage {
		attribute: RefCell<Option<String>>,
		assignments: Cell<usize>,
		hidden: Cell<bool>,
	}

	impl ResolvingImage {
		fn resolved_src(&self) -> String {
			format!(
				"https://example.test/{}",
				self.attribute.borrow().as_deref().unwrap_or_default()
			)
		}
	}

	impl ImageElement for ResolvingImage {
		fn src_attribute(&self) -> Option<String> {
			self.attribute.borrow().clone()
		}

		fn set_src(&self, src: &str) {
			self.assignments.set(self.assignments.get() + 1);
			*self.attribute.borrow_mut() = Some(src.to_string());
		}

		fn hide(&self) {
			self.hidden.set(true);
		}
	}

	#[rstest]
	fn test_failing_relative_fallback_hides_when_src_resolves() {
		let img = ResolvingImage::default();
		*img.attribute.borrow_mut() = Some("photo.png".to_string());

		handle_image_error(&img, Some("fallback.png"));
		assert_eq!(img.resolved_src(), "https://example.test/fallback.png");
		assert_eq!(img.assignments.get(), 1);
		assert!(!img.hidden.get());

		handle_image_error(&img, Some("fallback.png"));
		handle_image_error(&img, Some("fallback.png"));
		assert_eq!(img.assignments.get(), 1);
		assert!(img.hidden.get());
	}

	#[rstest]
	fn test_use_image_fallback_reacts_to_error_event() {
		let image = Image::new("a.png").fallback_url("b.png");
		let img = MockNode::element("img");
		img.set_src(image.url());
		let handle: NodeRef<MockNode> = NodeRef::new(Some(img.clone()));

		let mut scope = HookScope::new();
		let fallback = image.fallback().map(str::to_string);
		scope.render(|cx| use_image_fallback(cx, &handle, fallback));
		scope.commit().unwrap();

		img.dispatch_event(&MockEvent::with_bubbles("error", false));
		assert_eq!(img.attribute("src").as_deref(), Some("b.png"));

		img.dispatch_event(&MockEvent::with_bubbles("error", false));
		assert_eq!(img.style("visibility").as_deref(), Some("hidden"));
	}
}
