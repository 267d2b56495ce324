//! Helper components
//!
//! Declarative building blocks on top of the [`View`] tree:
//!
//! - [`If`], [`Choose`] / [`When`] / [`Otherwise`]: conditional rendering
//! - [`For`]: list rendering
//! - [`Image`]: `<img>` with a fallback source
//! - [`ElementClass`], [`use_root_class`], [`use_body_class`]: class toggling
//!   on the root and body elements while mounted
//! - [`intersperse`], [`Join`]: separators between children

mod conditional;
mod element_class;
mod for_each;
mod image;
mod intersperse;
mod view;

pub use conditional::{Choose, ChooseBranch, If, Otherwise, When, if_view};
pub use element_class::{
	ClassListTarget, ElementClass, use_body_class, use_element_class, use_root_class,
};
pub use for_each::{For, for_each};
pub use image::{Image, ImageElement, handle_image_error, use_image_fallback};
pub use intersperse::{Join, Separator, intersperse};
pub use view::{ElementView, IntoView, View};
