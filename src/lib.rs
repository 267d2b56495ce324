//! # Reinhardt Extras
//!
//! Helper components, hooks and lifecycle-bound event listeners for
//! Reinhardt frontends.
//!
//! ## Feature Flags
//!
//! - `pages` (default) - Helpers for reinhardt-pages, see [`pages`]
//! - `debug-hooks` - Verbose hook logging in debug builds
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use reinhardt_extras::pages::component::{For, If, View};
//! use reinhardt_extras::class_names;
//!
//! let list = View::element("ul")
//!     .attr("class", class_names!["list", "list--empty" => items.is_empty()])
//!     .child(For::new(items, |item, _| View::element("li").child(item)))
//!     .child(If::new(items.is_empty()).children("Nothing here"));
//! ```

#[cfg(feature = "pages")]
pub mod pages;

#[cfg(feature = "pages")]
pub use reinhardt_pages_extras::class_names;
