//! Conditional CSS class string composition.
//!
//! ```ignore
//! use reinhardt_pages_extras::class_names;
//!
//! let class = class_names!["button", "button--primary" => primary, extra_class];
//! ```

use std::fmt;

/// A value that may contribute a class name.
///
/// Empty strings and `None` contribute nothing.
pub trait IntoClassName {
	/// Returns the class name, if any.
	fn into_class_name(self) -> Option<String>;
}

impl IntoClassName for &str {
	fn into_class_name(self) -> Option<String> {
		(!self.is_empty()).then(|| self.to_string())
	}
}

impl IntoClassName for String {
	fn into_class_name(self) -> Option<String> {
		(!self.is_empty()).then_some(self)
	}
}

impl IntoClassName for &String {
	fn into_class_name(self) -> Option<String> {
		self.as_str().into_class_name()
	}
}

impl<T: IntoClassName> IntoClassName for Option<T> {
	fn into_class_name(self) -> Option<String> {
		self.and_then(IntoClassName::into_class_name)
	}
}

/// Ordered, de-duplicated set of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassNames {
	names: Vec<String>,
}

impl ClassNames {
	/// Creates an empty set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds `name` unless it is empty or already present.
	pub fn push(&mut self, name: impl IntoClassName) -> &mut Self {
		if let Some(name) = name.into_class_name() {
			if !self.names.contains(&name) {
				self.names.push(name);
			}
		}
		self
	}

	/// Adds `name` when `condition` holds.
	pub fn push_if(&mut self, name: impl IntoClassName, condition: bool) -> &mut Self {
		if condition {
			self.push(name);
		}
		self
	}

	/// Adds every name whose condition holds, in iteration order.
	pub fn extend_conditional<N, I>(&mut self, entries: I) -> &mut Self
	where
		N: IntoClassName,
		I: IntoIterator<Item = (N, bool)>,
	{
		for (name, condition) in entries {
			self.push_if(name, condition);
		}
		self
	}

	/// Returns true if no class was added.
	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Returns the collected names.
	pub fn names(&self) -> &[String] {
		&self.names
	}

	/// Joins the names with single spaces.
	pub fn build(&self) -> String {
		self.names.join(" ")
	}
}

impl fmt::Display for ClassNames {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.build())
	}
}

impl<N: IntoClassName> FromIterator<N> for ClassNames {
	fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
		let mut names = Self::new();
		for name in iter {
			names.push(name);
		}
		names
	}
}

/// Builds a class string from names and `name => condition` pairs.
///
/// ```ignore
/// let class = class_names!["a", "b" => false, Some("c"), "a"];
/// assert_eq!(class, "a c");
/// ```
#[macro_export]
macro_rules! class_names {
	() => {
		::std::string::String::new()
	};
	($($name:expr $(=> $condition:expr)?),+ $(,)?) => {{
		let mut names = $crate::class_names::ClassNames::new();
		$( $crate::__class_names_item!(names, $name $(=> $condition)?); )+
		names.build()
	}};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __class_names_item {
	($names:ident, $name:expr => $condition:expr) => {
		$names.push_if($name, $condition);
	};
	($names:ident, $name:expr) => {
		$names.push($name);
	};
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_macro_mixes_plain_and_conditional() {
		let primary = true;
		let disabled = false;
		let class = class_names!["button", "button--primary" => primary, "button--disabled" => disabled];
		assert_eq!(class, "button button--primary");
	}

	#[rstest]
	fn test_macro_skips_empty_and_none() {
		let extra: Option<&str> = None;
		let class = class_names!["", extra, Some("a"), String::new()];
		assert_eq!(class, "a");
		assert_eq!(class_names![], "");
	}

	#[rstest]
	fn test_duplicates_keep_first_position() {
		let class = class_names!["a", "b", "a" => true, "c", "b"];
		assert_eq!(class, "a b c");
	}

	#[rstest]
	fn test_extend_conditional_follows_entry_order() {
		let mut names = ClassNames::new();
		names.push("base").extend_conditional([("x", true), ("y", false), ("z", true)]);
		assert_eq!(names.to_string(), "base x z");
	}

	#[rstest]
	fn test_from_iterator() {
		let names: ClassNames = vec!["a".to_string(), "b".to_string(), "a".to_string()]
			.into_iter()
			.collect();
		assert_eq!(names.names(), ["a", "b"]);
		assert!(!names.is_empty());
	}
}
