//! Ordered route tables.

use crate::error::PatternResult;
use crate::matching::{extract_bindings, matches, parse_string_route};
use crate::pattern::RoutePattern;

/// A registered pattern and the target it selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<T> {
	pattern: RoutePattern,
	target: T,
}

impl<T> RouteEntry<T> {
	/// Creates a new entry.
	pub fn new(pattern: RoutePattern, target: T) -> Self {
		Self { pattern, target }
	}

	/// Returns the pattern.
	pub fn pattern(&self) -> &RoutePattern {
		&self.pattern
	}

	/// Returns the target.
	pub fn target(&self) -> &T {
		&self.target
	}
}

/// The outcome of a successful lookup in a [`RouteTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, T> {
	entry: &'a RouteEntry<T>,
	index: usize,
	bindings: Vec<(String, String)>,
}

impl<'a, T> RouteMatch<'a, T> {
	/// Returns the matched entry.
	pub fn entry(&self) -> &'a RouteEntry<T> {
		self.entry
	}

	/// Returns the matched entry's target.
	pub fn target(&self) -> &'a T {
		&self.entry.target
	}

	/// Returns the registration index of the matched entry.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Returns the `(property, value)` pairs bound by the match, in pattern order.
	pub fn bindings(&self) -> &[(String, String)] {
		&self.bindings
	}

	/// Consumes the match, returning its bindings.
	pub fn into_bindings(self) -> Vec<(String, String)> {
		self.bindings
	}
}

/// An ordered list of route patterns.
///
/// Registration order is significant: [`find`](Self::find) returns the first
/// entry whose pattern matches, even when a later entry is more specific.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable<T> {
	entries: Vec<RouteEntry<T>>,
}

impl<T> Default for RouteTable<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> RouteTable<T> {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
		}
	}

	/// Appends a pattern.
	pub fn register(&mut self, pattern: RoutePattern, target: T) -> &mut Self {
		self.entries.push(RouteEntry::new(pattern, target));
		self
	}

	/// Parses and appends a route declaration.
	///
	/// # Errors
	///
	/// Returns the [`PatternError`](crate::PatternError) produced by [`RoutePattern::parse`].
	pub fn register_str(&mut self, route: &str, target: T) -> PatternResult<&mut Self> {
		let pattern = RoutePattern::parse(route)?;
		Ok(self.register(pattern, target))
	}

	/// Builder-style variant of [`register`](Self::register).
	pub fn with(mut self, pattern: RoutePattern, target: T) -> Self {
		self.register(pattern, target);
		self
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether the table has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates the entries in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &RouteEntry<T>> {
		self.entries.iter()
	}

	/// Finds the first entry matching already-split route segments.
	pub fn find_segments<S: AsRef<str>>(&self, route: &[S]) -> Option<RouteMatch<'_, T>> {
		self.entries
			.iter()
			.enumerate()
			.find(|(_, entry)| matches(route, &entry.pattern))
			.map(|(index, entry)| RouteMatch {
				entry,
				index,
				bindings: extract_bindings(route, &entry.pattern),
			})
	}

	/// Finds the first entry matching a route string.
	///
	/// `None` means no pattern matched; it is an ordinary outcome, not an error.
	pub fn find(&self, route: &str) -> Option<RouteMatch<'_, T>> {
		self.find_segments(&parse_string_route(route))
	}
}

impl<'a, T> IntoIterator for &'a RouteTable<T> {
	type Item = &'a RouteEntry<T>;
	type IntoIter = std::slice::Iter<'a, RouteEntry<T>>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::segment::RouteSegment;
	use rstest::{fixture, rstest};

	#[fixture]
	fn table() -> RouteTable<&'static str> {
		let mut table = RouteTable::new();
		table.register_str("", "index").unwrap();
		table.register_str("users", "user_list").unwrap();
		table.register_str("users/{id}", "user_detail").unwrap();
		table
	}

	#[rstest]
	fn test_find_index(table: RouteTable<&'static str>) {
		let found = table.find("").unwrap();
		assert_eq!(*found.target(), "index");
		assert!(found.bindings().is_empty());
		assert_eq!(found.index(), 0);
	}

	#[rstest]
	fn test_find_with_binding(table: RouteTable<&'static str>) {
		let found = table.find("/users/7").unwrap();
		assert_eq!(*found.target(), "user_detail");
		assert_eq!(found.into_bindings(), vec![("id".to_string(), "7".to_string())]);
	}

	#[rstest]
	fn test_find_not_found(table: RouteTable<&'static str>) {
		assert!(table.find("posts").is_none());
		assert!(table.find("users/7/edit").is_none());
	}

	#[rstest]
	fn test_first_match_wins() {
		let table = RouteTable::new()
			.with(
				RoutePattern::new(vec![RouteSegment::literal("a"), RouteSegment::Wildcard]),
				"general",
			)
			.with(
				RoutePattern::new(vec![RouteSegment::literal("a"), RouteSegment::literal("b")]),
				"specific",
			);

		assert_eq!(*table.find("a/b").unwrap().target(), "general");
	}

	#[rstest]
	fn test_iteration_order(table: RouteTable<&'static str>) {
		let targets: Vec<_> = table.iter().map(|e| *e.target()).collect();
		assert_eq!(targets, vec!["index", "user_list", "user_detail"]);
		assert_eq!(table.len(), 3);
		assert!(!table.is_empty());
	}
}
