//! Route segments.

use std::fmt;

/// Separator between route segments.
pub const ROUTE_SEPARATOR: char = '/';

/// Literal text that matches any segment when it appears on either side of a comparison.
pub const WILDCARD_TOKEN: &str = "*";

/// One unit of a [`RoutePattern`](crate::RoutePattern).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteSegment {
	/// Matches a route segment with exactly this text.
	Literal(String),
	/// Matches any route segment and binds its text to the named property.
	Property(String),
	/// Matches any route segment without binding it.
	Wildcard,
}

impl RouteSegment {
	/// Creates a literal segment.
	pub fn literal(value: impl Into<String>) -> Self {
		Self::Literal(value.into())
	}

	/// Creates a property segment.
	pub fn property(name: impl Into<String>) -> Self {
		Self::Property(name.into())
	}

	/// Returns whether this segment accepts the given route segment.
	pub fn accepts(&self, segment: &str) -> bool {
		match self {
			Self::Property(_) | Self::Wildcard => true,
			Self::Literal(value) => {
				value == segment || value == WILDCARD_TOKEN || segment == WILDCARD_TOKEN
			}
		}
	}

	/// Returns the property name if this segment binds one.
	pub fn property_name(&self) -> Option<&str> {
		match self {
			Self::Property(name) => Some(name),
			_ => None,
		}
	}
}

impl fmt::Display for RouteSegment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Literal(value) => f.write_str(value),
			Self::Property(name) => write!(f, "{{{}}}", name),
			Self::Wildcard => f.write_str(WILDCARD_TOKEN),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(RouteSegment::literal("users"), "users", true)]
	#[case(RouteSegment::literal("users"), "posts", false)]
	#[case(RouteSegment::literal("users"), "*", true)]
	#[case(RouteSegment::literal("*"), "anything", true)]
	#[case(RouteSegment::property("id"), "42", true)]
	#[case(RouteSegment::Wildcard, "whatever", true)]
	fn test_segment_accepts(
		#[case] segment: RouteSegment,
		#[case] input: &str,
		#[case] expected: bool,
	) {
		assert_eq!(segment.accepts(input), expected);
	}

	#[rstest]
	fn test_segment_display() {
		assert_eq!(RouteSegment::literal("users").to_string(), "users");
		assert_eq!(RouteSegment::property("id").to_string(), "{id}");
		assert_eq!(RouteSegment::Wildcard.to_string(), "*");
	}

	#[rstest]
	fn test_property_name() {
		assert_eq!(RouteSegment::property("id").property_name(), Some("id"));
		assert_eq!(RouteSegment::literal("id").property_name(), None);
		assert_eq!(RouteSegment::Wildcard.property_name(), None);
	}
}
