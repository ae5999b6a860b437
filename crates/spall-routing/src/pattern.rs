//! Route pattern declarations.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PatternError, PatternResult};
use crate::matching;
use crate::segment::{ROUTE_SEPARATOR, RouteSegment, WILDCARD_TOKEN};

/// `{name}` or `${name}`, capturing whatever sits between the braces.
static PLACEHOLDER: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\$?\{([^{}]*)\}$").expect("placeholder regex is valid"));

static PROPERTY_NAME: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("property regex is valid"));

/// An ordered sequence of [`RouteSegment`]s.
///
/// The empty pattern matches the empty route (the home page).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RoutePattern {
	segments: Vec<RouteSegment>,
}

impl RoutePattern {
	/// Creates a pattern from segments.
	pub fn new(segments: Vec<RouteSegment>) -> Self {
		Self { segments }
	}

	/// Creates the empty pattern.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Parses a route declaration such as `users/{id}/posts/*`.
	///
	/// Pieces are separated by `/` and blank pieces are dropped. `{name}` and
	/// `${name}` declare properties, `*` declares a wildcard, everything else
	/// is literal.
	///
	/// # Errors
	///
	/// Returns [`PatternError::InvalidPlaceholder`] for malformed placeholders and
	/// [`PatternError::DuplicateProperty`] when a name is bound twice.
	///
	/// # Example
	///
	/// ```
	/// use spall_routing::{RoutePattern, RouteSegment};
	///
	/// let pattern = RoutePattern::parse("/users/${id}/").unwrap();
	/// assert_eq!(
	///     pattern.segments(),
	///     &[RouteSegment::literal("users"), RouteSegment::property("id")]
	/// );
	/// ```
	pub fn parse(route: &str) -> PatternResult<Self> {
		let mut segments = Vec::new();
		let mut seen = HashSet::new();

		for piece in route.split(ROUTE_SEPARATOR) {
			if piece.trim().is_empty() {
				continue;
			}

			if piece == WILDCARD_TOKEN {
				segments.push(RouteSegment::Wildcard);
				continue;
			}

			if let Some(captures) = PLACEHOLDER.captures(piece) {
				let name = captures[1].trim();
				if !PROPERTY_NAME.is_match(name) {
					return Err(PatternError::InvalidPlaceholder {
						route: route.to_string(),
						segment: piece.to_string(),
					});
				}
				if !seen.insert(name.to_string()) {
					return Err(PatternError::DuplicateProperty {
						route: route.to_string(),
						name: name.to_string(),
					});
				}
				segments.push(RouteSegment::property(name));
				continue;
			}

			if piece.contains(['{', '}']) {
				return Err(PatternError::InvalidPlaceholder {
					route: route.to_string(),
					segment: piece.to_string(),
				});
			}

			segments.push(RouteSegment::literal(piece));
		}

		Ok(Self { segments })
	}

	/// Returns the segments of this pattern.
	pub fn segments(&self) -> &[RouteSegment] {
		&self.segments
	}

	/// Returns the number of segments.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// Returns whether this is the empty pattern.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// Returns the property names bound by this pattern, in order.
	pub fn property_names(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(RouteSegment::property_name)
	}

	/// Returns whether the given route string matches this pattern.
	pub fn matches_str(&self, route: &str) -> bool {
		matching::matches(&matching::parse_string_route(route), self)
	}
}

impl From<Vec<RouteSegment>> for RoutePattern {
	fn from(segments: Vec<RouteSegment>) -> Self {
		Self::new(segments)
	}
}

impl fmt::Display for RoutePattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, segment) in self.segments.iter().enumerate() {
			if i > 0 {
				write!(f, "{}", ROUTE_SEPARATOR)?;
			}
			write!(f, "{}", segment)?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_parse_empty_route() {
		assert!(RoutePattern::parse("").unwrap().is_empty());
		assert!(RoutePattern::parse("/").unwrap().is_empty());
		assert!(RoutePattern::parse("//  /").unwrap().is_empty());
	}

	#[rstest]
	fn test_parse_mixed_segments() {
		let pattern = RoutePattern::parse("users/{id}/*/edit").unwrap();
		assert_eq!(
			pattern.segments(),
			&[
				RouteSegment::literal("users"),
				RouteSegment::property("id"),
				RouteSegment::Wildcard,
				RouteSegment::literal("edit"),
			]
		);
	}

	#[rstest]
	#[case("${id}")]
	#[case("{id}")]
	#[case("{ id }")]
	fn test_parse_placeholder_forms(#[case] piece: &str) {
		let pattern = RoutePattern::parse(piece).unwrap();
		assert_eq!(pattern.segments(), &[RouteSegment::property("id")]);
	}

	#[rstest]
	#[case("users/{}")]
	#[case("users/{1id}")]
	#[case("users/{id")]
	#[case("users/id}")]
	#[case("users/a{id}")]
	fn test_parse_invalid_placeholder(#[case] route: &str) {
		let err = RoutePattern::parse(route).unwrap_err();
		assert!(matches!(err, PatternError::InvalidPlaceholder { .. }));
	}

	#[rstest]
	fn test_parse_duplicate_property() {
		let err = RoutePattern::parse("{id}/x/{id}").unwrap_err();
		assert_eq!(
			err,
			PatternError::DuplicateProperty {
				route: "{id}/x/{id}".to_string(),
				name: "id".to_string(),
			}
		);
	}

	#[rstest]
	fn test_display_round_trips_declaration() {
		let pattern = RoutePattern::parse("/users/${id}/*/").unwrap();
		assert_eq!(pattern.to_string(), "users/{id}/*");
		assert_eq!(RoutePattern::parse(&pattern.to_string()).unwrap(), pattern);
	}

	#[rstest]
	fn test_property_names() {
		let pattern = RoutePattern::parse("orgs/{org}/repos/{repo}").unwrap();
		assert_eq!(pattern.property_names().collect::<Vec<_>>(), vec!["org", "repo"]);
	}

	#[rstest]
	fn test_matches_str() {
		let pattern = RoutePattern::parse("users/{id}").unwrap();
		assert!(pattern.matches_str("/users/42/"));
		assert!(!pattern.matches_str("users"));
	}
}
