//! Matching route strings against patterns.

use crate::pattern::RoutePattern;
use crate::segment::{ROUTE_SEPARATOR, RouteSegment, WILDCARD_TOKEN};

/// Splits a route string on `/`, dropping empty segments.
///
/// ```
/// use spall_routing::parse_string_route;
///
/// assert_eq!(parse_string_route("/users//42/"), vec!["users", "42"]);
/// assert!(parse_string_route("").is_empty());
/// ```
pub fn parse_string_route(route: &str) -> Vec<String> {
	route
		.split(ROUTE_SEPARATOR)
		.filter(|segment| !segment.is_empty())
		.map(str::to_string)
		.collect()
}

/// Returns whether the route segments match the pattern.
///
/// Lengths must agree. At each position the pattern segment must be a property,
/// a wildcard, or a literal equal to the route segment; a literal `*` on either
/// side matches anything.
pub fn matches<S: AsRef<str>>(route: &[S], pattern: &RoutePattern) -> bool {
	route.len() == pattern.len()
		&& route
			.iter()
			.zip(pattern.segments())
			.all(|(segment, expected)| expected.accepts(segment.as_ref()))
}

/// Collects `(property, value)` pairs for every property segment of the pattern.
///
/// Values are the raw route segments; no conversion is attempted. The caller is
/// expected to have checked [`matches`] first; positions beyond the shorter of
/// the two sequences are ignored.
pub fn extract_bindings<S: AsRef<str>>(
	route: &[S],
	pattern: &RoutePattern,
) -> Vec<(String, String)> {
	route
		.iter()
		.zip(pattern.segments())
		.filter_map(|(segment, expected)| match expected {
			RouteSegment::Property(name) => Some((name.clone(), segment.as_ref().to_string())),
			_ => None,
		})
		.collect()
}

/// Compares two route strings segment by segment, treating `*` as matching anything.
///
/// Used to highlight the active entry of a navigation menu, not for dispatch.
///
/// ```
/// use spall_routing::routes_equal;
///
/// assert!(routes_equal("/docs/intro", "docs/*"));
/// assert!(!routes_equal("docs", "docs/intro"));
/// ```
pub fn routes_equal(route1: &str, route2: &str) -> bool {
	let left = parse_string_route(route1);
	let right = parse_string_route(route2);

	left.len() == right.len()
		&& left
			.iter()
			.zip(&right)
			.all(|(a, b)| a == b || a == WILDCARD_TOKEN || b == WILDCARD_TOKEN)
}
