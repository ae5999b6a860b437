//! Route table integration tests
//!
//! Exercises declaration parsing, first-match-wins lookup and binding
//! extraction through the public API only.

use proptest::prelude::*;
use rstest::*;
use spall_routing::{
	PatternError, RoutePattern, RouteSegment, RouteTable, extract_bindings, matches,
	parse_string_route, routes_equal,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
	Home,
	UserList,
	UserDetail,
	UserPosts,
	Docs,
}

#[fixture]
fn site() -> RouteTable<Page> {
	let mut table = RouteTable::new();
	table
		.register_str("", Page::Home)
		.unwrap()
		.register_str("users", Page::UserList)
		.unwrap()
		.register_str("users/{id}", Page::UserDetail)
		.unwrap()
		.register_str("users/${id}/posts/{post}", Page::UserPosts)
		.unwrap()
		.register_str("docs/*", Page::Docs)
		.unwrap();
	table
}

// ============================================================================
// Lookup
// ============================================================================

#[rstest]
#[case("", Some(Page::Home))]
#[case("/", Some(Page::Home))]
#[case("users", Some(Page::UserList))]
#[case("/users/", Some(Page::UserList))]
#[case("users/42", Some(Page::UserDetail))]
#[case("users/42/posts/9", Some(Page::UserPosts))]
#[case("docs/intro", Some(Page::Docs))]
#[case("docs", None)]
#[case("users/42/edit", None)]
#[case("admin", None)]
fn test_lookup(site: RouteTable<Page>, #[case] route: &str, #[case] expected: Option<Page>) {
	assert_eq!(site.find(route).map(|found| *found.target()), expected);
}

#[rstest]
fn test_bindings_in_pattern_order(site: RouteTable<Page>) {
	let found = site.find("users/alice/posts/hello").unwrap();
	assert_eq!(found.index(), 3);
	assert_eq!(
		found.bindings(),
		&[
			("id".to_string(), "alice".to_string()),
			("post".to_string(), "hello".to_string()),
		]
	);
}

#[rstest]
fn test_wildcard_binds_nothing(site: RouteTable<Page>) {
	assert!(site.find("docs/anything").unwrap().bindings().is_empty());
}

#[rstest]
fn test_first_match_wins_over_specificity() {
	let table = RouteTable::new()
		.with(
			RoutePattern::new(vec![RouteSegment::literal("a"), RouteSegment::Wildcard]),
			"first",
		)
		.with(
			RoutePattern::new(vec![RouteSegment::literal("a"), RouteSegment::literal("b")]),
			"second",
		);

	let found = table.find("a/b").unwrap();
	assert_eq!(*found.target(), "first");
	assert_eq!(found.entry().pattern().to_string(), "a/*");
}

// ============================================================================
// Free functions
// ============================================================================

#[rstest]
fn test_users_pattern() {
	let pattern =
		RoutePattern::new(vec![RouteSegment::literal("users"), RouteSegment::property("id")]);

	let route = parse_string_route("users/42");
	assert!(matches(&route, &pattern));
	assert_eq!(extract_bindings(&route, &pattern), vec![("id".to_string(), "42".to_string())]);

	assert!(!matches(&parse_string_route("users"), &pattern));
	assert!(!matches(&parse_string_route("users/42/edit"), &pattern));
}

#[rstest]
#[case("nav/*", "nav/home", true)]
#[case("nav/home", "nav/about", false)]
#[case("*", "", false)]
fn test_menu_highlighting(#[case] menu: &str, #[case] current: &str, #[case] active: bool) {
	assert_eq!(routes_equal(menu, current), active);
}

#[rstest]
fn test_invalid_declarations_are_rejected() {
	let mut table: RouteTable<Page> = RouteTable::new();
	assert!(matches!(
		table.register_str("users/{}", Page::UserDetail),
		Err(PatternError::InvalidPlaceholder { .. })
	));
	assert!(matches!(
		table.register_str("{a}/{a}", Page::UserDetail),
		Err(PatternError::DuplicateProperty { .. })
	));
	assert!(table.is_empty());
}

// ============================================================================
// Property-based
// ============================================================================

proptest! {
	#[test]
	fn prop_literal_routes_find_themselves(
		segments in proptest::collection::vec("[a-z]{1,6}", 0..5)
	) {
		let route = segments.join("/");
		let table = RouteTable::new().with(RoutePattern::parse(&route).unwrap(), ());
		let padded = format!("/{}/", route);
		prop_assert!(table.find(&route).is_some());
		prop_assert!(table.find(&padded).is_some());
	}

	#[test]
	fn prop_routes_equal_is_symmetric(a in "[ab*/]{0,8}", b in "[ab*/]{0,8}") {
		prop_assert_eq!(routes_equal(&a, &b), routes_equal(&b, &a));
	}

	#[test]
	fn prop_parse_string_route_has_no_empty_segments(route in "[a-z/]{0,16}") {
		prop_assert!(parse_string_route(&route).iter().all(|segment| !segment.is_empty()));
	}
}
