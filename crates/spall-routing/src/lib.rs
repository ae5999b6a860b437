//! Spall Routing - segment patterns for page selection
//!
//! This crate decides which page a route string selects. It knows nothing about
//! components or rendering: a [`RouteTable`] maps ordered [`RoutePattern`]s onto an
//! arbitrary target type, and the first pattern that matches wins.
//!
//! ## Route patterns
//!
//! A pattern is an ordered list of [`RouteSegment`]s:
//!
//! - [`RouteSegment::Literal`] matches one route segment with the same text
//! - [`RouteSegment::Property`] matches any segment and binds it to a property name
//! - [`RouteSegment::Wildcard`] matches any segment without binding it
//!
//! A literal equal to [`WILDCARD_TOKEN`] on either side of a comparison matches anything.
//!
//! ## Example
//!
//! ```
//! use spall_routing::RouteTable;
//!
//! let mut table = RouteTable::new();
//! table.register_str("", "index").unwrap();
//! table.register_str("users/{id}", "user").unwrap();
//!
//! let found = table.find("users/42").unwrap();
//! assert_eq!(*found.target(), "user");
//! assert_eq!(found.bindings(), &[("id".to_string(), "42".to_string())]);
//!
//! assert!(table.find("users/42/edit").is_none());
//! ```

#![warn(missing_docs)]

mod error;
mod matching;
mod pattern;
mod segment;
mod table;

pub use error::{PatternError, PatternResult};
pub use matching::{extract_bindings, matches, parse_string_route, routes_equal};
pub use pattern::RoutePattern;
pub use segment::{ROUTE_SEPARATOR, RouteSegment, WILDCARD_TOKEN};
pub use table::{RouteEntry, RouteMatch, RouteTable};
