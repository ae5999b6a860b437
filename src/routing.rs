//! Route patterns and first-match-wins route tables.
//!
//! This module provides access to spall-routing, which decides which target a
//! route string selects and which segments bind to which properties. It has no
//! knowledge of components and can be used on its own.
//!
//! # Examples
//!
//! ```rust
//! use spall::routing::{RoutePattern, routes_equal};
//!
//! let pattern = RoutePattern::parse("users/{id}").unwrap();
//! assert!(pattern.matches_str("/users/42"));
//! assert!(routes_equal("docs/*", "docs/intro"));
//! ```

pub use spall_routing::*;
