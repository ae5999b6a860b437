//! Route declaration errors.

use thiserror::Error;

/// Result type for pattern parsing.
pub type PatternResult<T> = Result<T, PatternError>;

/// Errors raised while turning a route declaration into a [`RoutePattern`](crate::RoutePattern).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum PatternError {
	/// A `{...}` placeholder does not contain a valid property name.
	#[error("invalid property placeholder '{segment}' in route '{route}'")]
	InvalidPlaceholder {
		/// The full route declaration.
		route: String,
		/// The offending segment.
		segment: String,
	},

	/// The same property name is bound twice in one pattern.
	#[error("property '{name}' is bound more than once in route '{route}'")]
	DuplicateProperty {
		/// The full route declaration.
		route: String,
		/// The repeated property name.
		name: String,
	},
}
