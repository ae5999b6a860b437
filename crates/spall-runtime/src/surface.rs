//! Host render surface abstraction.
//!
//! The renderer never touches a document directly. It replaces the content of
//! a container, finds the container created for a component marker, and asks
//! for nodes by positional child index. Everything else (styling, events,
//! layout) travels inside the markup text.
//!
//! Two hosts ship with the crate:
//!
//! - [`MemorySurface`]: an in-memory document, used for tests and for
//!   rendering to a string outside the browser
//! - `DomSurface`: the browser document through `web-sys` (wasm32 with the
//!   `dom` feature)

use std::fmt;

use crate::component::ElementId;
use crate::error::SurfaceError;

mod memory;
#[cfg(all(target_arch = "wasm32", feature = "dom"))]
mod dom;

pub use memory::MemorySurface;
#[cfg(all(target_arch = "wasm32", feature = "dom"))]
pub use dom::DomSurface;

/// Prefix of the DOM id given to component markers.
pub const MARKER_ID_PREFIX: &str = "__sp";

/// Prefix of the class name given to component markers.
pub const MARKER_CLASS_PREFIX: &str = "_sp";

/// Opaque handle to a container node owned by a [`Surface`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerHandle(u64);

impl ContainerHandle {
	/// Wraps a raw surface-specific node number.
	pub const fn new(raw: u64) -> Self {
		Self(raw)
	}

	/// Returns the raw node number.
	pub const fn raw(self) -> u64 {
		self.0
	}
}

impl fmt::Debug for ContainerHandle {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ContainerHandle({})", self.0)
	}
}

/// Operations the renderer performs on the host document.
pub trait Surface {
	/// The implicit mount container (the document body in a browser).
	fn root(&self) -> ContainerHandle;

	/// Replaces the entire content of `container` with `markup`.
	///
	/// Everything previously inside the container is discarded.
	fn replace_content(&self, container: ContainerHandle, markup: &str) -> Result<(), SurfaceError>;

	/// Finds the node carrying the given marker id.
	fn find_marker(&self, marker_id: &str) -> Option<ContainerHandle>;

	/// Walks positional child indices starting at `base`.
	fn child_at(&self, base: ContainerHandle, indices: &[usize]) -> Option<ContainerHandle>;

	/// Sets the document title.
	fn set_title(&self, title: &str);

	/// Records a navigation in the host history.
	fn push_history(&self, _url: &str) {}
}

/// Returns the DOM id of the marker for a component id.
pub fn marker_id(id: ElementId) -> String {
	format!("{}{}", MARKER_ID_PREFIX, id)
}

/// Returns the inline, zero-size marker emitted in place of a component.
///
/// ```
/// use spall_runtime::surface::marker_markup;
///
/// assert_eq!(
///     marker_markup("Button", 3),
///     r#"<span style="display: contents" class="_spButton" id="__sp3"></span>"#
/// );
/// ```
pub fn marker_markup(name: &str, id: ElementId) -> String {
	format!(
		"<span style=\"display: contents\" class=\"{}{}\" id=\"{}\"></span>",
		MARKER_CLASS_PREFIX,
		name,
		marker_id(id)
	)
}

/// Parses an index path such as `0/4/2` into positional child indices.
///
/// Empty segments are skipped; any non-numeric segment makes the whole path invalid.
pub fn parse_index_path(path: &str) -> Option<Vec<usize>> {
	path.split('/')
		.filter(|segment| !segment.is_empty())
		.map(|segment| segment.parse().ok())
		.collect()
}
