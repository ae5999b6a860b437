//! In-memory render surface.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{ContainerHandle, MARKER_CLASS_PREFIX, MARKER_ID_PREFIX, Surface};
use crate::error::SurfaceError;

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
	let pattern = format!(
		r#"<span style="display: contents" class="{}[^"]*" id="({}-?\d+)"></span>"#,
		regex::escape(MARKER_CLASS_PREFIX),
		regex::escape(MARKER_ID_PREFIX)
	);
	Regex::new(&pattern).expect("marker regex is valid")
});

const MARKER_CLOSE: &str = "</span>";

#[derive(Debug, Default)]
struct Node {
	content: String,
	marker: Option<String>,
	children: Vec<u64>,
}

#[derive(Debug)]
struct Document {
	nodes: HashMap<u64, Node>,
	next: u64,
	title: String,
	history: Vec<String>,
}

impl Document {
	fn node(&self, handle: ContainerHandle) -> Result<&Node, SurfaceError> {
		self.nodes
			.get(&handle.raw())
			.ok_or(SurfaceError::UnknownContainer(handle))
	}

	fn insert(&mut self, node: Node) -> u64 {
		let raw = self.next;
		self.next += 1;
		self.nodes.insert(raw, node);
		raw
	}

	fn remove_children(&mut self, raw: u64) {
		let children = match self.nodes.get_mut(&raw) {
			Some(node) => std::mem::take(&mut node.children),
			None => return,
		};
		for child in children {
			self.remove_children(child);
			self.nodes.remove(&child);
		}
	}

	fn serialize(&self, raw: u64, out: &mut String) {
		let Some(node) = self.nodes.get(&raw) else {
			return;
		};
		let by_marker: HashMap<&str, u64> = node
			.children
			.iter()
			.filter_map(|child| {
				let marker = self.nodes.get(child)?.marker.as_deref()?;
				Some((marker, *child))
			})
			.collect();

		let html = MARKER.replace_all(&node.content, |caps: &Captures<'_>| {
			let whole = &caps[0];
			let open = &whole[..whole.len() - MARKER_CLOSE.len()];
			let mut inner = String::new();
			if let Some(child) = by_marker.get(&caps[1]) {
				self.serialize(*child, &mut inner);
			}
			format!("{}{}{}", open, inner, MARKER_CLOSE)
		});
		out.push_str(&html);
	}
}

/// A document held entirely in memory.
///
/// Installing markup scans it for component markers and creates one child
/// container per marker, in document order. Positional lookups walk those
/// container children.
///
/// ```
/// use spall_runtime::surface::{MemorySurface, Surface, marker_markup};
///
/// let surface = MemorySurface::new();
/// let root = surface.root();
/// surface.replace_content(root, &format!("<main>{}</main>", marker_markup("Nav", 1))).unwrap();
///
/// let nav = surface.find_marker("__sp1").unwrap();
/// surface.replace_content(nav, "<nav></nav>").unwrap();
///
/// assert_eq!(
///     surface.to_html(),
///     concat!(
///         "<main>",
///         r#"<span style="display: contents" class="_spNav" id="__sp1"><nav></nav></span>"#,
///         "</main>",
///     )
/// );
/// ```
#[derive(Debug)]
pub struct MemorySurface {
	document: RefCell<Document>,
	root: ContainerHandle,
}

impl MemorySurface {
	/// Creates an empty document with a root container.
	pub fn new() -> Self {
		let mut document = Document {
			nodes: HashMap::new(),
			next: 0,
			title: String::new(),
			history: Vec::new(),
		};
		let root = ContainerHandle::new(document.insert(Node::default()));
		Self {
			document: RefCell::new(document),
			root,
		}
	}

	/// Creates a detached container, usable as a custom mount point.
	pub fn create_container(&self) -> ContainerHandle {
		ContainerHandle::new(self.document.borrow_mut().insert(Node::default()))
	}

	/// Returns the raw markup installed in a container.
	pub fn content_of(&self, container: ContainerHandle) -> Option<String> {
		self.document
			.borrow()
			.node(container)
			.ok()
			.map(|node| node.content.clone())
	}

	/// Serializes the root container with every child inlined into its marker.
	pub fn to_html(&self) -> String {
		self.container_html(self.root).unwrap_or_default()
	}

	/// Serializes one container with its children inlined.
	pub fn container_html(&self, container: ContainerHandle) -> Option<String> {
		let document = self.document.borrow();
		document.node(container).ok()?;
		let mut out = String::new();
		document.serialize(container.raw(), &mut out);
		Some(out)
	}

	/// Returns the marker ids of every live container, in creation order.
	pub fn marker_ids(&self) -> Vec<String> {
		let document = self.document.borrow();
		let mut markers: Vec<(u64, String)> = document
			.nodes
			.iter()
			.filter_map(|(raw, node)| node.marker.clone().map(|marker| (*raw, marker)))
			.collect();
		markers.sort();
		markers.into_iter().map(|(_, marker)| marker).collect()
	}

	/// Returns the document title.
	pub fn title(&self) -> String {
		self.document.borrow().title.clone()
	}

	/// Returns every URL pushed to the history, oldest first.
	pub fn history(&self) -> Vec<String> {
		self.document.borrow().history.clone()
	}
}

impl Default for MemorySurface {
	fn default() -> Self {
		Self::new()
	}
}

impl Surface for MemorySurface {
	fn root(&self) -> ContainerHandle {
		self.root
	}

	fn replace_content(
		&self,
		container: ContainerHandle,
		markup: &str,
	) -> Result<(), SurfaceError> {
		let mut document = self.document.borrow_mut();
		document.node(container)?;
		document.remove_children(container.raw());

		let children: Vec<u64> = MARKER
			.captures_iter(markup)
			.map(|caps| {
				document.insert(Node {
					marker: Some(caps[1].to_string()),
					..Node::default()
				})
			})
			.collect();

		let node = document
			.nodes
			.get_mut(&container.raw())
			.ok_or(SurfaceError::UnknownContainer(container))?;
		node.content = markup.to_string();
		node.children = children;
		Ok(())
	}

	fn find_marker(&self, marker_id: &str) -> Option<ContainerHandle> {
		self.document
			.borrow()
			.nodes
			.iter()
			.find(|(_, node)| node.marker.as_deref() == Some(marker_id))
			.map(|(raw, _)| ContainerHandle::new(*raw))
	}

	fn child_at(&self, base: ContainerHandle, indices: &[usize]) -> Option<ContainerHandle> {
		let document = self.document.borrow();
		let mut current = base.raw();
		for index in indices {
			current = *document.nodes.get(&current)?.children.get(*index)?;
		}
		Some(ContainerHandle::new(current))
	}

	fn set_title(&self, title: &str) {
		self.document.borrow_mut().title = title.to_string();
	}

	fn push_history(&self, url: &str) {
		self.document.borrow_mut().history.push(url.to_string());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::surface::marker_markup;
	use rstest::{fixture, rstest};

	#[fixture]
	fn surface() -> MemorySurface {
		let surface = MemorySurface::new();
		let markup = format!("<ul>{}{}</ul>", marker_markup("Item", 1), marker_markup("Item", 2));
		surface.replace_content(surface.root(), &markup).unwrap();
		surface
	}

	#[rstest]
	fn test_markers_become_children(surface: MemorySurface) {
		assert_eq!(surface.marker_ids(), vec!["__sp1", "__sp2"]);
		assert_eq!(surface.child_at(surface.root(), &[1]), surface.find_marker("__sp2"));
		assert_eq!(surface.child_at(surface.root(), &[2]), None);
		assert_eq!(surface.child_at(surface.root(), &[]), Some(surface.root()));
	}

	#[rstest]
	fn test_replace_discards_previous_subtree(surface: MemorySurface) {
		let first = surface.find_marker("__sp1").unwrap();
		surface.replace_content(first, &marker_markup("Leaf", 3)).unwrap();
		assert!(surface.find_marker("__sp3").is_some());

		surface.replace_content(surface.root(), "<p>gone</p>").unwrap();

		assert!(surface.marker_ids().is_empty());
		assert!(surface.find_marker("__sp3").is_none());
		assert_eq!(
			surface.replace_content(first, "x"),
			Err(SurfaceError::UnknownContainer(first))
		);
		assert_eq!(surface.to_html(), "<p>gone</p>");
	}

	#[rstest]
	fn test_nested_serialization(surface: MemorySurface) {
		let second = surface.find_marker("__sp2").unwrap();
		surface.replace_content(second, "<li>two</li>").unwrap();

		let html = surface.to_html();
		assert!(html.contains(r#"id="__sp2"><li>two</li></span>"#));
		assert!(html.contains(r#"id="__sp1"></span>"#));
		assert_eq!(surface.content_of(second).as_deref(), Some("<li>two</li>"));
	}

	#[rstest]
	fn test_detached_container() {
		let surface = MemorySurface::new();
		let mount = surface.create_container();
		surface.replace_content(mount, "<p>side</p>").unwrap();

		assert_eq!(surface.to_html(), "");
		assert_eq!(surface.container_html(mount).as_deref(), Some("<p>side</p>"));
	}

	#[rstest]
	fn test_title_and_history() {
		let surface = MemorySurface::new();
		surface.set_title("Home");
		surface.push_history("/users/7");
		assert_eq!(surface.title(), "Home");
		assert_eq!(surface.history(), vec!["/users/7"]);
	}
}
