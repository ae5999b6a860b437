//! Browser render surface over `web-sys`.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Window};

use super::{ContainerHandle, Surface};
use crate::error::SurfaceError;

/// The browser document, with `<body>` as the root container.
///
/// Handles are issued lazily for elements the renderer asks about. Elements
/// that leave the document are forgotten on the next content replacement.
pub struct DomSurface {
	window: Window,
	document: Document,
	elements: RefCell<HashMap<u64, Element>>,
	next: Cell<u64>,
	root: ContainerHandle,
}

impl DomSurface {
	/// Binds to the current window's document.
	///
	/// # Errors
	///
	/// Returns [`SurfaceError::HostUnavailable`] outside a browser main thread
	/// or when the document has no body.
	pub fn new() -> Result<Self, SurfaceError> {
		let window = web_sys::window()
			.ok_or_else(|| SurfaceError::HostUnavailable("no global window".to_string()))?;
		let document = window
			.document()
			.ok_or_else(|| SurfaceError::HostUnavailable("window has no document".to_string()))?;
		let body: Element = document
			.body()
			.ok_or_else(|| SurfaceError::HostUnavailable("document has no body".to_string()))?
			.into();

		let surface = Self {
			window,
			document,
			elements: RefCell::new(HashMap::new()),
			next: Cell::new(0),
			root: ContainerHandle::new(0),
		};
		let root = surface.track(body);
		Ok(Self { root, ..surface })
	}

	/// Returns a handle for an element, issuing one if it is new.
	pub fn track(&self, element: Element) -> ContainerHandle {
		let mut elements = self.elements.borrow_mut();
		if let Some((raw, _)) = elements.iter().find(|(_, known)| **known == element) {
			return ContainerHandle::new(*raw);
		}
		let raw = self.next.get();
		self.next.set(raw + 1);
		elements.insert(raw, element);
		ContainerHandle::new(raw)
	}

	fn element(&self, handle: ContainerHandle) -> Option<Element> {
		self.elements.borrow().get(&handle.raw()).cloned()
	}
}

impl Surface for DomSurface {
	fn root(&self) -> ContainerHandle {
		self.root
	}

	fn replace_content(
		&self,
		container: ContainerHandle,
		markup: &str,
	) -> Result<(), SurfaceError> {
		let element = self
			.element(container)
			.ok_or(SurfaceError::UnknownContainer(container))?;
		element.set_inner_html(markup);

		let root = self.root.raw();
		self.elements
			.borrow_mut()
			.retain(|raw, element| *raw == root || element.is_connected());
		Ok(())
	}

	fn find_marker(&self, marker_id: &str) -> Option<ContainerHandle> {
		self.document
			.get_element_by_id(marker_id)
			.map(|element| self.track(element))
	}

	fn child_at(&self, base: ContainerHandle, indices: &[usize]) -> Option<ContainerHandle> {
		let mut current = self.element(base)?;
		for index in indices {
			let index = u32::try_from(*index).ok()?;
			current = current.children().item(index)?;
		}
		Some(self.track(current))
	}

	fn set_title(&self, title: &str) {
		self.document.set_title(title);
	}

	fn push_history(&self, url: &str) {
		let pushed = self
			.window
			.history()
			.and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(url)));
		if let Err(err) = pushed {
			tracing::warn!(url, error = ?err, "failed to push history state");
		}
	}
}
