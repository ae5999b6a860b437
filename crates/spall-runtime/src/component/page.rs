//! Routed pages.

use std::any::Any;

use super::{Component, PropValue, RenderContext, ignore_property};
use crate::renderable::Renderable;

/// A component that is selected by the router and owns the document title.
///
/// Implement this instead of [`Component`] and register the type with
/// [`ComponentClass::page`](super::ComponentClass::page).
pub trait PageComponent: Any {
	/// The title shown while this page is active. Empty means the router's default.
	fn title(&self) -> String {
		String::new()
	}

	/// Describes what the page renders.
	fn generate_page_renderables(&self, cx: &RenderContext<'_>) -> anyhow::Result<Vec<Renderable>>;

	/// See [`Component::on_initialized`].
	fn on_initialized(&mut self, _cx: &RenderContext<'_>) -> anyhow::Result<()> {
		Ok(())
	}

	/// See [`Component::on_render`].
	fn on_render(&mut self, _cx: &RenderContext<'_>) -> anyhow::Result<()> {
		Ok(())
	}

	/// See [`Component::set_property`].
	fn set_property(
		&mut self,
		cx: &RenderContext<'_>,
		name: &str,
		_value: PropValue,
	) -> anyhow::Result<()> {
		ignore_property(cx, name);
		Ok(())
	}
}

/// Wraps a [`PageComponent`], setting the document title before each render.
#[derive(Debug, Default)]
pub struct Page<P> {
	inner: P,
}

impl<P: PageComponent> Page<P> {
	/// Wraps a page.
	pub fn new(inner: P) -> Self {
		Self { inner }
	}

	/// Returns the wrapped page.
	pub fn inner(&self) -> &P {
		&self.inner
	}

	/// Returns the wrapped page mutably.
	pub fn inner_mut(&mut self) -> &mut P {
		&mut self.inner
	}

	/// Returns the title that will be applied: the page's own, else the router default.
	pub fn resolved_title(&self, cx: &RenderContext<'_>) -> String {
		let title = self.inner.title();
		if title.is_empty() {
			cx.router().default_title()
		} else {
			title
		}
	}
}

impl<P: PageComponent> Component for Page<P> {
	fn generate_renderables(&self, cx: &RenderContext<'_>) -> anyhow::Result<Vec<Renderable>> {
		cx.set_document_title(&self.resolved_title(cx));
		self.inner.generate_page_renderables(cx)
	}

	fn on_initialized(&mut self, cx: &RenderContext<'_>) -> anyhow::Result<()> {
		self.inner.on_initialized(cx)
	}

	fn on_render(&mut self, cx: &RenderContext<'_>) -> anyhow::Result<()> {
		self.inner.on_render(cx)
	}

	fn set_property(
		&mut self,
		cx: &RenderContext<'_>,
		name: &str,
		value: PropValue,
	) -> anyhow::Result<()> {
		self.inner.set_property(cx, name, value)
	}

	fn as_target(&self) -> &dyn Any {
		&self.inner
	}

	fn as_target_mut(&mut self) -> &mut dyn Any {
		&mut self.inner
	}
}
