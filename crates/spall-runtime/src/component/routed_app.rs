//! The built-in component that renders the router's active page.

use super::{Component, RenderContext};
use crate::renderable::{ComponentRef, Renderable};

/// Markup rendered when no route pattern matches the current route.
pub const NOT_FOUND_MARKUP: &str = "<p>The page you are looking for does not exist</p>";

/// Relative path under which the active page is mounted.
const PAGE_SLOT: &str = "1";

/// Renders whichever page the router selects for the current route.
///
/// Route bindings are forwarded to the page as string properties. When no
/// pattern matches, [`NOT_FOUND_MARKUP`] is rendered instead.
#[derive(Debug, Default)]
pub struct RoutedApp;

impl Component for RoutedApp {
	fn generate_renderables(&self, cx: &RenderContext<'_>) -> anyhow::Result<Vec<Renderable>> {
		let router = cx.router();
		let renderable = match router.active_page() {
			Some((class, bindings)) => {
				tracing::debug!(
					route = %router.current_route(),
					page = class.name(),
					"resolved active page"
				);
				Renderable::component(ComponentRef::new(class, PAGE_SLOT).with_bindings(bindings))
			}
			None => {
				tracing::debug!(route = %router.current_route(), "no route matched");
				Renderable::markup(NOT_FOUND_MARKUP)
			}
		};
		Ok(vec![renderable])
	}
}
