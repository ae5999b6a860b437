//! Route selection and navigation.
//!
//! The router owns an ordered [`RouteTable`] of page classes and the current
//! route string. Matching is delegated to `spall_routing`; this module adds the
//! component-facing pieces: bindings as lazy property values, the default page
//! title, and navigation, which always ends in a full page render.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use spall_routing::{RouteMatch, RoutePattern, RouteTable};

use crate::app::App;
use crate::component::{ComponentClass, PropValue};
use crate::error::{RenderError, RenderResult};
use crate::renderable::Bindings;

/// Maps route strings onto page classes.
///
/// # Example
///
/// ```
/// use spall_routing::RouteTable;
/// use spall_runtime::prelude::*;
///
/// #[derive(Default)]
/// struct Home;
///
/// impl PageComponent for Home {
///     fn generate_page_renderables(
///         &self,
///         _cx: &RenderContext<'_>,
///     ) -> anyhow::Result<Vec<Renderable>> {
///         Ok(vec![Renderable::markup("<h1>Home</h1>")])
///     }
/// }
///
/// let mut routes = RouteTable::new();
/// routes.register_str("", ComponentClass::page::<Home>("Home")).unwrap();
///
/// let router = Router::new(routes);
/// assert_eq!(router.find_route("/").unwrap().target().name(), "Home");
/// assert!(router.find_route("missing").is_none());
/// ```
pub struct Router {
	app: RefCell<Weak<App>>,
	routes: RouteTable<ComponentClass>,
	current_route: RefCell<String>,
	default_title: RefCell<String>,
}

impl Default for Router {
	fn default() -> Self {
		Self::new(RouteTable::new())
	}
}

impl Router {
	/// Creates a router over an ordered route table, starting at the empty route.
	pub fn new(routes: RouteTable<ComponentClass>) -> Self {
		Self {
			app: RefCell::new(Weak::new()),
			routes,
			current_route: RefCell::new(String::new()),
			default_title: RefCell::new(String::new()),
		}
	}

	/// Builder-style variant of [`set_default_title`](Self::set_default_title).
	pub fn with_default_title(self, title: impl Into<String>) -> Self {
		self.set_default_title(title);
		self
	}

	pub(crate) fn attach(&self, app: Weak<App>) {
		*self.app.borrow_mut() = app;
	}

	fn app(&self) -> RenderResult<Rc<App>> {
		self.app
			.borrow()
			.upgrade()
			.ok_or_else(|| RenderError::not_attached("router"))
	}

	/// Returns the route table.
	pub fn routes(&self) -> &RouteTable<ComponentClass> {
		&self.routes
	}

	/// Returns the current route string.
	pub fn current_route(&self) -> String {
		self.current_route.borrow().clone()
	}

	/// Sets the title used by pages that declare none.
	pub fn set_default_title(&self, title: impl Into<String>) {
		*self.default_title.borrow_mut() = title.into();
	}

	/// Returns the title used by pages that declare none.
	pub fn default_title(&self) -> String {
		self.default_title.borrow().clone()
	}

	/// Splits a route string into its non-empty segments.
	pub fn parse_string_route(&self, route: &str) -> Vec<String> {
		spall_routing::parse_string_route(route)
	}

	/// Returns whether route segments match a pattern.
	pub fn matches<S: AsRef<str>>(&self, route: &[S], pattern: &RoutePattern) -> bool {
		spall_routing::matches(route, pattern)
	}

	/// Finds the first registered pattern matching `route`.
	pub fn find_route(&self, route: &str) -> Option<RouteMatch<'_, ComponentClass>> {
		self.routes.find(route)
	}

	/// Binds each property segment of `pattern` to the matching route segment.
	///
	/// Values are always strings.
	pub fn extract_bindings<S: AsRef<str>>(&self, route: &[S], pattern: &RoutePattern) -> Bindings {
		to_bindings(spall_routing::extract_bindings(route, pattern))
	}

	/// Compares two route strings, treating `*` as matching any segment.
	pub fn routes_equal(&self, route1: &str, route2: &str) -> bool {
		spall_routing::routes_equal(route1, route2)
	}

	/// Returns whether `route` designates the same page as the current route.
	pub fn is_active(&self, route: &str) -> bool {
		self.routes_equal(&self.current_route.borrow(), route)
	}

	/// Resolves the page for the current route together with its bindings.
	pub fn active_page(&self) -> Option<(ComponentClass, Bindings)> {
		let route = self.current_route();
		self.find_route(&route)
			.map(|found| (*found.target(), to_bindings(found.into_bindings())))
	}

	/// Makes `route` current, records it in the host history and renders the page again.
	///
	/// # Errors
	///
	/// [`RenderError::Configuration`] when the router has no application and
	/// [`RenderError::RenderGuard`] while a render is running; in both cases
	/// the current route is left unchanged.
	pub fn navigate_to(&self, route: &str) -> RenderResult<()> {
		let app = self.app()?;
		if app.renderer().is_rendering() {
			return Err(RenderError::RenderGuard);
		}

		tracing::debug!(from = %self.current_route(), to = route, "navigating");
		*self.current_route.borrow_mut() = route.to_string();
		app.surface()
			.push_history(&format!("/{}", route.trim_start_matches('/')));
		app.renderer().render_page()
	}
}

fn to_bindings(pairs: Vec<(String, String)>) -> Bindings {
	let mut bindings = Bindings::new();
	for (name, value) in pairs {
		bindings.insert(name, move || PropValue::String(value.clone()));
	}
	bindings
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("routes", &self.routes)
			.field("current_route", &self.current_route.borrow())
			.field("default_title", &self.default_title.borrow())
			.finish_non_exhaustive()
	}
}
