//! Application shell.
//!
//! An [`App`] ties one surface, one renderer and one router together. Each
//! application owns its own route table and registry, so several can live in
//! the same process (and the same test binary) without sharing state.

use std::cell::Cell;
use std::rc::Rc;

use crate::component::ComponentClass;
use crate::error::RenderResult;
use crate::renderer::Renderer;
use crate::router::Router;
use crate::surface::{ContainerHandle, Surface};

/// Options accepted by [`App::new`].
#[derive(Debug, Default)]
pub struct AppOptions {
	mount_surface: Option<ContainerHandle>,
	renderer: Option<Renderer>,
	router: Option<Router>,
	disable_auto_run: bool,
}

impl AppOptions {
	/// Default options: mount on the surface root, render immediately.
	pub fn new() -> Self {
		Self::default()
	}

	/// Mounts the application in `container` instead of the surface root.
	pub fn mount_surface(mut self, container: ContainerHandle) -> Self {
		self.mount_surface = Some(container);
		self
	}

	/// Uses a preconfigured renderer.
	pub fn renderer(mut self, renderer: Renderer) -> Self {
		self.renderer = Some(renderer);
		self
	}

	/// Uses a preconfigured router.
	pub fn router(mut self, router: Router) -> Self {
		self.router = Some(router);
		self
	}

	/// Skips the initial render performed by [`App::new`].
	pub fn disable_auto_run(mut self, disable: bool) -> Self {
		self.disable_auto_run = disable;
		self
	}
}

/// A running application.
pub struct App {
	surface: Rc<dyn Surface>,
	mount: ContainerHandle,
	root_class: ComponentClass,
	renderer: Renderer,
	router: Router,
	running: Cell<bool>,
}

impl App {
	/// Creates an application and, unless disabled, renders it once.
	///
	/// # Errors
	///
	/// Propagates the error of the initial [`run`](Self::run).
	///
	/// # Example
	///
	/// ```
	/// use std::rc::Rc;
	///
	/// use spall_runtime::prelude::*;
	///
	/// #[derive(Default)]
	/// struct Hello;
	///
	/// impl Component for Hello {
	///     fn generate_renderables(
	///         &self,
	///         _cx: &RenderContext<'_>,
	///     ) -> anyhow::Result<Vec<Renderable>> {
	///         Ok(vec![Renderable::markup("<h1>Hello</h1>")])
	///     }
	/// }
	///
	/// let surface = Rc::new(MemorySurface::new());
	/// let app = App::new(
	///     surface.clone(),
	///     ComponentClass::of::<Hello>("Hello"),
	///     AppOptions::new(),
	/// )
	/// .unwrap();
	///
	/// assert!(app.running());
	/// assert_eq!(surface.to_html(), "<h1>Hello</h1>");
	/// ```
	pub fn new(
		surface: Rc<dyn Surface>,
		root_class: ComponentClass,
		options: AppOptions,
	) -> RenderResult<Rc<Self>> {
		let AppOptions {
			mount_surface,
			renderer,
			router,
			disable_auto_run,
		} = options;
		let mount = mount_surface.unwrap_or_else(|| surface.root());
		let renderer = renderer.unwrap_or_default();
		let router = router.unwrap_or_default();

		let app = Rc::new_cyclic(|weak| {
			renderer.attach(weak.clone());
			router.attach(weak.clone());
			Self {
				surface,
				mount,
				root_class,
				renderer,
				router,
				running: Cell::new(false),
			}
		});
		tracing::debug!(
			root = root_class.name(),
			routes = app.router.routes().len(),
			"application created"
		);

		if !disable_auto_run {
			app.run()?;
		}
		Ok(app)
	}

	/// Performs a full page render.
	pub fn run(&self) -> RenderResult<()> {
		self.running.set(true);
		self.renderer.render_page()
	}

	/// Returns whether [`run`](Self::run) has been called.
	pub fn running(&self) -> bool {
		self.running.get()
	}

	/// Returns the host surface.
	pub fn surface(&self) -> &dyn Surface {
		self.surface.as_ref()
	}

	/// Returns the container the root component renders into.
	pub fn mount(&self) -> ContainerHandle {
		self.mount
	}

	/// Returns the root component class.
	pub fn root_class(&self) -> ComponentClass {
		self.root_class
	}

	/// Returns the renderer.
	pub fn renderer(&self) -> &Renderer {
		&self.renderer
	}

	/// Returns the router.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// Shorthand for [`Router::navigate_to`].
	pub fn navigate_to(&self, route: &str) -> RenderResult<()> {
		self.router.navigate_to(route)
	}
}

impl std::fmt::Debug for App {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("App")
			.field("mount", &self.mount)
			.field("root_class", &self.root_class)
			.field("renderer", &self.renderer)
			.field("router", &self.router)
			.field("running", &self.running.get())
			.finish_non_exhaustive()
	}
}
