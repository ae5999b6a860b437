//! The recursive render engine.
//!
//! Rendering a component happens in two phases inside one call. First the
//! component's renderables are turned into a single markup buffer; every child
//! component reference is instantiated, registered and replaced by an inline
//! marker. The buffer then replaces the container's content in one operation.
//! In the second phase each child is located through its marker, initialized,
//! given its bound properties and rendered recursively. The component's
//! `on_render` hook runs last, after the whole subtree.
//!
//! Only [`Renderer::render_page`], [`Renderer::render_element`] and
//! [`Renderer::needs_render`] are entry points. Each checks the render guard
//! first, so a request arriving while a render is running is rejected without
//! touching the registry.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use crate::app::App;
use crate::component::{ComponentInstance, ComponentKind, ElementId, ROOT_PARENT_ID, RenderContext};
use crate::error::{RenderError, RenderResult, error_chain};
use crate::renderable::{Bindings, Renderable};
use crate::surface::{ContainerHandle, marker_id, marker_markup, parse_index_path};

mod logger;
mod registry;

pub use logger::{NoopRenderLogger, RenderEvent, RenderLog, RenderLogger, TracingRenderLogger};
use registry::Registry;

/// Separator between the path segments of nested components.
pub const PATH_SEPARATOR: char = '/';

fn child_path(parent: &str, relative_path: &str) -> String {
	format!("{}{}{}", parent, PATH_SEPARATOR, relative_path)
}

/// Clears the render flag when the outermost render call returns.
#[derive(Debug)]
struct RenderGuard<'a> {
	flag: &'a Cell<bool>,
}

impl Drop for RenderGuard<'_> {
	fn drop(&mut self) {
		self.flag.set(false);
	}
}

/// A child created in phase one, waiting for its container.
struct PendingChild {
	marker: String,
	instance: Rc<ComponentInstance>,
	bindings: Bindings,
}

/// Drives component rendering and owns the identity registry.
pub struct Renderer {
	app: RefCell<Weak<App>>,
	logger: Box<dyn RenderLogger>,
	next_id: Cell<ElementId>,
	rendering: Cell<bool>,
	registry: RefCell<Registry>,
	last_error: RefCell<Option<String>>,
}

impl Default for Renderer {
	fn default() -> Self {
		Self::new()
	}
}

impl Renderer {
	/// Creates a renderer that logs nothing.
	pub fn new() -> Self {
		Self::with_logger(NoopRenderLogger)
	}

	/// Creates a renderer reporting to `logger`.
	pub fn with_logger(logger: impl RenderLogger + 'static) -> Self {
		Self {
			app: RefCell::new(Weak::new()),
			logger: Box::new(logger),
			next_id: Cell::new(0),
			rendering: Cell::new(false),
			registry: RefCell::new(Registry::default()),
			last_error: RefCell::new(None),
		}
	}

	pub(crate) fn attach(&self, app: Weak<App>) {
		*self.app.borrow_mut() = app;
	}

	fn app(&self) -> RenderResult<Rc<App>> {
		self.app
			.borrow()
			.upgrade()
			.ok_or_else(|| RenderError::not_attached("renderer"))
	}

	/// Returns whether a render is running.
	pub fn is_rendering(&self) -> bool {
		self.rendering.get()
	}

	/// Returns the diagnostic of the last failed [`render_page`](Self::render_page), if any.
	pub fn last_error(&self) -> Option<String> {
		self.last_error.borrow().clone()
	}

	/// Returns the number of live components.
	pub fn element_count(&self) -> usize {
		self.registry.borrow().len()
	}

	fn begin_render(&self) -> RenderResult<RenderGuard<'_>> {
		if self.rendering.replace(true) {
			return Err(RenderError::RenderGuard);
		}
		Ok(RenderGuard {
			flag: &self.rendering,
		})
	}

	fn next_id(&self) -> ElementId {
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		id
	}

	/// Renders the application's root component from scratch into the mount surface.
	///
	/// Component and surface failures do not escape: they are logged, kept as
	/// [`last_error`](Self::last_error), and the surface is left as far as the
	/// render got.
	///
	/// # Errors
	///
	/// [`RenderError::RenderGuard`] when a render is running and
	/// [`RenderError::Configuration`] when no application is attached.
	pub fn render_page(&self) -> RenderResult<()> {
		let _guard = self.begin_render()?;
		let app = self.app()?;

		self.registry.borrow_mut().clear();
		*self.last_error.borrow_mut() = None;

		let root_class = app.root_class();
		let root = Rc::new(ComponentInstance::new(
			self.next_id(),
			ROOT_PARENT_ID,
			root_class.name(),
			"",
			ComponentKind::Root,
			root_class.instantiate(),
		));
		let container = app.mount();
		{
			let mut registry = self.registry.borrow_mut();
			registry.register(Rc::clone(&root));
			registry.bind_container(root.id(), container);
		}
		self.logger.log_created_element(root.name(), root.id());

		let rendered = self
			.initialize(&app, &root, &Bindings::new())
			.and_then(|()| self.render_subtree(&app, &root, container));
		if let Err(err) = rendered {
			let message = error_chain(&err);
			tracing::error!(
				component = root.name(),
				error = %message,
				"fatal error while rendering page"
			);
			*self.last_error.borrow_mut() = Some(message);
		}
		Ok(())
	}

	/// Re-renders a live component into `container`, rebinding it there.
	///
	/// # Errors
	///
	/// [`RenderError::RenderGuard`], [`RenderError::UnknownElement`], or the
	/// failure raised while rendering.
	pub fn render_element(&self, id: ElementId, container: ContainerHandle) -> RenderResult<()> {
		let _guard = self.begin_render()?;
		let app = self.app()?;
		let instance = self.get_element_by_id(id)?;
		self.registry.borrow_mut().bind_container(id, container);
		self.render_subtree(&app, &instance, container)
	}

	/// Re-renders a live component in place, keeping its id, path and container.
	///
	/// # Errors
	///
	/// [`RenderError::RenderGuard`], [`RenderError::UnknownElement`], or the
	/// failure raised while rendering.
	pub fn needs_render(&self, id: ElementId) -> RenderResult<()> {
		let _guard = self.begin_render()?;
		let app = self.app()?;
		let instance = self.get_element_by_id(id)?;
		let container = self.get_element_container(id)?;
		tracing::debug!(
			component = instance.name(),
			path = instance.path(),
			"re-rendering in place"
		);
		self.render_subtree(&app, &instance, container)
	}

	/// Calls `on_initialized`, then evaluates and assigns the bound properties.
	fn initialize(
		&self,
		app: &Rc<App>,
		instance: &ComponentInstance,
		bindings: &Bindings,
	) -> RenderResult<()> {
		let cx = RenderContext::new(app, instance);
		instance
			.borrow_mut()?
			.on_initialized(&cx)
			.map_err(|source| RenderError::component(instance, "on_initialized", source))?;

		for (name, binding) in bindings.iter() {
			let value = binding();
			instance
				.borrow_mut()?
				.set_property(&cx, name, value)
				.map_err(|source| RenderError::component(instance, "set_property", source))?;
		}
		Ok(())
	}

	fn render_subtree(
		&self,
		app: &Rc<App>,
		instance: &ComponentInstance,
		container: ContainerHandle,
	) -> RenderResult<()> {
		self.logger.log_start_render(instance.name());
		let cx = RenderContext::new(app, instance);

		let renderables = instance
			.borrow()?
			.generate_renderables(&cx)
			.map_err(|source| RenderError::component(instance, "generate_renderables", source))?;

		let mut child_paths = HashSet::new();
		for renderable in &renderables {
			if let Renderable::Component(reference) = renderable {
				let path = child_path(instance.path(), reference.relative_path());
				if !child_paths.insert(path.clone()) {
					return Err(RenderError::DuplicatePath { path });
				}
			}
		}

		self.registry.borrow_mut().remove_descendants(instance.path());

		let mut markup = String::new();
		let mut pending = Vec::new();
		for renderable in renderables {
			match renderable {
				Renderable::Markup { text } => {
					self.logger.log_add_markup(&text);
					markup.push_str(&text);
				}
				Renderable::Component(reference) => {
					let (name, class, relative_path, bindings) = reference.into_parts();
					let path = child_path(instance.path(), &relative_path);
					let child = Rc::new(ComponentInstance::new(
						self.next_id(),
						instance.id(),
						name,
						path,
						class.kind(),
						class.instantiate(),
					));
					markup.push_str(&marker_markup(child.name(), child.id()));
					self.registry.borrow_mut().register(Rc::clone(&child));
					self.logger.log_created_element(child.name(), child.id());
					pending.push(PendingChild {
						marker: marker_id(child.id()),
						instance: child,
						bindings,
					});
				}
			}
		}

		app.surface().replace_content(container, &markup)?;

		for PendingChild {
			marker,
			instance: child,
			bindings,
		} in pending
		{
			let child_container = app
				.surface()
				.find_marker(&marker)
				.ok_or(RenderError::MarkerNotFound(marker))?;
			self.registry
				.borrow_mut()
				.bind_container(child.id(), child_container);
			self.initialize(app, &child, &bindings)?;
			self.render_subtree(app, &child, child_container)?;
		}

		self.logger.log_finish_render(instance.name());
		instance
			.borrow_mut()?
			.on_render(&cx)
			.map_err(|source| RenderError::component(instance, "on_render", source))
	}

	/// Returns the container a component renders into.
	pub fn get_element_container(&self, id: ElementId) -> RenderResult<ContainerHandle> {
		self.registry
			.borrow()
			.container(id)
			.ok_or(RenderError::UnknownElement(id))
	}

	/// Returns the live component with this id.
	pub fn get_element_by_id(&self, id: ElementId) -> RenderResult<Rc<ComponentInstance>> {
		self.registry
			.borrow()
			.instance(id)
			.ok_or(RenderError::UnknownElement(id))
	}

	/// Returns the live component at this path.
	pub fn get_element_by_path(&self, path: &str) -> RenderResult<Rc<ComponentInstance>> {
		let registry = self.registry.borrow();
		registry
			.id_for_path(path)
			.and_then(|id| registry.instance(id))
			.ok_or_else(|| RenderError::UnknownPath(path.to_string()))
	}

	/// Resolves a host node by positional child indices such as `0/4/2`,
	/// starting from the mount surface.
	///
	/// # Errors
	///
	/// [`RenderError::UnknownPath`] when the path is malformed or leads nowhere.
	pub fn find_node_by_index_path(&self, path: &str) -> RenderResult<ContainerHandle> {
		let app = self.app()?;
		parse_index_path(path)
			.and_then(|indices| app.surface().child_at(app.mount(), &indices))
			.ok_or_else(|| RenderError::UnknownPath(path.to_string()))
	}
}

impl std::fmt::Debug for Renderer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Renderer")
			.field("next_id", &self.next_id.get())
			.field("rendering", &self.rendering.get())
			.field("elements", &self.element_count())
			.finish_non_exhaustive()
	}
}
