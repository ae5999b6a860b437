//! Component trait and live component instances.
//!
//! Application code implements [`Component`] (or [`PageComponent`] for routed
//! pages) and describes a component type with a [`ComponentClass`]. The
//! renderer is the only place where classes are turned into live
//! [`ComponentInstance`]s: it assigns the id and path, registers the instance,
//! and drives the lifecycle hooks through a [`RenderContext`].
//!
//! ## Lifecycle
//!
//! For every instance created during a render pass:
//!
//! 1. [`Component::on_initialized`] runs once, right after registration
//! 2. bound properties are evaluated and assigned with [`Component::set_property`]
//! 3. [`Component::generate_renderables`] produces the render description
//! 4. [`Component::on_render`] runs after every descendant has rendered

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::app::App;
use crate::error::{RenderError, RenderResult};
use crate::renderable::Renderable;
use crate::renderer::Renderer;
use crate::router::Router;

mod page;
mod routed_app;

pub use page::{Page, PageComponent};
pub use routed_app::{NOT_FOUND_MARKUP, RoutedApp};

/// Identifier assigned to a live component by the renderer.
pub type ElementId = i64;

/// Parent id recorded on the root component.
pub const ROOT_PARENT_ID: ElementId = -1;

/// Value assigned to a component property.
///
/// Values derived from the route are always [`PropValue::String`].
pub type PropValue = serde_json::Value;

/// Upcast to [`Any`] for typed access to components.
pub trait AsAny: Any {
	/// Returns `self` as `&dyn Any`.
	fn as_any(&self) -> &dyn Any;

	/// Returns `self` as `&mut dyn Any`.
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// A stateful node of the render tree.
///
/// Only [`generate_renderables`](Self::generate_renderables) is required. Hooks
/// return `anyhow::Result`; an error aborts the current render pass and is
/// reported by the renderer together with the component's name and path.
///
/// # Example
///
/// ```
/// use spall_runtime::prelude::*;
///
/// #[derive(Default)]
/// struct Greeting {
///     name: String,
/// }
///
/// impl Component for Greeting {
///     fn generate_renderables(&self, _cx: &RenderContext<'_>) -> anyhow::Result<Vec<Renderable>> {
///         Ok(vec![Renderable::markup(format!("<p>Hello, {}!</p>", self.name))])
///     }
///
///     fn set_property(
///         &mut self,
///         cx: &RenderContext<'_>,
///         name: &str,
///         value: PropValue,
///     ) -> anyhow::Result<()> {
///         match (name, value) {
///             ("name", PropValue::String(value)) => self.name = value,
///             (name, _) => ignore_property(cx, name),
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Component: AsAny {
	/// Describes what this component renders, in order.
	fn generate_renderables(&self, cx: &RenderContext<'_>) -> anyhow::Result<Vec<Renderable>>;

	/// Called once after the instance is registered, before its properties are assigned.
	fn on_initialized(&mut self, _cx: &RenderContext<'_>) -> anyhow::Result<()> {
		Ok(())
	}

	/// Called after every completed render of this instance.
	fn on_render(&mut self, _cx: &RenderContext<'_>) -> anyhow::Result<()> {
		Ok(())
	}

	/// Assigns a bound property. Unknown names are logged and ignored.
	fn set_property(
		&mut self,
		cx: &RenderContext<'_>,
		name: &str,
		_value: PropValue,
	) -> anyhow::Result<()> {
		ignore_property(cx, name);
		Ok(())
	}

	/// The value exposed to [`ComponentInstance::with`].
	///
	/// Wrappers such as [`Page`] return the wrapped component.
	fn as_target(&self) -> &dyn Any {
		self.as_any()
	}

	/// Mutable counterpart of [`as_target`](Self::as_target).
	fn as_target_mut(&mut self) -> &mut dyn Any {
		self.as_any_mut()
	}
}

/// Logs a property assignment that the component does not recognize.
pub fn ignore_property(cx: &RenderContext<'_>, name: &str) {
	tracing::warn!(
		component = cx.name(),
		path = cx.path(),
		property = name,
		"ignoring unknown property"
	);
}

/// The variant tag recorded on each instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
	/// An ordinary component.
	Generic,
	/// A routed page that manages the document title.
	Page,
	/// The top-level component of a full page render.
	Root,
	/// The built-in component that renders the active page.
	RoutedApp,
}

impl fmt::Display for ComponentKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Generic => "generic",
			Self::Page => "page",
			Self::Root => "root",
			Self::RoutedApp => "routed app",
		};
		f.write_str(name)
	}
}

fn construct<C: Component + Default>() -> Box<dyn Component> {
	Box::new(C::default())
}

fn construct_page<P: PageComponent + Default>() -> Box<dyn Component> {
	Box::new(Page::new(P::default()))
}

/// Describes a component type: its name, its variant and how to build it.
///
/// Classes are plain copyable values, so route tables and renderables can hold
/// them freely.
#[derive(Clone, Copy)]
pub struct ComponentClass {
	name: &'static str,
	kind: ComponentKind,
	construct: fn() -> Box<dyn Component>,
}

impl ComponentClass {
	/// Creates a class from an explicit constructor.
	pub const fn new(
		name: &'static str,
		kind: ComponentKind,
		construct: fn() -> Box<dyn Component>,
	) -> Self {
		Self {
			name,
			kind,
			construct,
		}
	}

	/// A generic component class built with `C::default()`.
	pub fn of<C: Component + Default>(name: &'static str) -> Self {
		Self::new(name, ComponentKind::Generic, construct::<C>)
	}

	/// A page class: `P` is wrapped in [`Page`] so it manages the document title.
	pub fn page<P: PageComponent + Default>(name: &'static str) -> Self {
		Self::new(name, ComponentKind::Page, construct_page::<P>)
	}

	/// The built-in [`RoutedApp`] class.
	pub fn routed_app() -> Self {
		Self::new("RoutedApp", ComponentKind::RoutedApp, construct::<RoutedApp>)
	}

	/// Returns the class name.
	pub fn name(&self) -> &'static str {
		self.name
	}

	/// Returns the variant tag.
	pub fn kind(&self) -> ComponentKind {
		self.kind
	}

	/// Builds a fresh component value.
	pub fn instantiate(&self) -> Box<dyn Component> {
		(self.construct)()
	}
}

impl PartialEq for ComponentClass {
	fn eq(&self, other: &Self) -> bool {
		self.name == other.name && self.kind == other.kind
	}
}

impl Eq for ComponentClass {}

impl fmt::Debug for ComponentClass {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentClass")
			.field("name", &self.name)
			.field("kind", &self.kind)
			.finish_non_exhaustive()
	}
}

/// A live component registered with the renderer.
///
/// Identity (`id`, `parent_id`, `path`) is fixed at construction and survives
/// every in-place re-render.
pub struct ComponentInstance {
	id: ElementId,
	parent_id: ElementId,
	name: String,
	path: String,
	kind: ComponentKind,
	component: RefCell<Box<dyn Component>>,
}

impl ComponentInstance {
	pub(crate) fn new(
		id: ElementId,
		parent_id: ElementId,
		name: impl Into<String>,
		path: impl Into<String>,
		kind: ComponentKind,
		component: Box<dyn Component>,
	) -> Self {
		Self {
			id,
			parent_id,
			name: name.into(),
			path: path.into(),
			kind,
			component: RefCell::new(component),
		}
	}

	/// Returns the id.
	pub fn id(&self) -> ElementId {
		self.id
	}

	/// Returns the parent's id, or [`ROOT_PARENT_ID`] for the root.
	pub fn parent_id(&self) -> ElementId {
		self.parent_id
	}

	/// Returns the component name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the path from the application root (empty for the root).
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the variant tag.
	pub fn kind(&self) -> ComponentKind {
		self.kind
	}

	/// Runs `f` against the component as a `C`.
	///
	/// Returns `None` when the component is not a `C` or is currently in use.
	pub fn with<C: Any, R>(&self, f: impl FnOnce(&C) -> R) -> Option<R> {
		let component = self.component.try_borrow().ok()?;
		component.as_target().downcast_ref::<C>().map(f)
	}

	/// Runs `f` against the component as a mutable `C`.
	///
	/// Returns `None` when the component is not a `C` or is currently in use.
	pub fn with_mut<C: Any, R>(&self, f: impl FnOnce(&mut C) -> R) -> Option<R> {
		let mut component = self.component.try_borrow_mut().ok()?;
		component.as_target_mut().downcast_mut::<C>().map(f)
	}

	pub(crate) fn borrow(&self) -> RenderResult<std::cell::Ref<'_, Box<dyn Component>>> {
		self.component
			.try_borrow()
			.map_err(|_| RenderError::busy(self))
	}

	pub(crate) fn borrow_mut(&self) -> RenderResult<std::cell::RefMut<'_, Box<dyn Component>>> {
		self.component
			.try_borrow_mut()
			.map_err(|_| RenderError::busy(self))
	}
}

impl fmt::Debug for ComponentInstance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ComponentInstance")
			.field("id", &self.id)
			.field("parent_id", &self.parent_id)
			.field("name", &self.name)
			.field("path", &self.path)
			.field("kind", &self.kind)
			.finish_non_exhaustive()
	}
}

/// Everything a component hook can reach.
pub struct RenderContext<'a> {
	app: &'a Rc<App>,
	instance: &'a ComponentInstance,
}

impl<'a> RenderContext<'a> {
	pub(crate) fn new(app: &'a Rc<App>, instance: &'a ComponentInstance) -> Self {
		Self { app, instance }
	}

	/// Returns the id of the component being driven.
	pub fn id(&self) -> ElementId {
		self.instance.id()
	}

	/// Returns the parent id.
	pub fn parent_id(&self) -> ElementId {
		self.instance.parent_id()
	}

	/// Returns the component path.
	pub fn path(&self) -> &str {
		self.instance.path()
	}

	/// Returns the component name.
	pub fn name(&self) -> &str {
		self.instance.name()
	}

	/// Returns the variant tag.
	pub fn kind(&self) -> ComponentKind {
		self.instance.kind()
	}

	/// Returns the owning application.
	pub fn app(&self) -> &Rc<App> {
		self.app
	}

	/// Returns the application's router.
	pub fn router(&self) -> &Router {
		self.app.router()
	}

	/// Returns the application's renderer.
	pub fn renderer(&self) -> &Renderer {
		self.app.renderer()
	}

	/// Sets the host document title.
	pub fn set_document_title(&self, title: &str) {
		self.app.surface().set_title(title);
	}

	/// Returns a handle that outlives this context.
	pub fn handle(&self) -> ElementHandle {
		ElementHandle {
			app: Rc::downgrade(self.app),
			id: self.instance.id(),
		}
	}

	/// Requests an in-place re-render of this component.
	///
	/// Always rejected while a render is running, including the one that
	/// invoked the current hook.
	pub fn needs_render(&self) -> RenderResult<()> {
		self.app.renderer().needs_render(self.instance.id())
	}
}

/// A detached reference to a live component, for use from host callbacks.
#[derive(Debug, Clone)]
pub struct ElementHandle {
	app: Weak<App>,
	id: ElementId,
}

impl ElementHandle {
	/// Returns the component id.
	pub fn id(&self) -> ElementId {
		self.id
	}

	fn app(&self) -> RenderResult<Rc<App>> {
		self.app
			.upgrade()
			.ok_or_else(|| RenderError::not_attached("element handle"))
	}

	/// Looks the component up in the registry.
	pub fn instance(&self) -> RenderResult<Rc<ComponentInstance>> {
		self.app()?.renderer().get_element_by_id(self.id)
	}

	/// Requests an in-place re-render of the component.
	pub fn needs_render(&self) -> RenderResult<()> {
		self.app()?.renderer().needs_render(self.id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[derive(Default)]
	struct Counter {
		count: u32,
	}

	impl Component for Counter {
		fn generate_renderables(&self, _cx: &RenderContext<'_>) -> anyhow::Result<Vec<Renderable>> {
			Ok(vec![Renderable::markup(self.count.to_string())])
		}
	}

	#[rstest]
	fn test_class_of() {
		let class = ComponentClass::of::<Counter>("Counter");
		assert_eq!(class.name(), "Counter");
		assert_eq!(class.kind(), ComponentKind::Generic);
		assert!(class.instantiate().as_target().is::<Counter>());
	}

	#[rstest]
	fn test_class_equality_ignores_constructor() {
		let a = ComponentClass::of::<Counter>("Counter");
		let b = ComponentClass::new("Counter", ComponentKind::Generic, || -> Box<dyn Component> {
			Box::new(Counter { count: 9 })
		});
		assert_eq!(a, b);
		assert_ne!(a, ComponentClass::routed_app());
	}

	#[rstest]
	fn test_instance_typed_access() {
		let class = ComponentClass::of::<Counter>("Counter");
		let instance =
			ComponentInstance::new(3, 1, "Counter", "/1/0", class.kind(), class.instantiate());

		assert_eq!(instance.with_mut(|c: &mut Counter| {
			c.count += 2;
			c.count
		}), Some(2));
		assert_eq!(instance.with(|c: &Counter| c.count), Some(2));
		assert_eq!(instance.with(|_: &RoutedApp| ()), None);
	}

	#[rstest]
	fn test_instance_busy() {
		let class = ComponentClass::of::<Counter>("Counter");
		let instance = ComponentInstance::new(
			0,
			ROOT_PARENT_ID,
			"Counter",
			"",
			ComponentKind::Root,
			class.instantiate(),
		);

		let _held = instance.borrow_mut().unwrap();
		assert_eq!(instance.with(|c: &Counter| c.count), None);
		assert!(matches!(instance.borrow(), Err(RenderError::ComponentBusy { .. })));
	}

	#[rstest]
	#[case(ComponentKind::Generic, "generic")]
	#[case(ComponentKind::RoutedApp, "routed app")]
	fn test_kind_display(#[case] kind: ComponentKind, #[case] expected: &str) {
		assert_eq!(kind.to_string(), expected);
	}
}
