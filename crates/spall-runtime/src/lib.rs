//! # Spall runtime
//!
//! Renders a tree of stateful components into a host document and decides
//! which page is shown for the current route.
//!
//! ## Architecture
//!
//! - [`component`]: the [`Component`](component::Component) trait, component
//!   classes, live instances and the built-in routed app
//! - [`renderable`]: the ordered render description a component produces
//! - [`renderer`]: the two-phase recursive render engine, its identity
//!   registry and the render loggers
//! - [`router`]: route selection and navigation
//! - [`surface`]: the host document abstraction and its implementations
//! - [`app`]: the application shell binding everything together
//! - [`config`]: TOML configuration
//!
//! Every render regenerates a subtree completely; there is no diffing. The
//! runtime is single-threaded: a render that is requested while another one
//! runs is rejected, never interleaved.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//!
//! use spall_routing::RouteTable;
//! use spall_runtime::prelude::*;
//!
//! #[derive(Default)]
//! struct UserPage {
//!     id: String,
//! }
//!
//! impl PageComponent for UserPage {
//!     fn title(&self) -> String {
//!         format!("User {}", self.id)
//!     }
//!
//!     fn generate_page_renderables(
//!         &self,
//!         _cx: &RenderContext<'_>,
//!     ) -> anyhow::Result<Vec<Renderable>> {
//!         Ok(vec![Renderable::markup(format!("<h1>{}</h1>", self.id))])
//!     }
//!
//!     fn set_property(
//!         &mut self,
//!         cx: &RenderContext<'_>,
//!         name: &str,
//!         value: PropValue,
//!     ) -> anyhow::Result<()> {
//!         match (name, value) {
//!             ("id", PropValue::String(id)) => self.id = id,
//!             (name, _) => ignore_property(cx, name),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut routes = RouteTable::new();
//! routes.register_str("users/{id}", ComponentClass::page::<UserPage>("UserPage")).unwrap();
//!
//! let surface = Rc::new(MemorySurface::new());
//! let app = App::new(
//!     surface.clone(),
//!     ComponentClass::routed_app(),
//!     AppOptions::new().router(Router::new(routes)),
//! )
//! .unwrap();
//!
//! app.navigate_to("users/7").unwrap();
//! assert_eq!(surface.title(), "User 7");
//! assert!(surface.to_html().contains("<h1>7</h1>"));
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod component;
pub mod config;
pub mod error;
pub mod renderable;
pub mod renderer;
pub mod router;
pub mod surface;

pub use app::{App, AppOptions};
pub use component::{
	Component, ComponentClass, ComponentInstance, ComponentKind, ElementHandle, ElementId,
	NOT_FOUND_MARKUP, Page, PageComponent, PropValue, ROOT_PARENT_ID, RenderContext, RoutedApp,
	ignore_property,
};
pub use config::{AppConfig, ConfigError, PageCatalog, RouteConfig};
pub use error::{RenderError, RenderResult, SurfaceError};
pub use renderable::{Binding, Bindings, ComponentRef, Renderable};
pub use renderer::{
	NoopRenderLogger, RenderEvent, RenderLog, RenderLogger, Renderer, TracingRenderLogger,
};
pub use router::Router;
pub use surface::{ContainerHandle, MemorySurface, Surface};

#[cfg(all(target_arch = "wasm32", feature = "dom"))]
pub use surface::DomSurface;

/// Commonly used items for component authors.
pub mod prelude {
	pub use crate::app::{App, AppOptions};
	pub use crate::component::{
		Component, ComponentClass, ElementHandle, PageComponent, PropValue, RenderContext,
		ignore_property,
	};
	pub use crate::error::{RenderError, RenderResult};
	pub use crate::renderable::{Bindings, ComponentRef, Renderable};
	pub use crate::router::Router;
	pub use crate::surface::{MemorySurface, Surface};
}
