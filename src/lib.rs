//! # Spall
//!
//! A runtime that renders a tree of stateful UI components into a host document
//! and maps route strings onto top-level page components.
//!
//! Application code (usually generated from templates) describes each component
//! as an ordered list of renderables: literal markup, or references to child
//! components. Spall turns that description into surface content, keeps every
//! live component's identity stable across re-renders, and picks the active page
//! for the current route.
//!
//! ## Feature Flags
//!
//! - `full` (default) - `routing` and `runtime`
//! - `routing` - route patterns and route tables ([`routing`])
//! - `runtime` - renderer, router and application shell ([`runtime`])
//! - `dom` - browser surface over `web-sys` (wasm32 targets)
//!
//! ## Quick Start
//!
//! ```
//! use std::rc::Rc;
//!
//! use spall::prelude::*;
//! use spall::routing::RouteTable;
//!
//! #[derive(Default)]
//! struct IndexPage;
//!
//! impl PageComponent for IndexPage {
//!     fn title(&self) -> String {
//!         "Home".to_string()
//!     }
//!
//!     fn generate_page_renderables(
//!         &self,
//!         _cx: &RenderContext<'_>,
//!     ) -> anyhow::Result<Vec<Renderable>> {
//!         Ok(vec![Renderable::markup("<h1>Welcome</h1>")])
//!     }
//! }
//!
//! let mut routes = RouteTable::new();
//! routes.register_str("", ComponentClass::page::<IndexPage>("IndexPage")).unwrap();
//!
//! let surface = Rc::new(MemorySurface::new());
//! let _app = App::new(
//!     surface.clone(),
//!     ComponentClass::routed_app(),
//!     AppOptions::new().router(Router::new(routes)),
//! )
//! .unwrap();
//!
//! assert!(surface.to_html().contains("<h1>Welcome</h1>"));
//! assert_eq!(surface.title(), "Home");
//! ```

#[cfg(feature = "routing")]
pub mod routing;
#[cfg(feature = "runtime")]
pub mod runtime;

/// Commonly used items.
#[cfg(feature = "runtime")]
pub mod prelude {
	pub use spall_runtime::prelude::*;
}
