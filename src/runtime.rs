//! Component rendering, routing and the application shell.
//!
//! This module provides access to spall-runtime:
//!
//! - **Components**: stateful nodes with lifecycle hooks and typed access
//! - **Renderer**: two-phase recursive rendering with stable identities
//! - **Router**: page selection, route bindings and navigation
//! - **Surfaces**: an in-memory document, plus the browser document on wasm32

// Re-export all spall-runtime functionality
pub use spall_runtime::*;
