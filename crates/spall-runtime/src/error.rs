//! Runtime error types.
//!
//! A missing route is not an error: the router reports it as `None` and the
//! routed app renders fallback markup instead.

use thiserror::Error;

use crate::component::{ComponentInstance, ElementId};
use crate::surface::ContainerHandle;

/// Result type for renderer, router and application operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while rendering or navigating.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RenderError {
	/// A render was requested while another one was running.
	#[error("a render is already in progress")]
	RenderGuard,

	/// An operation needed a collaborator that was never attached.
	#[error("configuration error: {0}")]
	Configuration(String),

	/// No live component has this id.
	#[error("no component registered with id {0}")]
	UnknownElement(ElementId),

	/// No live component has this path.
	#[error("no component registered at path '{0}'")]
	UnknownPath(String),

	/// Two child references of one component resolve to the same path.
	#[error("more than one component would be rendered at path '{path}'")]
	DuplicatePath {
		/// The contested path.
		path: String,
	},

	/// The surface lost a component marker between installing content and looking it up.
	#[error("component marker '{0}' was not found in the rendered content")]
	MarkerNotFound(String),

	/// The component was already borrowed when the renderer needed it.
	#[error("component '{name}' at '{path}' is already in use")]
	ComponentBusy {
		/// Component name.
		name: String,
		/// Component path.
		path: String,
	},

	/// A component hook returned an error.
	#[error("component '{name}' at '{path}' failed in {hook}: {source}")]
	Component {
		/// Component name.
		name: String,
		/// Component path.
		path: String,
		/// The hook that failed.
		hook: &'static str,
		/// The error returned by the hook.
		#[source]
		source: anyhow::Error,
	},

	/// The host surface rejected an operation.
	#[error(transparent)]
	Surface(#[from] SurfaceError),
}

impl RenderError {
	pub(crate) fn component(
		instance: &ComponentInstance,
		hook: &'static str,
		source: anyhow::Error,
	) -> Self {
		Self::Component {
			name: instance.name().to_string(),
			path: instance.path().to_string(),
			hook,
			source,
		}
	}

	pub(crate) fn busy(instance: &ComponentInstance) -> Self {
		Self::ComponentBusy {
			name: instance.name().to_string(),
			path: instance.path().to_string(),
		}
	}

	pub(crate) fn not_attached(collaborator: &str) -> Self {
		Self::Configuration(format!(
			"{} is not attached to an application",
			collaborator
		))
	}

	/// Returns whether this is a [`RenderError::RenderGuard`] rejection.
	pub fn is_guard(&self) -> bool {
		matches!(self, Self::RenderGuard)
	}
}

/// Errors raised by a host [`Surface`](crate::surface::Surface).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SurfaceError {
	/// The container handle does not name a live node.
	#[error("unknown container {0:?}")]
	UnknownContainer(ContainerHandle),

	/// The host document could not be reached.
	#[error("host document is unavailable: {0}")]
	HostUnavailable(String),
}

/// Formats an error together with its chain of sources.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
	let mut message = err.to_string();
	let mut source = err.source();
	while let Some(cause) = source {
		message.push_str("\n    caused by: ");
		message.push_str(&cause.to_string());
		source = cause.source();
	}
	message
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_render_error_display() {
		assert_eq!(
			RenderError::RenderGuard.to_string(),
			"a render is already in progress"
		);
		assert_eq!(
			RenderError::not_attached("router").to_string(),
			"configuration error: router is not attached to an application"
		);
		assert_eq!(
			RenderError::UnknownPath("/1".to_string()).to_string(),
			"no component registered at path '/1'"
		);
	}

	#[rstest]
	fn test_is_guard() {
		assert!(RenderError::RenderGuard.is_guard());
		assert!(!RenderError::UnknownElement(3).is_guard());
	}

	#[rstest]
	fn test_error_chain_includes_sources() {
		let err = RenderError::Component {
			name: "Clock".to_string(),
			path: "/1".to_string(),
			hook: "on_render",
			source: anyhow::anyhow!("tick failed").context("while rendering"),
		};
		let message = error_chain(&err);
		assert!(
			message.starts_with("component 'Clock' at '/1' failed in on_render: while rendering")
		);
		assert!(message.contains("caused by: while rendering"));
	}
}
