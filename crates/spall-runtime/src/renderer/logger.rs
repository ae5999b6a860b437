//! Render loggers.
//!
//! A logger observes a render as it happens. It never influences control flow
//! or output, so swapping loggers is always safe.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::component::ElementId;

/// Observer of the renderer's progress.
pub trait RenderLogger {
	/// A component starts rendering.
	fn log_start_render(&self, name: &str);

	/// Literal markup was appended to the current component's content.
	fn log_add_markup(&self, markup: &str);

	/// A component finished rendering, including its descendants.
	fn log_finish_render(&self, name: &str);

	/// A component instance was created and registered.
	fn log_created_element(&self, name: &str, id: ElementId);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderLogger;

impl RenderLogger for NoopRenderLogger {
	fn log_start_render(&self, _name: &str) {}

	fn log_add_markup(&self, _markup: &str) {}

	fn log_finish_render(&self, _name: &str) {}

	fn log_created_element(&self, _name: &str, _id: ElementId) {}
}

const INDENT_STEP: usize = 3;

/// Emits `tracing` debug events indented by render depth.
#[derive(Debug, Default)]
pub struct TracingRenderLogger {
	indent: Cell<usize>,
}

impl TracingRenderLogger {
	/// Creates a logger at depth zero.
	pub fn new() -> Self {
		Self::default()
	}

	fn pad(&self) -> String {
		" ".repeat(self.indent.get())
	}
}

impl RenderLogger for TracingRenderLogger {
	fn log_start_render(&self, name: &str) {
		tracing::debug!("{}-- Start render {}", self.pad(), name);
		self.indent.set(self.indent.get() + INDENT_STEP);
	}

	fn log_add_markup(&self, markup: &str) {
		tracing::debug!("{}Rendering {}", self.pad(), markup);
	}

	fn log_finish_render(&self, name: &str) {
		self.indent.set(self.indent.get().saturating_sub(INDENT_STEP));
		tracing::debug!("{}-- Finish render {}", self.pad(), name);
	}

	fn log_created_element(&self, name: &str, id: ElementId) {
		tracing::debug!("{}Creating element for {}. Id is {}", self.pad(), name, id);
	}
}

/// An event captured by [`RenderLog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
	/// See [`RenderLogger::log_start_render`].
	StartRender(String),
	/// See [`RenderLogger::log_add_markup`].
	AddMarkup(String),
	/// See [`RenderLogger::log_finish_render`].
	FinishRender(String),
	/// See [`RenderLogger::log_created_element`].
	CreatedElement {
		/// Component name.
		name: String,
		/// Assigned id.
		id: ElementId,
	},
}

/// Records events in memory.
///
/// Clones share the same buffer, so a test can keep one clone and hand the
/// other to the renderer.
#[derive(Debug, Clone, Default)]
pub struct RenderLog {
	events: Rc<RefCell<Vec<RenderEvent>>>,
}

impl RenderLog {
	/// Creates an empty log.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of the recorded events.
	pub fn events(&self) -> Vec<RenderEvent> {
		self.events.borrow().clone()
	}

	/// Discards recorded events.
	pub fn clear(&self) {
		self.events.borrow_mut().clear();
	}

	fn push(&self, event: RenderEvent) {
		self.events.borrow_mut().push(event);
	}
}

impl RenderLogger for RenderLog {
	fn log_start_render(&self, name: &str) {
		self.push(RenderEvent::StartRender(name.to_string()));
	}

	fn log_add_markup(&self, markup: &str) {
		self.push(RenderEvent::AddMarkup(markup.to_string()));
	}

	fn log_finish_render(&self, name: &str) {
		self.push(RenderEvent::FinishRender(name.to_string()));
	}

	fn log_created_element(&self, name: &str, id: ElementId) {
		self.push(RenderEvent::CreatedElement {
			name: name.to_string(),
			id,
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_render_log_shares_buffer() {
		let log = RenderLog::new();
		let logger: Box<dyn RenderLogger> = Box::new(log.clone());

		logger.log_start_render("App");
		logger.log_created_element("Nav", 1);
		logger.log_finish_render("App");

		assert_eq!(
			log.events(),
			vec![
				RenderEvent::StartRender("App".to_string()),
				RenderEvent::CreatedElement { name: "Nav".to_string(), id: 1 },
				RenderEvent::FinishRender("App".to_string()),
			]
		);
		log.clear();
		assert!(log.events().is_empty());
	}

	#[rstest]
	fn test_tracing_logger_tracks_depth() {
		let logger = TracingRenderLogger::new();
		logger.log_start_render("App");
		logger.log_start_render("Nav");
		assert_eq!(logger.pad().len(), 2 * INDENT_STEP);
		logger.log_finish_render("Nav");
		logger.log_finish_render("App");
		logger.log_finish_render("App");
		assert_eq!(logger.indent.get(), 0);
	}
}
