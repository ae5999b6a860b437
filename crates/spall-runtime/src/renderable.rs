//! Render descriptions produced by components.

use std::fmt;
use std::rc::Rc;

use crate::component::{ComponentClass, PropValue};

/// A deferred property value, evaluated just before the child renders.
pub type Binding = Rc<dyn Fn() -> PropValue>;

/// Ordered property bindings for a child component.
///
/// Values are produced lazily so they reflect the parent's state at the time
/// the child is materialized, not when the renderable was built.
#[derive(Clone, Default)]
pub struct Bindings {
	entries: Vec<(String, Binding)>,
}

impl Bindings {
	/// Creates an empty set of bindings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Binds `name` to a value producer, replacing an earlier binding of the same name.
	pub fn insert(&mut self, name: impl Into<String>, binding: impl Fn() -> PropValue + 'static) {
		let name = name.into();
		let binding: Binding = Rc::new(binding);
		match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
			Some(entry) => entry.1 = binding,
			None => self.entries.push((name, binding)),
		}
	}

	/// Binds `name` to a fixed value.
	pub fn constant(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
		let value = value.into();
		self.insert(name, move || value.clone());
	}

	/// Returns the producer bound to `name`.
	pub fn get(&self, name: &str) -> Option<&Binding> {
		self.entries
			.iter()
			.find(|(existing, _)| existing == name)
			.map(|(_, binding)| binding)
	}

	/// Returns the number of bindings.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether there are no bindings.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates bindings in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
		self.entries
			.iter()
			.map(|(name, binding)| (name.as_str(), binding))
	}

	/// Evaluates every binding, in order.
	pub fn evaluate(&self) -> Vec<(String, PropValue)> {
		self.entries
			.iter()
			.map(|(name, binding)| (name.clone(), binding()))
			.collect()
	}
}

impl fmt::Debug for Bindings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_list()
			.entries(self.entries.iter().map(|(name, _)| name))
			.finish()
	}
}

/// A reference to a child component inside a render description.
#[derive(Debug, Clone)]
pub struct ComponentRef {
	name: String,
	class: ComponentClass,
	relative_path: String,
	bindings: Bindings,
}

impl ComponentRef {
	/// References `class` at `relative_path`, named after the class.
	pub fn new(class: ComponentClass, relative_path: impl Into<String>) -> Self {
		Self {
			name: class.name().to_string(),
			class,
			relative_path: relative_path.into(),
			bindings: Bindings::new(),
		}
	}

	/// Overrides the instance name.
	pub fn named(mut self, name: impl Into<String>) -> Self {
		self.name = name.into();
		self
	}

	/// Adds a lazily evaluated property.
	pub fn bind(
		mut self,
		name: impl Into<String>,
		binding: impl Fn() -> PropValue + 'static,
	) -> Self {
		self.bindings.insert(name, binding);
		self
	}

	/// Adds a fixed property.
	pub fn constant(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
		self.bindings.constant(name, value);
		self
	}

	/// Replaces all bindings.
	pub fn with_bindings(mut self, bindings: Bindings) -> Self {
		self.bindings = bindings;
		self
	}

	/// Returns the instance name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the component class.
	pub fn class(&self) -> ComponentClass {
		self.class
	}

	/// Returns the path segment appended to the parent's path.
	pub fn relative_path(&self) -> &str {
		&self.relative_path
	}

	/// Returns the bindings.
	pub fn bindings(&self) -> &Bindings {
		&self.bindings
	}

	pub(crate) fn into_parts(self) -> (String, ComponentClass, String, Bindings) {
		(self.name, self.class, self.relative_path, self.bindings)
	}
}

/// One unit of render output.
#[derive(Debug, Clone)]
pub enum Renderable {
	/// Literal markup, inserted verbatim with no escaping.
	Markup {
		/// The markup text.
		text: String,
	},
	/// A nested component.
	Component(ComponentRef),
}

impl Renderable {
	/// Literal markup.
	pub fn markup(text: impl Into<String>) -> Self {
		Self::Markup { text: text.into() }
	}

	/// A nested component.
	pub fn component(reference: ComponentRef) -> Self {
		Self::Component(reference)
	}
}

impl From<ComponentRef> for Renderable {
	fn from(reference: ComponentRef) -> Self {
		Self::Component(reference)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::RoutedApp;
	use rstest::rstest;
	use std::cell::Cell;

	#[rstest]
	fn test_bindings_are_lazy() {
		let state = Rc::new(Cell::new(1));
		let mut bindings = Bindings::new();
		let captured = Rc::clone(&state);
		bindings.insert("count", move || PropValue::from(captured.get()));

		state.set(5);
		assert_eq!(bindings.evaluate(), vec![("count".to_string(), PropValue::from(5))]);
	}

	#[rstest]
	fn test_bindings_replace_same_name() {
		let mut bindings = Bindings::new();
		bindings.constant("id", "1");
		bindings.constant("title", "x");
		bindings.constant("id", "2");

		assert_eq!(bindings.len(), 2);
		assert_eq!((bindings.get("id").unwrap())(), PropValue::from("2"));
		assert_eq!(bindings.iter().map(|(name, _)| name).collect::<Vec<_>>(), vec!["id", "title"]);
		assert_eq!(format!("{:?}", bindings), r#"["id", "title"]"#);
	}

	#[rstest]
	fn test_component_ref_defaults_to_class_name() {
		let reference = ComponentRef::new(ComponentClass::routed_app(), "1").constant("id", "7");
		assert_eq!(reference.name(), "RoutedApp");
		assert_eq!(reference.relative_path(), "1");
		assert_eq!(reference.bindings().len(), 1);
		assert_eq!(reference.clone().named("App").name(), "App");
	}

	#[rstest]
	fn test_renderable_constructors() {
		assert!(matches!(
			Renderable::markup("<p/>"),
			Renderable::Markup { text } if text == "<p/>"
		));
		let reference = ComponentRef::new(ComponentClass::of::<RoutedApp>("Inner"), "0");
		assert!(matches!(
			Renderable::from(reference),
			Renderable::Component(r) if r.name() == "Inner"
		));
	}
}
