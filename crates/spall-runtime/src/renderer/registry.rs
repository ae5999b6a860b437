//! Identity bookkeeping for live components.

use std::collections::HashMap;
use std::rc::Rc;

use crate::component::{ComponentInstance, ElementId};
use crate::surface::ContainerHandle;

/// The four coupled lookup tables owned by the renderer.
///
/// An id is present in `paths`, `ids` and `instances` from registration until
/// removal; `containers` gains the id once the component's marker is located.
#[derive(Debug, Default)]
pub(crate) struct Registry {
	containers: HashMap<ElementId, ContainerHandle>,
	paths: HashMap<ElementId, String>,
	ids: HashMap<String, ElementId>,
	instances: HashMap<ElementId, Rc<ComponentInstance>>,
}

impl Registry {
	pub(crate) fn register(&mut self, instance: Rc<ComponentInstance>) {
		let id = instance.id();
		self.paths.insert(id, instance.path().to_string());
		self.ids.insert(instance.path().to_string(), id);
		self.instances.insert(id, instance);
	}

	pub(crate) fn bind_container(&mut self, id: ElementId, container: ContainerHandle) {
		self.containers.insert(id, container);
	}

	pub(crate) fn unregister(&mut self, id: ElementId) -> Option<Rc<ComponentInstance>> {
		self.containers.remove(&id);
		if let Some(path) = self.paths.remove(&id) {
			if self.ids.get(&path) == Some(&id) {
				self.ids.remove(&path);
			}
		}
		self.instances.remove(&id)
	}

	/// Removes every component strictly below `path`; returns how many were removed.
	pub(crate) fn remove_descendants(&mut self, path: &str) -> usize {
		let prefix = format!("{}/", path);
		let stale: Vec<ElementId> = self
			.paths
			.iter()
			.filter(|(_, candidate)| candidate.starts_with(&prefix))
			.map(|(id, _)| *id)
			.collect();
		for id in &stale {
			self.unregister(*id);
		}
		stale.len()
	}

	pub(crate) fn clear(&mut self) {
		self.containers.clear();
		self.paths.clear();
		self.ids.clear();
		self.instances.clear();
	}

	pub(crate) fn len(&self) -> usize {
		self.instances.len()
	}

	pub(crate) fn container(&self, id: ElementId) -> Option<ContainerHandle> {
		self.containers.get(&id).copied()
	}

	pub(crate) fn instance(&self, id: ElementId) -> Option<Rc<ComponentInstance>> {
		self.instances.get(&id).cloned()
	}

	pub(crate) fn id_for_path(&self, path: &str) -> Option<ElementId> {
		self.ids.get(path).copied()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::{ComponentClass, ComponentKind, ROOT_PARENT_ID, RoutedApp};
	use rstest::{fixture, rstest};

	fn instance(id: ElementId, parent_id: ElementId, path: &str) -> Rc<ComponentInstance> {
		let class = ComponentClass::of::<RoutedApp>("Node");
		Rc::new(ComponentInstance::new(
			id,
			parent_id,
			class.name(),
			path,
			ComponentKind::Generic,
			class.instantiate(),
		))
	}

	#[fixture]
	fn registry() -> Registry {
		let mut registry = Registry::default();
		registry.register(instance(0, ROOT_PARENT_ID, ""));
		registry.register(instance(1, 0, "/1"));
		registry.register(instance(2, 1, "/1/0"));
		registry.register(instance(3, 0, "/10"));
		registry.bind_container(1, ContainerHandle::new(5));
		registry
	}

	fn contains(registry: &Registry, id: ElementId) -> bool {
		registry.instance(id).is_some()
	}

	#[rstest]
	fn test_lookups(registry: Registry) {
		assert_eq!(registry.len(), 4);
		assert_eq!(registry.id_for_path("/1/0"), Some(2));
		assert_eq!(registry.container(1), Some(ContainerHandle::new(5)));
		assert_eq!(registry.container(2), None);
		assert_eq!(registry.instance(3).map(|i| i.path().to_string()).as_deref(), Some("/10"));
	}

	#[rstest]
	fn test_remove_descendants_respects_segment_boundaries(mut registry: Registry) {
		assert_eq!(registry.remove_descendants("/1"), 1);
		assert!(!contains(&registry, 2));
		assert!(contains(&registry, 1));
		assert!(contains(&registry, 3));
		assert_eq!(registry.id_for_path("/1/0"), None);
	}

	#[rstest]
	fn test_remove_descendants_of_root(mut registry: Registry) {
		assert_eq!(registry.remove_descendants(""), 3);
		assert_eq!(registry.len(), 1);
		assert!(contains(&registry, 0));
		assert_eq!(registry.container(1), None);
	}

	#[rstest]
	fn test_clear(mut registry: Registry) {
		registry.clear();
		assert_eq!(registry.len(), 0);
		assert_eq!(registry.id_for_path(""), None);
	}
}
