//! Container registry.
//!
//! Maps container roots to their state records through an explicit,
//! handle-passed registry instead of stashing state on the host element.
//! Creation is lazy (the first access for a root builds its record) and
//! teardown is explicit: detaching drops the registry's reference, and the
//! identity map and text table go with it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use grappelli_core::Element;

use crate::container::ContainerState;

/// Registry of container state records, keyed by root element identity.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
	containers: RefCell<HashMap<usize, Rc<ContainerState>>>,
}

impl ContainerRegistry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// The state record for `root`, creating it on first access.
	pub fn get_or_create(&self, root: &Element) -> Rc<ContainerState> {
		if let Some(state) = self.containers.borrow().get(&root.addr()) {
			return Rc::clone(state);
		}
		let state = Rc::new(ContainerState::new(root.clone()));
		self.containers
			.borrow_mut()
			.insert(root.addr(), Rc::clone(&state));
		state
	}

	/// The state record for `root`, if one is attached.
	pub fn get(&self, root: &Element) -> Option<Rc<ContainerState>> {
		self.containers.borrow().get(&root.addr()).cloned()
	}

	/// Detach the state record for `root`, returning it if one existed.
	pub fn detach(&self, root: &Element) -> Option<Rc<ContainerState>> {
		self.containers.borrow_mut().remove(&root.addr())
	}

	/// Number of attached containers.
	pub fn len(&self) -> usize {
		self.containers.borrow().len()
	}

	/// Whether no containers are attached.
	pub fn is_empty(&self) -> bool {
		self.containers.borrow().is_empty()
	}
}
