//! Container state record.
//!
//! One container (one hydration unit rooted at a single host element)
//! owns one of these records for its whole life. The record aggregates the
//! identity subsystems (object map, element resolver, text table) with the
//! collaborating bookkeeping a pause pass reads: the subscription manager,
//! the pending/staging task sets, registered style ids, listened event
//! names, and reference bindings.
//!
//! The identity subsystem has exactly one phase: accept requests and grow
//! the map monotonically. All state is single-threaded interior
//! mutability; the host scheduling model serializes access.

use std::cell::RefCell;
use std::collections::BTreeSet;

use grappelli_core::{Element, Task, Value};
use tracing::debug;

use crate::canon::{Canonical, CanonicalKind, canonicalize};
use crate::elements::ElementIdResolver;
use crate::error::{HydrateError, HydrateResult};
use crate::markers::{ELEMENT_ID_PREFIX, TEXT_ID_PREFIX, read_base_path};
use crate::objmap::ObjectIdMap;
use crate::subs::{Subscription, SubscriptionManager};
use crate::text::TextTable;

/// A reference binding from an element to a settable or callable target.
#[derive(Debug, Clone)]
pub struct RefBinding {
	element: Element,
	target: Value,
}

impl RefBinding {
	/// The bound element.
	pub fn element(&self) -> &Element {
		&self.element
	}

	/// The binding target (a store or a task).
	pub fn target(&self) -> &Value {
		&self.target
	}
}

/// Per-container aggregate owning the identity subsystems.
#[derive(Debug)]
pub struct ContainerState {
	root: Element,
	base_path: String,
	objs: RefCell<ObjectIdMap>,
	elements: RefCell<ElementIdResolver>,
	texts: RefCell<TextTable>,
	subs: SubscriptionManager,
	tasks_pending: RefCell<Vec<Task>>,
	tasks_staging: RefCell<Vec<Task>>,
	style_ids: RefCell<BTreeSet<String>>,
	events: RefCell<BTreeSet<String>>,
	refs: RefCell<Vec<RefBinding>>,
}

impl ContainerState {
	/// Create the state record for a container rooted at `root`.
	///
	/// The base path is read from the root's base attribute once, at
	/// creation time, defaulting to `/` when absent.
	pub fn new(root: Element) -> Self {
		let base_path = read_base_path(&root);
		Self {
			root,
			base_path,
			objs: RefCell::new(ObjectIdMap::new()),
			elements: RefCell::new(ElementIdResolver::new()),
			texts: RefCell::new(TextTable::new()),
			subs: SubscriptionManager::new(),
			tasks_pending: RefCell::new(Vec::new()),
			tasks_staging: RefCell::new(Vec::new()),
			style_ids: RefCell::new(BTreeSet::new()),
			events: RefCell::new(BTreeSet::new()),
			refs: RefCell::new(Vec::new()),
		}
	}

	/// The container's root element.
	pub fn root(&self) -> &Element {
		&self.root
	}

	/// The container's base path.
	pub fn base_path(&self) -> &str {
		&self.base_path
	}

	/// The subscription manager constructed by this record.
	pub fn subs(&self) -> &SubscriptionManager {
		&self.subs
	}

	// Identity operations ---------------------------------------------------

	/// The identifier for `value`, if it has one.
	///
	/// Canonicalizes first: a pending deferred yields `None`; a settled
	/// deferred or a store resolves to its payload or target with the
	/// suffix annotation appended. Resolution order is element check →
	/// object map → text table. The only side effect is element-resolver
	/// cache population.
	pub fn get_object_id(&self, value: &Value) -> Option<String> {
		let (canonical, suffix, kind) = match canonicalize(value) {
			Canonical::Pending => return None,
			Canonical::Resolved {
				value,
				suffix,
				kind,
			} => (value, suffix, kind),
		};

		match kind {
			CanonicalKind::Element => {
				let Value::Element(element) = &canonical else {
					return None;
				};
				let id = self.elements.borrow_mut().resolve(element)?;
				Some(format!("{ELEMENT_ID_PREFIX}{id}{suffix}"))
			}
			CanonicalKind::Plain | CanonicalKind::Text | CanonicalKind::Undefined => {
				if let Some(key) = canonical.key() {
					if let Some(id) = self.objs.borrow().lookup(&key) {
						return Some(format!("{id}{suffix}"));
					}
				}
				if let Value::Text(text) = &canonical {
					if let Some(id) = self.texts.borrow().lookup(text) {
						return Some(format!("{TEXT_ID_PREFIX}{id}{suffix}"));
					}
				}
				None
			}
		}
	}

	/// The identifier for `value`, which callers assert was registered.
	///
	/// A missing identifier is a contract violation surfaced as
	/// [`HydrateError::MissingObjectId`], with one narrow exception:
	/// deferred-invocation handles may legitimately surface in-graph before
	/// the root-registration pass reaches them, so an unregistered task is
	/// allocated on the spot instead of failing.
	pub fn must_get_object_id(&self, value: &Value) -> HydrateResult<String> {
		if let Some(id) = self.get_object_id(value) {
			return Ok(id);
		}
		if let Value::Task(_) = value {
			return self.allocate_unregistered_task(value);
		}
		Err(HydrateError::MissingObjectId(value.kind_name().to_string()))
	}

	/// Compatibility path for tasks requested before registration.
	///
	/// Kept for graphs that reach a task ahead of the bulk-registration
	/// pass; every other kind must go through root registration.
	fn allocate_unregistered_task(&self, value: &Value) -> HydrateResult<String> {
		debug!(kind = value.kind_name(), "allocating unregistered task id");
		self.add_object_root(value)
	}

	/// Register a root value, returning its (possibly existing) identifier.
	///
	/// Direct allocate-or-return against the object map: no
	/// canonicalization is applied, the value is keyed as given. Values
	/// without reference identity cannot be registered.
	pub fn add_object_root(&self, value: &Value) -> HydrateResult<String> {
		let (key, weak) = value
			.identity()
			.ok_or_else(|| HydrateError::MissingObjectId(value.kind_name().to_string()))?;
		Ok(self.objs.borrow_mut().allocate(key, weak).to_owned())
	}

	/// Bulk-register root values and alias the excluded ones.
	///
	/// Called once by the serializer before the per-value emission pass;
	/// see [`ObjectIdMap::bulk_register`] for the exact protocol.
	pub fn add_object_roots(&self, values: &[Value], excluded: &[Value]) {
		self.objs.borrow_mut().bulk_register(values, excluded);
	}

	// Collaborator bookkeeping ----------------------------------------------

	/// Register a reference binding from `element` to `target`.
	///
	/// The target must be a settable slot (a store) or callable (a task);
	/// anything else is an [`HydrateError::InvalidBindingTarget`].
	pub fn bind_ref(&self, target: &Value, element: &Element) -> HydrateResult<()> {
		match target {
			Value::Store(_) | Value::Task(_) => {
				self.refs.borrow_mut().push(RefBinding {
					element: element.clone(),
					target: target.clone(),
				});
				Ok(())
			}
			other => Err(HydrateError::InvalidBindingTarget(
				other.kind_name().to_string(),
			)),
		}
	}

	/// Snapshot of the registered reference bindings.
	pub fn ref_bindings(&self) -> Vec<RefBinding> {
		self.refs.borrow().clone()
	}

	/// Queue a task for the next run. Duplicate handles are ignored.
	pub fn enqueue_task(&self, task: Task) {
		let mut pending = self.tasks_pending.borrow_mut();
		if !pending.iter().any(|t| t.ptr_eq(&task)) {
			pending.push(task);
		}
	}

	/// Stage a task discovered mid-pass. Duplicate handles are ignored.
	pub fn stage_task(&self, task: Task) {
		let mut staging = self.tasks_staging.borrow_mut();
		if !staging.iter().any(|t| t.ptr_eq(&task)) {
			staging.push(task);
		}
	}

	/// Move every staged task out, leaving the staging set empty.
	pub fn drain_staged_tasks(&self) -> Vec<Task> {
		self.tasks_staging.take()
	}

	/// Snapshot of the pending task set.
	pub fn pending_tasks(&self) -> Vec<Task> {
		self.tasks_pending.borrow().clone()
	}

	/// Record that a style with this id was emitted for the container.
	pub fn add_style_id(&self, id: impl Into<String>) {
		self.style_ids.borrow_mut().insert(id.into());
	}

	/// Whether a style id was already recorded.
	pub fn has_style_id(&self, id: &str) -> bool {
		self.style_ids.borrow().contains(id)
	}

	/// Record that the container listens for an event name.
	pub fn register_event(&self, name: impl Into<String>) {
		self.events.borrow_mut().insert(name.into());
	}

	/// The listened event names, sorted.
	pub fn events(&self) -> Vec<String> {
		self.events.borrow().iter().cloned().collect()
	}

	// Serializer read surface -----------------------------------------------

	/// Intern a literal into the text dedup namespace, returning its id.
	pub fn intern_text(&self, text: &str) -> String {
		self.texts.borrow_mut().intern(text).to_owned()
	}

	/// Ordered object-map view: identifier plus the live value, if it is
	/// still alive. Aliased entries appear under the placeholder id.
	pub fn objects(&self) -> Vec<(String, Option<Value>)> {
		self.objs
			.borrow()
			.iter()
			.map(|(_, weak, id)| (id.to_owned(), weak.upgrade()))
			.collect()
	}

	/// Ordered text-table view as (literal, identifier) pairs.
	pub fn texts(&self) -> Vec<(String, String)> {
		self.texts
			.borrow()
			.iter()
			.map(|(text, id)| (text.to_owned(), id.to_owned()))
			.collect()
	}

	/// Snapshot of the subscription list.
	pub fn subscriptions(&self) -> Vec<Subscription> {
		self.subs.list()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::markers::CONTAINER_ATTR_BASE;
	use grappelli_core::Obj;

	#[test]
	fn test_base_path_defaults_to_slash() {
		let state = ContainerState::new(Element::new("div"));
		assert_eq!(state.base_path(), "/");
	}

	#[test]
	fn test_base_path_read_once_from_attribute() {
		let root = Element::new("div");
		root.set_attr(CONTAINER_ATTR_BASE, "/app/");
		let state = ContainerState::new(root.clone());
		assert_eq!(state.base_path(), "/app/");
		// later attribute edits do not retroactively change the container
		root.set_attr(CONTAINER_ATTR_BASE, "/other/");
		assert_eq!(state.base_path(), "/app/");
	}

	#[test]
	fn test_enqueue_task_dedups_by_handle() {
		let state = ContainerState::new(Element::new("div"));
		let task = Task::new("refresh");
		state.enqueue_task(task.clone());
		state.enqueue_task(task);
		assert_eq!(state.pending_tasks().len(), 1);
	}

	#[test]
	fn test_drain_staged_tasks_empties_staging() {
		let state = ContainerState::new(Element::new("div"));
		state.stage_task(Task::new("a"));
		state.stage_task(Task::new("b"));
		assert_eq!(state.drain_staged_tasks().len(), 2);
		assert!(state.drain_staged_tasks().is_empty());
	}

	#[test]
	fn test_style_and_event_bookkeeping() {
		let state = ContainerState::new(Element::new("div"));
		state.add_style_id("s0");
		assert!(state.has_style_id("s0"));
		assert!(!state.has_style_id("s1"));
		state.register_event("click");
		state.register_event("click");
		assert_eq!(state.events(), vec!["click"]);
	}

	#[test]
	fn test_bind_ref_rejects_plain_values() {
		let state = ContainerState::new(Element::new("div"));
		let element = Element::new("input");
		let err = state
			.bind_ref(&Value::from(Obj::new()), &element)
			.expect_err("plain objects are not bindable");
		assert_eq!(err, HydrateError::InvalidBindingTarget("obj".to_string()));
		assert!(state.ref_bindings().is_empty());
	}

	#[test]
	fn test_bind_ref_accepts_task_and_store() {
		let state = ContainerState::new(Element::new("div"));
		let element = Element::new("input");
		state
			.bind_ref(&Value::from(Task::new("on_input")), &element)
			.expect("tasks are callable");
		state
			.bind_ref(
				&Value::from(grappelli_core::Store::new(Obj::new())),
				&element,
			)
			.expect("stores are settable");
		assert_eq!(state.ref_bindings().len(), 2);
	}
}
