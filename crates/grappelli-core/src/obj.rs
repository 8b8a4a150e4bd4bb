//! Plain object nodes.
//!
//! An [`Obj`] is the graph's ordinary reference value: a shared, mutable
//! bag of named properties. Clones share the same underlying node, so two
//! clones compare equal by identity and receive the same snapshot
//! identifier.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::value::Value;

/// A reference-counted plain object node.
///
/// `Obj` implements `Clone` by sharing the underlying node, the same way
/// the reactive system shares signal state. Property order is stable
/// (sorted by name) so serialization passes see a deterministic view.
#[derive(Debug, Clone, Default)]
pub struct Obj {
	inner: Rc<ObjInner>,
}

#[derive(Debug, Default)]
pub struct ObjInner {
	props: RefCell<BTreeMap<String, Value>>,
}

impl Obj {
	/// Create a new empty object node.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create an object node from an iterator of properties.
	pub fn from_props<I, K>(props: I) -> Self
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		let obj = Self::new();
		for (name, value) in props {
			obj.set(name, value);
		}
		obj
	}

	/// Set a property, replacing any previous value under the same name.
	pub fn set(&self, name: impl Into<String>, value: Value) {
		self.inner.props.borrow_mut().insert(name.into(), value);
	}

	/// Get a property value by name.
	pub fn get(&self, name: &str) -> Option<Value> {
		self.inner.props.borrow().get(name).cloned()
	}

	/// Remove a property, returning its previous value.
	pub fn remove(&self, name: &str) -> Option<Value> {
		self.inner.props.borrow_mut().remove(name)
	}

	/// Property names in stable order.
	pub fn keys(&self) -> Vec<String> {
		self.inner.props.borrow().keys().cloned().collect()
	}

	/// Number of properties.
	pub fn len(&self) -> usize {
		self.inner.props.borrow().len()
	}

	/// Whether the object has no properties.
	pub fn is_empty(&self) -> bool {
		self.inner.props.borrow().is_empty()
	}

	/// Whether two handles refer to the same underlying node.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// Stable per-node address used for identity-keyed maps.
	pub fn addr(&self) -> usize {
		Rc::as_ptr(&self.inner) as usize
	}

	/// Weak back-reference that does not extend the node's lifetime.
	pub fn downgrade(&self) -> Weak<ObjInner> {
		Rc::downgrade(&self.inner)
	}

	pub(crate) fn from_inner(inner: Rc<ObjInner>) -> Self {
		Self { inner }
	}
}
