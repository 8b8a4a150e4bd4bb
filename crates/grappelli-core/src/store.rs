//! Reactive stores.
//!
//! A [`Store`] is the graph's reactive proxy: reads and writes pass
//! through to a target [`Obj`], and subscription bookkeeping lives with
//! the owning container's subscription manager, keyed by the store's id.
//! For identity purposes a store is transparent: the identity core
//! unwraps it to its target and tags the identifier with a suffix.

use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::obj::Obj;
use crate::value::Value;

/// Unique identifier for a store, allocated from a process-wide counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreId(usize);

impl StoreId {
	/// Allocate a fresh id.
	pub fn new() -> Self {
		static COUNTER: AtomicUsize = AtomicUsize::new(0);
		Self(COUNTER.fetch_add(1, Ordering::Relaxed))
	}

	/// The raw counter value.
	pub fn get(self) -> usize {
		self.0
	}
}

impl Default for StoreId {
	fn default() -> Self {
		Self::new()
	}
}

/// A reactive proxy over a target object.
///
/// Clones share the same proxy node. The proxy itself never owns state
/// beyond its id and target handle; property reads and writes are
/// forwarded to the target.
#[derive(Debug, Clone)]
pub struct Store {
	inner: Rc<StoreInner>,
}

#[derive(Debug)]
pub struct StoreInner {
	id: StoreId,
	target: Obj,
}

impl Store {
	/// Create a proxy over `target`.
	pub fn new(target: Obj) -> Self {
		Self {
			inner: Rc::new(StoreInner {
				id: StoreId::new(),
				target,
			}),
		}
	}

	/// The store's id, used by subscription bookkeeping.
	pub fn id(&self) -> StoreId {
		self.inner.id
	}

	/// Unwrap to the underlying target object.
	pub fn target(&self) -> Obj {
		self.inner.target.clone()
	}

	/// Read a property through the proxy.
	pub fn get(&self, name: &str) -> Option<Value> {
		self.inner.target.get(name)
	}

	/// Write a property through the proxy.
	pub fn set(&self, name: impl Into<String>, value: Value) {
		self.inner.target.set(name, value);
	}

	/// Whether two handles refer to the same proxy node.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// Stable per-node address used for identity-keyed maps.
	pub fn addr(&self) -> usize {
		Rc::as_ptr(&self.inner) as usize
	}

	/// Weak back-reference that does not extend the proxy's lifetime.
	pub fn downgrade(&self) -> Weak<StoreInner> {
		Rc::downgrade(&self.inner)
	}

	pub(crate) fn from_inner(inner: Rc<StoreInner>) -> Self {
		Self { inner }
	}
}
