//! The closed value variant set and its identity handles.
//!
//! Every value reachable in a live graph is one of the [`Value`] variants;
//! downstream dispatch matches on this set instead of probing shapes at
//! runtime. Reference-bearing variants expose a stable [`ValueKey`] and a
//! [`WeakValue`] back-reference; scalars have neither and never enter the
//! identity map.

use std::rc::{Rc, Weak};

use crate::deferred::{Deferred, DeferredInner};
use crate::element::{Element, ElementInner};
use crate::obj::{Obj, ObjInner};
use crate::store::{Store, StoreInner};
use crate::task::{Task, TaskInner};

/// A value in the live runtime graph.
#[derive(Debug, Clone, Default)]
pub enum Value {
	/// The "no value" placeholder. All occurrences share one identity and,
	/// once bulk registration has run, one identifier.
	#[default]
	Undefined,
	/// JSON-like leaf data with no reference identity.
	Scalar(serde_json::Value),
	/// Shared literal text, deduplicated through the text table namespace.
	Text(Rc<str>),
	/// A plain object node.
	Obj(Obj),
	/// An element handle.
	Element(Element),
	/// A promise-like value; pending ones are not yet serializable.
	Deferred(Deferred),
	/// A reactive proxy, transparent for identity purposes.
	Store(Store),
	/// A deferred-invocation handle.
	Task(Task),
}

impl Value {
	/// Construct a shared text value.
	pub fn text(text: impl AsRef<str>) -> Self {
		Self::Text(Rc::from(text.as_ref()))
	}

	/// Short kind label used in diagnostics and error messages.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Undefined => "undefined",
			Self::Scalar(_) => "scalar",
			Self::Text(_) => "text",
			Self::Obj(_) => "obj",
			Self::Element(_) => "element",
			Self::Deferred(_) => "deferred",
			Self::Store(_) => "store",
			Self::Task(_) => "task",
		}
	}

	/// The value's stable identity key, or `None` for scalars.
	pub fn key(&self) -> Option<ValueKey> {
		self.identity().map(|(key, _)| key)
	}

	/// The value's identity key plus a weak back-reference.
	///
	/// Scalars carry no reference identity and return `None`.
	pub fn identity(&self) -> Option<(ValueKey, WeakValue)> {
		match self {
			Self::Undefined => Some((ValueKey::Undefined, WeakValue::Undefined)),
			Self::Scalar(_) => None,
			Self::Text(text) => Some((
				ValueKey::Text(Rc::as_ptr(text) as *const u8 as usize),
				WeakValue::Text(Rc::downgrade(text)),
			)),
			Self::Obj(obj) => Some((ValueKey::Obj(obj.addr()), WeakValue::Obj(obj.downgrade()))),
			Self::Element(el) => Some((
				ValueKey::Element(el.addr()),
				WeakValue::Element(el.downgrade()),
			)),
			Self::Deferred(d) => Some((
				ValueKey::Deferred(d.addr()),
				WeakValue::Deferred(d.downgrade()),
			)),
			Self::Store(s) => Some((ValueKey::Store(s.addr()), WeakValue::Store(s.downgrade()))),
			Self::Task(t) => Some((ValueKey::Task(t.addr()), WeakValue::Task(t.downgrade()))),
		}
	}
}

impl From<Obj> for Value {
	fn from(obj: Obj) -> Self {
		Self::Obj(obj)
	}
}

impl From<Element> for Value {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}

impl From<Deferred> for Value {
	fn from(deferred: Deferred) -> Self {
		Self::Deferred(deferred)
	}
}

impl From<Store> for Value {
	fn from(store: Store) -> Self {
		Self::Store(store)
	}
}

impl From<Task> for Value {
	fn from(task: Task) -> Self {
		Self::Task(task)
	}
}

impl From<serde_json::Value> for Value {
	fn from(scalar: serde_json::Value) -> Self {
		Self::Scalar(scalar)
	}
}

/// Stable identity key for a reference-bearing value.
///
/// Keys are derived from the value's shared allocation, so clones of one
/// node agree and structurally equal but distinct nodes differ. The key
/// itself owns nothing and never extends a value's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKey {
	/// The shared placeholder identity.
	Undefined,
	/// A plain object node.
	Obj(usize),
	/// A shared text allocation.
	Text(usize),
	/// An element handle.
	Element(usize),
	/// A deferred cell.
	Deferred(usize),
	/// A store proxy node.
	Store(usize),
	/// A deferred-invocation handle.
	Task(usize),
}

/// Weak back-reference held by the identity map.
///
/// Upgrading yields the live value while it still exists elsewhere; a
/// failed upgrade means the graph dropped the value after registration.
#[derive(Debug, Clone)]
pub enum WeakValue {
	/// The placeholder has no allocation to reference.
	Undefined,
	/// Weak reference to an object node.
	Obj(Weak<ObjInner>),
	/// Weak reference to a shared text allocation.
	Text(Weak<str>),
	/// Weak reference to an element node.
	Element(Weak<ElementInner>),
	/// Weak reference to a deferred cell.
	Deferred(Weak<DeferredInner>),
	/// Weak reference to a store proxy node.
	Store(Weak<StoreInner>),
	/// Weak reference to a task handle.
	Task(Weak<TaskInner>),
}

impl WeakValue {
	/// Upgrade to the live value, if it is still alive.
	pub fn upgrade(&self) -> Option<Value> {
		match self {
			Self::Undefined => Some(Value::Undefined),
			Self::Obj(weak) => weak.upgrade().map(|inner| Value::Obj(Obj::from_inner(inner))),
			Self::Text(weak) => weak.upgrade().map(Value::Text),
			Self::Element(weak) => weak
				.upgrade()
				.map(|inner| Value::Element(Element::from_inner(inner))),
			Self::Deferred(weak) => weak
				.upgrade()
				.map(|inner| Value::Deferred(Deferred::from_inner(inner))),
			Self::Store(weak) => weak
				.upgrade()
				.map(|inner| Value::Store(Store::from_inner(inner))),
			Self::Task(weak) => weak
				.upgrade()
				.map(|inner| Value::Task(Task::from_inner(inner))),
		}
	}
}
