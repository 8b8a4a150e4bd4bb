//! Deferred-invocation handles.
//!
//! A [`Task`] is a callable reference awaiting resolution: a symbol name,
//! the values it captured at creation, and, once loaded, the actual
//! callback. Tasks can legitimately surface inside a graph before the
//! root-registration pass reaches them, which is why the identity core
//! carries a narrow allocate-on-demand path for this kind and no other.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::value::Value;

type TaskFn = Rc<dyn Fn(&[Value]) -> Value>;

/// A deferred-invocation handle.
///
/// Clones share the same underlying handle, so resolving one clone
/// resolves them all.
#[derive(Clone)]
pub struct Task {
	inner: Rc<TaskInner>,
}

pub struct TaskInner {
	symbol: String,
	captures: RefCell<Vec<Value>>,
	resolved: RefCell<Option<TaskFn>>,
}

impl Task {
	/// Create an unresolved handle for `symbol`.
	pub fn new(symbol: impl Into<String>) -> Self {
		Self::with_captures(symbol, Vec::new())
	}

	/// Create an unresolved handle for `symbol` with captured values.
	pub fn with_captures(symbol: impl Into<String>, captures: Vec<Value>) -> Self {
		Self {
			inner: Rc::new(TaskInner {
				symbol: symbol.into(),
				captures: RefCell::new(captures),
				resolved: RefCell::new(None),
			}),
		}
	}

	/// The symbol this handle refers to.
	pub fn symbol(&self) -> &str {
		&self.inner.symbol
	}

	/// Snapshot of the captured values.
	pub fn captures(&self) -> Vec<Value> {
		self.inner.captures.borrow().clone()
	}

	/// Capture an additional value.
	pub fn capture(&self, value: Value) {
		self.inner.captures.borrow_mut().push(value);
	}

	/// Attach the loaded callback.
	pub fn resolve<F>(&self, f: F)
	where
		F: Fn(&[Value]) -> Value + 'static,
	{
		*self.inner.resolved.borrow_mut() = Some(Rc::new(f));
	}

	/// Whether the callback has been loaded.
	pub fn is_resolved(&self) -> bool {
		self.inner.resolved.borrow().is_some()
	}

	/// Invoke the callback over the captured values.
	///
	/// Returns `None` while the handle is unresolved.
	pub fn invoke(&self) -> Option<Value> {
		let f = self.inner.resolved.borrow().clone()?;
		let captures = self.inner.captures.borrow();
		Some(f(&captures))
	}

	/// Whether two handles refer to the same underlying node.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// Stable per-node address used for identity-keyed maps.
	pub fn addr(&self) -> usize {
		Rc::as_ptr(&self.inner) as usize
	}

	/// Weak back-reference that does not extend the handle's lifetime.
	pub fn downgrade(&self) -> Weak<TaskInner> {
		Rc::downgrade(&self.inner)
	}

	pub(crate) fn from_inner(inner: Rc<TaskInner>) -> Self {
		Self { inner }
	}
}

impl fmt::Debug for Task {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Task")
			.field("symbol", &self.inner.symbol)
			.field("captures", &self.inner.captures.borrow().len())
			.field("resolved", &self.is_resolved())
			.finish()
	}
}

impl fmt::Debug for TaskInner {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TaskInner")
			.field("symbol", &self.symbol)
			.field("resolved", &"<function>")
			.finish()
	}
}
