//! Deferred (promise-like) values.
//!
//! A [`Deferred`] is a value that may not have settled yet. The identity
//! core never awaits one: it peeks at the settlement state synchronously
//! and treats a pending deferred as not-yet-serializable. Settlement is a
//! one-way transition; once settled, a deferred never changes again.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::value::Value;

/// Settlement state of a [`Deferred`].
#[derive(Debug, Clone, Default)]
pub enum Settlement {
	/// Not settled yet. Pending deferreds are never assigned identifiers.
	#[default]
	Pending,
	/// Settled successfully with a payload value.
	Fulfilled(Value),
	/// Settled with an error payload.
	Rejected(Value),
}

impl Settlement {
	/// Whether this settlement is still pending.
	pub fn is_pending(&self) -> bool {
		matches!(self, Self::Pending)
	}
}

/// A promise-like value with a non-blocking settlement peek.
///
/// Clones share the same underlying cell, so settling one handle settles
/// them all.
#[derive(Debug, Clone, Default)]
pub struct Deferred {
	inner: Rc<DeferredInner>,
}

#[derive(Debug, Default)]
pub struct DeferredInner {
	state: RefCell<Settlement>,
}

impl Deferred {
	/// Create a deferred that has not settled.
	pub fn pending() -> Self {
		Self::default()
	}

	/// Create a deferred already fulfilled with `value`.
	pub fn fulfilled(value: Value) -> Self {
		let deferred = Self::pending();
		deferred.resolve(value);
		deferred
	}

	/// Create a deferred already rejected with `error`.
	pub fn rejected(error: Value) -> Self {
		let deferred = Self::pending();
		deferred.reject(error);
		deferred
	}

	/// Settle with a payload value.
	///
	/// Returns `true` if this call performed the transition; settling an
	/// already-settled deferred is a no-op.
	pub fn resolve(&self, value: Value) -> bool {
		self.settle(Settlement::Fulfilled(value))
	}

	/// Settle with an error payload.
	///
	/// Returns `true` if this call performed the transition.
	pub fn reject(&self, error: Value) -> bool {
		self.settle(Settlement::Rejected(error))
	}

	fn settle(&self, settlement: Settlement) -> bool {
		let mut state = self.inner.state.borrow_mut();
		if !state.is_pending() {
			return false;
		}
		*state = settlement;
		true
	}

	/// Peek at the settlement state without blocking.
	pub fn peek(&self) -> Settlement {
		self.inner.state.borrow().clone()
	}

	/// Whether the deferred has not settled yet.
	pub fn is_pending(&self) -> bool {
		self.inner.state.borrow().is_pending()
	}

	/// Whether two handles refer to the same underlying cell.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// Stable per-node address used for identity-keyed maps.
	pub fn addr(&self) -> usize {
		Rc::as_ptr(&self.inner) as usize
	}

	/// Weak back-reference that does not extend the cell's lifetime.
	pub fn downgrade(&self) -> Weak<DeferredInner> {
		Rc::downgrade(&self.inner)
	}

	pub(crate) fn from_inner(inner: Rc<DeferredInner>) -> Self {
		Self { inner }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::obj::Obj;

	#[test]
	fn test_deferred_starts_pending() {
		let deferred = Deferred::pending();
		assert!(deferred.is_pending());
		assert!(deferred.peek().is_pending());
	}

	#[test]
	fn test_deferred_resolve_once() {
		let deferred = Deferred::pending();
		assert!(deferred.resolve(Value::from(Obj::new())));
		assert!(!deferred.resolve(Value::Undefined));
		assert!(matches!(deferred.peek(), Settlement::Fulfilled(_)));
	}

	#[test]
	fn test_deferred_reject_after_resolve_is_noop() {
		let deferred = Deferred::fulfilled(Value::Undefined);
		assert!(!deferred.reject(Value::Undefined));
		assert!(matches!(deferred.peek(), Settlement::Fulfilled(_)));
	}

	#[test]
	fn test_deferred_clone_shares_settlement() {
		let a = Deferred::pending();
		let b = a.clone();
		a.resolve(Value::Undefined);
		assert!(!b.is_pending());
	}
}
