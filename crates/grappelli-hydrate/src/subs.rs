//! Subscription manager.
//!
//! The container state record constructs one subscription manager and
//! hands the same handle to every collaborator that needs it. The manager
//! records which deferred-invocation handles re-run when a tracked value
//! changes; the scheduling algorithm itself lives elsewhere. This is the
//! bookkeeping the serializer reads when emitting the subscription list.

use std::cell::RefCell;
use std::rc::Rc;

use grappelli_core::{Task, ValueKey};

/// One subscription: a task re-run when its target value changes.
#[derive(Debug, Clone)]
pub struct Subscription {
	target: ValueKey,
	subscriber: Task,
}

impl Subscription {
	/// Identity key of the tracked value.
	pub fn target(&self) -> ValueKey {
		self.target
	}

	/// The subscribed task.
	pub fn subscriber(&self) -> &Task {
		&self.subscriber
	}
}

/// Shared subscription bookkeeping for one container.
///
/// Clones share the same underlying list, so the container and its
/// collaborators observe one consistent view.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionManager {
	inner: Rc<RefCell<Vec<Subscription>>>,
}

impl SubscriptionManager {
	/// Create an empty manager.
	pub fn new() -> Self {
		Self::default()
	}

	/// Record that `subscriber` tracks `target`.
	///
	/// Duplicate pairs are ignored; returns whether a new subscription was
	/// recorded.
	pub fn add(&self, target: ValueKey, subscriber: Task) -> bool {
		let mut subs = self.inner.borrow_mut();
		let present = subs
			.iter()
			.any(|s| s.target == target && s.subscriber.ptr_eq(&subscriber));
		if present {
			return false;
		}
		subs.push(Subscription { target, subscriber });
		true
	}

	/// Tasks subscribed to `target`.
	pub fn of(&self, target: &ValueKey) -> Vec<Task> {
		self.inner
			.borrow()
			.iter()
			.filter(|s| s.target == *target)
			.map(|s| s.subscriber.clone())
			.collect()
	}

	/// Drop every subscription held by `subscriber`.
	pub fn remove_subscriber(&self, subscriber: &Task) {
		self.inner
			.borrow_mut()
			.retain(|s| !s.subscriber.ptr_eq(subscriber));
	}

	/// Drop every subscription tracking `target`.
	pub fn clear_target(&self, target: &ValueKey) {
		self.inner.borrow_mut().retain(|s| s.target != *target);
	}

	/// Number of recorded subscriptions.
	pub fn len(&self) -> usize {
		self.inner.borrow().len()
	}

	/// Whether no subscriptions are recorded.
	pub fn is_empty(&self) -> bool {
		self.inner.borrow().is_empty()
	}

	/// Snapshot of the subscription list, in recording order.
	pub fn list(&self) -> Vec<Subscription> {
		self.inner.borrow().clone()
	}
}
