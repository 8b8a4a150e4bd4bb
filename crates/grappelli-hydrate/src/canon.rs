//! Canonicalization resolver.
//!
//! A requested value may be a wrapper around the value that actually owns
//! an identifier slot: a settled deferred stands for its payload, a store
//! stands for its target. Canonicalization unwraps those layers once,
//! accumulating the suffix annotation the serializer emits alongside the
//! base identifier. Pending deferreds short-circuit: they are not yet
//! representable and must never allocate.

use grappelli_core::{Settlement, Value};

use crate::markers::{SUFFIX_FULFILLED, SUFFIX_REJECTED, SUFFIX_STORE};

/// Kind of a canonical value, consumed by downstream dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalKind {
	/// An ordinary identity-bearing value (object, deferred, store, task).
	Plain,
	/// An element handle; identifiers come from the element's context.
	Element,
	/// Literal text; falls back to the dedup table namespace.
	Text,
	/// The shared "no value" placeholder.
	Undefined,
}

/// Outcome of canonicalizing a value.
#[derive(Debug, Clone)]
pub enum Canonical {
	/// The value is a deferred that has not settled; it has no canonical
	/// value yet and the caller must treat it as not representable.
	Pending,
	/// The identity-bearing value plus its suffix annotation.
	Resolved {
		/// The canonical value that owns (or may own) an identifier slot.
		value: Value,
		/// Accumulated suffix characters, in unwrap order.
		suffix: String,
		/// Kind of the canonical value.
		kind: CanonicalKind,
	},
}

/// Resolve a value to its canonical, identity-bearing form.
///
/// Pure apart from the settlement peek; performs no allocation in any
/// identity table and has no side effects.
pub fn canonicalize(value: &Value) -> Canonical {
	let mut suffix = String::new();
	let mut current = value.clone();

	if let Value::Deferred(deferred) = &current {
		match deferred.peek() {
			Settlement::Pending => return Canonical::Pending,
			Settlement::Fulfilled(payload) => {
				suffix.push(SUFFIX_FULFILLED);
				current = payload;
			}
			Settlement::Rejected(payload) => {
				suffix.push(SUFFIX_REJECTED);
				current = payload;
			}
		}
	}

	if let Value::Store(store) = &current {
		suffix.push(SUFFIX_STORE);
		current = Value::Obj(store.target());
	}

	let kind = match &current {
		Value::Element(_) => CanonicalKind::Element,
		Value::Text(_) => CanonicalKind::Text,
		Value::Undefined => CanonicalKind::Undefined,
		_ => CanonicalKind::Plain,
	};

	Canonical::Resolved {
		value: current,
		suffix,
		kind,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use grappelli_core::{Deferred, Element, Obj, Store};

	#[test]
	fn test_plain_value_passes_through() {
		let obj = Value::from(Obj::new());
		match canonicalize(&obj) {
			Canonical::Resolved {
				value,
				suffix,
				kind,
			} => {
				assert_eq!(value.key(), obj.key());
				assert!(suffix.is_empty());
				assert_eq!(kind, CanonicalKind::Plain);
			}
			Canonical::Pending => panic!("plain values are never pending"),
		}
	}

	#[test]
	fn test_pending_deferred_short_circuits() {
		let value = Value::from(Deferred::pending());
		assert!(matches!(canonicalize(&value), Canonical::Pending));
	}

	#[test]
	fn test_fulfilled_deferred_unwraps_to_payload() {
		let payload = Value::from(Obj::new());
		let value = Value::from(Deferred::fulfilled(payload.clone()));
		match canonicalize(&value) {
			Canonical::Resolved { value, suffix, .. } => {
				assert_eq!(value.key(), payload.key());
				assert_eq!(suffix, "~");
			}
			Canonical::Pending => panic!("fulfilled deferred resolves"),
		}
	}

	#[test]
	fn test_rejected_deferred_tags_payload() {
		let error = Value::from(Obj::new());
		let value = Value::from(Deferred::rejected(error.clone()));
		match canonicalize(&value) {
			Canonical::Resolved { value, suffix, .. } => {
				assert_eq!(value.key(), error.key());
				assert_eq!(suffix, "_");
			}
			Canonical::Pending => panic!("rejected deferred resolves"),
		}
	}

	#[test]
	fn test_store_unwraps_to_target() {
		let target = Obj::new();
		let value = Value::from(Store::new(target.clone()));
		match canonicalize(&value) {
			Canonical::Resolved { value, suffix, .. } => {
				assert_eq!(value.key(), Value::from(target).key());
				assert_eq!(suffix, "!");
			}
			Canonical::Pending => panic!("stores resolve"),
		}
	}

	#[test]
	fn test_deferred_store_accumulates_suffixes() {
		let target = Obj::new();
		let store = Store::new(target.clone());
		let value = Value::from(Deferred::fulfilled(Value::from(store)));
		match canonicalize(&value) {
			Canonical::Resolved { value, suffix, .. } => {
				assert_eq!(value.key(), Value::from(target).key());
				assert_eq!(suffix, "~!");
			}
			Canonical::Pending => panic!("settled deferred resolves"),
		}
	}

	#[test]
	fn test_element_kind_detected() {
		let value = Value::from(Element::new("div"));
		match canonicalize(&value) {
			Canonical::Resolved { kind, .. } => assert_eq!(kind, CanonicalKind::Element),
			Canonical::Pending => panic!("elements resolve"),
		}
	}
}
