//! Object identity map.
//!
//! An append-only, insertion-ordered association from canonical values to
//! identifiers. Entries are keyed by reference identity and hold only a
//! weak back-reference, so the map never extends a value's lifetime. The
//! identifier counter is monotonic: allocation order equals first-request
//! order, and alias entries (which share the placeholder identifier) do
//! not advance it.

use grappelli_core::{Value, ValueKey, WeakValue};
use indexmap::IndexMap;

use crate::idcodec;

#[derive(Debug)]
struct ObjEntry {
	id: String,
	value: WeakValue,
}

/// The append-only canonical-value → identifier map.
#[derive(Debug, Default)]
pub struct ObjectIdMap {
	entries: IndexMap<ValueKey, ObjEntry>,
	next: u64,
}

impl ObjectIdMap {
	/// Create an empty map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of entries, alias entries included.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the map holds no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Look up the identifier for a canonical value. Pure read.
	pub fn lookup(&self, key: &ValueKey) -> Option<&str> {
		self.entries.get(key).map(|entry| entry.id.as_str())
	}

	/// Return the existing identifier for `key`, or assign the next one.
	///
	/// Idempotent: a key that already holds an identifier keeps it. Fresh
	/// entries take the current counter value and advance it.
	pub fn allocate(&mut self, key: ValueKey, value: WeakValue) -> &str {
		if !self.entries.contains_key(&key) {
			let id = idcodec::encode(self.next);
			self.next += 1;
			self.entries.insert(key, ObjEntry { id, value });
		}
		&self.entries[&key].id
	}

	/// Insert `key` under an already-issued identifier, without advancing
	/// the counter.
	///
	/// Returns `false` (and leaves the map untouched) when the key already
	/// holds an identifier: mappings are never reassigned.
	pub fn alias(&mut self, key: ValueKey, value: WeakValue, id: &str) -> bool {
		if self.entries.contains_key(&key) {
			return false;
		}
		self.entries.insert(
			key,
			ObjEntry {
				id: id.to_owned(),
				value,
			},
		);
		true
	}

	/// Register a batch of root values, then alias the excluded ones.
	///
	/// Every not-yet-present value in `values` is allocated a fresh
	/// identifier in iteration order on the shared counter. The placeholder
	/// identifier for "no value" is then ensured to exist, and every value
	/// in `excluded` is aliased to it; such values are excluded from
	/// individual serialization but may still be referenced elsewhere.
	/// Values without reference identity are skipped.
	pub fn bulk_register(&mut self, values: &[Value], excluded: &[Value]) {
		for value in values {
			if let Some((key, weak)) = value.identity() {
				self.allocate(key, weak);
			}
		}
		let placeholder = self
			.allocate(ValueKey::Undefined, WeakValue::Undefined)
			.to_owned();
		for value in excluded {
			if let Some((key, weak)) = value.identity() {
				self.alias(key, weak, &placeholder);
			}
		}
	}

	/// The placeholder identifier, once bulk registration has run.
	pub fn placeholder_id(&self) -> Option<&str> {
		self.lookup(&ValueKey::Undefined)
	}

	/// Ordered view of the map, oldest entry first.
	pub fn iter(&self) -> impl Iterator<Item = (&ValueKey, &WeakValue, &str)> {
		self.entries
			.iter()
			.map(|(key, entry)| (key, &entry.value, entry.id.as_str()))
	}
}
