//! Text dedup table.
//!
//! Repeated literal text is deduplicated into its own identifier
//! namespace, keyed by content rather than by reference. The table is
//! consulted only after the object map reports no match, and its
//! identifiers are emitted with a distinct prefix so a consumer can tell
//! a dedup-table reference from an object reference at decode time.

use indexmap::IndexMap;

use crate::idcodec;

/// Content-keyed table of deduplicated literal text.
#[derive(Debug, Default)]
pub struct TextTable {
	entries: IndexMap<String, String>,
}

impl TextTable {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Look up the identifier for a literal. Pure read.
	pub fn lookup(&self, text: &str) -> Option<&str> {
		self.entries.get(text).map(String::as_str)
	}

	/// Return the existing identifier for a literal, or assign the next
	/// one from this table's own dense counter.
	pub fn intern(&mut self, text: &str) -> &str {
		if !self.entries.contains_key(text) {
			let id = idcodec::encode(self.entries.len() as u64);
			self.entries.insert(text.to_owned(), id);
		}
		&self.entries[text]
	}

	/// Number of interned literals.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the table holds no literals.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Ordered view of the table, oldest literal first.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(text, id)| (text.as_str(), id.as_str()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_intern_is_idempotent() {
		let mut table = TextTable::new();
		let first = table.intern("hello").to_owned();
		let second = table.intern("hello").to_owned();
		assert_eq!(first, second);
		assert_eq!(table.len(), 1);
	}

	#[test]
	fn test_intern_allocates_densely() {
		let mut table = TextTable::new();
		assert_eq!(table.intern("a"), "0");
		assert_eq!(table.intern("b"), "1");
		assert_eq!(table.intern("a"), "0");
		assert_eq!(table.intern("c"), "2");
	}

	#[test]
	fn test_lookup_misses_before_intern() {
		let mut table = TextTable::new();
		assert_eq!(table.lookup("missing"), None);
		table.intern("missing");
		assert_eq!(table.lookup("missing"), Some("0"));
	}

	#[test]
	fn test_iter_preserves_insertion_order() {
		let mut table = TextTable::new();
		table.intern("z");
		table.intern("a");
		let literals: Vec<&str> = table.iter().map(|(text, _)| text).collect();
		assert_eq!(literals, vec!["z", "a"]);
	}
}
