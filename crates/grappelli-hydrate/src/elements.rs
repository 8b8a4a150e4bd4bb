//! Element identity resolver.
//!
//! Element identifiers are never allocated by the identity core: they are
//! borrowed from each element's per-element context record and cached here
//! to avoid repeated lookups. An element whose context has no assigned id
//! is a data-integrity warning, not a failure; the warning fires once per
//! element because the miss is cached too.

use std::collections::HashMap;

use grappelli_core::Element;
use tracing::warn;

/// Cache over per-element context identifiers.
#[derive(Debug, Default)]
pub struct ElementIdResolver {
	cache: HashMap<usize, Option<String>>,
}

impl ElementIdResolver {
	/// Create an empty resolver.
	pub fn new() -> Self {
		Self::default()
	}

	/// The element's context-assigned identifier, if it has one.
	///
	/// The per-element context is consulted at most once per element; both
	/// hits and misses are cached for the resolver's lifetime.
	pub fn resolve(&mut self, element: &Element) -> Option<String> {
		if let Some(cached) = self.cache.get(&element.addr()) {
			return cached.clone();
		}
		let id = element.ctx_id();
		if id.is_none() {
			warn!(tag = element.tag(), "element has no context-assigned id");
		}
		self.cache.insert(element.addr(), id.clone());
		id
	}

	/// Number of elements the resolver has seen.
	pub fn len(&self) -> usize {
		self.cache.len()
	}

	/// Whether the resolver has seen no elements.
	pub fn is_empty(&self) -> bool {
		self.cache.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_resolve_reads_context_id() {
		let mut resolver = ElementIdResolver::new();
		let el = Element::new("div");
		el.set_ctx_id("h3");
		assert_eq!(resolver.resolve(&el).as_deref(), Some("h3"));
	}

	#[test]
	fn test_context_consulted_only_once() {
		let mut resolver = ElementIdResolver::new();
		let el = Element::new("div");
		el.set_ctx_id("h3");
		assert_eq!(resolver.resolve(&el).as_deref(), Some("h3"));
		// later context changes are not observed through the cache
		el.set_ctx_id("changed");
		assert_eq!(resolver.resolve(&el).as_deref(), Some("h3"));
		assert_eq!(resolver.len(), 1);
	}

	#[test]
	fn test_miss_is_cached() {
		let mut resolver = ElementIdResolver::new();
		let el = Element::new("span");
		assert_eq!(resolver.resolve(&el), None);
		// an id assigned after the first miss is not picked up
		el.set_ctx_id("late");
		assert_eq!(resolver.resolve(&el), None);
	}

	#[test]
	fn test_distinct_elements_cached_separately() {
		let mut resolver = ElementIdResolver::new();
		let a = Element::new("div");
		let b = Element::new("div");
		a.set_ctx_id("a0");
		b.set_ctx_id("b0");
		assert_eq!(resolver.resolve(&a).as_deref(), Some("a0"));
		assert_eq!(resolver.resolve(&b).as_deref(), Some("b0"));
		assert_eq!(resolver.len(), 2);
	}
}
