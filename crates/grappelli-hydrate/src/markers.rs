//! Snapshot markers and attribute conventions.
//!
//! The host document carries two attributes this core reads: the
//! container root's base path and each element's assigned identifier.
//! The prefixes and suffixes below are part of the persisted identifier
//! format; changing any of them invalidates existing snapshots.

use grappelli_core::Element;

/// Attribute on the container root holding the base path.
pub const CONTAINER_ATTR_BASE: &str = "data-grp-base";

/// Attribute holding an element's assigned identifier.
pub const ELEMENT_ATTR_ID: &str = "data-grp-id";

/// Base path used when the container root carries no base attribute.
pub const DEFAULT_BASE_PATH: &str = "/";

/// Leading prefix marking an element reference.
pub const ELEMENT_ID_PREFIX: char = '#';

/// Leading prefix marking a dedup-text reference.
pub const TEXT_ID_PREFIX: char = '*';

/// Trailing suffix marking a fulfilled deferred.
pub const SUFFIX_FULFILLED: char = '~';

/// Trailing suffix marking a rejected (or otherwise non-plain) settlement.
pub const SUFFIX_REJECTED: char = '_';

/// Trailing suffix marking a store wrapper.
pub const SUFFIX_STORE: char = '!';

/// Assign an element identifier, stamping both the per-element context
/// record and the host-document attribute.
pub fn assign_element_id(element: &Element, id: impl Into<String>) {
	let id = id.into();
	element.set_ctx_id(id.clone());
	element.set_attr(ELEMENT_ATTR_ID, id);
}

/// Read the container base path from the root element.
///
/// Falls back to [`DEFAULT_BASE_PATH`] when the attribute is absent.
pub fn read_base_path(root: &Element) -> String {
	root.attr(CONTAINER_ATTR_BASE)
		.unwrap_or_else(|| DEFAULT_BASE_PATH.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_assign_element_id_stamps_ctx_and_attr() {
		let el = Element::new("div");
		assign_element_id(&el, "h3");
		assert_eq!(el.ctx_id().as_deref(), Some("h3"));
		assert_eq!(el.attr(ELEMENT_ATTR_ID).as_deref(), Some("h3"));
	}

	#[test]
	fn test_read_base_path_default() {
		let root = Element::new("div");
		assert_eq!(read_base_path(&root), "/");
	}

	#[test]
	fn test_read_base_path_from_attribute() {
		let root = Element::new("div");
		root.set_attr(CONTAINER_ATTR_BASE, "/app/");
		assert_eq!(read_base_path(&root), "/app/");
	}
}
