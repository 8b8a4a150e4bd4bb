//! Element handles and per-element context records.
//!
//! An [`Element`] stands in for a host-document node: a tag, attributes,
//! children, and a context record. The context record is where the
//! rendering side deposits the element's assigned identifier; the identity
//! core only ever reads it. Elements never receive identifiers from the
//! general object namespace.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Per-element context record.
///
/// Holds the identifier the rendering pass assigned to this element, if
/// any. An element without a context-assigned id is legal; lookups
/// through the identity core report it as a data-integrity warning and
/// return no identifier.
#[derive(Debug, Clone, Default)]
pub struct ElementCtx {
	id: Option<String>,
}

impl ElementCtx {
	/// The context-assigned element identifier, if one was assigned.
	pub fn id(&self) -> Option<&str> {
		self.id.as_deref()
	}

	/// Assign the element identifier.
	pub fn set_id(&mut self, id: impl Into<String>) {
		self.id = Some(id.into());
	}
}

/// An element handle.
///
/// Clones share the same underlying node; identity follows the shared
/// allocation, not the tag or attributes.
#[derive(Debug, Clone)]
pub struct Element {
	inner: Rc<ElementInner>,
}

#[derive(Debug)]
pub struct ElementInner {
	tag: String,
	attrs: RefCell<BTreeMap<String, String>>,
	children: RefCell<Vec<Element>>,
	ctx: RefCell<ElementCtx>,
}

impl Element {
	/// Create a new element with the given tag name.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			inner: Rc::new(ElementInner {
				tag: tag.into(),
				attrs: RefCell::new(BTreeMap::new()),
				children: RefCell::new(Vec::new()),
				ctx: RefCell::new(ElementCtx::default()),
			}),
		}
	}

	/// The element's tag name.
	pub fn tag(&self) -> &str {
		&self.inner.tag
	}

	/// Read an attribute value.
	pub fn attr(&self, name: &str) -> Option<String> {
		self.inner.attrs.borrow().get(name).cloned()
	}

	/// Set an attribute, replacing any previous value.
	pub fn set_attr(&self, name: impl Into<String>, value: impl Into<String>) {
		self.inner
			.attrs
			.borrow_mut()
			.insert(name.into(), value.into());
	}

	/// Append a child element.
	pub fn append_child(&self, child: Element) {
		self.inner.children.borrow_mut().push(child);
	}

	/// Snapshot of the current children.
	pub fn children(&self) -> Vec<Element> {
		self.inner.children.borrow().clone()
	}

	/// The context-assigned element identifier, if any.
	pub fn ctx_id(&self) -> Option<String> {
		self.inner.ctx.borrow().id().map(str::to_owned)
	}

	/// Assign the element identifier on the context record.
	pub fn set_ctx_id(&self, id: impl Into<String>) {
		self.inner.ctx.borrow_mut().set_id(id);
	}

	/// Whether two handles refer to the same underlying node.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// Stable per-node address used for identity-keyed maps.
	pub fn addr(&self) -> usize {
		Rc::as_ptr(&self.inner) as usize
	}

	/// Weak back-reference that does not extend the node's lifetime.
	pub fn downgrade(&self) -> Weak<ElementInner> {
		Rc::downgrade(&self.inner)
	}

	pub(crate) fn from_inner(inner: Rc<ElementInner>) -> Self {
		Self { inner }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_element_tag_and_attrs() {
		let el = Element::new("div");
		assert_eq!(el.tag(), "div");
		assert_eq!(el.attr("class"), None);
		el.set_attr("class", "container");
		assert_eq!(el.attr("class").as_deref(), Some("container"));
	}

	#[test]
	fn test_element_ctx_id_roundtrip() {
		let el = Element::new("section");
		assert_eq!(el.ctx_id(), None);
		el.set_ctx_id("h3");
		assert_eq!(el.ctx_id().as_deref(), Some("h3"));
	}

	#[test]
	fn test_element_children() {
		let parent = Element::new("ul");
		let child = Element::new("li");
		parent.append_child(child.clone());
		let children = parent.children();
		assert_eq!(children.len(), 1);
		assert!(children[0].ptr_eq(&child));
	}

	#[test]
	fn test_element_identity_follows_allocation() {
		let a = Element::new("div");
		let b = a.clone();
		let c = Element::new("div");
		assert!(a.ptr_eq(&b));
		assert!(!a.ptr_eq(&c));
	}
}
