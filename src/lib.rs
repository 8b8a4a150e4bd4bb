//! # Grappelli
//!
//! A resumable-state core for server-rendered applications.
//!
//! Grappelli assigns stable, compact textual identifiers to a live runtime
//! value graph (plain objects, element handles, deferred values, reactive
//! stores, and deduplicated text) so that one container's state can be
//! frozen into a flat snapshot and later reconstituted by reference rather
//! than by value. Applications resume where the server paused instead of
//! re-running their initialization logic.
//!
//! ## Crates
//!
//! - [`grappelli_core`]: the runtime value-graph model: the closed
//!   [`Value`] variant set, element handles with per-element context
//!   records, deferred values with a non-blocking settlement peek,
//!   reactive stores, and lazy-invocation handles.
//! - [`grappelli_hydrate`]: the identity core: identifier codec,
//!   canonicalization, the append-only object identity map, element and
//!   text resolution, and the per-container state record.
//!
//! ## Quick Example
//!
//! ```
//! use grappelli::{ContainerRegistry, Element, Obj, Value};
//!
//! let root = Element::new("div");
//! let registry = ContainerRegistry::new();
//! let container = registry.get_or_create(&root);
//!
//! let state = Value::from(Obj::new());
//! container.add_object_roots(&[state.clone()], &[]);
//! assert_eq!(container.get_object_id(&state).as_deref(), Some("0"));
//! ```

pub use grappelli_core::{
	Deferred, Element, ElementCtx, Obj, Settlement, Store, StoreId, Task, Value, ValueKey,
	WeakValue,
};
pub use grappelli_hydrate::{
	Canonical, CanonicalKind, ContainerRegistry, ContainerState, ElementIdResolver, HydrateError,
	HydrateResult, ObjectIdMap, RefBinding, Subscription, SubscriptionManager, TextTable,
	canonicalize, idcodec, markers,
};

/// Convenience re-exports for the common surface.
pub mod prelude {
	pub use grappelli_core::{Deferred, Element, Obj, Store, Task, Value};
	pub use grappelli_hydrate::{ContainerRegistry, ContainerState, HydrateError, HydrateResult};
}
