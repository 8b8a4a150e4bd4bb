//! Grappelli Hydrate - Snapshot Identity Core
//!
//! This crate owns the object↔identifier mapping a paused container is
//! serialized through. A serializer walks the live value graph and, for
//! every reachable value, asks the container state for an identifier
//! before emitting that value's representation; the flat snapshot then
//! refers to values by identifier rather than by copy.
//!
//! ## Architecture
//!
//! ```text
//! ContainerRegistry ── root element ──► ContainerState
//!                                          │
//!                      ┌───────────────────┼──────────────────┐
//!                      ▼                   ▼                  ▼
//!               ObjectIdMap       ElementIdResolver       TextTable
//!               (canonical           (per-element          (dedup'd
//!                value → id)          context ids)          literals)
//! ```
//!
//! Identifier resolution runs element check → object map → text table,
//! after canonicalization has unwrapped deferreds and stores to the
//! identity-bearing value.
//!
//! ## Identifier format
//!
//! Lowercase base-36 digits, no separators; an optional trailing suffix
//! (`~` fulfilled deferred, `_` rejected, `!` store) and an optional
//! leading prefix (`#` element reference, `*` dedup-text reference).
//! The format is bit-exact: snapshots are persisted artifacts.

mod canon;
mod container;
mod elements;
mod error;
mod objmap;
mod registry;
mod subs;
mod text;

pub mod idcodec;
pub mod markers;

pub use canon::{Canonical, CanonicalKind, canonicalize};
pub use container::{ContainerState, RefBinding};
pub use elements::ElementIdResolver;
pub use error::{HydrateError, HydrateResult};
pub use objmap::ObjectIdMap;
pub use registry::ContainerRegistry;
pub use subs::{Subscription, SubscriptionManager};
pub use text::TextTable;
