//! Identity-core error types.

use thiserror::Error;

/// Result type for identity operations.
pub type HydrateResult<T> = Result<T, HydrateError>;

/// Errors surfaced by the identity core.
///
/// Both kinds are fatal to the in-progress serialization call and are
/// surfaced to the caller, never retried: the identity map is monotonic,
/// so retrying a missing-identifier lookup cannot change the outcome.
/// A missing *element* identifier is deliberately not an error; it is a
/// recoverable data-integrity warning logged at the lookup site.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum HydrateError {
	/// A value was expected to hold an identifier but none was registered.
	#[error("missing object id for {0} value")]
	MissingObjectId(String),

	/// A reference binding was requested against a value that is neither
	/// callable nor a settable slot.
	#[error("invalid reference-binding target: {0} value")]
	InvalidBindingTarget(String),
}
