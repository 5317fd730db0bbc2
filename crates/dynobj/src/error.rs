//! Error types for property and prototype operations.

use thiserror::Error;

/// Errors from mutating a property store.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PropertyError {
    /// `set` was called with a zero-length value. Per the data model, a
    /// stored property value is never empty; the store is left unchanged.
    #[error("property value must be non-empty")]
    EmptyValue,

    /// A typed accessor (`get_as::<T>`) found a stored blob whose length
    /// does not match `size_of::<T>()`.
    #[error("stored value is {found} bytes, expected {expected} for this type")]
    SizeMismatch { expected: usize, found: usize },
}

/// Errors from linking an object's prototype.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PrototypeError {
    /// The requested prototype is the object itself, or reaches the object
    /// via its own prototype chain. The existing prototype link (if any) is
    /// left unchanged.
    #[error("setting this prototype would introduce a cycle")]
    Cycle,
}
