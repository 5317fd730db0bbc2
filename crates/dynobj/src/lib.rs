//! A prototype-based, reference-counted dynamic object engine.
//!
//! Built for embedding: interpreters and scripting layers that need
//! JS-like objects — properties looked up through a prototype chain,
//! lifetime managed by refcounting rather than a tracing collector — without
//! pulling in a full language runtime to get them.
//!
//! ```
//! use dynobj::Object;
//!
//! let base = Object::create(None);
//! base.set("greeting", b"hello").unwrap();
//!
//! let derived = Object::create_with_prototype(&base, None);
//! derived.set("name", b"world").unwrap();
//!
//! assert_eq!(derived.get("greeting").as_deref(), Some(b"hello".as_slice()));
//! assert!(!derived.has_own("greeting"));
//! assert!(derived.has_own("name"));
//! ```
//!
//! Keys are interned (see [`dynobj_intern`]) before they're stored, so every
//! own-property lookup compares keys by pointer rather than by content. The
//! `_interned` variant of each operation (`get_interned`, `set_interned`,
//! ...) skips that interning step for callers who already hold a [`Symbol`]
//! — typically an interpreter resolving the same identifier over and over.

mod error;
mod object;
mod store;
mod typed;

pub use dynobj_intern::Symbol;
pub use error::{PropertyError, PrototypeError};
pub use object::{Object, ObjectOptions, ReleaseFn};
pub use typed::{copy_property, count_properties, get_as, get_or_default, set_as};

/// Linear-to-hash upgrade threshold used when an object is created with
/// [`Object::create`] or [`Object::create_with_prototype`] (i.e. without an
/// explicit [`ObjectOptions`]).
pub(crate) const DEFAULT_HASH_THRESHOLD: usize = 8;
