//! Process-wide string interning.
//!
//! A minimal building block for the `dynobj` object engine: a global table
//! that maps string content to a canonical, pointer-comparable [`Symbol`].
//! Two symbols compare equal iff their content is equal; comparison itself
//! is an O(1) pointer check rather than a byte-by-byte scan.
//!
//! ```
//! use dynobj_intern::{intern, find};
//!
//! let a = intern("shared-key");
//! let b = intern("shared-key");
//! assert_eq!(a, b);
//!
//! assert!(find("never-seen-before-in-this-doctest").is_none());
//! ```
//!
//! The table is process-wide and guarded by a single mutex (see
//! [`interner`] for why a single lock is the right call here). It is *not*
//! meant to be used concurrently from multiple threads at once — see
//! DESIGN.md for the concurrency rationale carried over from spec.md §5.

mod interner;

pub use interner::{find, intern, intern_cleanup, stats, InternStats, Symbol};
