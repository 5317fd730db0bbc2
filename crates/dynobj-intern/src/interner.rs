//! Process-wide string intern table.
//!
//! Strings are interned once, leaked to obtain `'static` storage, and handed
//! back out as [`Symbol`] — a 1-word handle that compares and hashes by
//! *pointer identity*, not by content. Two symbols are equal iff they came
//! from the same `intern` call (or two calls with equal content, which the
//! table canonicalizes to the same leaked string).
//!
//! The table lives behind a single mutex. This engine's intern table is not
//! on a hot concurrent path, so a single lock is simpler than the sharded /
//! lock-free designs a compiler front-end reaches for; see DESIGN.md.

use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, OnceLock};

/// A canonical, immutable reference to an interned string.
///
/// `Symbol` is `Copy` and exactly one pointer wide. Equality and hashing are
/// defined over the *address* of the backing storage, which is sound only
/// because every `Symbol` in existence was handed out by [`intern`] or
/// [`find`] — callers cannot construct one from an arbitrary `&'static str`.
#[derive(Clone, Copy, Debug)]
pub struct Symbol(&'static str);

impl Symbol {
    /// Borrow the interned string.
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl PartialEq for Symbol {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.0.as_ptr() as usize).hash(state);
        self.0.len().hash(state);
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Statistics about the process-wide intern table, for diagnostics only.
#[derive(Clone, Copy, Debug, Default)]
pub struct InternStats {
    /// Number of distinct strings currently interned.
    pub count: usize,
}

struct InternTable {
    strings: HashSet<&'static str>,
}

impl InternTable {
    fn new() -> Self {
        Self {
            strings: HashSet::new(),
        }
    }
}

fn table() -> &'static Mutex<InternTable> {
    static TABLE: OnceLock<Mutex<InternTable>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(InternTable::new()))
}

/// Intern `s`, returning its canonical [`Symbol`].
///
/// Re-interning content that is already present returns the same `Symbol`
/// (same backing pointer) as the first call. Content is preserved
/// byte-for-byte.
pub fn intern(s: &str) -> Symbol {
    let mut table = table().lock().unwrap_or_else(|e| e.into_inner());

    if let Some(&existing) = table.strings.get(s) {
        return Symbol(existing);
    }

    let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
    table.strings.insert(leaked);
    tracing::trace!(len = leaked.len(), "interned new string");
    Symbol(leaked)
}

/// Look up `s` without interning it.
///
/// Returns `None` if `s` has never been passed to [`intern`]. Never mutates
/// the table.
pub fn find(s: &str) -> Option<Symbol> {
    let table = table().lock().unwrap_or_else(|e| e.into_inner());
    table.strings.get(s).map(|&existing| Symbol(existing))
}

/// Report how many distinct strings are currently interned.
pub fn stats() -> InternStats {
    let table = table().lock().unwrap_or_else(|e| e.into_inner());
    InternStats {
        count: table.strings.len(),
    }
}

/// Tear down the process-wide intern table, freeing every canonical string.
///
/// # Safety
///
/// Every [`Symbol`] obtained from this table before the call becomes
/// dangling: its backing storage is deallocated. Calling [`Symbol::as_str`]
/// (or comparing, hashing, or otherwise dereferencing such a symbol) after
/// `intern_cleanup` is undefined behavior. It is the caller's responsibility
/// to ensure no object still holds a `Symbol` minted before this call — see
/// spec.md §4.1's documented lifecycle caveat. This is a one-shot global
/// teardown and must not race with any other use of the table.
pub unsafe fn intern_cleanup() {
    let mut table = table().lock().unwrap_or_else(|e| e.into_inner());
    let count = table.strings.len();
    for s in table.strings.drain() {
        // SAFETY: every element was produced by `Box::leak` over a
        // `Box<str>` in `intern`, and is reclaimed here exactly once.
        drop(unsafe { Box::from_raw(s as *const str as *mut str) });
    }
    tracing::debug!(count, "intern table cleaned up");
}
