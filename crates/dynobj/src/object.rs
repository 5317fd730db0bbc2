//! The object record and the prototype walker.
//!
//! An [`Object`] is a cheap handle (an [`Rc`] clone) around a property store
//! plus an optional prototype link. Cloning an `Object` is a retain;
//! dropping the last clone runs the release callback over every stored
//! property, then releases the prototype link, then frees the record —
//! mirroring `do_release`'s destruction order.
//!
//! `Object` is deliberately `!Send + !Sync`: it is built on `Rc`/`RefCell`,
//! which turns the single-threaded non-goal into something the compiler
//! enforces rather than something the docs merely ask for.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use dynobj_intern::Symbol;
use rustc_hash::FxHashSet;

use crate::error::PrototypeError;
use crate::store::Store;

/// A callback run once per property, in no particular order, when that
/// property is overwritten, deleted, or still present at object
/// destruction. Lets embedders free resources a stored blob refers to
/// (e.g. a boxed closure or a handle into another system).
pub type ReleaseFn = Box<dyn Fn(&[u8])>;

/// Per-object tuning, currently just the linear-to-hash upgrade threshold.
///
/// The default matches the original library's fixed threshold; callers
/// embedding `dynobj` in a tight memory budget can lower it, or raise it if
/// their objects are known to stay small and a hash map's overhead isn't
/// worth paying.
#[derive(Debug, Clone, Copy)]
pub struct ObjectOptions {
    pub hash_threshold: usize,
}

impl Default for ObjectOptions {
    fn default() -> Self {
        ObjectOptions { hash_threshold: crate::DEFAULT_HASH_THRESHOLD }
    }
}

struct ObjectInner {
    store: RefCell<Store>,
    prototype: RefCell<Option<Object>>,
    release_fn: Option<ReleaseFn>,
    hash_threshold: usize,
}

impl Drop for ObjectInner {
    fn drop(&mut self) {
        if let Some(release_fn) = &self.release_fn {
            self.store.borrow().for_each(|_, blob| release_fn(blob));
        }
        // `store` and `prototype` drop next, releasing the prototype link
        // (and recursing into its own `Drop` if this was its last handle).
    }
}

/// A prototype-linked, reference-counted dynamic object.
#[derive(Clone)]
pub struct Object(Rc<ObjectInner>);

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("property_count", &self.property_count())
            .field("ref_count", &self.ref_count())
            .field("has_prototype", &self.prototype().is_some())
            .finish()
    }
}

impl Object {
    /// Creates a fresh, prototype-less object.
    pub fn create(release_fn: Option<ReleaseFn>) -> Object {
        Self::create_with_options(ObjectOptions::default(), release_fn)
    }

    /// Like [`Object::create`], with a non-default hash upgrade threshold.
    pub fn create_with_options(options: ObjectOptions, release_fn: Option<ReleaseFn>) -> Object {
        Object(Rc::new(ObjectInner {
            store: RefCell::new(Store::new()),
            prototype: RefCell::new(None),
            release_fn,
            hash_threshold: options.hash_threshold,
        }))
    }

    /// Creates an object whose prototype is `prototype`. Retains `prototype`
    /// for as long as the new object is alive.
    pub fn create_with_prototype(prototype: &Object, release_fn: Option<ReleaseFn>) -> Object {
        Self::create_with_prototype_and_options(prototype, ObjectOptions::default(), release_fn)
    }

    /// Like [`Object::create_with_prototype`], with a non-default hash
    /// upgrade threshold.
    pub fn create_with_prototype_and_options(
        prototype: &Object,
        options: ObjectOptions,
        release_fn: Option<ReleaseFn>,
    ) -> Object {
        let obj = Self::create_with_options(options, release_fn);
        *obj.0.prototype.borrow_mut() = Some(prototype.clone());
        obj
    }

    /// Returns a new handle to the same object, incrementing the refcount.
    /// Equivalent to `.clone()`, spelled out for readers translating from
    /// the retain/release vocabulary.
    pub fn retain(&self) -> Object {
        self.clone()
    }

    /// Drops a handle, decrementing the refcount. Equivalent to replacing
    /// `*handle` with `None`, spelled out the same way.
    pub fn release(handle: &mut Option<Object>) {
        handle.take();
    }

    /// Number of live handles to this object, including `self`.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    // -- prototype chain --------------------------------------------------

    /// Returns a retained handle to this object's prototype, if any.
    pub fn prototype(&self) -> Option<Object> {
        self.0.prototype.borrow().clone()
    }

    /// Links this object's prototype to `prototype`, or unlinks it when
    /// `None`. Rejected with [`PrototypeError::Cycle`] if `prototype` is
    /// this object itself or reaches it through its own chain; the
    /// existing link, if any, is left untouched in that case.
    pub fn set_prototype(&self, prototype: Option<&Object>) -> Result<(), PrototypeError> {
        if let Some(candidate) = prototype {
            if Rc::ptr_eq(&self.0, &candidate.0) {
                return Err(PrototypeError::Cycle);
            }
            let mut cursor = candidate.0.prototype.borrow().clone();
            while let Some(node) = cursor {
                if Rc::ptr_eq(&self.0, &node.0) {
                    return Err(PrototypeError::Cycle);
                }
                cursor = node.0.prototype.borrow().clone();
            }
        }
        *self.0.prototype.borrow_mut() = prototype.cloned();
        Ok(())
    }

    // -- own-property queries ---------------------------------------------

    /// True if `key` names a property stored directly on this object
    /// (prototype chain not consulted).
    pub fn has_own_interned(&self, key: Symbol) -> bool {
        self.0.store.borrow().contains(key)
    }

    pub fn has_own(&self, key: &str) -> bool {
        dynobj_intern::find(key).is_some_and(|sym| self.has_own_interned(sym))
    }

    /// Number of properties stored directly on this object.
    pub fn property_count(&self) -> usize {
        self.0.store.borrow().len()
    }

    /// Keys stored directly on this object, in no particular order once the
    /// store has upgraded past its linear phase.
    pub fn own_keys(&self) -> Vec<Symbol> {
        self.0.store.borrow().keys()
    }

    /// Visits every property stored directly on this object. Does not walk
    /// the prototype chain.
    pub fn for_each_own(&self, mut f: impl FnMut(Symbol, &[u8])) {
        self.0.store.borrow().for_each(|k, v| f(k, v));
    }

    // -- inherited-aware queries --------------------------------------------

    /// Runs `f` on the value of `key`, walking the prototype chain if it's
    /// not found directly on this object, without copying the stored bytes.
    /// Returns `None` if `key` is absent along the whole chain.
    pub fn with_property_interned<R>(&self, key: Symbol, f: impl FnOnce(&[u8]) -> R) -> Option<R> {
        let mut current = self.clone();
        loop {
            {
                let store = current.0.store.borrow();
                if let Some(bytes) = store.get(key) {
                    return Some(f(bytes));
                }
            }
            match current.prototype() {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }

    pub fn with_property<R>(&self, key: &str, f: impl FnOnce(&[u8]) -> R) -> Option<R> {
        let sym = dynobj_intern::find(key)?;
        self.with_property_interned(sym, f)
    }

    /// True if `key` is found on this object or anywhere up its prototype
    /// chain.
    pub fn has_interned(&self, key: Symbol) -> bool {
        self.with_property_interned(key, |_| ()).is_some()
    }

    pub fn has(&self, key: &str) -> bool {
        dynobj_intern::find(key).is_some_and(|sym| self.has_interned(sym))
    }

    /// Copies out the value of `key`, walking the prototype chain.
    pub fn get_interned(&self, key: Symbol) -> Option<Vec<u8>> {
        self.with_property_interned(key, |bytes| bytes.to_vec())
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.with_property(key, |bytes| bytes.to_vec())
    }

    /// Keys reachable from this object: its own keys first, then each
    /// ancestor's, skipping any key already seen nearer the start of the
    /// chain (shadowing is resolved in the caller's favor, nearest wins).
    pub fn all_keys(&self) -> Vec<Symbol> {
        let mut seen = FxHashSet::default();
        let mut result = Vec::new();
        let mut current = Some(self.clone());
        while let Some(obj) = current {
            for key in obj.0.store.borrow().keys() {
                if seen.insert(key) {
                    result.push(key);
                }
            }
            current = obj.prototype();
        }
        result
    }

    // -- mutation (always own-property) ------------------------------------

    /// Sets `key` to `value` on this object directly. Never reaches into
    /// the prototype chain — shadowing, not mutation-through-inheritance.
    /// If `key` was already set here, the old blob is handed to the release
    /// callback before being dropped.
    pub fn set_interned(
        &self,
        key: Symbol,
        value: &[u8],
    ) -> Result<(), crate::error::PropertyError> {
        let displaced = self
            .0
            .store
            .borrow_mut()
            .set(key, value, self.0.hash_threshold)?;
        if let Some(old) = displaced {
            if let Some(release_fn) = &self.0.release_fn {
                release_fn(&old);
            }
        }
        Ok(())
    }

    pub fn set(&self, key: &str, value: &[u8]) -> Result<(), crate::error::PropertyError> {
        self.set_interned(dynobj_intern::intern(key), value)
    }

    /// Removes `key` from this object's own store, running the release
    /// callback on the removed value. Returns whether a property was
    /// actually removed. Never touches the prototype chain.
    pub fn delete_interned(&self, key: Symbol) -> bool {
        match self.0.store.borrow_mut().delete(key) {
            Some(old) => {
                if let Some(release_fn) = &self.0.release_fn {
                    release_fn(&old);
                }
                true
            }
            None => false,
        }
    }

    pub fn delete(&self, key: &str) -> bool {
        match dynobj_intern::find(key) {
            Some(sym) => self.delete_interned(sym),
            None => false,
        }
    }
}
