//! The adaptive per-object property store.
//!
//! Starts as a linearly-scanned `Vec` and upgrades, once and for all, to an
//! [`FxHashMap`] after the entry count crosses a threshold. The upgrade is
//! one-way: a later run of deletes does not downgrade back to linear. Keys
//! are always [`Symbol`]s — by the data model every *stored* key is
//! canonical, so membership and lookup compare by pointer identity via
//! `Symbol`'s `Hash`/`Eq` impls.

use dynobj_intern::Symbol;
use rustc_hash::FxHashMap;

use crate::error::PropertyError;

pub(crate) enum Store {
    Linear(Vec<(Symbol, Box<[u8]>)>),
    Hashed(FxHashMap<Symbol, Box<[u8]>>),
}

impl Store {
    pub(crate) fn new() -> Self {
        Store::Linear(Vec::new())
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Store::Linear(entries) => entries.len(),
            Store::Hashed(map) => map.len(),
        }
    }

    pub(crate) fn get(&self, key: Symbol) -> Option<&[u8]> {
        match self {
            Store::Linear(entries) => entries
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, blob)| blob.as_ref()),
            Store::Hashed(map) => map.get(&key).map(|blob| blob.as_ref()),
        }
    }

    pub(crate) fn contains(&self, key: Symbol) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or overwrites `key`. Returns the displaced blob, if any, so
    /// the caller can run a release callback on it. Rejects an empty value
    /// without mutating the store.
    pub(crate) fn set(
        &mut self,
        key: Symbol,
        value: &[u8],
        hash_threshold: usize,
    ) -> Result<Option<Box<[u8]>>, PropertyError> {
        if value.is_empty() {
            return Err(PropertyError::EmptyValue);
        }
        let blob: Box<[u8]> = value.into();

        let mut needs_upgrade = false;
        let displaced = match self {
            Store::Linear(entries) => {
                if let Some(entry) = entries.iter_mut().find(|(k, _)| *k == key) {
                    Some(std::mem::replace(&mut entry.1, blob))
                } else {
                    entries.push((key, blob));
                    needs_upgrade = entries.len() > hash_threshold;
                    None
                }
            }
            Store::Hashed(map) => map.insert(key, blob),
        };

        if needs_upgrade {
            self.upgrade();
        }

        Ok(displaced)
    }

    fn upgrade(&mut self) {
        let Store::Linear(entries) = std::mem::replace(self, Store::Hashed(FxHashMap::default()))
        else {
            unreachable!("upgrade is only triggered from the linear variant");
        };
        let mut map = FxHashMap::with_capacity_and_hasher(entries.len(), Default::default());
        let count = entries.len();
        for (key, blob) in entries {
            map.insert(key, blob);
        }
        tracing::debug!(count, "property store upgraded from linear to hash layout");
        *self = Store::Hashed(map);
    }

    pub(crate) fn delete(&mut self, key: Symbol) -> Option<Box<[u8]>> {
        match self {
            Store::Linear(entries) => {
                let idx = entries.iter().position(|(k, _)| *k == key)?;
                Some(entries.remove(idx).1)
            }
            Store::Hashed(map) => map.remove(&key),
        }
    }

    pub(crate) fn keys(&self) -> Vec<Symbol> {
        match self {
            Store::Linear(entries) => entries.iter().map(|(k, _)| *k).collect(),
            Store::Hashed(map) => map.keys().copied().collect(),
        }
    }

    pub(crate) fn for_each(&self, mut f: impl FnMut(Symbol, &[u8])) {
        match self {
            Store::Linear(entries) => {
                for (k, blob) in entries {
                    f(*k, blob);
                }
            }
            Store::Hashed(map) => {
                for (k, blob) in map {
                    f(*k, blob);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(s: &str) -> Symbol {
        dynobj_intern::intern(s)
    }

    #[test]
    fn rejects_empty_value() {
        let mut store = Store::new();
        let err = store.set(sym("store_tests::k"), &[], 8).unwrap_err();
        assert_eq!(err, PropertyError::EmptyValue);
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn upgrades_past_threshold_and_stays_correct() {
        let mut store = Store::new();
        for i in 0..9u8 {
            let key = sym(&format!("store_tests::upgrade_{i}"));
            store.set(key, &[i], 8).unwrap();
        }
        assert!(matches!(store, Store::Hashed(_)));
        assert_eq!(store.len(), 9);
        for i in 0..9u8 {
            let key = sym(&format!("store_tests::upgrade_{i}"));
            assert_eq!(store.get(key), Some([i].as_slice()));
        }
    }

    #[test]
    fn delete_does_not_downgrade() {
        let mut store = Store::new();
        for i in 0..9u8 {
            let key = sym(&format!("store_tests::downgrade_{i}"));
            store.set(key, &[i], 8).unwrap();
        }
        for i in 0..8u8 {
            let key = sym(&format!("store_tests::downgrade_{i}"));
            store.delete(key);
        }
        assert!(matches!(store, Store::Hashed(_)));
        assert_eq!(store.len(), 1);
    }
}
