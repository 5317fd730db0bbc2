//! Typed convenience wrappers over the raw byte-blob property API.
//!
//! The core [`Object`] API stores and returns raw `&[u8]`; these helpers
//! are for the common case where a property is really a `Copy` scalar
//! (an integer, a float, a small struct of them) and the caller would
//! rather not hand-roll the byte conversion at every call site. They're
//! additive sugar over `get`/`set`, not a second storage representation.

use std::mem::size_of;

use crate::error::PropertyError;
use crate::object::Object;

/// Reads `key` as a `T`, walking the prototype chain like [`Object::get`].
///
/// Returns `Ok(None)` if the key isn't present anywhere on the chain, and
/// `Err` if it is present but the stored blob isn't the right size to be a
/// `T` (most likely it was written under this key as a different type).
pub fn get_as<T: Copy>(obj: &Object, key: &str) -> Result<Option<T>, PropertyError> {
    match obj.get(key) {
        None => Ok(None),
        Some(bytes) => {
            if bytes.len() != size_of::<T>() {
                return Err(PropertyError::SizeMismatch {
                    expected: size_of::<T>(),
                    found: bytes.len(),
                });
            }
            // SAFETY: length just checked against size_of::<T>(); T: Copy
            // has no drop glue, so reading it out of borrowed bytes (rather
            // than moving out of them) can't double-free or double-drop.
            // This mirrors the original library's raw-byte-blob semantics,
            // where any POD-ish type can be stored and retrieved as bytes.
            Ok(Some(unsafe { std::ptr::read_unaligned(bytes.as_ptr() as *const T) }))
        }
    }
}

/// Stores `value` under `key` on `obj` directly, as its raw byte
/// representation.
pub fn set_as<T: Copy>(obj: &Object, key: &str, value: T) -> Result<(), PropertyError> {
    // SAFETY: `value` is a valid, initialized `T`; reading `size_of::<T>()`
    // bytes starting at its address never reads past the object.
    let bytes: &[u8] =
        unsafe { std::slice::from_raw_parts(&value as *const T as *const u8, size_of::<T>()) };
    obj.set(key, bytes)
}

/// [`get_as`], substituting `fallback` when the key is absent or the
/// stored value isn't a `T`-shaped blob.
pub fn get_or_default<T: Copy>(obj: &Object, key: &str, fallback: T) -> T {
    match get_as::<T>(obj, key) {
        Ok(Some(value)) => value,
        _ => fallback,
    }
}

/// Copies the value of `key` from `src` to `dst`, walking `src`'s
/// prototype chain to find it. Returns `false` if `src` has no such
/// property, or if writing it onto `dst` failed (only possible if the
/// stored value was somehow empty, which `set` never produces itself).
pub fn copy_property(dst: &Object, src: &Object, key: &str) -> bool {
    match src.get(key) {
        Some(bytes) => dst.set(key, &bytes).is_ok(),
        None => false,
    }
}

/// Number of properties stored directly on `obj`. An alias for
/// [`Object::property_count`] kept alongside the other convenience
/// functions for callers migrating from the C-style free-function API.
pub fn count_properties(obj: &Object) -> usize {
    obj.property_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_round_trip() {
        let obj = Object::create(None);
        set_as(&obj, "typed_tests::answer", 42i32).unwrap();
        assert_eq!(get_as::<i32>(&obj, "typed_tests::answer").unwrap(), Some(42));
    }

    #[test]
    fn size_mismatch_is_reported() {
        let obj = Object::create(None);
        set_as(&obj, "typed_tests::narrow", 1u8).unwrap();
        let err = get_as::<i64>(&obj, "typed_tests::narrow").unwrap_err();
        assert_eq!(err, PropertyError::SizeMismatch { expected: 8, found: 1 });
    }

    #[test]
    fn get_or_default_falls_back() {
        let obj = Object::create(None);
        assert_eq!(get_or_default::<u32>(&obj, "typed_tests::missing", 7), 7);
        set_as(&obj, "typed_tests::present", 99u32).unwrap();
        assert_eq!(get_or_default::<u32>(&obj, "typed_tests::present", 7), 99);
    }

    #[test]
    fn copy_property_moves_value_between_objects() {
        let src = Object::create(None);
        let dst = Object::create(None);
        src.set("typed_tests::shared", b"value").unwrap();
        assert!(copy_property(&dst, &src, "typed_tests::shared"));
        assert_eq!(dst.get("typed_tests::shared").as_deref(), Some(b"value".as_slice()));
        assert!(!copy_property(&dst, &src, "typed_tests::absent"));
    }
}
