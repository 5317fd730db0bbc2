//! Property-based checks for the own-property store's invariants.

use dynobj::{get_as, set_as, Object};
use quickcheck_macros::quickcheck;

#[test]
fn round_trip_arbitrary_bytes() {
    let obj = Object::create(None);
    let value = vec![9u8, 1, 2, 3, 255, 0, 128];
    obj.set("property_tests::blob", &value).unwrap();
    assert_eq!(obj.get("property_tests::blob"), Some(value));
}

#[test]
fn overwrite_keeps_key_count_stable() {
    let obj = Object::create(None);
    obj.set("property_tests::k", b"first").unwrap();
    assert_eq!(obj.property_count(), 1);
    obj.set("property_tests::k", b"second-and-longer").unwrap();
    assert_eq!(obj.property_count(), 1);
    assert_eq!(obj.get("property_tests::k").as_deref(), Some(b"second-and-longer".as_slice()));
}

#[test]
fn delete_of_absent_key_is_a_harmless_no_op() {
    let obj = Object::create(None);
    assert!(!obj.delete("property_tests::never-set"));
}

#[test]
fn hash_upgrade_is_transparent_to_callers() {
    let obj = Object::create(None);
    // Default threshold is 8; push well past it and confirm nothing about
    // the observable get/has/delete behavior changes.
    for i in 0..40u32 {
        let key = format!("property_tests::upgrade-{i}");
        obj.set(&key, &i.to_le_bytes()).unwrap();
    }
    assert_eq!(obj.property_count(), 40);
    for i in 0..40u32 {
        let key = format!("property_tests::upgrade-{i}");
        assert!(obj.has_own(&key));
        assert_eq!(obj.get(&key).unwrap(), i.to_le_bytes().to_vec());
    }
    for i in (0..40u32).step_by(2) {
        let key = format!("property_tests::upgrade-{i}");
        assert!(obj.delete(&key));
    }
    assert_eq!(obj.property_count(), 20);
}

#[test]
fn prototype_shadowing_prefers_the_nearer_object() {
    let base = Object::create(None);
    base.set("property_tests::name", b"base").unwrap();

    let derived = Object::create_with_prototype(&base, None);
    assert_eq!(derived.get("property_tests::name").as_deref(), Some(b"base".as_slice()));

    derived.set("property_tests::name", b"derived").unwrap();
    assert_eq!(derived.get("property_tests::name").as_deref(), Some(b"derived".as_slice()));
    // The base object is untouched by the shadowing write.
    assert_eq!(base.get("property_tests::name").as_deref(), Some(b"base".as_slice()));
}

#[test]
fn has_own_does_not_see_inherited_properties() {
    let base = Object::create(None);
    base.set("property_tests::inherited", b"x").unwrap();
    let derived = Object::create_with_prototype(&base, None);

    assert!(derived.has("property_tests::inherited"));
    assert!(!derived.has_own("property_tests::inherited"));
}

#[quickcheck]
fn interning_identity_backs_property_lookup(key: String, value: Vec<u8>) -> bool {
    if value.is_empty() {
        return true; // set() rejects empty values; nothing to check.
    }
    let obj = Object::create(None);
    obj.set(&key, &value).unwrap();
    obj.get(&key) == Some(value)
}

#[quickcheck]
fn typed_round_trip_matches_raw_bytes(n: i64) -> bool {
    let obj = Object::create(None);
    set_as(&obj, "property_tests::typed", n).unwrap();
    get_as::<i64>(&obj, "property_tests::typed") == Ok(Some(n))
}
