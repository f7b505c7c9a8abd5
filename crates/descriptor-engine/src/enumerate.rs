//! `for-in` style key enumeration.
//!
//! The full key list is computed before it is returned, so callers that run
//! code per key (and possibly mutate the objects involved) iterate a stable
//! snapshot.

use std::collections::BTreeSet;

use crate::error::ObjectError;
use crate::object::ObjectHeap;
use crate::resolver::WalkTruncation;
use crate::value::{ObjectHandle, PropertyKey};

/// Keys produced by an enumeration plus how the underlying walk ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enumeration {
    pub keys: Vec<PropertyKey>,
    pub truncation: Option<WalkTruncation>,
}

/// Enumerable keys of `start` and its prototypes.  A key seen at a nearer
/// level, enumerable or not, hides the same key further up the chain.
pub fn enumerate_keys(
    heap: &ObjectHeap,
    start: ObjectHandle,
    max_hops: u32,
) -> Result<Enumeration, ObjectError> {
    let mut walk = heap.walk(start, max_hops)?;
    let mut seen: BTreeSet<PropertyKey> = BTreeSet::new();
    let mut keys = Vec::new();

    for (_, obj) in walk.by_ref() {
        for key in obj.properties.keys_in_order() {
            if !seen.insert(key.clone()) {
                continue;
            }
            if obj
                .get_own_property(&key)
                .is_some_and(|desc| desc.is_enumerable())
            {
                keys.push(key);
            }
        }
    }

    Ok(Enumeration {
        keys,
        truncation: walk.truncation(),
    })
}

/// Every own key, enumerable or not.
pub fn own_keys(heap: &ObjectHeap, handle: ObjectHandle) -> Result<Vec<PropertyKey>, ObjectError> {
    Ok(heap.get(handle)?.own_property_keys())
}

/// `Object.keys`: own enumerable keys.
pub fn own_enumerable_keys(
    heap: &ObjectHeap,
    handle: ObjectHandle,
) -> Result<Vec<PropertyKey>, ObjectError> {
    let obj = heap.get(handle)?;
    Ok(obj
        .properties
        .keys_in_order()
        .into_iter()
        .filter(|k| obj.get_own_property(k).is_some_and(|d| d.is_enumerable()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::PropertyDescriptor;
    use crate::resolver::MAX_PROTOTYPE_CHAIN_DEPTH;
    use crate::value::JsValue;

    fn key(s: &str) -> PropertyKey {
        PropertyKey::from(s)
    }

    fn put_data(heap: &mut ObjectHeap, h: ObjectHandle, k: &str, enumerable: bool) {
        heap.get_mut(h).unwrap().properties.set_own(
            key(k),
            PropertyDescriptor::Data {
                value: JsValue::Null,
                writable: true,
                enumerable,
                configurable: true,
            },
        );
    }

    fn names(keys: &[PropertyKey]) -> Vec<&str> {
        keys.iter().map(PropertyKey::as_str).collect()
    }

    #[test]
    fn own_keys_come_before_inherited() {
        let mut heap = ObjectHeap::new();
        let proto = heap.alloc(None);
        let obj = heap.alloc(Some(proto));
        put_data(&mut heap, proto, "inherited", true);
        put_data(&mut heap, obj, "own", true);
        let e = enumerate_keys(&heap, obj, MAX_PROTOTYPE_CHAIN_DEPTH).unwrap();
        assert_eq!(names(&e.keys), vec!["own", "inherited"]);
    }

    #[test]
    fn non_enumerable_own_key_shadows_enumerable_ancestor() {
        let mut heap = ObjectHeap::new();
        let proto = heap.alloc(None);
        let obj = heap.alloc(Some(proto));
        put_data(&mut heap, proto, "x", true);
        put_data(&mut heap, proto, "y", true);
        put_data(&mut heap, obj, "x", false);
        let e = enumerate_keys(&heap, obj, MAX_PROTOTYPE_CHAIN_DEPTH).unwrap();
        assert_eq!(names(&e.keys), vec!["y"]);
    }

    #[test]
    fn cyclic_chain_enumerates_each_key_once() {
        let mut heap = ObjectHeap::new();
        let a = heap.alloc(None);
        let b = heap.alloc(Some(a));
        heap.set_prototype_of(a, Some(b)).unwrap();
        put_data(&mut heap, a, "a", true);
        put_data(&mut heap, b, "b", true);
        let e = enumerate_keys(&heap, a, MAX_PROTOTYPE_CHAIN_DEPTH).unwrap();
        assert_eq!(names(&e.keys), vec!["a", "b"]);
        assert_eq!(e.truncation, Some(WalkTruncation::CycleDetected));
    }

    #[test]
    fn own_key_listings() {
        let mut heap = ObjectHeap::new();
        let obj = heap.alloc(None);
        put_data(&mut heap, obj, "hidden", false);
        put_data(&mut heap, obj, "1", true);
        put_data(&mut heap, obj, "shown", true);
        put_data(&mut heap, obj, "0", true);
        assert_eq!(
            names(&own_keys(&heap, obj).unwrap()),
            vec!["0", "1", "hidden", "shown"]
        );
        assert_eq!(
            names(&own_enumerable_keys(&heap, obj).unwrap()),
            vec!["0", "1", "shown"]
        );
    }
}
