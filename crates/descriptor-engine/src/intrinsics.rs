//! Intrinsic objects and global bindings.
//!
//! Every intrinsic is a fresh object when installed, so complete
//! descriptors are written straight into its table instead of going
//! through reconciliation.

use serde::{Deserialize, Serialize};

use crate::descriptor::PropertyDescriptor;
use crate::object::{ObjectHeap, OrdinaryObject};
use crate::value::{JsValue, ObjectHandle, PropertyKey};

/// Handles of the objects every realm starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intrinsics {
    pub object_prototype: ObjectHandle,
    pub function_prototype: ObjectHandle,
    pub array_prototype: ObjectHandle,
    pub global: ObjectHandle,
    pub math: ObjectHandle,
}

/// `Math` value properties (ES5 §15.8.1).
pub const MATH_CONSTANTS: [(&str, f64); 8] = [
    ("E", std::f64::consts::E),
    ("LN10", std::f64::consts::LN_10),
    ("LN2", std::f64::consts::LN_2),
    ("LOG2E", std::f64::consts::LOG2_E),
    ("LOG10E", std::f64::consts::LOG10_E),
    ("PI", std::f64::consts::PI),
    ("SQRT1_2", std::f64::consts::FRAC_1_SQRT_2),
    ("SQRT2", std::f64::consts::SQRT_2),
];

pub(crate) fn tagged(proto: Option<ObjectHandle>, class_tag: &str) -> OrdinaryObject {
    let mut object = OrdinaryObject::with_prototype(proto);
    object.class_tag = Some(class_tag.to_string());
    object
}

/// `{writable: true, enumerable: false, configurable: true}`, the shape of
/// built-in properties that scripts may replace.
fn builtin(value: JsValue) -> PropertyDescriptor {
    PropertyDescriptor::Data {
        value,
        writable: true,
        enumerable: false,
        configurable: true,
    }
}

/// Allocate and populate the intrinsics on an empty heap.
pub fn install(heap: &mut ObjectHeap) -> Intrinsics {
    let object_prototype = heap.alloc_object(tagged(None, "Object"));
    let function_prototype = heap.alloc_object(tagged(Some(object_prototype), "Function"));

    let mut array_prototype = tagged(Some(object_prototype), "Array");
    array_prototype.properties.set_own(
        PropertyKey::from("length"),
        PropertyDescriptor::Data {
            value: JsValue::from(0),
            writable: true,
            enumerable: false,
            configurable: false,
        },
    );
    let array_prototype = heap.alloc_object(array_prototype);

    let mut math = tagged(Some(object_prototype), "Math");
    for (name, value) in MATH_CONSTANTS {
        math.properties.set_own(
            PropertyKey::from(name),
            PropertyDescriptor::data_frozen(JsValue::Number(value)),
        );
    }
    let math = heap.alloc_object(math);

    let mut global = tagged(Some(object_prototype), "global");
    let bindings = [
        ("NaN", JsValue::Number(f64::NAN)),
        ("Infinity", JsValue::Number(f64::INFINITY)),
        ("undefined", JsValue::Undefined),
    ];
    for (name, value) in bindings {
        global
            .properties
            .set_own(PropertyKey::from(name), PropertyDescriptor::data_frozen(value));
    }
    global
        .properties
        .set_own(PropertyKey::from("Math"), builtin(JsValue::Object(math)));
    let global = heap.alloc_object(global);

    Intrinsics {
        object_prototype,
        function_prototype,
        array_prototype,
        global,
        math,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn own(heap: &ObjectHeap, h: ObjectHandle, k: &str) -> PropertyDescriptor {
        heap.get(h)
            .unwrap()
            .get_own_property(&PropertyKey::from(k))
            .cloned()
            .unwrap()
    }

    #[test]
    fn prototypes_chain_to_object_prototype() {
        let mut heap = ObjectHeap::new();
        let i = install(&mut heap);
        assert_eq!(heap.get_prototype_of(i.object_prototype).unwrap(), None);
        for h in [i.function_prototype, i.array_prototype, i.global, i.math] {
            assert_eq!(heap.get_prototype_of(h).unwrap(), Some(i.object_prototype));
        }
    }

    #[test]
    fn global_value_bindings_are_frozen() {
        let mut heap = ObjectHeap::new();
        let i = install(&mut heap);
        for name in ["NaN", "Infinity", "undefined"] {
            let d = own(&heap, i.global, name);
            assert!(!d.is_writable() && !d.is_enumerable() && !d.is_configurable());
        }
        assert!(own(&heap, i.global, "NaN").value().unwrap().same_value(&JsValue::Number(f64::NAN)));
    }

    #[test]
    fn math_pi_is_frozen_and_math_is_replaceable() {
        let mut heap = ObjectHeap::new();
        let i = install(&mut heap);
        assert_eq!(
            own(&heap, i.math, "PI"),
            PropertyDescriptor::data_frozen(JsValue::Number(std::f64::consts::PI))
        );
        assert_eq!(own(&heap, i.global, "Math"), builtin(JsValue::Object(i.math)));
    }

    #[test]
    fn array_prototype_length_attributes() {
        let mut heap = ObjectHeap::new();
        let i = install(&mut heap);
        let d = own(&heap, i.array_prototype, "length");
        assert!(d.is_writable());
        assert!(!d.is_enumerable());
        assert!(!d.is_configurable());
    }
}
