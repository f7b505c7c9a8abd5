//! Ordinary objects and the arena that owns them.
//!
//! Objects reference each other only through [`ObjectHandle`], so the
//! prototype graph may contain cycles without any ownership trouble.  Chain
//! walks live in [`crate::resolver`].

use serde::{Deserialize, Serialize};

use crate::define::{self, DefineOutcome};
use crate::descriptor::{DescriptorFields, PropertyDescriptor};
use crate::error::{DefineError, ObjectError};
use crate::property_table::PropertyTable;
use crate::value::{ObjectHandle, PropertyKey};

// ---------------------------------------------------------------------------
// OrdinaryObject — ES5 native object
// ---------------------------------------------------------------------------

/// An ordinary object with its internal slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdinaryObject {
    /// `[[Prototype]]` (null means end of chain).
    pub prototype: Option<ObjectHandle>,
    /// `[[Extensible]]`.
    pub extensible: bool,
    /// Own properties in insertion order.
    pub properties: PropertyTable,
    /// `[[Class]]` tag for intrinsic identification.
    pub class_tag: Option<String>,
    /// Set for objects registered as host functions.
    pub callable: bool,
}

impl Default for OrdinaryObject {
    fn default() -> Self {
        Self {
            prototype: None,
            extensible: true,
            properties: PropertyTable::new(),
            class_tag: None,
            callable: false,
        }
    }
}

impl OrdinaryObject {
    pub fn with_prototype(proto: Option<ObjectHandle>) -> Self {
        Self {
            prototype: proto,
            ..Self::default()
        }
    }

    /// `[[GetOwnProperty]](P)`.
    pub fn get_own_property(&self, key: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.properties.get_own(key)
    }

    pub fn has_own_property(&self, key: &PropertyKey) -> bool {
        self.properties.contains(key)
    }

    /// `[[DefineOwnProperty]](P, Desc)`, always in throwing mode.
    pub fn define_own_property(
        &mut self,
        key: &PropertyKey,
        desc: &DescriptorFields,
    ) -> Result<DefineOutcome, DefineError> {
        define::validate_and_apply(&mut self.properties, self.extensible, key, desc)
    }

    /// `[[Delete]](P)`.  Returns `false` if the property is non-configurable;
    /// deleting an absent key is vacuously `true`.
    pub fn delete(&mut self, key: &PropertyKey) -> bool {
        match self.properties.get_own(key) {
            None => true,
            Some(desc) if !desc.is_configurable() => false,
            Some(_) => {
                self.properties.delete_own(key);
                true
            }
        }
    }

    pub fn own_property_keys(&self) -> Vec<PropertyKey> {
        self.properties.keys_in_order()
    }

    pub fn prevent_extensions(&mut self) {
        self.extensible = false;
    }

    /// `Object.freeze`: every own property non-configurable, data
    /// properties non-writable.
    pub fn freeze(&mut self) {
        self.extensible = false;
        for desc in self.properties.values_mut() {
            desc.set_non_configurable();
            desc.set_non_writable();
        }
    }

    /// `Object.seal`: every own property non-configurable.
    pub fn seal(&mut self) {
        self.extensible = false;
        for desc in self.properties.values_mut() {
            desc.set_non_configurable();
        }
    }

    pub fn is_frozen(&self) -> bool {
        !self.extensible
            && self
                .properties
                .values()
                .all(|d| !d.is_configurable() && !d.is_writable())
    }

    pub fn is_sealed(&self) -> bool {
        !self.extensible && self.properties.values().all(|d| !d.is_configurable())
    }
}

// ---------------------------------------------------------------------------
// ObjectHeap — the managed object store
// ---------------------------------------------------------------------------

/// Arena of objects addressed by [`ObjectHandle`].  Objects are never freed
/// individually; the arena lives as long as its realm.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObjectHeap {
    objects: Vec<OrdinaryObject>,
}

impl ObjectHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a new extensible object with the given prototype.
    pub fn alloc(&mut self, proto: Option<ObjectHandle>) -> ObjectHandle {
        self.alloc_object(OrdinaryObject::with_prototype(proto))
    }

    pub fn alloc_object(&mut self, object: OrdinaryObject) -> ObjectHandle {
        let handle = ObjectHandle(self.objects.len() as u32);
        self.objects.push(object);
        handle
    }

    pub fn get(&self, handle: ObjectHandle) -> Result<&OrdinaryObject, ObjectError> {
        self.objects
            .get(handle.0 as usize)
            .ok_or(ObjectError::ObjectNotFound(handle))
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Result<&mut OrdinaryObject, ObjectError> {
        self.objects
            .get_mut(handle.0 as usize)
            .ok_or(ObjectError::ObjectNotFound(handle))
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        (handle.0 as usize) < self.objects.len()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn get_prototype_of(
        &self,
        handle: ObjectHandle,
    ) -> Result<Option<ObjectHandle>, ObjectError> {
        Ok(self.get(handle)?.prototype)
    }

    /// Relink `handle`'s prototype.  Cycles are accepted; chain walks guard
    /// against them.  A non-extensible object only accepts its current
    /// prototype and reports `false` otherwise.
    pub fn set_prototype_of(
        &mut self,
        handle: ObjectHandle,
        proto: Option<ObjectHandle>,
    ) -> Result<bool, ObjectError> {
        if let Some(p) = proto
            && !self.contains(p)
        {
            return Err(ObjectError::ObjectNotFound(p));
        }
        let obj = self.get_mut(handle)?;
        if !obj.extensible {
            return Ok(obj.prototype == proto);
        }
        obj.prototype = proto;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::JsValue;

    fn key(s: &str) -> PropertyKey {
        PropertyKey::from(s)
    }

    // -----------------------------------------------------------------------
    // 1. OrdinaryObject
    // -----------------------------------------------------------------------

    #[test]
    fn delete_respects_configurable() {
        let mut obj = OrdinaryObject::default();
        obj.define_own_property(&key("fixed"), &DescriptorFields::new().with_value(1))
            .unwrap();
        obj.define_own_property(
            &key("loose"),
            &DescriptorFields::data(JsValue::from(2), true, true, true),
        )
        .unwrap();
        assert!(!obj.delete(&key("fixed")));
        assert!(obj.has_own_property(&key("fixed")));
        assert!(obj.delete(&key("loose")));
        assert!(!obj.has_own_property(&key("loose")));
        assert!(obj.delete(&key("never-there")));
    }

    #[test]
    fn freeze_and_seal() {
        let mut obj = OrdinaryObject::default();
        obj.properties
            .set_own(key("a"), PropertyDescriptor::data(JsValue::from(1)));
        obj.properties
            .set_own(key("acc"), PropertyDescriptor::default_accessor());
        assert!(!obj.is_sealed());

        let mut sealed = obj.clone();
        sealed.seal();
        assert!(sealed.is_sealed());
        assert!(!sealed.is_frozen());
        assert!(sealed.get_own_property(&key("a")).unwrap().is_writable());

        obj.freeze();
        assert!(obj.is_frozen());
        assert!(obj.is_sealed());
        assert!(!obj.extensible);
    }

    #[test]
    fn empty_non_extensible_object_is_frozen() {
        let mut obj = OrdinaryObject::default();
        obj.prevent_extensions();
        assert!(obj.is_frozen());
        assert!(obj.is_sealed());
    }

    #[test]
    fn define_on_frozen_object_reports_not_extensible() {
        let mut obj = OrdinaryObject::default();
        obj.freeze();
        let err = obj
            .define_own_property(&key("x"), &DescriptorFields::new())
            .unwrap_err();
        assert_eq!(err, DefineError::NotExtensible { key: "x".into() });
    }

    // -----------------------------------------------------------------------
    // 2. ObjectHeap
    // -----------------------------------------------------------------------

    #[test]
    fn alloc_hands_out_sequential_handles() {
        let mut heap = ObjectHeap::new();
        assert!(heap.is_empty());
        let a = heap.alloc(None);
        let b = heap.alloc(Some(a));
        assert_eq!(a, ObjectHandle(0));
        assert_eq!(b, ObjectHandle(1));
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.get_prototype_of(b).unwrap(), Some(a));
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let heap = ObjectHeap::new();
        assert_eq!(
            heap.get(ObjectHandle(3)).unwrap_err(),
            ObjectError::ObjectNotFound(ObjectHandle(3))
        );
    }

    #[test]
    fn set_prototype_accepts_cycles() {
        let mut heap = ObjectHeap::new();
        let a = heap.alloc(None);
        let b = heap.alloc(Some(a));
        assert!(heap.set_prototype_of(a, Some(b)).unwrap());
        assert_eq!(heap.get_prototype_of(a).unwrap(), Some(b));
        assert!(heap.set_prototype_of(a, Some(a)).unwrap());
    }

    #[test]
    fn set_prototype_rejects_dangling_target() {
        let mut heap = ObjectHeap::new();
        let a = heap.alloc(None);
        assert_eq!(
            heap.set_prototype_of(a, Some(ObjectHandle(9))).unwrap_err(),
            ObjectError::ObjectNotFound(ObjectHandle(9))
        );
    }

    #[test]
    fn non_extensible_keeps_its_prototype() {
        let mut heap = ObjectHeap::new();
        let proto = heap.alloc(None);
        let obj = heap.alloc(Some(proto));
        heap.get_mut(obj).unwrap().prevent_extensions();
        assert!(!heap.set_prototype_of(obj, None).unwrap());
        assert!(heap.set_prototype_of(obj, Some(proto)).unwrap());
        assert_eq!(heap.get_prototype_of(obj).unwrap(), Some(proto));
    }
}
