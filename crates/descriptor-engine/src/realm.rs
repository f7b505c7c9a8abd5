//! The realm: object heap, host functions, intrinsics and the Get/Put/Define
//! surface.
//!
//! Accessor invocation is re-entrant.  A getter or setter receives
//! `&mut Realm` and may read or redefine the very property that triggered
//! it, so every dispatch path clones the resolved descriptor and drops its
//! heap borrow before calling out.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::config::{ConfigError, RealmConfig};
use crate::define::DefineOutcome;
use crate::descriptor::{DescriptorFields, PropertyDescriptor};
use crate::enumerate;
use crate::error::ObjectError;
use crate::events::{EventLog, ObjectModelEvent};
use crate::intrinsics::{self, Intrinsics};
use crate::object::{ObjectHeap, OrdinaryObject};
use crate::resolver::{PropertyLookup, WalkTruncation};
use crate::value::{JsValue, ObjectHandle, PropertyKey};

// ---------------------------------------------------------------------------
// HostFunction — natively implemented callable
// ---------------------------------------------------------------------------

/// Signature of a host function body: `(realm, this, args) -> result`.
pub type NativeFn = Rc<dyn Fn(&mut Realm, &JsValue, &[JsValue]) -> Result<JsValue, ObjectError>>;

#[derive(Clone)]
pub struct HostFunction {
    pub name: String,
    behavior: NativeFn,
}

impl fmt::Debug for HostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Realm
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Realm {
    heap: ObjectHeap,
    functions: BTreeMap<ObjectHandle, HostFunction>,
    intrinsics: Intrinsics,
    config: RealmConfig,
    events: EventLog,
}

impl Default for Realm {
    fn default() -> Self {
        Self::new()
    }
}

impl Realm {
    pub fn new() -> Self {
        Self::build(RealmConfig::default())
    }

    pub fn with_config(config: RealmConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RealmConfig) -> Self {
        let mut heap = ObjectHeap::new();
        let intrinsics = intrinsics::install(&mut heap);
        let events = EventLog::new(
            config.trace_prefix.clone(),
            config.event_capacity,
            config.record_events,
        );
        Self {
            heap,
            functions: BTreeMap::new(),
            intrinsics,
            config,
            events,
        }
    }

    pub fn config(&self) -> &RealmConfig {
        &self.config
    }

    pub fn heap(&self) -> &ObjectHeap {
        &self.heap
    }

    pub fn intrinsics(&self) -> &Intrinsics {
        &self.intrinsics
    }

    pub fn global(&self) -> ObjectHandle {
        self.intrinsics.global
    }

    pub fn object(&self, handle: ObjectHandle) -> Result<&OrdinaryObject, ObjectError> {
        self.heap.get(handle)
    }

    // -- Allocation ---------------------------------------------------------

    /// Allocate a plain object inheriting from `Object.prototype`.
    pub fn new_object(&mut self) -> ObjectHandle {
        self.alloc_tagged(Some(self.intrinsics.object_prototype), "Object")
    }

    /// Allocate a plain object with an explicit prototype (`Object.create`).
    pub fn create_object(&mut self, proto: Option<ObjectHandle>) -> Result<ObjectHandle, ObjectError> {
        if let Some(p) = proto {
            self.heap.get(p)?;
        }
        Ok(self.alloc_tagged(proto, "Object"))
    }

    pub(crate) fn alloc_tagged(&mut self, proto: Option<ObjectHandle>, class_tag: &str) -> ObjectHandle {
        self.heap.alloc_object(intrinsics::tagged(proto, class_tag))
    }

    /// Register a host function.  Like a declared function it gets an own
    /// `prototype` object whose `constructor` points back at it.
    pub fn create_function<F>(&mut self, name: &str, behavior: F) -> ObjectHandle
    where
        F: Fn(&mut Realm, &JsValue, &[JsValue]) -> Result<JsValue, ObjectError> + 'static,
    {
        let mut function = intrinsics::tagged(Some(self.intrinsics.function_prototype), "Function");
        function.callable = true;
        let handle = self.heap.alloc_object(function);

        let mut prototype = intrinsics::tagged(Some(self.intrinsics.object_prototype), "Object");
        prototype.properties.set_own(
            PropertyKey::from("constructor"),
            PropertyDescriptor::Data {
                value: JsValue::Object(handle),
                writable: true,
                enumerable: false,
                configurable: true,
            },
        );
        let prototype = self.heap.alloc_object(prototype);

        if let Ok(function) = self.heap.get_mut(handle) {
            function.properties.set_own(
                PropertyKey::from("prototype"),
                PropertyDescriptor::Data {
                    value: JsValue::Object(prototype),
                    writable: true,
                    enumerable: false,
                    configurable: false,
                },
            );
        }
        self.functions.insert(
            handle,
            HostFunction {
                name: name.to_string(),
                behavior: Rc::new(behavior),
            },
        );
        handle
    }

    // -- Calls --------------------------------------------------------------

    pub fn is_callable(&self, handle: ObjectHandle) -> bool {
        self.functions.contains_key(&handle)
    }

    pub fn function_name(&self, handle: ObjectHandle) -> Option<&str> {
        self.functions.get(&handle).map(|f| f.name.as_str())
    }

    /// `[[Call]]`.
    pub fn call(
        &mut self,
        function: ObjectHandle,
        this: &JsValue,
        args: &[JsValue],
    ) -> Result<JsValue, ObjectError> {
        let Some(host) = self.functions.get(&function) else {
            self.heap.get(function)?;
            return Err(ObjectError::NotCallable(function));
        };
        let behavior = Rc::clone(&host.behavior);
        (*behavior)(self, this, args)
    }

    /// `new F(args)`: allocate an object inheriting from `F.prototype` (or
    /// `Object.prototype` when that is not an object) and run `F` on it.  An
    /// object returned by `F` replaces the allocated one.
    pub fn construct(
        &mut self,
        function: ObjectHandle,
        args: &[JsValue],
    ) -> Result<ObjectHandle, ObjectError> {
        if !self.is_callable(function) {
            self.heap.get(function)?;
            return Err(ObjectError::NotCallable(function));
        }
        let proto = match self.get_value(function, "prototype")? {
            JsValue::Object(p) => p,
            _ => self.intrinsics.object_prototype,
        };
        let object = self.alloc_tagged(Some(proto), "Object");
        match self.call(function, &JsValue::Object(object), args)? {
            JsValue::Object(returned) => Ok(returned),
            _ => Ok(object),
        }
    }

    // -- [[Get]] / [[Put]] / [[HasProperty]] --------------------------------

    fn lookup(&mut self, object: ObjectHandle, key: &PropertyKey) -> Result<PropertyLookup, ObjectError> {
        let lookup = self
            .heap
            .find_property(object, key, self.config.max_prototype_depth)?;
        if let Some(truncation) = lookup.truncation {
            self.note_truncation(object, Some(key), truncation);
        }
        Ok(lookup)
    }

    /// `[[Get]]` with an explicit receiver for accessor calls.
    pub fn get(
        &mut self,
        object: ObjectHandle,
        key: impl Into<PropertyKey>,
        receiver: &JsValue,
    ) -> Result<JsValue, ObjectError> {
        let key = key.into();
        match self.lookup(object, &key)?.found {
            None => Ok(JsValue::Undefined),
            Some((_, PropertyDescriptor::Data { value, .. })) => Ok(value),
            Some((_, PropertyDescriptor::Accessor { get: Some(getter), .. })) => {
                self.call(getter, receiver, &[])
            }
            Some((_, PropertyDescriptor::Accessor { get: None, .. })) => Ok(JsValue::Undefined),
        }
    }

    /// `object[key]`, with `object` as the receiver.
    pub fn get_value(
        &mut self,
        object: ObjectHandle,
        key: impl Into<PropertyKey>,
    ) -> Result<JsValue, ObjectError> {
        self.get(object, key, &JsValue::Object(object))
    }

    /// `[[Put]]` in non-strict mode: rejected assignments are silent no-ops.
    pub fn put(
        &mut self,
        object: ObjectHandle,
        key: impl Into<PropertyKey>,
        value: JsValue,
        receiver: &JsValue,
    ) -> Result<(), ObjectError> {
        let key = key.into();
        match self.lookup(object, &key)?.found {
            Some((_, PropertyDescriptor::Accessor { set: Some(setter), .. })) => {
                self.call(setter, receiver, &[value])?;
            }
            Some((_, PropertyDescriptor::Accessor { set: None, .. })) => {
                self.note_put_ignored(object, &key, "no_setter");
            }
            Some((_, PropertyDescriptor::Data { writable: false, .. })) => {
                self.note_put_ignored(object, &key, "non_writable");
            }
            Some((
                owner,
                PropertyDescriptor::Data {
                    enumerable,
                    configurable,
                    ..
                },
            )) if owner == object => {
                self.heap.get_mut(object)?.properties.set_own(
                    key,
                    PropertyDescriptor::Data {
                        value,
                        writable: true,
                        enumerable,
                        configurable,
                    },
                );
            }
            Some(_) | None => {
                if self.heap.get(object)?.extensible {
                    self.heap
                        .get_mut(object)?
                        .properties
                        .set_own(key, PropertyDescriptor::data(value));
                } else {
                    self.note_put_ignored(object, &key, "not_extensible");
                }
            }
        }
        Ok(())
    }

    /// `object[key] = value`, with `object` as the receiver.
    pub fn put_value(
        &mut self,
        object: ObjectHandle,
        key: impl Into<PropertyKey>,
        value: impl Into<JsValue>,
    ) -> Result<(), ObjectError> {
        self.put(object, key, value.into(), &JsValue::Object(object))
    }

    /// The `in` operator.
    pub fn has_property(
        &mut self,
        object: ObjectHandle,
        key: impl Into<PropertyKey>,
    ) -> Result<bool, ObjectError> {
        let key = key.into();
        Ok(self.lookup(object, &key)?.found.is_some())
    }

    pub fn has_own_property(
        &self,
        object: ObjectHandle,
        key: impl Into<PropertyKey>,
    ) -> Result<bool, ObjectError> {
        Ok(self.heap.get(object)?.has_own_property(&key.into()))
    }

    // -- [[DefineOwnProperty]] / [[GetOwnProperty]] / [[Delete]] ------------

    /// `Object.defineProperty(object, key, desc)`.  Accessor fields naming a
    /// non-callable object are rejected before reconciliation.
    pub fn define_own_property(
        &mut self,
        object: ObjectHandle,
        key: impl Into<PropertyKey>,
        desc: DescriptorFields,
    ) -> Result<DefineOutcome, ObjectError> {
        let key = key.into();
        self.heap.get(object)?;
        if let Some(bad) = desc.accessor_functions().find(|f| !self.is_callable(*f)) {
            let err = ObjectError::NotCallable(bad);
            self.events.emit(
                "define_property",
                "rejected",
                Some(err.error_code()),
                Some(object),
                Some(&key),
            );
            return Err(err);
        }

        let result = self.heap.get_mut(object)?.define_own_property(&key, &desc);
        match &result {
            Ok(outcome) => {
                self.events
                    .emit("define_property", outcome.as_str(), None, Some(object), Some(&key));
            }
            Err(err) => {
                self.events.emit(
                    "define_property",
                    "rejected",
                    Some(err.error_code()),
                    Some(object),
                    Some(&key),
                );
            }
        }
        Ok(result?)
    }

    /// `Object.getOwnPropertyDescriptor`; never consults the prototype chain.
    pub fn get_own_property_descriptor(
        &self,
        object: ObjectHandle,
        key: impl Into<PropertyKey>,
    ) -> Result<Option<PropertyDescriptor>, ObjectError> {
        Ok(self.heap.get(object)?.get_own_property(&key.into()).cloned())
    }

    /// `delete object[key]`: `false` for a non-configurable property.
    pub fn delete_own(
        &mut self,
        object: ObjectHandle,
        key: impl Into<PropertyKey>,
    ) -> Result<bool, ObjectError> {
        Ok(self.heap.get_mut(object)?.delete(&key.into()))
    }

    // -- Enumeration --------------------------------------------------------

    /// `for (k in object)` keys, as a snapshot.
    pub fn enumerate_keys(&mut self, object: ObjectHandle) -> Result<Vec<PropertyKey>, ObjectError> {
        let enumeration =
            enumerate::enumerate_keys(&self.heap, object, self.config.max_prototype_depth)?;
        if let Some(truncation) = enumeration.truncation {
            self.note_truncation(object, None, truncation);
        }
        Ok(enumeration.keys)
    }

    /// `Object.getOwnPropertyNames`.
    pub fn own_keys(&self, object: ObjectHandle) -> Result<Vec<PropertyKey>, ObjectError> {
        enumerate::own_keys(&self.heap, object)
    }

    /// `Object.keys`.
    pub fn own_enumerable_keys(&self, object: ObjectHandle) -> Result<Vec<PropertyKey>, ObjectError> {
        enumerate::own_enumerable_keys(&self.heap, object)
    }

    // -- Integrity ----------------------------------------------------------

    pub fn prevent_extensions(&mut self, object: ObjectHandle) -> Result<(), ObjectError> {
        self.heap.get_mut(object)?.prevent_extensions();
        Ok(())
    }

    pub fn freeze(&mut self, object: ObjectHandle) -> Result<(), ObjectError> {
        self.heap.get_mut(object)?.freeze();
        Ok(())
    }

    pub fn seal(&mut self, object: ObjectHandle) -> Result<(), ObjectError> {
        self.heap.get_mut(object)?.seal();
        Ok(())
    }

    pub fn is_frozen(&self, object: ObjectHandle) -> Result<bool, ObjectError> {
        Ok(self.heap.get(object)?.is_frozen())
    }

    pub fn is_sealed(&self, object: ObjectHandle) -> Result<bool, ObjectError> {
        Ok(self.heap.get(object)?.is_sealed())
    }

    pub fn is_extensible(&self, object: ObjectHandle) -> Result<bool, ObjectError> {
        Ok(self.heap.get(object)?.extensible)
    }

    pub fn get_prototype_of(&self, object: ObjectHandle) -> Result<Option<ObjectHandle>, ObjectError> {
        self.heap.get_prototype_of(object)
    }

    /// Relink a prototype.  Cycles are accepted.
    pub fn set_prototype_of(
        &mut self,
        object: ObjectHandle,
        proto: Option<ObjectHandle>,
    ) -> Result<bool, ObjectError> {
        self.heap.set_prototype_of(object, proto)
    }

    // -- Events -------------------------------------------------------------

    pub fn drain_events(&mut self) -> Vec<ObjectModelEvent> {
        self.events.drain()
    }

    pub fn event_counts(&self) -> &BTreeMap<String, u64> {
        self.events.event_counts()
    }

    fn note_put_ignored(&mut self, object: ObjectHandle, key: &PropertyKey, reason: &str) {
        self.events
            .emit("put_ignored", reason, None, Some(object), Some(key));
    }

    fn note_truncation(
        &mut self,
        object: ObjectHandle,
        key: Option<&PropertyKey>,
        truncation: WalkTruncation,
    ) {
        self.events
            .emit("walk_truncated", truncation.as_str(), None, Some(object), key);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::DefineErrorKind;

    fn constant(realm: &mut Realm, v: i32) -> ObjectHandle {
        realm.create_function("constant", move |_, _, _| Ok(JsValue::from(v)))
    }

    // -----------------------------------------------------------------------
    // 1. Get
    // -----------------------------------------------------------------------

    #[test]
    fn missing_key_reads_undefined() {
        let mut realm = Realm::new();
        let o = realm.new_object();
        assert_eq!(realm.get_value(o, "nope").unwrap(), JsValue::Undefined);
    }

    #[test]
    fn getter_receives_receiver_not_holder() {
        let mut realm = Realm::new();
        let seen = Rc::new(RefCell::new(None));
        let seen_in = Rc::clone(&seen);
        let getter = realm.create_function("getter", move |_, this, _| {
            *seen_in.borrow_mut() = Some(this.clone());
            Ok(JsValue::from(7))
        });
        let proto = realm.new_object();
        realm
            .define_own_property(proto, "A", DescriptorFields::new().with_get(Some(getter)))
            .unwrap();
        let child = realm.create_object(Some(proto)).unwrap();
        assert_eq!(realm.get_value(child, "A").unwrap(), JsValue::from(7));
        assert_eq!(*seen.borrow(), Some(JsValue::Object(child)));
        assert_eq!(realm.get_own_property_descriptor(child, "A").unwrap(), None);
    }

    #[test]
    fn accessor_without_getter_reads_undefined() {
        let mut realm = Realm::new();
        let o = realm.new_object();
        realm
            .define_own_property(o, "w", DescriptorFields::new().with_set(None))
            .unwrap();
        assert_eq!(realm.get_value(o, "w").unwrap(), JsValue::Undefined);
    }

    // -----------------------------------------------------------------------
    // 2. Put
    // -----------------------------------------------------------------------

    #[test]
    fn put_on_absent_creates_open_data_property() {
        let mut realm = Realm::new();
        let o = realm.new_object();
        realm.put_value(o, "x", 1).unwrap();
        assert_eq!(
            realm.get_own_property_descriptor(o, "x").unwrap(),
            Some(PropertyDescriptor::data(JsValue::from(1)))
        );
    }

    #[test]
    fn put_keeps_attributes_of_own_writable_property() {
        let mut realm = Realm::new();
        let o = realm.new_object();
        realm
            .define_own_property(o, "x", DescriptorFields::new().with_writable(true).with_value(1))
            .unwrap();
        realm.put_value(o, "x", 2).unwrap();
        assert_eq!(
            realm.get_own_property_descriptor(o, "x").unwrap(),
            Some(PropertyDescriptor::Data {
                value: JsValue::from(2),
                writable: true,
                enumerable: false,
                configurable: false,
            })
        );
    }

    #[test]
    fn put_on_non_writable_is_silent_noop() {
        let mut realm = Realm::new();
        let o = realm.new_object();
        realm
            .define_own_property(o, "x", DescriptorFields::new().with_value(1))
            .unwrap();
        realm.drain_events();
        realm.put_value(o, "x", 2).unwrap();
        assert_eq!(realm.get_value(o, "x").unwrap(), JsValue::from(1));
        let events = realm.drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event, "put_ignored");
        assert_eq!(events[0].outcome, "non_writable");
    }

    #[test]
    fn inherited_non_writable_blocks_shadowing() {
        let mut realm = Realm::new();
        let proto = realm.new_object();
        realm
            .define_own_property(proto, "x", DescriptorFields::new().with_value(1))
            .unwrap();
        let child = realm.create_object(Some(proto)).unwrap();
        realm.put_value(child, "x", 2).unwrap();
        assert!(!realm.has_own_property(child, "x").unwrap());
        assert_eq!(realm.get_value(child, "x").unwrap(), JsValue::from(1));
    }

    #[test]
    fn inherited_writable_creates_own_shadow() {
        let mut realm = Realm::new();
        let proto = realm.new_object();
        realm.put_value(proto, "x", 1).unwrap();
        let child = realm.create_object(Some(proto)).unwrap();
        realm.put_value(child, "x", 2).unwrap();
        assert_eq!(realm.get_value(child, "x").unwrap(), JsValue::from(2));
        assert_eq!(realm.get_value(proto, "x").unwrap(), JsValue::from(1));
    }

    #[test]
    fn setter_receives_receiver_and_value() {
        let mut realm = Realm::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_in = Rc::clone(&log);
        let setter = realm.create_function("setter", move |_, this, args| {
            log_in.borrow_mut().push((this.clone(), args.to_vec()));
            Ok(JsValue::Undefined)
        });
        let proto = realm.new_object();
        realm
            .define_own_property(proto, "s", DescriptorFields::new().with_set(Some(setter)))
            .unwrap();
        let child = realm.create_object(Some(proto)).unwrap();
        realm.put_value(child, "s", 5).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![(JsValue::Object(child), vec![JsValue::from(5)])]
        );
        assert!(!realm.has_own_property(child, "s").unwrap());
    }

    #[test]
    fn put_on_getter_only_accessor_is_noop() {
        let mut realm = Realm::new();
        let getter = constant(&mut realm, 3);
        let o = realm.new_object();
        realm
            .define_own_property(o, "g", DescriptorFields::new().with_get(Some(getter)))
            .unwrap();
        realm.put_value(o, "g", 9).unwrap();
        assert_eq!(realm.get_value(o, "g").unwrap(), JsValue::from(3));
    }

    #[test]
    fn put_on_non_extensible_object_does_not_create() {
        let mut realm = Realm::new();
        let o = realm.new_object();
        realm.prevent_extensions(o).unwrap();
        realm.put_value(o, "fresh", 1).unwrap();
        assert!(!realm.has_own_property(o, "fresh").unwrap());
    }

    #[test]
    fn setter_errors_propagate() {
        let mut realm = Realm::new();
        let setter = realm.create_function("thrower", |_, _, _| {
            Err(ObjectError::TypeError("boom".to_string()))
        });
        let o = realm.new_object();
        realm
            .define_own_property(o, "s", DescriptorFields::new().with_set(Some(setter)))
            .unwrap();
        assert_eq!(
            realm.put_value(o, "s", 1),
            Err(ObjectError::TypeError("boom".to_string()))
        );
    }

    // -----------------------------------------------------------------------
    // 3. Re-entrancy
    // -----------------------------------------------------------------------

    #[test]
    fn getter_may_redefine_its_own_property() {
        let mut realm = Realm::new();
        let o = realm.new_object();
        let getter = realm.create_function("lazy", move |realm, this, _| {
            let Some(target) = this.as_object() else {
                return Ok(JsValue::Undefined);
            };
            realm.define_own_property(
                target,
                "lazy",
                DescriptorFields::data(JsValue::from(42), false, true, true),
            )?;
            Ok(JsValue::from(42))
        });
        realm
            .define_own_property(
                o,
                "lazy",
                DescriptorFields::accessor(Some(getter), None, true, true),
            )
            .unwrap();
        assert_eq!(realm.get_value(o, "lazy").unwrap(), JsValue::from(42));
        assert!(realm.get_own_property_descriptor(o, "lazy").unwrap().unwrap().is_data());
    }

    // -----------------------------------------------------------------------
    // 4. Define surface
    // -----------------------------------------------------------------------

    #[test]
    fn accessor_field_must_be_callable() {
        let mut realm = Realm::new();
        let o = realm.new_object();
        let not_fn = realm.new_object();
        assert_eq!(
            realm.define_own_property(o, "x", DescriptorFields::new().with_get(Some(not_fn))),
            Err(ObjectError::NotCallable(not_fn))
        );
        assert!(!realm.has_own_property(o, "x").unwrap());
    }

    #[test]
    fn define_events_record_outcomes() {
        let mut realm = Realm::new();
        let o = realm.new_object();
        realm.drain_events();
        realm
            .define_own_property(o, "x", DescriptorFields::data(JsValue::from(1), false, false, false))
            .unwrap();
        realm
            .define_own_property(o, "x", DescriptorFields::new().with_value(1))
            .unwrap();
        let err = realm
            .define_own_property(o, "x", DescriptorFields::new().with_value(2))
            .unwrap_err();
        assert_eq!(err.define_kind(), Some(DefineErrorKind::NonwritableModified));
        let outcomes: Vec<_> = realm
            .drain_events()
            .into_iter()
            .map(|e| (e.outcome, e.error_code))
            .collect();
        assert_eq!(
            outcomes,
            vec![
                ("created".to_string(), None),
                ("unchanged".to_string(), None),
                ("rejected".to_string(), Some("OM-DEFINE-0004".to_string())),
            ]
        );
        assert_eq!(realm.event_counts().get("define_property"), Some(&3));
    }

    #[test]
    fn unknown_handles_are_errors() {
        let mut realm = Realm::new();
        let bogus = ObjectHandle(10_000);
        assert_eq!(
            realm.get_value(bogus, "x"),
            Err(ObjectError::ObjectNotFound(bogus))
        );
        assert_eq!(
            realm.call(bogus, &JsValue::Undefined, &[]),
            Err(ObjectError::ObjectNotFound(bogus))
        );
        let plain = realm.new_object();
        assert_eq!(
            realm.call(plain, &JsValue::Undefined, &[]),
            Err(ObjectError::NotCallable(plain))
        );
    }

    // -----------------------------------------------------------------------
    // 5. Prototype cycles and construction
    // -----------------------------------------------------------------------

    #[test]
    fn cyclic_chain_lookup_is_not_found_and_logged() {
        let mut realm = Realm::new();
        let a = realm.create_object(None).unwrap();
        let b = realm.create_object(Some(a)).unwrap();
        realm.set_prototype_of(a, Some(b)).unwrap();
        realm.drain_events();
        assert_eq!(realm.get_value(a, "missing").unwrap(), JsValue::Undefined);
        assert!(!realm.has_property(a, "missing").unwrap());
        let events = realm.drain_events();
        assert!(events
            .iter()
            .all(|e| e.event == "walk_truncated" && e.outcome == "cycle_detected"));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn construct_links_instance_to_function_prototype() {
        let mut realm = Realm::new();
        let child = realm.create_function("child", |_, _, _| Ok(JsValue::Undefined));
        let JsValue::Object(proto) = realm.get_value(child, "prototype").unwrap() else {
            panic!("prototype is not an object");
        };
        let instance = realm.construct(child, &[]).unwrap();
        assert_eq!(realm.get_prototype_of(instance).unwrap(), Some(proto));
        assert_eq!(
            realm.get_value(instance, "constructor").unwrap(),
            JsValue::Object(child)
        );
        let prototype_desc = realm
            .get_own_property_descriptor(child, "prototype")
            .unwrap()
            .unwrap();
        assert!(prototype_desc.is_writable());
        assert!(!prototype_desc.is_enumerable());
        assert!(!prototype_desc.is_configurable());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = RealmConfig {
            max_prototype_depth: 0,
            ..RealmConfig::default()
        };
        assert!(Realm::with_config(config).is_err());
    }
}
