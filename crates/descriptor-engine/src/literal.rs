//! Object initialiser evaluation (`{ a: 1, get b() {}, set b(v) {} }`).
//!
//! Each entry becomes one `define_own_property` call in source order, so a
//! `get x` followed by `set x` merges into a single accessor property.

use serde::{Deserialize, Serialize};

use crate::descriptor::DescriptorFields;
use crate::error::ObjectError;
use crate::realm::Realm;
use crate::value::{JsValue, ObjectHandle, PropertyKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LiteralEntry {
    Data { key: PropertyKey, value: JsValue },
    Getter { key: PropertyKey, function: ObjectHandle },
    Setter { key: PropertyKey, function: ObjectHandle },
}

impl LiteralEntry {
    pub fn key(&self) -> &PropertyKey {
        match self {
            Self::Data { key, .. } | Self::Getter { key, .. } | Self::Setter { key, .. } => key,
        }
    }

    fn to_fields(&self) -> DescriptorFields {
        let open = DescriptorFields::new()
            .with_enumerable(true)
            .with_configurable(true);
        match self {
            Self::Data { value, .. } => open.with_value(value.clone()).with_writable(true),
            Self::Getter { function, .. } => open.with_get(Some(*function)),
            Self::Setter { function, .. } => open.with_set(Some(*function)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectLiteral {
    entries: Vec<LiteralEntry>,
}

impl ObjectLiteral {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(mut self, key: impl Into<PropertyKey>, value: impl Into<JsValue>) -> Self {
        self.entries.push(LiteralEntry::Data {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    pub fn getter(mut self, key: impl Into<PropertyKey>, function: ObjectHandle) -> Self {
        self.entries.push(LiteralEntry::Getter {
            key: key.into(),
            function,
        });
        self
    }

    pub fn setter(mut self, key: impl Into<PropertyKey>, function: ObjectHandle) -> Self {
        self.entries.push(LiteralEntry::Setter {
            key: key.into(),
            function,
        });
        self
    }

    pub fn entries(&self) -> &[LiteralEntry] {
        &self.entries
    }

    /// Evaluate into a fresh object inheriting from `Object.prototype`.
    pub fn build(&self, realm: &mut Realm) -> Result<ObjectHandle, ObjectError> {
        let object = realm.new_object();
        self.apply(realm, object)?;
        Ok(object)
    }

    /// Define every entry on an existing object.
    pub fn apply(&self, realm: &mut Realm, object: ObjectHandle) -> Result<(), ObjectError> {
        for entry in &self.entries {
            realm.define_own_property(object, entry.key().clone(), entry.to_fields())?;
        }
        Ok(())
    }
}
