//! Property descriptors: the complete stored form and the partial literal
//! form accepted by `defineProperty`.
//!
//! A stored [`PropertyDescriptor`] is always fully specified.  A
//! [`DescriptorFields`] literal may omit any field; it is classified into a
//! [`DescriptorKind`] before reconciliation, which is where the two
//! literal-shape errors (`DescriptorMismatch`, `InvalidWritableDescriptor`)
//! are raised.

use serde::{Deserialize, Serialize};

use crate::error::DefineError;
use crate::value::{JsValue, ObjectHandle};

/// Serialize `Option<Option<T>>` so that "absent" and "explicitly
/// undefined" survive a JSON round trip: the outer `None` is skipped, the
/// inner `None` is written as `null`.
pub(crate) mod explicit_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer, T: Serialize>(
        value: &Option<Option<T>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>, T: Deserialize<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<T>>, D::Error> {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

// ---------------------------------------------------------------------------
// PropertyDescriptor
// ---------------------------------------------------------------------------

/// A stored property descriptor (ES5 §8.10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertyDescriptor {
    Data {
        value: JsValue,
        writable: bool,
        enumerable: bool,
        configurable: bool,
    },
    Accessor {
        get: Option<ObjectHandle>,
        set: Option<ObjectHandle>,
        enumerable: bool,
        configurable: bool,
    },
}

impl PropertyDescriptor {
    /// Writable, enumerable, configurable data property: what assignment and
    /// object-literal data entries create.
    pub fn data(value: JsValue) -> Self {
        Self::Data {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    /// Non-writable, non-enumerable, non-configurable data property.
    pub fn data_frozen(value: JsValue) -> Self {
        Self::Data {
            value,
            writable: false,
            enumerable: false,
            configurable: false,
        }
    }

    /// Data descriptor with every omitted-literal default applied.
    pub fn default_data() -> Self {
        Self::data_frozen(JsValue::Undefined)
    }

    /// Accessor descriptor with every omitted-literal default applied.
    pub fn default_accessor() -> Self {
        Self::Accessor {
            get: None,
            set: None,
            enumerable: false,
            configurable: false,
        }
    }

    pub fn is_configurable(&self) -> bool {
        match self {
            Self::Data { configurable, .. } | Self::Accessor { configurable, .. } => *configurable,
        }
    }

    pub fn is_enumerable(&self) -> bool {
        match self {
            Self::Data { enumerable, .. } | Self::Accessor { enumerable, .. } => *enumerable,
        }
    }

    pub fn is_data(&self) -> bool {
        matches!(self, Self::Data { .. })
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self, Self::Accessor { .. })
    }

    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::Data { .. } => DescriptorKind::Data,
            Self::Accessor { .. } => DescriptorKind::Accessor,
        }
    }

    /// The value if this is a data descriptor.
    pub fn value(&self) -> Option<&JsValue> {
        match self {
            Self::Data { value, .. } => Some(value),
            Self::Accessor { .. } => None,
        }
    }

    /// Accessors are never writable.
    pub fn is_writable(&self) -> bool {
        match self {
            Self::Data { writable, .. } => *writable,
            Self::Accessor { .. } => false,
        }
    }

    pub fn getter(&self) -> Option<ObjectHandle> {
        match self {
            Self::Accessor { get, .. } => *get,
            Self::Data { .. } => None,
        }
    }

    pub fn setter(&self) -> Option<ObjectHandle> {
        match self {
            Self::Accessor { set, .. } => *set,
            Self::Data { .. } => None,
        }
    }

    pub fn set_non_configurable(&mut self) {
        match self {
            Self::Data { configurable, .. } | Self::Accessor { configurable, .. } => {
                *configurable = false;
            }
        }
    }

    /// No-op for accessors.
    pub fn set_non_writable(&mut self) {
        if let Self::Data { writable, .. } = self {
            *writable = false;
        }
    }

    /// Structural equality with values compared by SameValue, so a stored
    /// `NaN` matches itself and `+0` differs from `-0`.
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Data {
                    value: a,
                    writable: wa,
                    enumerable: ea,
                    configurable: ca,
                },
                Self::Data {
                    value: b,
                    writable: wb,
                    enumerable: eb,
                    configurable: cb,
                },
            ) => a.same_value(b) && wa == wb && ea == eb && ca == cb,
            (Self::Accessor { .. }, Self::Accessor { .. }) => self == other,
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// DescriptorKind
// ---------------------------------------------------------------------------

/// Classification of a descriptor literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptorKind {
    /// Only `enumerable`/`configurable` (or nothing) specified.
    Generic,
    Data,
    Accessor,
}

// ---------------------------------------------------------------------------
// DescriptorFields — partial descriptor literal
// ---------------------------------------------------------------------------

/// A descriptor literal as passed to `defineProperty`.  Absent fields are
/// `None`.  `get`/`set` are tri-state: `None` (absent), `Some(None)`
/// (explicitly `undefined`) and `Some(Some(f))`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptorFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<JsValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writable: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "explicit_option"
    )]
    pub get: Option<Option<ObjectHandle>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "explicit_option"
    )]
    pub set: Option<Option<ObjectHandle>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enumerable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurable: Option<bool>,
}

impl DescriptorFields {
    /// An empty (generic) literal: `{}`.
    pub fn new() -> Self {
        Self::default()
    }

    /// `{value, writable, enumerable, configurable}` all specified.
    pub fn data(value: JsValue, writable: bool, enumerable: bool, configurable: bool) -> Self {
        Self {
            value: Some(value),
            writable: Some(writable),
            enumerable: Some(enumerable),
            configurable: Some(configurable),
            ..Self::default()
        }
    }

    /// `{get, set, enumerable, configurable}` all specified.
    pub fn accessor(
        get: Option<ObjectHandle>,
        set: Option<ObjectHandle>,
        enumerable: bool,
        configurable: bool,
    ) -> Self {
        Self {
            get: Some(get),
            set: Some(set),
            enumerable: Some(enumerable),
            configurable: Some(configurable),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: impl Into<JsValue>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_writable(mut self, writable: bool) -> Self {
        self.writable = Some(writable);
        self
    }

    /// `get: f` (or `get: undefined` when `getter` is `None`).
    pub fn with_get(mut self, getter: Option<ObjectHandle>) -> Self {
        self.get = Some(getter);
        self
    }

    /// `set: f` (or `set: undefined` when `setter` is `None`).
    pub fn with_set(mut self, setter: Option<ObjectHandle>) -> Self {
        self.set = Some(setter);
        self
    }

    pub fn with_enumerable(mut self, enumerable: bool) -> Self {
        self.enumerable = Some(enumerable);
        self
    }

    pub fn with_configurable(mut self, configurable: bool) -> Self {
        self.configurable = Some(configurable);
        self
    }

    pub fn has_data_fields(&self) -> bool {
        self.value.is_some() || self.writable.is_some()
    }

    pub fn has_accessor_fields(&self) -> bool {
        self.get.is_some() || self.set.is_some()
    }

    /// Pre-validation independent of any existing property.
    pub fn classify(&self) -> Result<DescriptorKind, DefineError> {
        match (self.has_data_fields(), self.has_accessor_fields()) {
            (true, true) if self.value.is_some() => Err(DefineError::DescriptorMismatch),
            (true, true) => Err(DefineError::InvalidWritableDescriptor),
            (true, false) => Ok(DescriptorKind::Data),
            (false, true) => Ok(DescriptorKind::Accessor),
            (false, false) => Ok(DescriptorKind::Generic),
        }
    }

    /// Accessor functions named by this literal (explicit `undefined`
    /// excluded).
    pub fn accessor_functions(&self) -> impl Iterator<Item = ObjectHandle> + '_ {
        [self.get, self.set].into_iter().flatten().flatten()
    }

    /// Merge this literal over the all-defaults descriptor of `kind`.
    /// Generic literals produce data descriptors.
    pub fn to_new_descriptor(&self, kind: DescriptorKind) -> PropertyDescriptor {
        let enumerable = self.enumerable.unwrap_or(false);
        let configurable = self.configurable.unwrap_or(false);
        match kind {
            DescriptorKind::Data | DescriptorKind::Generic => PropertyDescriptor::Data {
                value: self.value.clone().unwrap_or_default(),
                writable: self.writable.unwrap_or(false),
                enumerable,
                configurable,
            },
            DescriptorKind::Accessor => PropertyDescriptor::Accessor {
                get: self.get.flatten(),
                set: self.set.flatten(),
                enumerable,
                configurable,
            },
        }
    }
}

impl From<&PropertyDescriptor> for DescriptorFields {
    fn from(desc: &PropertyDescriptor) -> Self {
        match desc {
            PropertyDescriptor::Data {
                value,
                writable,
                enumerable,
                configurable,
            } => Self::data(value.clone(), *writable, *enumerable, *configurable),
            PropertyDescriptor::Accessor {
                get,
                set,
                enumerable,
                configurable,
            } => Self::accessor(*get, *set, *enumerable, *configurable),
        }
    }
}

impl From<PropertyDescriptor> for DescriptorFields {
    fn from(desc: PropertyDescriptor) -> Self {
        Self::from(&desc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // 1. Stored descriptors
    // -----------------------------------------------------------------------

    #[test]
    fn data_descriptor_defaults() {
        let d = PropertyDescriptor::data(JsValue::from(42));
        assert!(d.is_data());
        assert!(d.is_configurable());
        assert!(d.is_enumerable());
        assert!(d.is_writable());
        assert_eq!(d.value(), Some(&JsValue::from(42)));
        assert_eq!(d.kind(), DescriptorKind::Data);
    }

    #[test]
    fn accessor_is_never_writable() {
        let d = PropertyDescriptor::Accessor {
            get: Some(ObjectHandle(1)),
            set: None,
            enumerable: true,
            configurable: true,
        };
        assert!(d.is_accessor());
        assert!(!d.is_writable());
        assert_eq!(d.value(), None);
        assert_eq!(d.getter(), Some(ObjectHandle(1)));
        assert_eq!(d.setter(), None);
    }

    #[test]
    fn mutators() {
        let mut d = PropertyDescriptor::data(JsValue::from(1));
        d.set_non_configurable();
        d.set_non_writable();
        assert!(!d.is_configurable());
        assert!(!d.is_writable());
        let mut a = PropertyDescriptor::default_accessor();
        a.set_non_writable();
        assert!(a.is_accessor());
    }

    // -----------------------------------------------------------------------
    // 2. Classification
    // -----------------------------------------------------------------------

    #[test]
    fn empty_literal_is_generic() {
        assert_eq!(DescriptorFields::new().classify(), Ok(DescriptorKind::Generic));
        let attrs_only = DescriptorFields::new().with_enumerable(true).with_configurable(false);
        assert_eq!(attrs_only.classify(), Ok(DescriptorKind::Generic));
    }

    #[test]
    fn value_with_undefined_getter_is_mismatch() {
        let d = DescriptorFields::new().with_get(None).with_value(1);
        assert_eq!(d.classify(), Err(DefineError::DescriptorMismatch));
    }

    #[test]
    fn value_writable_and_setter_is_mismatch() {
        let d = DescriptorFields::new()
            .with_set(Some(ObjectHandle(2)))
            .with_value(1)
            .with_writable(true);
        assert_eq!(d.classify(), Err(DefineError::DescriptorMismatch));
    }

    #[test]
    fn writable_with_undefined_setter_is_invalid_writable() {
        let d = DescriptorFields::new().with_set(None).with_writable(true);
        assert_eq!(d.classify(), Err(DefineError::InvalidWritableDescriptor));
    }

    #[test]
    fn writable_with_getter_is_invalid_writable() {
        let d = DescriptorFields::new()
            .with_get(Some(ObjectHandle(3)))
            .with_writable(false);
        assert_eq!(d.classify(), Err(DefineError::InvalidWritableDescriptor));
    }

    #[test]
    fn writable_alone_is_data() {
        assert_eq!(
            DescriptorFields::new().with_writable(true).classify(),
            Ok(DescriptorKind::Data)
        );
        assert_eq!(
            DescriptorFields::new().with_set(None).classify(),
            Ok(DescriptorKind::Accessor)
        );
    }

    // -----------------------------------------------------------------------
    // 3. Defaults and conversion
    // -----------------------------------------------------------------------

    #[test]
    fn generic_literal_becomes_default_data() {
        let d = DescriptorFields::new().to_new_descriptor(DescriptorKind::Generic);
        assert_eq!(d, PropertyDescriptor::default_data());
    }

    #[test]
    fn partial_accessor_takes_defaults() {
        let d = DescriptorFields::new()
            .with_get(Some(ObjectHandle(5)))
            .to_new_descriptor(DescriptorKind::Accessor);
        assert_eq!(
            d,
            PropertyDescriptor::Accessor {
                get: Some(ObjectHandle(5)),
                set: None,
                enumerable: false,
                configurable: false,
            }
        );
    }

    #[test]
    fn complete_descriptor_converts_to_fully_specified_fields() {
        let desc = PropertyDescriptor::Accessor {
            get: None,
            set: Some(ObjectHandle(4)),
            enumerable: true,
            configurable: false,
        };
        let fields = DescriptorFields::from(&desc);
        assert_eq!(fields.get, Some(None));
        assert_eq!(fields.set, Some(Some(ObjectHandle(4))));
        assert_eq!(fields.classify(), Ok(DescriptorKind::Accessor));
        assert_eq!(fields.to_new_descriptor(DescriptorKind::Accessor), desc);
        assert_eq!(fields.accessor_functions().collect::<Vec<_>>(), vec![ObjectHandle(4)]);
    }

    #[test]
    fn explicit_undefined_survives_json() {
        let fields = DescriptorFields::new().with_get(None).with_configurable(true);
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"get":null,"configurable":true}"#);
        let back: DescriptorFields = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fields);
        let absent: DescriptorFields = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.get, None);
    }
}
