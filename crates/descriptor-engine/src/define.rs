//! `[[DefineOwnProperty]]` reconciliation (ES5 §8.12.9).
//!
//! Decides whether a (possibly partial) descriptor literal may be applied to
//! an object's own property table and, if so, what the stored descriptor
//! becomes.  Only the object's own table is consulted; the prototype chain
//! never influences a define.
//!
//! Rejections are computed before any mutation, so a failed define leaves
//! the table exactly as it was.

use serde::{Deserialize, Serialize};

use crate::descriptor::{DescriptorFields, DescriptorKind, PropertyDescriptor};
use crate::error::DefineError;
use crate::property_table::PropertyTable;
use crate::value::{JsValue, PropertyKey};

/// What a successful define did to the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefineOutcome {
    /// A new key was appended.
    Created,
    /// An existing key's descriptor changed in place.
    Updated,
    /// The merge produced the descriptor already stored.
    Unchanged,
}

impl DefineOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }
}

/// Validate `desc` against the current own property `key` of `table` and
/// apply it.
pub fn validate_and_apply(
    table: &mut PropertyTable,
    extensible: bool,
    key: &PropertyKey,
    desc: &DescriptorFields,
) -> Result<DefineOutcome, DefineError> {
    let kind = desc.classify()?;

    let Some(current) = table.get_own(key) else {
        if !extensible {
            return Err(DefineError::NotExtensible {
                key: key.to_string(),
            });
        }
        table.set_own(key.clone(), desc.to_new_descriptor(kind));
        return Ok(DefineOutcome::Created);
    };

    if !current.is_configurable() {
        check_non_configurable(current, desc, kind, key)?;
    }

    let merged = merge(current, desc, kind);
    if merged.same_as(current) {
        return Ok(DefineOutcome::Unchanged);
    }
    table.set_own(key.clone(), merged);
    Ok(DefineOutcome::Updated)
}

/// Validation that does not mutate; exposed for callers that need a dry run.
pub fn check_define(
    table: &PropertyTable,
    extensible: bool,
    key: &PropertyKey,
    desc: &DescriptorFields,
) -> Result<(), DefineError> {
    let kind = desc.classify()?;
    match table.get_own(key) {
        None if !extensible => Err(DefineError::NotExtensible {
            key: key.to_string(),
        }),
        None => Ok(()),
        Some(current) if current.is_configurable() => Ok(()),
        Some(current) => check_non_configurable(current, desc, kind, key),
    }
}

fn check_non_configurable(
    current: &PropertyDescriptor,
    desc: &DescriptorFields,
    kind: DescriptorKind,
    key: &PropertyKey,
) -> Result<(), DefineError> {
    let redefined = || DefineError::NonconfigurableRedefined {
        key: key.to_string(),
    };
    let modified = || DefineError::NonwritableModified {
        key: key.to_string(),
    };

    if desc.configurable == Some(true) {
        return Err(redefined());
    }
    if let Some(enumerable) = desc.enumerable
        && enumerable != current.is_enumerable()
    {
        return Err(redefined());
    }

    match (current, kind) {
        (_, DescriptorKind::Generic) => Ok(()),
        (PropertyDescriptor::Data { .. }, DescriptorKind::Accessor) => Err(redefined()),
        (PropertyDescriptor::Accessor { .. }, DescriptorKind::Data) => Err(redefined()),
        (
            PropertyDescriptor::Data {
                value, writable, ..
            },
            DescriptorKind::Data,
        ) => {
            if *writable {
                // true -> false and value changes are both permitted.
                return Ok(());
            }
            if desc.writable == Some(true) {
                return Err(modified());
            }
            if let Some(new_value) = &desc.value
                && !new_value.same_value(value)
            {
                return Err(modified());
            }
            Ok(())
        }
        (PropertyDescriptor::Accessor { get, set, .. }, DescriptorKind::Accessor) => {
            if let Some(new_get) = desc.get
                && new_get != *get
            {
                return Err(redefined());
            }
            if let Some(new_set) = desc.set
                && new_set != *set
            {
                return Err(redefined());
            }
            Ok(())
        }
    }
}

/// Field-by-field merge of `desc` over `current`.  On a kind switch the new
/// kind's own fields start from their defaults; `enumerable` and
/// `configurable` carry over unless specified.
fn merge(
    current: &PropertyDescriptor,
    desc: &DescriptorFields,
    kind: DescriptorKind,
) -> PropertyDescriptor {
    let enumerable = desc.enumerable.unwrap_or(current.is_enumerable());
    let configurable = desc.configurable.unwrap_or(current.is_configurable());

    match (current, kind) {
        (
            PropertyDescriptor::Data {
                value, writable, ..
            },
            DescriptorKind::Data | DescriptorKind::Generic,
        ) => PropertyDescriptor::Data {
            value: desc.value.clone().unwrap_or_else(|| value.clone()),
            writable: desc.writable.unwrap_or(*writable),
            enumerable,
            configurable,
        },
        (
            PropertyDescriptor::Accessor { get, set, .. },
            DescriptorKind::Accessor | DescriptorKind::Generic,
        ) => PropertyDescriptor::Accessor {
            get: desc.get.unwrap_or(*get),
            set: desc.set.unwrap_or(*set),
            enumerable,
            configurable,
        },
        (PropertyDescriptor::Accessor { .. }, DescriptorKind::Data) => PropertyDescriptor::Data {
            value: desc.value.clone().unwrap_or(JsValue::Undefined),
            writable: desc.writable.unwrap_or(false),
            enumerable,
            configurable,
        },
        (PropertyDescriptor::Data { .. }, DescriptorKind::Accessor) => {
            PropertyDescriptor::Accessor {
                get: desc.get.flatten(),
                set: desc.set.flatten(),
                enumerable,
                configurable,
            }
        }
    }
}
