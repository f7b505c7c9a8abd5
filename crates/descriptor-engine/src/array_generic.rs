//! Generic `Array.prototype` algorithms (ES5 §15.4.4).
//!
//! These work on any object with a `length`, using only Get, Put and
//! HasProperty.  `length` is read once before iterating and presence is
//! re-checked per index, so a callback that mutates the array changes what
//! later steps read but can never extend the loop.

use crate::descriptor::{DescriptorFields, PropertyDescriptor};
use crate::error::ObjectError;
use crate::realm::Realm;
use crate::value::{JsValue, ObjectHandle, PropertyKey};

const LENGTH: &str = "length";

/// Array literal `[a, b, c]`.
pub fn create_array(realm: &mut Realm, values: &[JsValue]) -> Result<ObjectHandle, ObjectError> {
    let elements: Vec<Option<JsValue>> = values.iter().cloned().map(Some).collect();
    create_array_with_holes(realm, &elements)
}

/// Array literal with elisions: `[1, , 3]` is `[Some(1), None, Some(3)]`.
pub fn create_array_with_holes(
    realm: &mut Realm,
    elements: &[Option<JsValue>],
) -> Result<ObjectHandle, ObjectError> {
    let array = new_array(realm, elements.len() as u32)?;
    for (index, element) in elements.iter().enumerate() {
        if let Some(value) = element {
            realm.define_own_property(array, index as u32, open_data(value.clone()))?;
        }
    }
    Ok(array)
}

fn new_array(realm: &mut Realm, length: u32) -> Result<ObjectHandle, ObjectError> {
    let proto = realm.intrinsics().array_prototype;
    let array = realm.alloc_tagged(Some(proto), "Array");
    realm.define_own_property(
        array,
        LENGTH,
        DescriptorFields::data(JsValue::from(length), true, false, false),
    )?;
    Ok(array)
}

fn open_data(value: JsValue) -> DescriptorFields {
    DescriptorFields::from(PropertyDescriptor::data(value))
}

/// `Array.isArray`.
pub fn is_array(realm: &Realm, object: ObjectHandle) -> Result<bool, ObjectError> {
    Ok(realm.object(object)?.class_tag.as_deref() == Some("Array"))
}

/// `ToUint32(O.length)`.
pub fn length_of(realm: &mut Realm, object: ObjectHandle) -> Result<u32, ObjectError> {
    Ok(realm.get_value(object, LENGTH)?.to_uint32())
}

/// `Array.prototype.indexOf`.  `None` stands for `-1`.
pub fn index_of(
    realm: &mut Realm,
    object: ObjectHandle,
    search: &JsValue,
    from_index: Option<&JsValue>,
) -> Result<Option<u32>, ObjectError> {
    let len = length_of(realm, object)?;
    if len == 0 {
        return Ok(None);
    }
    let n = from_index.map_or(0.0, JsValue::to_integer);
    let len_f = f64::from(len);
    if n >= len_f {
        return Ok(None);
    }
    let start = if n >= 0.0 { n } else { (len_f + n).max(0.0) };

    for k in start as u32..len {
        if !realm.has_property(object, k)? {
            continue;
        }
        if realm.get_value(object, k)?.strict_equals(search) {
            return Ok(Some(k));
        }
    }
    Ok(None)
}

/// Callbacks run as non-strict functions: an undefined or null `thisArg`
/// becomes the global object.
fn callback_this(realm: &Realm, this_arg: &JsValue) -> JsValue {
    match this_arg {
        JsValue::Undefined | JsValue::Null => JsValue::Object(realm.global()),
        other => other.clone(),
    }
}

fn require_callable(realm: &Realm, callback: ObjectHandle) -> Result<(), ObjectError> {
    if realm.is_callable(callback) {
        return Ok(());
    }
    realm.object(callback)?;
    Err(ObjectError::NotCallable(callback))
}

/// `Array.prototype.forEach`.
pub fn for_each(
    realm: &mut Realm,
    object: ObjectHandle,
    callback: ObjectHandle,
    this_arg: &JsValue,
) -> Result<(), ObjectError> {
    let len = length_of(realm, object)?;
    require_callable(realm, callback)?;
    let this = callback_this(realm, this_arg);
    for k in 0..len {
        if !realm.has_property(object, k)? {
            continue;
        }
        let value = realm.get_value(object, k)?;
        realm.call(
            callback,
            &this,
            &[value, JsValue::from(k), JsValue::Object(object)],
        )?;
    }
    Ok(())
}

/// `Array.prototype.map`.  The result has the captured length; holes in the
/// source stay holes.
pub fn map(
    realm: &mut Realm,
    object: ObjectHandle,
    callback: ObjectHandle,
    this_arg: &JsValue,
) -> Result<ObjectHandle, ObjectError> {
    let len = length_of(realm, object)?;
    require_callable(realm, callback)?;
    let this = callback_this(realm, this_arg);
    let result = new_array(realm, len)?;
    for k in 0..len {
        if !realm.has_property(object, k)? {
            continue;
        }
        let value = realm.get_value(object, k)?;
        let mapped = realm.call(
            callback,
            &this,
            &[value, JsValue::from(k), JsValue::Object(object)],
        )?;
        realm.define_own_property(result, k, open_data(mapped))?;
    }
    Ok(result)
}

/// `Array.prototype.push`; returns the new length.
pub fn push(realm: &mut Realm, object: ObjectHandle, values: &[JsValue]) -> Result<u32, ObjectError> {
    let mut len = length_of(realm, object)?;
    for value in values {
        realm.put_value(object, PropertyKey::from(len), value.clone())?;
        len = len.saturating_add(1);
    }
    realm.put_value(object, LENGTH, len)?;
    Ok(len)
}

/// `Array.prototype.join`.  `undefined`, `null` and holes print as empty.
pub fn join(
    realm: &mut Realm,
    object: ObjectHandle,
    separator: Option<&str>,
) -> Result<String, ObjectError> {
    let len = length_of(realm, object)?;
    let separator = separator.unwrap_or(",");
    let mut parts = Vec::with_capacity(len as usize);
    for k in 0..len {
        let part = match realm.get_value(object, k)? {
            JsValue::Undefined | JsValue::Null => String::new(),
            other => other.to_string(),
        };
        parts.push(part);
    }
    Ok(parts.join(separator))
}
