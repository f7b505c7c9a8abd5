//! Runtime values, object handles and property keys.
//!
//! Values are deliberately small: the reconciliation engine only needs to
//! store them, compare them with SameValue, and hand them to accessor
//! functions.  Objects (including functions) are referenced through
//! [`ObjectHandle`], an index into the realm's object arena.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ObjectHandle — typed reference to heap objects
// ---------------------------------------------------------------------------

/// Opaque handle referencing an object on the managed heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectHandle(pub u32);

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PropertyKey
// ---------------------------------------------------------------------------

/// Largest canonical array index (`2^32 - 2`).
const MAX_ARRAY_INDEX: u64 = u32::MAX as u64 - 1;

/// A property key.  Integer keys are stored in their canonical string form,
/// so `PropertyKey::from(0u32)` and `PropertyKey::from("0")` name the same slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyKey(String);

impl PropertyKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value of this key if it is a canonical array index
    /// (`"0"`, `"17"`; not `"01"`, `"-1"` or `"4294967295"`).
    pub fn array_index(&self) -> Option<u32> {
        let s = self.0.as_str();
        if s.is_empty() || s.len() > 10 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if s.len() > 1 && s.starts_with('0') {
            return None;
        }
        let n: u64 = s.parse().ok()?;
        if n > MAX_ARRAY_INDEX {
            return None;
        }
        u32::try_from(n).ok()
    }

    pub fn is_array_index(&self) -> bool {
        self.array_index().is_some()
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u32> for PropertyKey {
    fn from(index: u32) -> Self {
        Self(index.to_string())
    }
}

// ---------------------------------------------------------------------------
// JsValue — runtime value for the object model
// ---------------------------------------------------------------------------

/// Runtime value stored in data properties and passed to accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum JsValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Object(ObjectHandle),
}

impl Default for JsValue {
    fn default() -> Self {
        Self::Undefined
    }
}

impl JsValue {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    pub fn as_object(&self) -> Option<ObjectHandle> {
        match self {
            Self::Object(h) => Some(*h),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "object",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
            Self::Object(_) => "object",
        }
    }

    /// SameValue (ES5 §9.12): `NaN` equals itself, `+0` and `-0` differ.
    pub fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => {
                if a.is_nan() && b.is_nan() {
                    return true;
                }
                a == b && a.is_sign_negative() == b.is_sign_negative()
            }
            _ => self == other,
        }
    }

    /// Strict equality (`===`, ES5 §11.9.6): `NaN` never equals anything,
    /// `+0 === -0`.
    pub fn strict_equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            _ => self == other,
        }
    }

    /// ToNumber for the primitive cases the collaborators need.  Objects
    /// convert to `NaN` (no `valueOf` dispatch at this layer).
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Undefined => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Self::Object(_) => f64::NAN,
        }
    }

    /// ToUint32 (ES5 §9.6).
    pub fn to_uint32(&self) -> u32 {
        let n = self.to_number();
        if !n.is_finite() || n == 0.0 {
            return 0;
        }
        let int = n.signum() * n.abs().floor();
        int.rem_euclid(4_294_967_296.0) as u32
    }

    /// ToInteger (ES5 §9.4).
    pub fn to_integer(&self) -> f64 {
        let n = self.to_number();
        if n.is_nan() {
            return 0.0;
        }
        if n.is_infinite() || n == 0.0 {
            return n;
        }
        n.signum() * n.abs().floor()
    }
}

impl From<bool> for JsValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for JsValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for JsValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for JsValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for JsValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for JsValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<ObjectHandle> for JsValue {
    fn from(h: ObjectHandle) -> Self {
        Self::Object(h)
    }
}

/// Number-to-string in the shape ES5 prints for the common cases: integral
/// values without a fraction, `NaN`, `Infinity`, and `-0` as `0`.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        return format!("{n:.0}");
    }
    format!("{n}")
}

impl fmt::Display for JsValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&number_to_string(*n)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Object(h) => write!(f, "[{h}]"),
        }
    }
}
