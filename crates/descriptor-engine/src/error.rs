//! Error taxonomy for the object model.
//!
//! `DefineError` is the only family a caller of `define_own_property` can
//! observe for an otherwise valid request; `put` never produces it.  The
//! wider `ObjectError` adds handle and call failures that any operation can
//! hit.  Every variant carries a stable code so event logs and conformance
//! reports stay comparable across releases.

use serde::{Deserialize, Serialize};

use crate::value::ObjectHandle;

/// Append-only: assigned codes are permanent and never reused.
pub const ERROR_CODE_PREFIX: &str = "OM";

/// Coarse classification of a define failure, independent of payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefineErrorKind {
    DescriptorMismatch,
    InvalidWritableDescriptor,
    NonconfigurableRedefined,
    NonwritableModified,
    NotExtensible,
}

/// Rejections raised by `[[DefineOwnProperty]]`.  A rejection never
/// partially applies: the property table is untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum DefineError {
    #[error("TypeError: property descriptor mixes `value` with accessor fields")]
    DescriptorMismatch,
    #[error("TypeError: property descriptor combines `writable` with accessor fields")]
    InvalidWritableDescriptor,
    #[error("TypeError: cannot redefine non-configurable property '{key}'")]
    NonconfigurableRedefined { key: String },
    #[error("TypeError: cannot modify non-writable property '{key}'")]
    NonwritableModified { key: String },
    #[error("TypeError: cannot define property '{key}', object is not extensible")]
    NotExtensible { key: String },
}

impl DefineError {
    pub fn kind(&self) -> DefineErrorKind {
        match self {
            Self::DescriptorMismatch => DefineErrorKind::DescriptorMismatch,
            Self::InvalidWritableDescriptor => DefineErrorKind::InvalidWritableDescriptor,
            Self::NonconfigurableRedefined { .. } => DefineErrorKind::NonconfigurableRedefined,
            Self::NonwritableModified { .. } => DefineErrorKind::NonwritableModified,
            Self::NotExtensible { .. } => DefineErrorKind::NotExtensible,
        }
    }

    pub fn error_code(&self) -> &'static str {
        self.kind().error_code()
    }
}

impl DefineErrorKind {
    pub fn error_code(self) -> &'static str {
        match self {
            Self::DescriptorMismatch => "OM-DEFINE-0001",
            Self::InvalidWritableDescriptor => "OM-DEFINE-0002",
            Self::NonconfigurableRedefined => "OM-DEFINE-0003",
            Self::NonwritableModified => "OM-DEFINE-0004",
            Self::NotExtensible => "OM-DEFINE-0005",
        }
    }
}

/// Errors from object model operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ObjectError {
    #[error(transparent)]
    Define(#[from] DefineError),
    #[error("{0} not found")]
    ObjectNotFound(ObjectHandle),
    #[error("TypeError: {0} is not callable")]
    NotCallable(ObjectHandle),
    /// Raised by host function bodies.
    #[error("TypeError: {0}")]
    TypeError(String),
}

impl ObjectError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Define(e) => e.error_code(),
            Self::ObjectNotFound(_) => "OM-HEAP-0001",
            Self::NotCallable(_) => "OM-CALL-0001",
            Self::TypeError(_) => "OM-CALL-0002",
        }
    }

    /// The define-failure kind, if this error came out of reconciliation.
    pub fn define_kind(&self) -> Option<DefineErrorKind> {
        match self {
            Self::Define(e) => Some(e.kind()),
            _ => None,
        }
    }
}
