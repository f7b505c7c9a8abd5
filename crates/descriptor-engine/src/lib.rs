#![forbid(unsafe_code)]

//! ES5 object model: property descriptors, prototype-chain resolution,
//! `[[Get]]`/`[[Put]]` dispatch and `[[DefineOwnProperty]]` reconciliation
//! over an arena of ordinary objects.

pub mod array_generic;
pub mod config;
pub mod conformance;
pub mod define;
pub mod descriptor;
pub mod enumerate;
pub mod error;
pub mod events;
pub mod intrinsics;
pub mod literal;
pub mod object;
pub mod property_table;
pub mod realm;
pub mod resolver;
pub mod value;

pub use config::{ConfigError, RealmConfig};
pub use define::{DefineOutcome, validate_and_apply};
pub use descriptor::{DescriptorFields, DescriptorKind, PropertyDescriptor};
pub use error::{DefineError, DefineErrorKind, ObjectError};
pub use events::{EventLog, ObjectModelEvent};
pub use intrinsics::Intrinsics;
pub use literal::{LiteralEntry, ObjectLiteral};
pub use object::{ObjectHeap, OrdinaryObject};
pub use property_table::PropertyTable;
pub use realm::{NativeFn, Realm};
pub use resolver::{MAX_PROTOTYPE_CHAIN_DEPTH, PropertyLookup, PrototypeWalk, WalkTruncation};
pub use value::{JsValue, ObjectHandle, PropertyKey};
