//! Prototype chain resolution.
//!
//! [`PrototypeWalk`] yields the starting object and then each object along
//! its prototype links, each at most once.  A revisited handle or a chain
//! longer than the configured hop limit ends the walk early; that is treated
//! as "not found" by every caller and recorded in [`WalkTruncation`] so it
//! can be logged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::descriptor::PropertyDescriptor;
use crate::error::ObjectError;
use crate::object::{ObjectHeap, OrdinaryObject};
use crate::value::{ObjectHandle, PropertyKey};

/// Default bound on prototype hops.
pub const MAX_PROTOTYPE_CHAIN_DEPTH: u32 = 1024;

/// Why a walk stopped before reaching a null prototype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkTruncation {
    CycleDetected,
    DepthExceeded,
}

impl WalkTruncation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CycleDetected => "cycle_detected",
            Self::DepthExceeded => "depth_exceeded",
        }
    }
}

/// Lazy iterator over a prototype chain.
#[derive(Debug)]
pub struct PrototypeWalk<'a> {
    heap: &'a ObjectHeap,
    next: Option<ObjectHandle>,
    visited: BTreeSet<ObjectHandle>,
    hops: u32,
    max_hops: u32,
    truncation: Option<WalkTruncation>,
}

impl<'a> PrototypeWalk<'a> {
    /// Start a walk at `start`, which must exist.
    pub fn new(
        heap: &'a ObjectHeap,
        start: ObjectHandle,
        max_hops: u32,
    ) -> Result<Self, ObjectError> {
        heap.get(start)?;
        Ok(Self {
            heap,
            next: Some(start),
            visited: BTreeSet::new(),
            hops: 0,
            max_hops,
            truncation: None,
        })
    }

    /// Set once the walk has ended early.
    pub fn truncation(&self) -> Option<WalkTruncation> {
        self.truncation
    }
}

impl<'a> Iterator for PrototypeWalk<'a> {
    type Item = (ObjectHandle, &'a OrdinaryObject);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next.take()?;
        if !self.visited.insert(handle) {
            self.truncation = Some(WalkTruncation::CycleDetected);
            return None;
        }
        if self.hops > self.max_hops {
            self.truncation = Some(WalkTruncation::DepthExceeded);
            return None;
        }
        // A dangling link ends the chain like a null prototype.
        let object = self.heap.get(handle).ok()?;
        self.hops += 1;
        self.next = object.prototype;
        Some((handle, object))
    }
}

/// Result of looking a key up along a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyLookup {
    /// First object in the chain owning the key, with a copy of its
    /// descriptor.  The copy lets callers release the heap before invoking
    /// accessors.
    pub found: Option<(ObjectHandle, PropertyDescriptor)>,
    pub truncation: Option<WalkTruncation>,
}

impl ObjectHeap {
    pub fn walk(
        &self,
        start: ObjectHandle,
        max_hops: u32,
    ) -> Result<PrototypeWalk<'_>, ObjectError> {
        PrototypeWalk::new(self, start, max_hops)
    }

    /// Find the nearest owner of `key` starting at `start`.
    pub fn find_property(
        &self,
        start: ObjectHandle,
        key: &PropertyKey,
        max_hops: u32,
    ) -> Result<PropertyLookup, ObjectError> {
        let mut walk = self.walk(start, max_hops)?;
        let found = walk
            .by_ref()
            .find_map(|(handle, obj)| obj.get_own_property(key).map(|d| (handle, d.clone())));
        Ok(PropertyLookup {
            found,
            truncation: walk.truncation(),
        })
    }
}
