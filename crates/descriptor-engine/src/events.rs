//! Structured audit events for object model operations.
//!
//! Events are buffered in memory and drained by the caller; nothing is
//! written to a global logger.  The buffer is bounded and drops its oldest
//! entries first.  Per-event counters are kept even for dropped entries.

use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::value::{ObjectHandle, PropertyKey};

pub const COMPONENT: &str = "object_model";

/// Structured event emitted by the realm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectModelEvent {
    /// Trace identifier (`<prefix>-<sequence>`).
    pub trace_id: String,
    pub component: String,
    /// Event type, e.g. `define_property`, `put_ignored`, `walk_truncated`.
    pub event: String,
    /// `created`, `updated`, `unchanged`, `rejected`, or the no-op reason.
    pub outcome: String,
    /// Stable error code for rejections.
    pub error_code: Option<String>,
    pub object: Option<ObjectHandle>,
    pub key: Option<PropertyKey>,
}

/// Bounded in-memory event buffer with per-event counters.
#[derive(Debug, Clone)]
pub struct EventLog {
    trace_prefix: String,
    capacity: usize,
    enabled: bool,
    sequence: u64,
    dropped: u64,
    events: VecDeque<ObjectModelEvent>,
    event_counts: BTreeMap<String, u64>,
}

impl EventLog {
    pub fn new(trace_prefix: impl Into<String>, capacity: usize, enabled: bool) -> Self {
        Self {
            trace_prefix: trace_prefix.into(),
            capacity,
            enabled,
            sequence: 0,
            dropped: 0,
            events: VecDeque::new(),
            event_counts: BTreeMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn emit(
        &mut self,
        event: &str,
        outcome: &str,
        error_code: Option<&str>,
        object: Option<ObjectHandle>,
        key: Option<&PropertyKey>,
    ) {
        if !self.enabled {
            return;
        }
        self.sequence += 1;
        self.record_count(event);
        let entry = ObjectModelEvent {
            trace_id: format!("{}-{:06}", self.trace_prefix, self.sequence),
            component: COMPONENT.to_string(),
            event: event.to_string(),
            outcome: outcome.to_string(),
            error_code: error_code.map(str::to_string),
            object,
            key: key.cloned(),
        };
        if self.capacity == 0 {
            self.dropped += 1;
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(entry);
    }

    /// Take all buffered events.
    pub fn drain(&mut self) -> Vec<ObjectModelEvent> {
        std::mem::take(&mut self.events).into()
    }

    pub fn events(&self) -> impl Iterator<Item = &ObjectModelEvent> {
        self.events.iter()
    }

    pub fn event_counts(&self) -> &BTreeMap<String, u64> {
        &self.event_counts
    }

    /// Events evicted because the buffer was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    fn record_count(&mut self, event: &str) {
        *self.event_counts.entry(event.to_string()).or_insert(0) += 1;
    }
}
