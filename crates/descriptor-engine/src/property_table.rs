//! Per-object ordered property storage.
//!
//! Backed by an `IndexMap` so that insertion order survives redefinition:
//! the first write of a key appends it, later writes replace the descriptor
//! in place.  Deletion shifts the remaining keys without reordering them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::descriptor::PropertyDescriptor;
use crate::value::PropertyKey;

/// Insertion-ordered key → descriptor table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyTable {
    entries: IndexMap<PropertyKey, PropertyDescriptor>,
}

impl PropertyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_own(&self, key: &PropertyKey) -> Option<&PropertyDescriptor> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &PropertyKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Store `desc` under `key`.  A new key is appended; an existing key keeps
    /// its position.
    pub fn set_own(&mut self, key: PropertyKey, desc: PropertyDescriptor) {
        self.entries.insert(key, desc);
    }

    /// Remove `key`, returning its descriptor.  Remaining keys keep their
    /// relative order.
    pub fn delete_own(&mut self, key: &PropertyKey) -> Option<PropertyDescriptor> {
        self.entries.shift_remove(key)
    }

    /// Keys in enumeration order: canonical array indices ascending, then
    /// every other key in insertion order.
    pub fn keys_in_order(&self) -> Vec<PropertyKey> {
        let mut indexed: Vec<(u32, &PropertyKey)> = Vec::new();
        let mut named: Vec<&PropertyKey> = Vec::new();
        for key in self.entries.keys() {
            match key.array_index() {
                Some(index) => indexed.push((index, key)),
                None => named.push(key),
            }
        }
        indexed.sort_by_key(|(index, _)| *index);
        indexed
            .into_iter()
            .map(|(_, key)| key)
            .chain(named)
            .cloned()
            .collect()
    }

    /// Keys in raw insertion order.
    pub fn insertion_order(&self) -> impl Iterator<Item = &PropertyKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PropertyKey, &PropertyDescriptor)> {
        self.entries.iter()
    }

    pub fn values(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut PropertyDescriptor> {
        self.entries.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::JsValue;

    fn key(s: &str) -> PropertyKey {
        PropertyKey::from(s)
    }

    fn data(n: i32) -> PropertyDescriptor {
        PropertyDescriptor::data(JsValue::from(n))
    }

    #[test]
    fn first_write_appends_later_writes_keep_position() {
        let mut table = PropertyTable::new();
        table.set_own(key("a"), data(1));
        table.set_own(key("b"), data(2));
        table.set_own(key("a"), PropertyDescriptor::default_accessor());
        assert_eq!(table.keys_in_order(), vec![key("a"), key("b")]);
        assert!(table.get_own(&key("a")).unwrap().is_accessor());
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn delete_preserves_relative_order() {
        let mut table = PropertyTable::new();
        for (i, k) in ["a", "b", "c", "d"].iter().enumerate() {
            table.set_own(key(k), data(i as i32));
        }
        assert!(table.delete_own(&key("b")).is_some());
        assert!(table.delete_own(&key("missing")).is_none());
        assert_eq!(table.keys_in_order(), vec![key("a"), key("c"), key("d")]);
        table.set_own(key("b"), data(9));
        assert_eq!(
            table.keys_in_order(),
            vec![key("a"), key("c"), key("d"), key("b")]
        );
    }

    #[test]
    fn integer_keys_come_first_in_ascending_order() {
        let mut table = PropertyTable::new();
        table.set_own(key("z"), data(0));
        table.set_own(key("10"), data(0));
        table.set_own(key("length"), data(0));
        table.set_own(key("2"), data(0));
        table.set_own(key("01"), data(0));
        assert_eq!(
            table.keys_in_order(),
            vec![key("2"), key("10"), key("z"), key("length"), key("01")]
        );
        assert_eq!(
            table.insertion_order().cloned().collect::<Vec<_>>(),
            vec![key("z"), key("10"), key("length"), key("2"), key("01")]
        );
    }

    #[test]
    fn serializes_as_ordered_map() {
        let mut table = PropertyTable::new();
        table.set_own(key("b"), data(1));
        table.set_own(key("a"), data(2));
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.find("\"b\"").unwrap() < json.find("\"a\"").unwrap());
        let back: PropertyTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
