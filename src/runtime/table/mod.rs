//! Partitioned table store.
//!
//! A [`Table`] is the single composite type of the scripting side. Storage is
//! split by key kind: whole-number keys live in a sorted partition, float,
//! text and boolean keys each live in an insertion-ordered partition, and any
//! other key (a table used as a key) lands in an untraversed fallback
//! partition. A key's kind alone selects its partition, so a key is never
//! present in two partitions.

use std::{fmt, rc::Rc};

use crate::runtime::{
    table_key::{FloatKey, KeyKind, TableKey},
    value::Value,
};

mod int_partition;
mod partition;
mod traversal;

pub use int_partition::IntPartition;
pub use partition::{FallbackPartition, OrderedPartition};
pub use traversal::{Pairs, RawTable};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    integers: IntPartition,
    floats: OrderedPartition<FloatKey>,
    strings: OrderedPartition<Rc<str>>,
    booleans: OrderedPartition<bool>,
    fallback: FallbackPartition,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes `key` to its partition and inserts or replaces `value`.
    ///
    /// A `None` key is ignored without error.
    pub fn set(&mut self, key: Value, value: Value) {
        if matches!(key, Value::None) {
            return;
        }
        match key.to_table_key() {
            Some(key) => self.set_key(key, value),
            None => self.fallback.insert(key, value),
        }
    }

    pub fn set_key(&mut self, key: TableKey, value: Value) {
        match key {
            TableKey::Integer(k) => self.integers.insert(k, value),
            TableKey::Float(k) => self.floats.insert(k, value),
            TableKey::String(k) => self.strings.insert(k, value),
            TableKey::Boolean(k) => self.booleans.insert(k, value),
        }
    }

    /// Point lookup; `None` keys and missing keys are both absent.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        match key {
            Value::Integer(k) => self.integers.get(*k),
            Value::Float(k) => self.floats.get(&FloatKey::new(*k)),
            Value::String(k) => self.strings.get(&**k),
            Value::Boolean(k) => self.booleans.get(k),
            Value::None => None,
            Value::Table(_) => self.fallback.get(key),
        }
    }

    pub fn get_key(&self, key: &TableKey) -> Option<&Value> {
        match key {
            TableKey::Integer(k) => self.integers.get(*k),
            TableKey::Float(k) => self.floats.get(k),
            TableKey::String(k) => self.strings.get(&**k),
            TableKey::Boolean(k) => self.booleans.get(k),
        }
    }

    /// Text-keyed lookup without building a key value.
    pub fn get_str(&self, name: &str) -> Option<&Value> {
        self.strings.get(name)
    }

    pub fn contains_key(&self, key: &TableKey) -> bool {
        match key {
            TableKey::Integer(k) => self.integers.contains(*k),
            TableKey::Float(k) => self.floats.contains(k),
            TableKey::String(k) => self.strings.contains(&**k),
            TableKey::Boolean(k) => self.booleans.contains(k),
        }
    }

    /// Positional view: whole-number partition values in ascending key order.
    /// Every other partition is ignored.
    pub fn as_list(&self) -> Vec<Value> {
        self.integers.values().cloned().collect()
    }

    /// Text-keyed entries in insertion order.
    pub fn string_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.strings.iter().map(|(key, value)| (&**key, value))
    }

    pub fn integer_entries(&self) -> impl Iterator<Item = (i64, &Value)> {
        self.integers.iter()
    }

    /// Number of entries in one ordered partition.
    pub fn partition_len(&self, kind: KeyKind) -> usize {
        match kind {
            KeyKind::Integer => self.integers.len(),
            KeyKind::Float => self.floats.len(),
            KeyKind::String => self.strings.len(),
            KeyKind::Boolean => self.booleans.len(),
        }
    }

    pub fn fallback_len(&self) -> usize {
        self.fallback.len()
    }

    /// Number of traversable entries; the fallback partition is not counted.
    pub fn len(&self) -> usize {
        KeyKind::ORDER
            .iter()
            .map(|kind| self.partition_len(*kind))
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0 && self.fallback.is_empty()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self
            .pairs()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect();
        write!(f, "{{{}}}", items.join(", "))
    }
}

impl FromIterator<Value> for Table {
    /// Builds a sequence table keyed `1..=n`.
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut table = Table::new();
        for (index, value) in (1i64..).zip(iter) {
            table.integers.insert(index, value);
        }
        table
    }
}

impl FromIterator<(Value, Value)> for Table {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (key, value) in iter {
            table.set(key, value);
        }
        table
    }
}
