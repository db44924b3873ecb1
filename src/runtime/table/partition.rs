use std::{borrow::Borrow, collections::HashMap, hash::Hash};

use crate::runtime::value::Value;

/// Insertion-ordered key/value partition with hashed lookup.
///
/// Replacing an existing key keeps its original position.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedPartition<K: Eq + Hash> {
    entries: Vec<(K, Value)>,
    index: HashMap<K, usize>,
}

impl<K: Eq + Hash> Default for OrderedPartition<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> OrderedPartition<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: K, value: Value) {
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&Value>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index
            .get(key)
            .map(|&position| &self.entries[position].1)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }

    pub fn first_key(&self) -> Option<&K> {
        self.entries.first().map(|(key, _)| key)
    }

    /// Partition-local successor in insertion order.
    ///
    /// `None` if `key` is absent, `Some(None)` if it is the last key.
    pub fn next_key<Q>(&self, key: &Q) -> Option<Option<&K>>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let position = *self.index.get(key)?;
        Some(self.entries.get(position + 1).map(|(next, _)| next))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Value)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }
}

/// Catch-all partition for keys outside the four ordered kinds.
///
/// Keys match by identity and the partition is not visited by traversal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FallbackPartition {
    entries: Vec<(Value, Value)>,
}

impl FallbackPartition {
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| k.same_identity(&key)) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.same_identity(key))
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
