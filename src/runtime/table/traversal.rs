//! First-key / next-key traversal over the partitioned store.
//!
//! Partitions are visited in the fixed order integer, float, text, boolean.
//! The fallback partition is never visited.

use crate::runtime::{
    error::BridgeError,
    table::Table,
    table_key::{KeyKind, TableKey},
    value::Value,
};

/// The four operations a scripting runtime needs from a table: point lookup,
/// point set, first key, and key after a given key.
pub trait RawTable {
    fn raw_get(&self, key: &Value) -> Option<&Value>;
    fn raw_set(&mut self, key: Value, value: Value);
    fn initial_key(&self) -> Option<Value>;
    fn successor_key(&self, key: &Value) -> Result<Option<Value>, BridgeError>;
}

impl Table {
    fn first_key_of(&self, kind: KeyKind) -> Option<TableKey> {
        match kind {
            KeyKind::Integer => self.integers.first_key().map(TableKey::Integer),
            KeyKind::Float => self.floats.first_key().map(|k| TableKey::Float(*k)),
            KeyKind::String => self.strings.first_key().map(|k| TableKey::String(k.clone())),
            KeyKind::Boolean => self.booleans.first_key().map(|k| TableKey::Boolean(*k)),
        }
    }

    fn first_key_among(&self, kinds: &[KeyKind]) -> Option<TableKey> {
        kinds.iter().find_map(|kind| self.first_key_of(*kind))
    }

    /// First key of the first non-empty partition, or `None` for an empty table.
    pub fn first_key(&self) -> Option<TableKey> {
        self.first_key_among(&KeyKind::ORDER)
    }

    /// Key following `key` across all partitions.
    ///
    /// Within a partition this is the partition-local successor; after a
    /// partition's last key it is the first key of the next non-empty
    /// partition. Fails with [`BridgeError::UnknownKey`] if `key` is absent.
    pub fn next_key(&self, key: &TableKey) -> Result<Option<TableKey>, BridgeError> {
        let local = match key {
            TableKey::Integer(k) => self
                .integers
                .next_key(*k)
                .map(|next| next.map(TableKey::Integer)),
            TableKey::Float(k) => self
                .floats
                .next_key(k)
                .map(|next| next.map(|k| TableKey::Float(*k))),
            TableKey::String(k) => self
                .strings
                .next_key(&**k)
                .map(|next| next.map(|k| TableKey::String(k.clone()))),
            TableKey::Boolean(k) => self
                .booleans
                .next_key(k)
                .map(|next| next.map(|k| TableKey::Boolean(*k))),
        };

        match local {
            None => Err(BridgeError::UnknownKey {
                key: key.to_string(),
            }),
            Some(Some(next)) => Ok(Some(next)),
            Some(None) => Ok(self.first_key_among(key.kind().following())),
        }
    }

    /// Iterates every traversable entry using only `first_key`/`next_key`.
    pub fn pairs(&self) -> Pairs<'_> {
        Pairs {
            table: self,
            cursor: self.first_key(),
        }
    }
}

impl RawTable for Table {
    fn raw_get(&self, key: &Value) -> Option<&Value> {
        self.get(key)
    }

    fn raw_set(&mut self, key: Value, value: Value) {
        self.set(key, value);
    }

    fn initial_key(&self) -> Option<Value> {
        self.first_key().map(Value::from)
    }

    fn successor_key(&self, key: &Value) -> Result<Option<Value>, BridgeError> {
        let key = key.to_table_key().ok_or_else(|| BridgeError::UnknownKey {
            key: key.to_string(),
        })?;
        Ok(self.next_key(&key)?.map(Value::from))
    }
}

/// Iterator over `(key, value)` pairs in traversal order.
pub struct Pairs<'a> {
    table: &'a Table,
    cursor: Option<TableKey>,
}

impl<'a> Iterator for Pairs<'a> {
    type Item = (TableKey, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor.take()?;
        let value = self.table.get_key(&key)?;
        let next = self.table.next_key(&key);
        debug_assert!(next.is_ok(), "traversal produced an absent key: {}", key);
        self.cursor = next.ok().flatten();
        Some((key, value))
    }
}
