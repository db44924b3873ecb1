use crate::runtime::value::Value;

/// Whole-number partition, kept in strictly ascending key order after every
/// insertion.
///
/// Positions are found by binary search, so an insert costs O(log n)
/// comparisons plus an O(n) shift of the tail. That is fine for the table
/// sizes the bridge sees; a very large positional sequence built from
/// out-of-order keys would want a tree-backed structure instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntPartition {
    entries: Vec<(i64, Value)>,
}

impl IntPartition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower-bound search: `Ok(i)` if `key` sits at `i`, otherwise `Err(i)`
    /// where every key before `i` is smaller and every key from `i` on is
    /// greater.
    fn search(&self, key: i64) -> Result<usize, usize> {
        let mut left = 0;
        let mut right = self.entries.len();
        while left < right {
            let mid = left + (right - left) / 2;
            if self.entries[mid].0 < key {
                left = mid + 1;
            } else {
                right = mid;
            }
        }
        match self.entries.get(left) {
            Some((found, _)) if *found == key => Ok(left),
            _ => Err(left),
        }
    }

    /// Inserts `value` under `key`, replacing in place if the key exists.
    pub fn insert(&mut self, key: i64, value: Value) {
        match self.search(key) {
            Ok(index) => self.entries[index].1 = value,
            Err(index) => {
                tracing::trace!(key, index, "ordered insert");
                self.entries.insert(index, (key, value));
            }
        }
    }

    pub fn get(&self, key: i64) -> Option<&Value> {
        self.search(key).ok().map(|index| &self.entries[index].1)
    }

    pub fn contains(&self, key: i64) -> bool {
        self.search(key).is_ok()
    }

    pub fn first_key(&self) -> Option<i64> {
        self.entries.first().map(|(key, _)| *key)
    }

    /// Partition-local successor.
    ///
    /// `None` if `key` is absent, `Some(None)` if it is the last key.
    pub fn next_key(&self, key: i64) -> Option<Option<i64>> {
        let index = self.search(key).ok()?;
        Some(self.entries.get(index + 1).map(|(next, _)| *next))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &Value)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }
}
