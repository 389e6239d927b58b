
use std::fmt;
use std::slice;

use thiserror::Error;

use crate::Record;

/// Error raised when a record is added to a group with a different key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Record key `{record}` does not match group key `{group}`")]
pub struct KeyMismatch {
    group: Box<str>,
    record: Box<str>,
}

/// All records sharing a single key, ordered by value.
///
/// Records with equal values keep the order in which they were inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<K, V> {
    key: K,
    records: Vec<Record<K, V>>,
}

impl<K, V> Group<K, V> {
    /// Construct an empty group for the given key.
    pub const fn new(key: K) -> Self {
        Self {
            key,
            records: Vec::new(),
        }
    }

    /// The key every record in this group shares.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Number of records in the group.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Test if the group has no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, sorted by value.
    #[inline]
    pub fn records(&self) -> &[Record<K, V>] {
        &self.records
    }

    /// Iterate over records in value order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Record<K, V>> {
        self.records.iter()
    }
}

impl<K, V> Group<K, V>
where
    K: Eq,
{
    /// Records matching `key`, which is either every record or none of them.
    pub fn get(&self, key: &K) -> &[Record<K, V>] {
        if *key != self.key {
            return &[];
        }

        &self.records
    }
}

impl<K, V> Group<K, V>
where
    K: fmt::Debug + Eq,
    V: Ord,
{
    /// Add a record to the group.
    ///
    /// Fails without modifying the group if the record belongs to another
    /// key.
    pub fn add_record(&mut self, record: Record<K, V>) -> Result<(), KeyMismatch> {
        if *record.key() != self.key {
            return Err(KeyMismatch {
                group: format!("{:?}", self.key).into(),
                record: format!("{:?}", record.key()).into(),
            });
        }

        self.insert(record);
        Ok(())
    }
}

impl<K, V> Group<K, V>
where
    V: Ord,
{
    /// Insert a record whose key is known to match, after any records with
    /// an equal value.
    pub(crate) fn insert(&mut self, record: Record<K, V>) {
        let at = self
            .records
            .partition_point(|existing| existing.value() <= record.value());
        self.records.insert(at, record);
    }
}

impl<K, V> Group<K, V>
where
    K: Eq,
    V: Eq,
{
    /// Remove the first record equal to `record`.
    ///
    /// Returns `false` if no such record exists.
    pub fn delete_record(&mut self, record: &Record<K, V>) -> bool {
        let Some(at) = self.records.iter().position(|existing| existing == record) else {
            return false;
        };

        self.records.remove(at);
        true
    }
}

impl<'a, K, V> IntoIterator for &'a Group<K, V> {
    type Item = &'a Record<K, V>;
    type IntoIter = slice::Iter<'a, Record<K, V>>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> fmt::Display for Group<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): [", self.key, self.records.len())?;

        let mut it = self.records.iter().peekable();

        while let Some(record) = it.next() {
            write!(f, "{}", record.value())?;

            if it.peek().is_some() {
                write!(f, ", ")?;
            }
        }

        write!(f, "]")
    }
}
