#[cfg(test)]
mod tests;

use std::fmt;
use std::path::Path;
use std::slice;

use crate::loader::{LoadError, LoadReport, TextLoader};
use crate::{Field, Group, Record};

/// An in-memory index of records grouped by key.
///
/// Groups are kept sorted by key, one per distinct key. Removing the last
/// record of a group removes the group, so groups only end up empty when
/// created explicitly through [`LookupIndex::add_group`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupIndex<K, V> {
    groups: Vec<Group<K, V>>,
}

impl<K, V> Default for LookupIndex<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> LookupIndex<K, V> {
    /// Construct an empty index.
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Total number of records across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Test if the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(Group::is_empty)
    }

    /// Number of distinct keys.
    #[inline]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Iterate over groups in key order.
    #[inline]
    pub fn groups(&self) -> slice::Iter<'_, Group<K, V>> {
        self.groups.iter()
    }

    /// Iterate over every record, ordered by key and then by value.
    pub fn records(&self) -> impl Iterator<Item = &Record<K, V>> + '_ {
        self.groups.iter().flat_map(Group::iter)
    }

    /// Drop every group and record.
    pub fn clear(&mut self) {
        self.groups.clear();
    }
}

impl<K, V> LookupIndex<K, V>
where
    K: Ord,
{
    fn search(&self, key: &K) -> Result<usize, usize> {
        self.groups.binary_search_by(|group| group.key().cmp(key))
    }

    /// Find the group for `key`.
    pub fn find(&self, key: &K) -> Option<&Group<K, V>> {
        let at = self.search(key).ok()?;
        Some(&self.groups[at])
    }

    /// Test if a group exists for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_ok()
    }

    /// Records stored under `key`, or an empty slice.
    pub fn get(&self, key: &K) -> &[Record<K, V>] {
        match self.find(key) {
            Some(group) => group.records(),
            None => &[],
        }
    }

    /// Remove the group for `key` along with all of its records.
    ///
    /// Returns `false` if there was no such group.
    pub fn delete_group(&mut self, key: &K) -> bool {
        let Ok(at) = self.search(key) else {
            return false;
        };

        let group = self.groups.remove(at);
        tracing::trace!(records = group.len(), "Removed group");
        true
    }
}

impl<K, V> LookupIndex<K, V>
where
    K: Ord + Clone,
{
    /// Ensure that a group exists for `key`.
    ///
    /// Groups created here start out empty. Callers are expected to populate
    /// them, or remove them through [`LookupIndex::delete_group`].
    pub fn add_group(&mut self, key: &K) {
        self.group_mut(key);
    }

    fn group_mut(&mut self, key: &K) -> &mut Group<K, V> {
        let at = match self.search(key) {
            Ok(at) => at,
            Err(at) => {
                self.groups.insert(at, Group::new(key.clone()));
                at
            }
        };

        &mut self.groups[at]
    }
}

impl<K, V> LookupIndex<K, V>
where
    K: Ord + Clone,
    V: Ord,
{
    /// Add a record, creating its group if necessary.
    pub fn add_record(&mut self, record: Record<K, V>) {
        self.group_mut(record.key()).insert(record);
    }

    /// Add a record from its parts.
    #[inline]
    pub fn insert(&mut self, key: K, value: V) {
        self.add_record(Record::new(key, value));
    }

    /// Remove the first record equal to `record`.
    ///
    /// If this was the last record for its key the group is removed as well.
    pub fn delete_record(&mut self, record: &Record<K, V>) -> bool {
        let Ok(at) = self.search(record.key()) else {
            return false;
        };

        let group = &mut self.groups[at];

        if !group.delete_record(record) {
            return false;
        }

        if group.is_empty() {
            self.groups.remove(at);
        }

        true
    }
}

impl<K, V> LookupIndex<K, V>
where
    K: Field + Ord + Clone,
    V: Field + Ord,
{
    /// Load records from the file at `path`, logging skipped lines through
    /// `tracing`.
    ///
    /// Fails only if the file cannot be opened or read.
    pub fn load_path<P>(&mut self, path: P) -> Result<LoadReport, LoadError>
    where
        P: AsRef<Path>,
    {
        TextLoader::new().load_path(self, path)
    }

    /// Load records from in-memory text.
    pub fn load_str(&mut self, input: &str) -> LoadReport {
        TextLoader::new().load_str(self, input)
    }
}

impl<K, V> FromIterator<Record<K, V>> for LookupIndex<K, V>
where
    K: Ord + Clone,
    V: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Record<K, V>>,
    {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<K, V> Extend<Record<K, V>> for LookupIndex<K, V>
where
    K: Ord + Clone,
    V: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Record<K, V>>,
    {
        for record in iter {
            self.add_record(record);
        }
    }
}

impl<K, V> fmt::Display for LookupIndex<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Index {{")?;

        for group in &self.groups {
            writeln!(f, "  {group}")?;
        }

        write!(f, "}}")
    }
}
