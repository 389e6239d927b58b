use std::fmt;

/// A single key and value pair stored in an index.
///
/// Records compare by key first and by value second. Once a record has been
/// handed to a [`Group`] it is only reachable through shared references, so
/// its key can never change under the group that owns it.
///
/// [`Group`]: crate::Group
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Record<K, V> {
    key: K,
    value: V,
}

impl<K, V> Record<K, V> {
    /// Construct a new record.
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    /// The key of the record.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The value of the record.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Replace the value of a record which has not yet been inserted.
    pub fn set_value(&mut self, value: V) {
        self.value = value;
    }

    /// Deconstruct the record into its key and value.
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for Record<K, V> {
    #[inline]
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}

impl<K, V> fmt::Display for Record<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ; {}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::Record;

    #[test]
    fn ordering() {
        let a = Record::new('a', "Anais");
        let b = Record::new('a', "Ahmed");
        let c = Record::new('b', "Adam");

        assert!(b < a);
        assert!(a < c);
        assert_eq!(a, Record::new('a', "Anais"));
        assert_ne!(a, Record::new('a', "Anatole"));
    }

    #[test]
    fn set_value() {
        let mut record = Record::new('a', String::from("Ahmed"));
        record.set_value(String::from("Adam"));
        assert_eq!(record, Record::new('a', String::from("Adam")));
        assert_eq!(record.to_string(), "a ; Adam");
        assert_eq!(record.into_parts(), ('a', String::from("Adam")));
    }
}
