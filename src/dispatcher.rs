//! Holds one index out of a closed set of key and value types.


use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field::parse_trimmed;
use crate::loader::{LoadError, LoadReport, TextLoader};
use crate::reporter::{Reporter, TracingReporter};
use crate::{Field, FieldError, LookupIndex, Record};

/// Errors raised by [`Dispatcher`].
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("No index is loaded")]
    NoIndexLoaded,
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// The supported combinations of key and value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexKind {
    /// Character keys with text values.
    CharString,
    /// Integer keys with text values.
    IntString,
    /// Integer keys with integer values.
    IntInt,
}

impl IndexKind {
    pub const ALL: &'static [IndexKind] =
        &[IndexKind::CharString, IndexKind::IntString, IndexKind::IntInt];

    /// Get the keyword of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            IndexKind::CharString => "char-string",
            IndexKind::IntString => "int-string",
            IndexKind::IntInt => "int-int",
        }
    }

    /// Get a description of the kind.
    pub fn description(&self) -> &'static str {
        match self {
            IndexKind::CharString => "Character keys with text values",
            IndexKind::IntString => "Integer keys with text values",
            IndexKind::IntInt => "Integer keys with integer values",
        }
    }

    /// Parse a kind from its keyword.
    pub fn parse_keyword(keyword: &str) -> Option<IndexKind> {
        IndexKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == keyword)
    }
}

impl fmt::Display for IndexKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

/// A live index of one of the supported kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyIndex {
    CharString(LookupIndex<char, String>),
    IntString(LookupIndex<i32, String>),
    IntInt(LookupIndex<i32, i32>),
}

impl AnyIndex {
    /// Construct an empty index of the given kind.
    pub fn empty(kind: IndexKind) -> Self {
        match kind {
            IndexKind::CharString => AnyIndex::CharString(LookupIndex::new()),
            IndexKind::IntString => AnyIndex::IntString(LookupIndex::new()),
            IndexKind::IntInt => AnyIndex::IntInt(LookupIndex::new()),
        }
    }

    /// The kind of the index.
    pub fn kind(&self) -> IndexKind {
        match self {
            AnyIndex::CharString(..) => IndexKind::CharString,
            AnyIndex::IntString(..) => IndexKind::IntString,
            AnyIndex::IntInt(..) => IndexKind::IntInt,
        }
    }

    fn as_text(&self) -> &dyn TextIndex {
        match self {
            AnyIndex::CharString(index) => index,
            AnyIndex::IntString(index) => index,
            AnyIndex::IntInt(index) => index,
        }
    }

    fn as_text_mut(&mut self) -> &mut dyn TextIndex {
        match self {
            AnyIndex::CharString(index) => index,
            AnyIndex::IntString(index) => index,
            AnyIndex::IntInt(index) => index,
        }
    }
}

impl fmt::Display for AnyIndex {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_text().render(f)
    }
}

/// Operations on an index addressed through textual keys and values.
trait TextIndex {
    fn len(&self) -> usize;

    fn get(&self, key: &str) -> Result<Vec<String>, FieldError>;

    fn contains_key(&self, key: &str) -> Result<bool, FieldError>;

    fn add(&mut self, key: &str, value: &str) -> Result<(), FieldError>;

    fn delete_record(&mut self, key: &str, value: &str) -> Result<bool, FieldError>;

    fn delete_group(&mut self, key: &str) -> Result<bool, FieldError>;

    fn load_path(
        &mut self,
        loader: &TextLoader<&dyn Reporter>,
        path: &Path,
    ) -> Result<LoadReport, LoadError>;

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

impl<K, V> TextIndex for LookupIndex<K, V>
where
    K: Field + Ord + Clone + fmt::Display,
    V: Field + Ord + fmt::Display,
{
    fn len(&self) -> usize {
        LookupIndex::len(self)
    }

    fn get(&self, key: &str) -> Result<Vec<String>, FieldError> {
        let key = parse_trimmed::<K>(key)?;
        let values = LookupIndex::get(self, &key)
            .iter()
            .map(|record| record.value().to_string())
            .collect();
        Ok(values)
    }

    fn contains_key(&self, key: &str) -> Result<bool, FieldError> {
        Ok(LookupIndex::contains_key(self, &parse_trimmed::<K>(key)?))
    }

    fn add(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        let record = Record::new(parse_trimmed::<K>(key)?, parse_trimmed::<V>(value)?);
        self.add_record(record);
        Ok(())
    }

    fn delete_record(&mut self, key: &str, value: &str) -> Result<bool, FieldError> {
        let record = Record::new(parse_trimmed::<K>(key)?, parse_trimmed::<V>(value)?);
        Ok(LookupIndex::delete_record(self, &record))
    }

    fn delete_group(&mut self, key: &str) -> Result<bool, FieldError> {
        Ok(LookupIndex::delete_group(self, &parse_trimmed::<K>(key)?))
    }

    fn load_path(
        &mut self,
        loader: &TextLoader<&dyn Reporter>,
        path: &Path,
    ) -> Result<LoadReport, LoadError> {
        loader.load_path(self, path)
    }

    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Owns at most one live index and forwards textual operations to it.
///
/// Keys and values are given as text and parsed according to the kind of the
/// loaded index.
pub struct Dispatcher<R = TracingReporter> {
    current: Option<AnyIndex>,
    reporter: R,
    separator: char,
}

impl Dispatcher {
    /// Construct a dispatcher with nothing loaded.
    pub const fn new() -> Self {
        Self {
            current: None,
            reporter: TracingReporter,
            separator: crate::loader::DEFAULT_SEPARATOR,
        }
    }
}

impl Default for Dispatcher {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Dispatcher<R>
where
    R: Reporter,
{
    /// Use a different reporter for loads.
    pub fn with_reporter<T>(self, reporter: T) -> Dispatcher<T>
    where
        T: Reporter,
    {
        Dispatcher {
            current: self.current,
            reporter,
            separator: self.separator,
        }
    }

    /// Use a different field separator for loads.
    pub fn with_separator(self, separator: char) -> Self {
        Self { separator, ..self }
    }

    /// Load a new index of `kind` from `path`.
    ///
    /// Any previously loaded index is dropped first, even if this load fails.
    pub fn load<P>(&mut self, kind: IndexKind, path: P) -> Result<LoadReport, DispatchError>
    where
        P: AsRef<Path>,
    {
        self.current = None;

        let loader = TextLoader::new()
            .with_reporter(&self.reporter as &dyn Reporter)
            .with_separator(self.separator);

        let mut index = AnyIndex::empty(kind);
        let report = index.as_text_mut().load_path(&loader, path.as_ref())?;
        tracing::debug!(%kind, records = report.loaded, "Index loaded");
        self.current = Some(index);
        Ok(report)
    }

    /// Replace the current index with an existing one.
    pub fn replace(&mut self, index: AnyIndex) -> Option<AnyIndex> {
        self.current.replace(index)
    }

    /// Drop the current index.
    pub fn unload(&mut self) -> Option<AnyIndex> {
        self.current.take()
    }

    /// Test if an index is loaded.
    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    /// The kind of the loaded index.
    pub fn kind(&self) -> Option<IndexKind> {
        Some(self.current.as_ref()?.kind())
    }

    /// Access the loaded index.
    pub fn current(&self) -> Option<&AnyIndex> {
        self.current.as_ref()
    }

    fn index(&self) -> Result<&dyn TextIndex, DispatchError> {
        match &self.current {
            Some(index) => Ok(index.as_text()),
            None => Err(DispatchError::NoIndexLoaded),
        }
    }

    fn index_mut(&mut self) -> Result<&mut dyn TextIndex, DispatchError> {
        match &mut self.current {
            Some(index) => Ok(index.as_text_mut()),
            None => Err(DispatchError::NoIndexLoaded),
        }
    }

    /// Total number of records in the loaded index.
    pub fn len(&self) -> Result<usize, DispatchError> {
        Ok(self.index()?.len())
    }

    /// Values stored under `key`, rendered as text.
    pub fn get(&self, key: &str) -> Result<Vec<String>, DispatchError> {
        Ok(self.index()?.get(key)?)
    }

    /// Test if a group exists for `key`.
    pub fn contains_key(&self, key: &str) -> Result<bool, DispatchError> {
        Ok(self.index()?.contains_key(key)?)
    }

    /// Add a record.
    pub fn add(&mut self, key: &str, value: &str) -> Result<(), DispatchError> {
        Ok(self.index_mut()?.add(key, value)?)
    }

    /// Remove a record, dropping its group if it becomes empty.
    pub fn delete_record(&mut self, key: &str, value: &str) -> Result<bool, DispatchError> {
        Ok(self.index_mut()?.delete_record(key, value)?)
    }

    /// Remove the group for `key`.
    pub fn delete_group(&mut self, key: &str) -> Result<bool, DispatchError> {
        Ok(self.index_mut()?.delete_group(key)?)
    }

    /// Render the loaded index.
    pub fn render(&self) -> Result<String, DispatchError> {
        let index = self.current.as_ref().ok_or(DispatchError::NoIndexLoaded)?;
        Ok(index.to_string())
    }
}
