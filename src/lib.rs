//! An in-memory index of key and value records, grouped by key.
//!
//! Records are bulk loaded from `key ; value` lines through [`TextLoader`],
//! grouped under their key in a [`LookupIndex`], and kept sorted by key and
//! then by value.

pub mod reporter;

mod record;
pub use self::record::Record;

mod group;
pub use self::group::{Group, KeyMismatch};

mod index;
pub use self::index::LookupIndex;

mod field;
pub use self::field::{Field, FieldError};

pub mod loader;
pub use self::loader::{LoadError, LoadReport, TextLoader};

pub mod dispatcher;
pub use self::dispatcher::{AnyIndex, DispatchError, Dispatcher, IndexKind};

pub mod config;
pub use self::config::Config;
