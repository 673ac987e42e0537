//! Durable key/value storage for search history.
//!
//! Values are opaque strings (the history writes JSON). An absent key is
//! reported as `Ok(None)`, never as an error.

pub mod memory;
pub mod migrations;
pub mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::Error;

/// String key/value storage that survives restarts.
pub trait Storage: Send {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Insert or replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), Error>;

    /// Insert or replace several values as one write.
    ///
    /// Backends that support transactions apply all entries or none.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), Error> {
        entries.iter().try_for_each(|(key, value)| self.set(key, value))
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        (**self).set(key, value)
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), Error> {
        (**self).set_many(entries)
    }
}
