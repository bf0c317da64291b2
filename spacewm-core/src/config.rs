//! String-keyed configuration storage.
//!
//! Every persisted setting lives in a named group and is stored as a string,
//! the way desktop configuration files traditionally are. Typed access goes
//! through the provided helpers, which fall back to the caller's default when
//! an entry is missing or cannot be parsed.
mod focus_options;
mod memory_store;

use crate::errors::Result;
use std::str::FromStr;

pub use focus_options::{FocusOptions, FocusPolicy};
pub use memory_store::MemoryStore;

pub trait ConfigStore {
    fn read(&self, group: &str, key: &str) -> Option<String>;

    fn write(&mut self, group: &str, key: &str, value: String);

    fn delete(&mut self, group: &str, key: &str);

    /// Flush pending writes to the backing storage.
    ///
    /// # Errors
    ///
    /// Will error if the backing storage can not be written.
    fn sync(&mut self) -> Result<()> {
        Ok(())
    }

    fn has_key(&self, group: &str, key: &str) -> bool {
        self.read(group, key).is_some()
    }

    fn read_or<T>(&self, group: &str, key: &str, default: T) -> T
    where
        T: FromStr,
        Self: Sized,
    {
        let Some(raw) = self.read(group, key) else {
            return default;
        };
        raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value {:?} for {}/{}, using default", raw, group, key);
            default
        })
    }

    /// Booleans are accepted as `true`/`false` as well as `1`/`0`.
    fn read_bool(&self, group: &str, key: &str, default: bool) -> bool
    where
        Self: Sized,
    {
        match self.read(group, key).as_deref().map(str::trim) {
            Some("true" | "1") => true,
            Some("false" | "0") => false,
            Some(other) => {
                tracing::warn!("Invalid flag {:?} for {}/{}, using default", other, group, key);
                default
            }
            None => default,
        }
    }

    /// Comma separated list, empty items are dropped.
    fn read_list(&self, group: &str, key: &str) -> Vec<String>
    where
        Self: Sized,
    {
        self.read(group, key)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn write_value<T: ToString>(&mut self, group: &str, key: &str, value: &T)
    where
        Self: Sized,
    {
        self.write(group, key, value.to_string());
    }
}
