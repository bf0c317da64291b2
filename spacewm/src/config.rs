//! File backed configuration.
//!
//! Settings are kept in `$XDG_CONFIG_HOME/spacewm/spacewm.toml`, one table
//! per group:
//!
//! ```toml
//! [Desktops]
//! Number = "4"
//! Rows = "2"
//! Name_1 = "Mail"
//! ```
//!
//! Values are read back as strings. Entries written by hand as plain toml
//! numbers or booleans are accepted too.
use spacewm_core::config::{ConfigStore, MemoryStore};
use spacewm_core::errors::{Result, SpaceError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

const CONFIG_FILE: &str = "spacewm.toml";

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: MemoryStore,
    dirty: bool,
}

impl FileStore {
    /// Open the store in the user's config directory.
    ///
    /// # Errors
    ///
    /// Will error if the config directory can not be created or the file
    /// exists but can not be parsed.
    pub fn open_default() -> Result<Self> {
        let path = BaseDirectories::with_prefix("spacewm")
            .map_err(|err| SpaceError::Store(err.to_string()))?
            .place_config_file(CONFIG_FILE)?;
        Self::open(path)
    }

    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Will error if the file exists but can not be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            tracing::debug!("Loading config file {}", path.display());
            parse(&fs::read_to_string(&path)?)?
        } else {
            tracing::debug!("No config file at {}, starting empty", path.display());
            MemoryStore::new()
        };
        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &MemoryStore {
        &self.entries
    }
}

fn parse(raw: &str) -> Result<MemoryStore> {
    let table: toml::Table = toml::from_str(raw).map_err(|err| SpaceError::Store(err.to_string()))?;
    let mut store = MemoryStore::new();
    for (group, entries) in table {
        let toml::Value::Table(entries) = entries else {
            tracing::warn!("Ignoring top level entry {:?}, expected a table", group);
            continue;
        };
        for (key, value) in entries {
            let value = match value {
                toml::Value::String(value) => value,
                toml::Value::Table(_) | toml::Value::Array(_) => {
                    tracing::warn!("Ignoring nested entry {}/{}", group, key);
                    continue;
                }
                other => other.to_string(),
            };
            store.write(&group, &key, value);
        }
    }
    Ok(store)
}

fn render(store: &MemoryStore) -> Result<String> {
    let groups: BTreeMap<&String, &BTreeMap<String, String>> = store.groups().collect();
    toml::to_string(&groups).map_err(|err| SpaceError::Store(err.to_string()))
}

impl ConfigStore for FileStore {
    fn read(&self, group: &str, key: &str) -> Option<String> {
        self.entries.read(group, key)
    }

    fn write(&mut self, group: &str, key: &str, value: String) {
        if self.entries.read(group, key).as_deref() == Some(value.as_str()) {
            return;
        }
        self.entries.write(group, key, value);
        self.dirty = true;
    }

    fn delete(&mut self, group: &str, key: &str) {
        if self.entries.has_key(group, key) {
            self.entries.delete(group, key);
            self.dirty = true;
        }
    }

    fn sync(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, render(&self.entries)?)?;
        tracing::debug!("Wrote config file {}", self.path.display());
        self.dirty = false;
        Ok(())
    }
}
