use super::ConfigStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A `ConfigStore` kept entirely in memory.
///
/// Used directly by tests and as the in-memory half of file backed stores.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    groups: BTreeMap<String, BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, String>)> {
        self.groups.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(BTreeMap::is_empty)
    }
}

impl ConfigStore for MemoryStore {
    fn read(&self, group: &str, key: &str) -> Option<String> {
        self.groups.get(group)?.get(key).cloned()
    }

    fn write(&mut self, group: &str, key: &str, value: String) {
        self.groups
            .entry(group.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
    }

    fn delete(&mut self, group: &str, key: &str) {
        if let Some(entries) = self.groups.get_mut(group) {
            entries.remove(key);
            if entries.is_empty() {
                self.groups.remove(group);
            }
        }
    }
}
