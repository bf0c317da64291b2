use super::modmask_lookup::{KeyCombo, KeySequence};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct Registration {
    name: String,
    default: KeySequence,
    current: KeySequence,
}

/// Named global actions and the key sequences bound to them.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ShortcutRegistry {
    registrations: Vec<Registration>,
}

impl ShortcutRegistry {
    /// Register `name` bound to `default`. Registering an existing name keeps
    /// its current binding. Returns the active sequence.
    pub fn register(&mut self, name: &str, default: KeySequence) -> KeySequence {
        if let Some(existing) = self.registrations.iter_mut().find(|r| r.name == name) {
            existing.default = default;
            return existing.current.clone();
        }
        tracing::trace!("Registering global shortcut {:?} as {}", name, default);
        self.registrations.push(Registration {
            name: name.to_owned(),
            current: default.clone(),
            default: default.clone(),
        });
        default
    }

    pub fn deregister(&mut self, name: &str) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.name != name);
        before != self.registrations.len()
    }

    /// Rebind `name`. Returns whether the binding changed.
    pub fn set_shortcut(&mut self, name: &str, sequence: KeySequence) -> bool {
        match self.registrations.iter_mut().find(|r| r.name == name) {
            Some(registration) if registration.current != sequence => {
                registration.current = sequence;
                true
            }
            _ => false,
        }
    }

    pub fn shortcut(&self, name: &str) -> Option<&KeySequence> {
        self.registrations
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.current)
    }

    pub fn default_shortcut(&self, name: &str) -> Option<&KeySequence> {
        self.registrations
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.default)
    }

    /// The action bound to a pressed chord, if any.
    pub fn action_for(&self, combo: &KeyCombo) -> Option<&str> {
        self.registrations
            .iter()
            .find(|r| r.current.contains(combo))
            .map(|r| r.name.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registrations.iter().map(|r| r.name.as_str())
    }
}
