use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a subspace, independent of its position.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubspaceId(pub Uuid);

impl SubspaceId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubspaceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Default name for the subspace at the given 1-based ordinal.
pub fn default_name(x11_id: u32) -> String {
    format!("Desktop {x11_id}")
}

/// A single virtual workspace.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Subspace {
    pub id: SubspaceId,
    /// 1-based ordinal, contiguous across all subspaces.
    pub x11_id: u32,
    pub name: String,
}

impl Subspace {
    #[must_use]
    pub fn new(x11_id: u32, name: &str) -> Self {
        Self {
            id: SubspaceId::generate(),
            x11_id,
            name: name.to_owned(),
        }
    }

    pub fn has_default_name(&self) -> bool {
        self.name == default_name(self.x11_id)
    }
}
