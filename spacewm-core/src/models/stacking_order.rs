use super::WindowHandle;
use serde::{Deserialize, Serialize};

/// Window stacking, bottom most first.
///
/// While the ordering lock is held, changes are only recorded; the holder
/// that releases the outermost lock publishes them in one go.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StackingOrder {
    order: Vec<WindowHandle>,
    locks: u32,
    pending: bool,
}

impl StackingOrder {
    pub fn as_slice(&self) -> &[WindowHandle] {
        &self.order
    }

    pub fn top_down(&self) -> impl Iterator<Item = WindowHandle> + '_ {
        self.order.iter().rev().copied()
    }

    pub fn top(&self) -> Option<WindowHandle> {
        self.order.last().copied()
    }

    pub fn position(&self, handle: WindowHandle) -> Option<usize> {
        self.order.iter().position(|h| *h == handle)
    }

    /// Place a new window on top. Returns whether the order changed.
    pub fn push(&mut self, handle: WindowHandle) -> bool {
        if self.order.contains(&handle) {
            return false;
        }
        self.order.push(handle);
        true
    }

    pub fn remove(&mut self, handle: WindowHandle) -> bool {
        let before = self.order.len();
        self.order.retain(|h| *h != handle);
        before != self.order.len()
    }

    pub fn raise(&mut self, handle: WindowHandle) -> bool {
        match self.position(handle) {
            Some(index) if index + 1 < self.order.len() => {
                self.order[index..].rotate_left(1);
                true
            }
            _ => false,
        }
    }

    pub fn lower(&mut self, handle: WindowHandle) -> bool {
        match self.position(handle) {
            Some(index) if index > 0 => {
                self.order[..=index].rotate_right(1);
                true
            }
            _ => false,
        }
    }

    pub fn lock(&mut self) {
        self.locks += 1;
    }

    /// Release one lock. Returns true when this was the outermost lock and
    /// changes were recorded while it was held.
    pub fn unlock(&mut self) -> bool {
        self.locks = self.locks.saturating_sub(1);
        if self.locks == 0 && self.pending {
            self.pending = false;
            return true;
        }
        false
    }

    pub fn is_locked(&self) -> bool {
        self.locks > 0
    }

    /// Record a change. Returns true if it should be published right away.
    pub fn changed(&mut self) -> bool {
        if self.is_locked() {
            self.pending = true;
            return false;
        }
        true
    }
}
