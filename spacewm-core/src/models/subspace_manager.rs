use super::subspace::default_name;
use super::subspace_grid::{GridCoords, SubspaceGrid};
use super::{Subspace, SubspaceId};
use crate::config::ConfigStore;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Upper bound for the number of subspaces.
pub const MAXIMUM: u32 = 20;

const GROUP: &str = "Desktops";
const DEFAULT_ROWS: u32 = 2;

fn name_key(x11_id: u32) -> String {
    format!("Name_{x11_id}")
}

fn id_key(x11_id: u32) -> String {
    format!("Id_{x11_id}")
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
    Left,
    Right,
    Above,
    Below,
}

/// Notifications queued by the `SubspaceManager` for its collaborators.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum SubspaceEvent {
    Created(SubspaceId),
    /// `x11_id` is the ordinal the subspace had before it was removed.
    Removed {
        id: SubspaceId,
        x11_id: u32,
    },
    CurrentChanging {
        previous: u32,
        offset: GridCoords,
    },
    CurrentChangingCancelled,
    CurrentChanged {
        previous: u32,
        next: u32,
    },
    CountChanged {
        previous: u32,
        count: u32,
    },
    RowsChanged(u32),
    NavigationWrappingChanged(bool),
    LayoutChanged {
        columns: u32,
        rows: u32,
    },
    NameChanged(SubspaceId),
}

/// Owns the ordered set of subspaces and which one is current.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SubspaceManager {
    subspaces: Vec<Subspace>,
    current: SubspaceId,
    /// Requested row count, the grid never uses more rows than subspaces.
    rows: u32,
    navigation_wrapping: bool,
    grid: SubspaceGrid,
    #[serde(skip)]
    events: VecDeque<SubspaceEvent>,
}

impl Default for SubspaceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SubspaceManager {
    pub fn new() -> Self {
        let first = Subspace::new(1, &default_name(1));
        let mut grid = SubspaceGrid::default();
        grid.update(DEFAULT_ROWS, 1);
        Self {
            current: first.id,
            subspaces: vec![first],
            rows: DEFAULT_ROWS,
            navigation_wrapping: false,
            grid,
            events: VecDeque::new(),
        }
    }

    pub fn count(&self) -> u32 {
        self.subspaces.len() as u32
    }

    pub fn subspaces(&self) -> &[Subspace] {
        &self.subspaces
    }

    pub fn subspace(&self, x11_id: u32) -> Option<&Subspace> {
        let index = usize::try_from(x11_id).ok()?.checked_sub(1)?;
        self.subspaces.get(index)
    }

    pub fn subspace_by_id(&self, id: SubspaceId) -> Option<&Subspace> {
        self.subspaces.iter().find(|s| s.id == id)
    }

    pub fn x11_id_of(&self, id: SubspaceId) -> Option<u32> {
        self.subspace_by_id(id).map(|s| s.x11_id)
    }

    pub fn current(&self) -> &Subspace {
        self.subspace_by_id(self.current)
            .unwrap_or(&self.subspaces[0])
    }

    pub fn current_id(&self) -> SubspaceId {
        self.current
    }

    pub fn current_x11_id(&self) -> u32 {
        self.current().x11_id
    }

    pub fn grid(&self) -> &SubspaceGrid {
        &self.grid
    }

    pub fn rows(&self) -> u32 {
        self.grid.height()
    }

    pub fn is_navigation_wrapping(&self) -> bool {
        self.navigation_wrapping
    }

    /// Hand out the notifications queued since the last call.
    pub fn take_events(&mut self) -> Vec<SubspaceEvent> {
        self.events.drain(..).collect()
    }

    pub fn set_count(&mut self, count: u32) {
        let count = count.clamp(1, MAXIMUM);
        let previous = self.count();
        if count == previous {
            return;
        }
        tracing::debug!("Changing subspace count from {} to {}", previous, count);

        if count < previous {
            let removed = self.subspaces.split_off(count as usize);
            if removed.iter().any(|s| s.id == self.current) {
                let old_current = removed
                    .iter()
                    .find(|s| s.id == self.current)
                    .map_or(previous, |s| s.x11_id);
                self.current = self.subspaces[count as usize - 1].id;
                self.events.push_back(SubspaceEvent::CurrentChanged {
                    previous: old_current,
                    next: count,
                });
            }
            for subspace in removed.iter().rev() {
                self.events.push_back(SubspaceEvent::Removed {
                    id: subspace.id,
                    x11_id: subspace.x11_id,
                });
            }
        } else {
            for x11_id in previous + 1..=count {
                let subspace = Subspace::new(x11_id, &default_name(x11_id));
                self.events.push_back(SubspaceEvent::Created(subspace.id));
                self.subspaces.push(subspace);
            }
        }

        self.update_layout();
        self.events
            .push_back(SubspaceEvent::CountChanged { previous, count });
    }

    pub fn set_current(&mut self, x11_id: u32) -> bool {
        self.set_current_with(x11_id, |_, _| true)
    }

    /// Switch to another subspace.
    ///
    /// The `gate` is consulted with the previous ordinal and the grid offset
    /// of the move after `CurrentChanging` is queued; returning `false`
    /// cancels the switch.
    pub fn set_current_with<F>(&mut self, x11_id: u32, mut gate: F) -> bool
    where
        F: FnMut(u32, GridCoords) -> bool,
    {
        let Some(target) = self.subspace(x11_id).map(|s| s.id) else {
            return false;
        };
        if target == self.current {
            return false;
        }
        let previous = self.current_x11_id();
        let offset = match (self.grid.coords(x11_id), self.grid.coords(previous)) {
            (Some(next), Some(prev)) => (next.0 - prev.0, next.1 - prev.1),
            _ => (0, 0),
        };
        self.events
            .push_back(SubspaceEvent::CurrentChanging { previous, offset });
        if !gate(previous, offset) {
            tracing::debug!("Switch from subspace {} to {} cancelled", previous, x11_id);
            self.events.push_back(SubspaceEvent::CurrentChangingCancelled);
            return false;
        }
        self.current = target;
        self.events.push_back(SubspaceEvent::CurrentChanged {
            previous,
            next: x11_id,
        });
        true
    }

    pub fn set_rows(&mut self, rows: u32) {
        let rows = rows.clamp(1, self.count());
        if SubspaceGrid::size_for(rows, self.count()) == self.grid.size() {
            return;
        }
        self.rows = rows;
        self.update_layout();
        self.events.push_back(SubspaceEvent::RowsChanged(rows));
    }

    pub fn set_navigation_wrapping(&mut self, enabled: bool) {
        if self.navigation_wrapping == enabled {
            return;
        }
        self.navigation_wrapping = enabled;
        self.events
            .push_back(SubspaceEvent::NavigationWrappingChanged(enabled));
    }

    pub fn set_name(&mut self, id: SubspaceId, name: &str) -> bool {
        let Some(subspace) = self.subspaces.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        if subspace.name == name {
            return false;
        }
        name.clone_into(&mut subspace.name);
        self.events.push_back(SubspaceEvent::NameChanged(id));
        true
    }

    /// Insert a new subspace before `position` (0-based, clamped).
    ///
    /// Returns `None` once the maximum is reached.
    pub fn create_subspace(&mut self, position: u32, name: &str) -> Option<SubspaceId> {
        let previous = self.count();
        if previous >= MAXIMUM {
            return None;
        }
        let position = position.min(previous);
        let name = if name.is_empty() {
            default_name(position + 1)
        } else {
            name.to_owned()
        };
        let subspace = Subspace::new(position + 1, &name);
        let id = subspace.id;
        self.subspaces.insert(position as usize, subspace);
        self.renumber();

        self.events.push_back(SubspaceEvent::Created(id));
        self.update_layout();
        self.events.push_back(SubspaceEvent::CountChanged {
            previous,
            count: self.count(),
        });
        Some(id)
    }

    /// Remove a single subspace. The last remaining one is never removed.
    pub fn remove_subspace(&mut self, id: SubspaceId) -> bool {
        let previous = self.count();
        if previous == 1 {
            return false;
        }
        let Some(index) = self.subspaces.iter().position(|s| s.id == id) else {
            return false;
        };
        let old_current = self.current_x11_id();
        let removed = self.subspaces.remove(index);
        self.renumber();

        if removed.id == self.current {
            let next_current = old_current.min(self.count());
            if let Some(next) = self.subspace(next_current).map(|s| s.id) {
                self.current = next;
                self.events.push_back(SubspaceEvent::CurrentChanged {
                    previous: old_current,
                    next: next_current,
                });
            }
        }
        self.update_layout();
        self.events.push_back(SubspaceEvent::Removed {
            id: removed.id,
            x11_id: removed.x11_id,
        });
        self.events.push_back(SubspaceEvent::CountChanged {
            previous,
            count: self.count(),
        });
        true
    }

    /// Ordinal reached from `x11_id` (or the current subspace) in `direction`.
    pub fn toward(&self, direction: Direction, x11_id: Option<u32>, wrap: bool) -> u32 {
        let from = x11_id
            .filter(|id| self.subspace(*id).is_some())
            .unwrap_or_else(|| self.current_x11_id());
        let count = self.count();
        match direction {
            Direction::Next if from < count => from + 1,
            Direction::Next if wrap => 1,
            Direction::Previous if from > 1 => from - 1,
            Direction::Previous if wrap => count,
            Direction::Next | Direction::Previous => from,
            Direction::Left => self.walk_grid(from, (-1, 0), wrap),
            Direction::Right => self.walk_grid(from, (1, 0), wrap),
            Direction::Above => self.walk_grid(from, (0, -1), wrap),
            Direction::Below => self.walk_grid(from, (0, 1), wrap),
        }
    }

    pub fn next(&self, x11_id: Option<u32>, wrap: bool) -> u32 {
        self.toward(Direction::Next, x11_id, wrap)
    }

    pub fn previous(&self, x11_id: Option<u32>, wrap: bool) -> u32 {
        self.toward(Direction::Previous, x11_id, wrap)
    }

    pub fn left(&self, x11_id: Option<u32>, wrap: bool) -> u32 {
        self.toward(Direction::Left, x11_id, wrap)
    }

    pub fn right(&self, x11_id: Option<u32>, wrap: bool) -> u32 {
        self.toward(Direction::Right, x11_id, wrap)
    }

    pub fn above(&self, x11_id: Option<u32>, wrap: bool) -> u32 {
        self.toward(Direction::Above, x11_id, wrap)
    }

    pub fn below(&self, x11_id: Option<u32>, wrap: bool) -> u32 {
        self.toward(Direction::Below, x11_id, wrap)
    }

    /// Step through the grid, jumping over holes. Terminates because the
    /// starting cell is populated.
    fn walk_grid(&self, from: u32, step: GridCoords, wrap: bool) -> u32 {
        let Some(mut coords) = self.grid.coords(from) else {
            return from;
        };
        let width = self.grid.width() as i32;
        let height = self.grid.height() as i32;
        loop {
            coords = (coords.0 + step.0, coords.1 + step.1);
            let outside = coords.0 < 0 || coords.0 >= width || coords.1 < 0 || coords.1 >= height;
            if outside {
                if !wrap {
                    return from;
                }
                coords = (coords.0.rem_euclid(width), coords.1.rem_euclid(height));
            }
            let found = self.grid.at(coords);
            if found != 0 {
                return found;
            }
        }
    }

    /// Restore the count, ids, names and rows from the `Desktops` group.
    pub fn load(&mut self, store: &impl ConfigStore) {
        let count: u32 = store.read_or(GROUP, "Number", 1);
        self.set_count(count);
        self.restore_ids(store);
        let mut renamed = vec![];
        for subspace in &mut self.subspaces {
            let name = store
                .read(GROUP, &name_key(subspace.x11_id))
                .unwrap_or_else(|| default_name(subspace.x11_id));
            if subspace.name != name {
                subspace.name = name;
                renamed.push(subspace.id);
            }
        }
        self.events
            .extend(renamed.into_iter().map(SubspaceEvent::NameChanged));

        self.reload_rows(store);
    }

    pub fn reload_rows(&mut self, store: &impl ConfigStore) {
        let rows: u32 = store.read_or(GROUP, "Rows", DEFAULT_ROWS);
        self.set_rows(rows);
    }

    /// Write the count, ids, non-default names and rows to the `Desktops` group.
    pub fn save(&self, store: &mut impl ConfigStore) {
        let count = self.count();
        for stale in count + 1..=MAXIMUM {
            store.delete(GROUP, &name_key(stale));
            store.delete(GROUP, &id_key(stale));
        }
        store.write_value(GROUP, "Number", &count);
        for subspace in &self.subspaces {
            store.write_value(GROUP, &id_key(subspace.x11_id), &subspace.id);
            let key = name_key(subspace.x11_id);
            if subspace.has_default_name() {
                store.delete(GROUP, &key);
            } else {
                store.write(GROUP, &key, subspace.name.clone());
            }
        }
        store.write_value(GROUP, "Rows", &self.rows);
        if let Err(err) = store.sync() {
            tracing::warn!("Failed to save subspaces: {}", err);
        }
    }

    /// Adopt persisted ids, rewriting the ids of queued notifications.
    fn restore_ids(&mut self, store: &impl ConfigStore) {
        for index in 0..self.subspaces.len() {
            let x11_id = self.subspaces[index].x11_id;
            let Some(raw) = store.read(GROUP, &id_key(x11_id)) else {
                continue;
            };
            let restored = match Uuid::parse_str(raw.trim()) {
                Ok(uuid) => SubspaceId(uuid),
                Err(err) => {
                    tracing::warn!("Ignoring invalid id for subspace {}: {}", x11_id, err);
                    continue;
                }
            };
            let old = self.subspaces[index].id;
            if old == restored || self.subspace_by_id(restored).is_some() {
                continue;
            }
            self.subspaces[index].id = restored;
            if self.current == old {
                self.current = restored;
            }
            for event in &mut self.events {
                match event {
                    SubspaceEvent::Created(id) | SubspaceEvent::NameChanged(id) if *id == old => {
                        *id = restored;
                    }
                    _ => {}
                }
            }
        }
    }

    fn renumber(&mut self) {
        for (index, subspace) in self.subspaces.iter_mut().enumerate() {
            subspace.x11_id = index as u32 + 1;
        }
    }

    fn update_layout(&mut self) {
        let before = self.grid.size();
        self.grid.update(self.rows, self.count());
        let (columns, rows) = self.grid.size();
        if before != (columns, rows) {
            tracing::trace!("Subspace grid is now {}x{}", columns, rows);
        }
        self.events
            .push_back(SubspaceEvent::LayoutChanged { columns, rows });
    }
}
