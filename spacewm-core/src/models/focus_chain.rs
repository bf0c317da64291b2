use super::output::OutputId;
use super::{SubspaceId, Window, WindowHandle};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How `FocusChain::update` repositions a window.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainChange {
    /// Most recently used.
    MakeFirst,
    /// Least recently used.
    MakeLast,
    /// Keep the position, insert if missing.
    Update,
}

type Chain = Vec<WindowHandle>;

fn find(windows: &[Window], handle: WindowHandle) -> Option<&Window> {
    windows.iter().find(|w| w.handle == handle)
}

/// Activation recency of windows, per subspace and globally.
///
/// Every chain keeps the most recently used window at its end. Chains only
/// hold handles; window capabilities are looked up in the slice passed to
/// the queries.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FocusChain {
    chains: HashMap<SubspaceId, Chain>,
    /// Subspaces in ordinal order, as of the last resize.
    order: Vec<SubspaceId>,
    most_recently_used: Chain,
    active: Option<WindowHandle>,
    current_subspace: Option<SubspaceId>,
    pub separate_screen_focus: bool,
}

impl FocusChain {
    pub fn new(subspaces: &[SubspaceId]) -> Self {
        let mut chain = Self::default();
        chain.resize(subspaces, &[]);
        chain
    }

    pub fn set_active_window(&mut self, handle: Option<WindowHandle>) {
        self.active = handle;
    }

    pub fn active_window(&self) -> Option<WindowHandle> {
        self.active
    }

    pub fn set_current_subspace(&mut self, id: SubspaceId) {
        self.current_subspace = Some(id);
    }

    pub fn chain(&self, subspace: SubspaceId) -> &[WindowHandle] {
        self.chains.get(&subspace).map_or(&[], Vec::as_slice)
    }

    pub fn most_recently_used(&self) -> &[WindowHandle] {
        &self.most_recently_used
    }

    pub fn contains(&self, handle: WindowHandle, subspace: SubspaceId) -> bool {
        self.chain(subspace).contains(&handle)
    }

    pub fn is_in_any_chain(&self, handle: WindowHandle) -> bool {
        self.most_recently_used.contains(&handle)
    }

    pub fn update(&mut self, window: &Window, change: ChainChange) {
        if !window.wants_tab_focus() {
            self.unchain(window.handle);
            return;
        }
        let handle = window.handle;
        let active = self.active;
        if window.is_on_all_subspaces() {
            for (id, chain) in &mut self.chains {
                // making first/last only applies on the current subspace
                if Some(*id) == self.current_subspace && change != ChainChange::Update {
                    update_in_chain(chain, handle, change, active);
                } else {
                    insert_into_chain(chain, handle, active);
                }
            }
        } else {
            for (id, chain) in &mut self.chains {
                if window.is_on_subspace(*id) {
                    update_in_chain(chain, handle, change, active);
                } else {
                    chain.retain(|h| *h != handle);
                }
            }
        }
        update_in_chain(&mut self.most_recently_used, handle, change, active);
    }

    pub fn remove(&mut self, handle: WindowHandle) {
        self.unchain(handle);
        if self.active == Some(handle) {
            self.active = None;
        }
    }

    fn unchain(&mut self, handle: WindowHandle) {
        for chain in self.chains.values_mut() {
            chain.retain(|h| *h != handle);
        }
        self.most_recently_used.retain(|h| *h != handle);
    }

    /// Match the chains to the surviving subspaces, in ordinal order.
    ///
    /// New chains start out with the windows on all subspaces. Windows only
    /// chained on removed subspaces are moved to the least recently used end
    /// of the last surviving subspace, removed subspaces taken in ordinal
    /// order.
    pub fn resize(&mut self, subspaces: &[SubspaceId], windows: &[Window]) {
        let Some(&fallback) = subspaces.last() else {
            return;
        };
        let everywhere: Chain = self
            .most_recently_used
            .iter()
            .copied()
            .filter(|handle| find(windows, *handle).is_some_and(Window::is_on_all_subspaces))
            .collect();
        for id in subspaces {
            self.chains
                .entry(*id)
                .or_insert_with(|| everywhere.clone());
        }

        let removed: Vec<SubspaceId> = self
            .order
            .iter()
            .copied()
            .filter(|id| !subspaces.contains(id))
            .collect();
        self.order = subspaces.to_vec();
        let removed_chains: Vec<Chain> = removed
            .iter()
            .filter_map(|id| self.chains.remove(id))
            .collect();
        let mut orphans = Chain::new();
        for handle in removed_chains.into_iter().flatten() {
            if !orphans.contains(&handle) && !self.chains.values().any(|c| c.contains(&handle)) {
                orphans.push(handle);
            }
        }
        if orphans.is_empty() {
            return;
        }
        tracing::trace!("Re-chaining {} windows after resize", orphans.len());
        self.chains.entry(fallback).or_default().splice(0..0, orphans);
    }

    /// Drop the chain of `removed`, re-chaining its exclusive windows onto `into`.
    pub fn merge_subspace(&mut self, removed: SubspaceId, into: SubspaceId) {
        self.order.retain(|id| *id != removed);
        let Some(chain) = self.chains.remove(&removed) else {
            return;
        };
        let orphans: Chain = chain
            .into_iter()
            .filter(|handle| !self.chains.values().any(|c| c.contains(handle)))
            .collect();
        if orphans.is_empty() {
            return;
        }
        tracing::trace!("Re-chaining {} windows after subspace removal", orphans.len());
        let target = self.chains.entry(into).or_default();
        target.splice(0..0, orphans);
    }

    /// Most recently used window on `subspace` that is shown, and with
    /// separate screen focus, placed on `output`.
    pub fn get_for_activation(
        &self,
        subspace: SubspaceId,
        output: Option<OutputId>,
        windows: &[Window],
    ) -> Option<WindowHandle> {
        let chain = self.chains.get(&subspace)?;
        chain.iter().rev().copied().find(|handle| {
            find(windows, *handle).is_some_and(|w| {
                w.is_shown()
                    && (!self.separate_screen_focus || output.map_or(true, |o| w.is_on_output(o)))
            })
        })
    }

    /// Best window on `subspace` to focus once `reference` loses focus.
    pub fn next_for_desktop(
        &self,
        reference: Option<WindowHandle>,
        subspace: SubspaceId,
        active_output: Option<OutputId>,
        windows: &[Window],
    ) -> Option<WindowHandle> {
        let chain = self.chains.get(&subspace)?;
        let output = reference
            .and_then(|r| find(windows, r))
            .and_then(|w| w.output)
            .or(active_output);
        chain.iter().rev().copied().find(|handle| {
            Some(*handle) != reference
                && find(windows, *handle).is_some_and(|w| {
                    w.is_shown()
                        && (!self.separate_screen_focus
                            || output.map_or(true, |o| w.is_on_output(o)))
                })
        })
    }

    pub fn first_most_recently_used(&self) -> Option<WindowHandle> {
        self.most_recently_used.last().copied()
    }

    /// Walk the global chain towards less recently used windows, wrapping to
    /// the most recent one.
    pub fn next_most_recently_used(&self, reference: WindowHandle) -> Option<WindowHandle> {
        let chain = &self.most_recently_used;
        match chain.iter().position(|h| *h == reference) {
            None | Some(0) => chain.last().copied(),
            Some(index) => chain.get(index - 1).copied(),
        }
    }

    /// Put `window` right behind `reference` (or behind the last window of
    /// the same application) in every chain containing the reference.
    pub fn move_after_window(&mut self, window: &Window, reference: &Window, windows: &[Window]) {
        if !window.wants_tab_focus() {
            return;
        }
        for (id, chain) in &mut self.chains {
            if window.is_on_subspace(*id) {
                move_after_in_chain(chain, window, reference, windows);
            }
        }
        move_after_in_chain(&mut self.most_recently_used, window, reference, windows);
    }
}

fn update_in_chain(
    chain: &mut Chain,
    handle: WindowHandle,
    change: ChainChange,
    active: Option<WindowHandle>,
) {
    match change {
        ChainChange::MakeFirst => {
            chain.retain(|h| *h != handle);
            chain.push(handle);
        }
        ChainChange::MakeLast => {
            chain.retain(|h| *h != handle);
            chain.insert(0, handle);
        }
        ChainChange::Update => insert_into_chain(chain, handle, active),
    }
}

fn insert_into_chain(chain: &mut Chain, handle: WindowHandle, active: Option<WindowHandle>) {
    if chain.contains(&handle) {
        return;
    }
    match active {
        Some(active) if active != handle && chain.last() == Some(&active) => {
            // keep the active window the most recent one
            chain.insert(chain.len() - 1, handle);
        }
        _ => chain.push(handle),
    }
}

fn move_after_in_chain(chain: &mut Chain, window: &Window, reference: &Window, windows: &[Window]) {
    if !chain.contains(&reference.handle) {
        return;
    }
    chain.retain(|h| *h != window.handle);
    if window.same_application(reference) {
        if let Some(index) = chain.iter().position(|h| *h == reference.handle) {
            chain.insert(index, window.handle);
        }
        return;
    }
    let same_app = chain.iter().rposition(|h| {
        find(windows, *h).is_some_and(|w| w.same_application(reference))
    });
    if let Some(index) = same_app {
        chain.insert(index, window.handle);
    }
}
