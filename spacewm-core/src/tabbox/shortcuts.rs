use super::TabboxMode;
use crate::utils::modmask_lookup::{KeyCombo, KeySequence, ModMask};
use serde::{Deserialize, Serialize};

/// The global actions that start or continue a switcher walk.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkAction {
    Windows,
    WindowsReverse,
    WindowsAlternative,
    WindowsAlternativeReverse,
    CurrentAppWindows,
    CurrentAppWindowsReverse,
    CurrentAppWindowsAlternative,
    CurrentAppWindowsAlternativeReverse,
    Desktops,
    DesktopsReverse,
    DesktopList,
    DesktopListReverse,
}

impl WalkAction {
    pub const ALL: [Self; 12] = [
        Self::Windows,
        Self::WindowsReverse,
        Self::WindowsAlternative,
        Self::WindowsAlternativeReverse,
        Self::CurrentAppWindows,
        Self::CurrentAppWindowsReverse,
        Self::CurrentAppWindowsAlternative,
        Self::CurrentAppWindowsAlternativeReverse,
        Self::Desktops,
        Self::DesktopsReverse,
        Self::DesktopList,
        Self::DesktopListReverse,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Windows => "Walk Through Windows",
            Self::WindowsReverse => "Walk Through Windows (Reverse)",
            Self::WindowsAlternative => "Walk Through Windows Alternative",
            Self::WindowsAlternativeReverse => "Walk Through Windows Alternative (Reverse)",
            Self::CurrentAppWindows => "Walk Through Windows of Current Application",
            Self::CurrentAppWindowsReverse => "Walk Through Windows of Current Application (Reverse)",
            Self::CurrentAppWindowsAlternative => {
                "Walk Through Windows of Current Application Alternative"
            }
            Self::CurrentAppWindowsAlternativeReverse => {
                "Walk Through Windows of Current Application Alternative (Reverse)"
            }
            Self::Desktops => "Walk Through Desktops",
            Self::DesktopsReverse => "Walk Through Desktops (Reverse)",
            Self::DesktopList => "Walk Through Desktop List",
            Self::DesktopListReverse => "Walk Through Desktop List (Reverse)",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    pub fn default_shortcut(self) -> KeySequence {
        let combo = match self {
            Self::Windows => KeyCombo::new(ModMask::Alt, "Tab"),
            Self::WindowsReverse => KeyCombo::new(ModMask::Alt | ModMask::Shift, "Backtab"),
            Self::CurrentAppWindows => KeyCombo::new(ModMask::Alt, "QuoteLeft"),
            Self::CurrentAppWindowsReverse => KeyCombo::new(ModMask::Alt, "AsciiTilde"),
            _ => return KeySequence::empty(),
        };
        KeySequence::new(vec![combo])
    }

    pub fn mode(self) -> TabboxMode {
        match self {
            Self::Windows | Self::WindowsReverse => TabboxMode::Windows,
            Self::WindowsAlternative | Self::WindowsAlternativeReverse => {
                TabboxMode::WindowsAlternative
            }
            Self::CurrentAppWindows | Self::CurrentAppWindowsReverse => {
                TabboxMode::CurrentAppWindows
            }
            Self::CurrentAppWindowsAlternative | Self::CurrentAppWindowsAlternativeReverse => {
                TabboxMode::CurrentAppWindowsAlternative
            }
            Self::Desktops | Self::DesktopsReverse => TabboxMode::Desktop,
            Self::DesktopList | Self::DesktopListReverse => TabboxMode::DesktopList,
        }
    }

    pub fn is_forward(self) -> bool {
        matches!(
            self,
            Self::Windows
                | Self::WindowsAlternative
                | Self::CurrentAppWindows
                | Self::CurrentAppWindowsAlternative
                | Self::Desktops
                | Self::DesktopList
        )
    }

    pub fn for_mode(mode: TabboxMode, forward: bool) -> Self {
        match (mode, forward) {
            (TabboxMode::Windows, true) => Self::Windows,
            (TabboxMode::Windows, false) => Self::WindowsReverse,
            (TabboxMode::WindowsAlternative, true) => Self::WindowsAlternative,
            (TabboxMode::WindowsAlternative, false) => Self::WindowsAlternativeReverse,
            (TabboxMode::CurrentAppWindows, true) => Self::CurrentAppWindows,
            (TabboxMode::CurrentAppWindows, false) => Self::CurrentAppWindowsReverse,
            (TabboxMode::CurrentAppWindowsAlternative, true) => Self::CurrentAppWindowsAlternative,
            (TabboxMode::CurrentAppWindowsAlternative, false) => {
                Self::CurrentAppWindowsAlternativeReverse
            }
            (TabboxMode::Desktop, true) => Self::Desktops,
            (TabboxMode::Desktop, false) => Self::DesktopsReverse,
            (TabboxMode::DesktopList, true) => Self::DesktopList,
            (TabboxMode::DesktopList, false) => Self::DesktopListReverse,
        }
    }
}

/// Key sequences currently bound to each walk action.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TabboxShortcuts {
    sequences: [KeySequence; 12],
}

impl Default for TabboxShortcuts {
    fn default() -> Self {
        Self {
            sequences: WalkAction::ALL.map(WalkAction::default_shortcut),
        }
    }
}

impl TabboxShortcuts {
    pub fn get(&self, action: WalkAction) -> &KeySequence {
        &self.sequences[action as usize]
    }

    pub fn set(&mut self, action: WalkAction, sequence: KeySequence) -> bool {
        let slot = &mut self.sequences[action as usize];
        if *slot == sequence {
            return false;
        }
        *slot = sequence;
        true
    }

    pub fn forward(&self, mode: TabboxMode) -> &KeySequence {
        self.get(WalkAction::for_mode(mode, true))
    }

    pub fn backward(&self, mode: TabboxMode) -> &KeySequence {
        self.get(WalkAction::for_mode(mode, false))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Steady,
    Forward,
}

/// Match a pressed chord against a forward/backward pair.
///
/// Shifted chords get a second chance: `Shift+Tab` also matches bindings
/// written with `Backtab`, and the chord is retried without Shift for keys
/// whose shifted symbol is already part of the binding (`Alt+~`).
pub fn direction_for(combo: &KeyCombo, forward: &KeySequence, backward: &KeySequence) -> Direction {
    if forward.contains(combo) {
        return Direction::Forward;
    }
    if backward.contains(combo) {
        return Direction::Backward;
    }
    if !combo.modifiers.contains(ModMask::Shift) {
        return Direction::Steady;
    }
    if combo.is_key("Tab") {
        let backtab = KeyCombo::new(combo.modifiers, "Backtab");
        if forward.contains(&backtab) {
            return Direction::Forward;
        }
        if backward.contains(&backtab) {
            return Direction::Backward;
        }
    }
    let unshifted = combo.without(ModMask::Shift);
    if forward.contains(&unshifted) {
        return Direction::Forward;
    }
    if backward.contains(&unshifted) {
        return Direction::Backward;
    }
    Direction::Steady
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_names_round_trip() {
        for action in WalkAction::ALL {
            assert_eq!(WalkAction::from_name(action.name()), Some(action));
            assert_eq!(WalkAction::for_mode(action.mode(), action.is_forward()), action);
        }
        assert_eq!(WalkAction::from_name("Walk Through Nothing"), None);
    }

    #[test]
    fn shift_tab_matches_backtab_bindings() {
        let shortcuts = TabboxShortcuts::default();
        let combo = KeyCombo::new(ModMask::Alt | ModMask::Shift, "Tab");
        assert_eq!(
            direction_for(
                &combo,
                shortcuts.forward(TabboxMode::Windows),
                shortcuts.backward(TabboxMode::Windows)
            ),
            Direction::Backward
        );
    }

    #[test]
    fn shifted_symbols_match_unshifted_bindings() {
        let shortcuts = TabboxShortcuts::default();
        let combo = KeyCombo::new(ModMask::Alt | ModMask::Shift, "AsciiTilde");
        assert_eq!(
            direction_for(
                &combo,
                shortcuts.forward(TabboxMode::CurrentAppWindows),
                shortcuts.backward(TabboxMode::CurrentAppWindows)
            ),
            Direction::Backward
        );
        let plain = KeyCombo::new(ModMask::Alt, "F4");
        assert_eq!(
            direction_for(
                &plain,
                shortcuts.forward(TabboxMode::Windows),
                shortcuts.backward(TabboxMode::Windows)
            ),
            Direction::Steady
        );
    }

    #[test]
    fn rebinding_reports_changes() {
        let mut shortcuts = TabboxShortcuts::default();
        let seq: KeySequence = "Meta+Tab".parse().unwrap();
        assert!(shortcuts.set(WalkAction::WindowsAlternative, seq.clone()));
        assert!(!shortcuts.set(WalkAction::WindowsAlternative, seq.clone()));
        assert_eq!(shortcuts.forward(TabboxMode::WindowsAlternative), &seq);
    }
}
