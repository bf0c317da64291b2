use super::ConfigStore;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const GROUP: &str = "Windows";

#[derive(Default, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPolicy {
    #[default]
    ClickToFocus,
    FocusFollowsMouse,
    FocusUnderMouse,
    FocusStrictlyUnderMouse,
}

impl FocusPolicy {
    /// Policies under which activating a window on request makes sense.
    /// The under-mouse policies would immediately take focus away again.
    pub fn is_reasonable(self) -> bool {
        matches!(self, Self::ClickToFocus | Self::FocusFollowsMouse)
    }
}

impl FromStr for FocusPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ClickToFocus" => Ok(Self::ClickToFocus),
            "FocusFollowsMouse" => Ok(Self::FocusFollowsMouse),
            "FocusUnderMouse" => Ok(Self::FocusUnderMouse),
            "FocusStrictlyUnderMouse" => Ok(Self::FocusStrictlyUnderMouse),
            _ => Err(()),
        }
    }
}

/// Window focus related options, read from the `Windows` group.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusOptions {
    pub policy: FocusPolicy,
    pub separate_screen_focus: bool,
    pub auto_raise: bool,
    /// Milliseconds.
    pub auto_raise_interval: u32,
    pub roll_over_desktops: bool,
}

impl Default for FocusOptions {
    fn default() -> Self {
        Self {
            policy: FocusPolicy::default(),
            separate_screen_focus: false,
            auto_raise: false,
            auto_raise_interval: 750,
            roll_over_desktops: true,
        }
    }
}

impl FocusOptions {
    pub fn load(store: &impl ConfigStore) -> Self {
        let defaults = Self::default();
        Self {
            policy: store.read_or(GROUP, "FocusPolicy", defaults.policy),
            separate_screen_focus: store.read_bool(
                GROUP,
                "SeparateScreenFocus",
                defaults.separate_screen_focus,
            ),
            auto_raise: store.read_bool(GROUP, "AutoRaise", defaults.auto_raise),
            auto_raise_interval: store.read_or(
                GROUP,
                "AutoRaiseInterval",
                defaults.auto_raise_interval,
            ),
            roll_over_desktops: store.read_bool(
                GROUP,
                "RollOverDesktops",
                defaults.roll_over_desktops,
            ),
        }
    }
}
