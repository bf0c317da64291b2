use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TabboxMode {
    #[default]
    Windows,
    WindowsAlternative,
    CurrentAppWindows,
    CurrentAppWindowsAlternative,
    Desktop,
    DesktopList,
}

impl TabboxMode {
    /// The window modes in the order their shortcuts are tested.
    pub const WINDOW_MODES: [Self; 4] = [
        Self::Windows,
        Self::WindowsAlternative,
        Self::CurrentAppWindows,
        Self::CurrentAppWindowsAlternative,
    ];

    pub fn is_desktop_mode(self) -> bool {
        matches!(self, Self::Desktop | Self::DesktopList)
    }

    pub fn is_window_mode(self) -> bool {
        !self.is_desktop_mode()
    }
}
