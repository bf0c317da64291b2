use super::TabboxMode;
use crate::config::ConfigStore;
use crate::utils::screen_edges::{parse_borders, ElectricBorder};
use serde::{Deserialize, Serialize};

pub const GROUP: &str = "TabBox";
pub const ALTERNATIVE_GROUP: &str = "TabBoxAlternative";
pub const DEFAULT_LAYOUT: &str = "compact";
pub const DEFAULT_DELAY_TIME: u32 = 90;

/// Enums persisted by their numeric value.
macro_rules! indexed_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $value:literal),+ $(,)? } default $default:ident) => {
        $(#[$meta])*
        #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant = $value),+
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl TryFrom<u32> for $name {
            type Error = u32;

            fn try_from(value: u32) -> Result<Self, u32> {
                match value {
                    $($value => Ok(Self::$variant),)+
                    other => Err(other),
                }
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> u32 {
                value as u32
            }
        }
    };
}

indexed_enum! {
    /// Which subspaces the listed windows may live on.
    DesktopMode {
        AllDesktops = 0,
        OnlyCurrentDesktop = 1,
        ExcludeCurrentDesktop = 2,
    } default OnlyCurrentDesktop
}

indexed_enum! {
    ApplicationsMode {
        AllWindowsAllApplications = 0,
        OneWindowPerApplication = 1,
        AllWindowsCurrentApplication = 2,
    } default AllWindowsAllApplications
}

indexed_enum! {
    /// Whether minimized windows are moved behind the others.
    OrderMinimizedMode {
        NoGroupByMinimized = 0,
        GroupByMinimized = 1,
    } default NoGroupByMinimized
}

indexed_enum! {
    MinimizedMode {
        IgnoreMinimizedStatus = 0,
        ExcludeMinimized = 1,
        OnlyMinimized = 2,
    } default IgnoreMinimizedStatus
}

indexed_enum! {
    ShowDesktopMode {
        DoNotShowDesktopClient = 0,
        ShowDesktopClient = 1,
    } default DoNotShowDesktopClient
}

indexed_enum! {
    MultiScreenMode {
        IgnoreMultiScreen = 0,
        OnlyCurrentScreen = 1,
        ExcludeCurrentScreen = 2,
    } default IgnoreMultiScreen
}

indexed_enum! {
    SwitchingMode {
        FocusChainSwitching = 0,
        StackingOrderSwitching = 1,
    } default FocusChainSwitching
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DesktopSwitchingMode {
    #[default]
    MostRecentlyUsed,
    Static,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TabboxConfig {
    pub desktop_mode: DesktopMode,
    pub applications_mode: ApplicationsMode,
    pub order_minimized_mode: OrderMinimizedMode,
    pub minimized_mode: MinimizedMode,
    pub show_desktop_mode: ShowDesktopMode,
    pub multi_screen_mode: MultiScreenMode,
    pub switching_mode: SwitchingMode,
    pub desktop_switching_mode: DesktopSwitchingMode,
    pub show_tabbox: bool,
    pub highlight_windows: bool,
    pub layout_name: String,
}

impl Default for TabboxConfig {
    fn default() -> Self {
        Self {
            desktop_mode: DesktopMode::default(),
            applications_mode: ApplicationsMode::default(),
            order_minimized_mode: OrderMinimizedMode::default(),
            minimized_mode: MinimizedMode::default(),
            show_desktop_mode: ShowDesktopMode::default(),
            multi_screen_mode: MultiScreenMode::default(),
            switching_mode: SwitchingMode::default(),
            desktop_switching_mode: DesktopSwitchingMode::default(),
            show_tabbox: true,
            highlight_windows: true,
            layout_name: DEFAULT_LAYOUT.to_owned(),
        }
    }
}

fn read_enum<T>(store: &impl ConfigStore, group: &str, key: &str, default: T) -> T
where
    T: TryFrom<u32, Error = u32> + Into<u32> + Copy,
{
    let raw: u32 = store.read_or(group, key, default.into());
    T::try_from(raw).unwrap_or_else(|value| {
        tracing::warn!("Unknown value {} for {}/{}", value, group, key);
        default
    })
}

impl TabboxConfig {
    /// Read a window switcher configuration, falling back to `defaults`.
    pub fn load(store: &impl ConfigStore, group: &str, defaults: &Self) -> Self {
        Self {
            desktop_mode: read_enum(store, group, "DesktopMode", defaults.desktop_mode),
            applications_mode: read_enum(
                store,
                group,
                "ApplicationsMode",
                defaults.applications_mode,
            ),
            order_minimized_mode: read_enum(
                store,
                group,
                "OrderMinimizedMode",
                defaults.order_minimized_mode,
            ),
            minimized_mode: read_enum(store, group, "MinimizedMode", defaults.minimized_mode),
            show_desktop_mode: read_enum(
                store,
                group,
                "ShowDesktopMode",
                defaults.show_desktop_mode,
            ),
            multi_screen_mode: read_enum(
                store,
                group,
                "MultiScreenMode",
                defaults.multi_screen_mode,
            ),
            switching_mode: read_enum(store, group, "SwitchingMode", defaults.switching_mode),
            desktop_switching_mode: defaults.desktop_switching_mode,
            show_tabbox: store.read_bool(group, "ShowTabBox", defaults.show_tabbox),
            highlight_windows: store.read_bool(group, "HighlightWindows", defaults.highlight_windows),
            layout_name: store
                .read(group, "LayoutName")
                .unwrap_or_else(|| defaults.layout_name.clone()),
        }
    }

    /// The same configuration restricted to the active application.
    #[must_use]
    pub fn for_current_application(&self) -> Self {
        Self {
            applications_mode: ApplicationsMode::AllWindowsCurrentApplication,
            ..self.clone()
        }
    }

    fn for_desktops(store: &impl ConfigStore, layout_key: &str, mode: DesktopSwitchingMode) -> Self {
        let defaults = Self::default();
        Self {
            desktop_switching_mode: mode,
            show_tabbox: store.read_bool(GROUP, "ShowTabBox", defaults.show_tabbox),
            highlight_windows: store.read_bool(GROUP, "HighlightWindows", defaults.highlight_windows),
            layout_name: store
                .read(GROUP, layout_key)
                .unwrap_or(defaults.layout_name),
            ..defaults
        }
    }
}

/// Everything the switcher reads from the configuration store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TabboxSettings {
    pub default: TabboxConfig,
    pub alternative: TabboxConfig,
    pub default_current_app: TabboxConfig,
    pub alternative_current_app: TabboxConfig,
    pub desktop: TabboxConfig,
    pub desktop_list: TabboxConfig,
    pub delay_show: bool,
    pub delay_time: u32,
    /// Let the direct raise walk leave the current subspace.
    pub traverse_all: bool,
    pub border_activate: Vec<ElectricBorder>,
    pub border_alternative_activate: Vec<ElectricBorder>,
    pub touch_border_activate: Vec<ElectricBorder>,
    pub touch_border_alternative_activate: Vec<ElectricBorder>,
}

fn alternative_defaults() -> TabboxConfig {
    TabboxConfig {
        desktop_mode: DesktopMode::AllDesktops,
        ..TabboxConfig::default()
    }
}

impl Default for TabboxSettings {
    fn default() -> Self {
        let default = TabboxConfig::default();
        let alternative = alternative_defaults();
        Self {
            default_current_app: default.for_current_application(),
            alternative_current_app: alternative.for_current_application(),
            default,
            alternative,
            desktop: TabboxConfig::default(),
            desktop_list: TabboxConfig {
                desktop_switching_mode: DesktopSwitchingMode::Static,
                ..TabboxConfig::default()
            },
            delay_show: true,
            delay_time: DEFAULT_DELAY_TIME,
            traverse_all: false,
            border_activate: vec![],
            border_alternative_activate: vec![],
            touch_border_activate: vec![],
            touch_border_alternative_activate: vec![],
        }
    }
}

impl TabboxSettings {
    pub fn load(store: &impl ConfigStore) -> Self {
        let default = TabboxConfig::load(store, GROUP, &TabboxConfig::default());
        let alternative = TabboxConfig::load(store, ALTERNATIVE_GROUP, &alternative_defaults());
        Self {
            default_current_app: default.for_current_application(),
            alternative_current_app: alternative.for_current_application(),
            default,
            alternative,
            desktop: TabboxConfig::for_desktops(
                store,
                "DesktopLayout",
                DesktopSwitchingMode::MostRecentlyUsed,
            ),
            desktop_list: TabboxConfig::for_desktops(
                store,
                "DesktopListLayout",
                DesktopSwitchingMode::Static,
            ),
            delay_show: store.read_bool(GROUP, "ShowDelay", true),
            delay_time: store.read_or(GROUP, "DelayTime", DEFAULT_DELAY_TIME),
            traverse_all: store.read_bool(GROUP, "TraverseAll", false),
            border_activate: parse_borders(&store.read_list(GROUP, "BorderActivate")),
            border_alternative_activate: parse_borders(
                &store.read_list(GROUP, "BorderAlternativeActivate"),
            ),
            touch_border_activate: parse_borders(&store.read_list(GROUP, "TouchBorderActivate")),
            touch_border_alternative_activate: parse_borders(
                &store.read_list(GROUP, "TouchBorderAlternativeActivate"),
            ),
        }
    }

    pub fn config(&self, mode: TabboxMode) -> &TabboxConfig {
        match mode {
            TabboxMode::Windows => &self.default,
            TabboxMode::WindowsAlternative => &self.alternative,
            TabboxMode::CurrentAppWindows => &self.default_current_app,
            TabboxMode::CurrentAppWindowsAlternative => &self.alternative_current_app,
            TabboxMode::Desktop => &self.desktop,
            TabboxMode::DesktopList => &self.desktop_list,
        }
    }
}
