//! Builds the list of entries a switcher walk moves through.
use super::config::{
    ApplicationsMode, DesktopMode, DesktopSwitchingMode, MinimizedMode, MultiScreenMode,
    OrderMinimizedMode, ShowDesktopMode, SwitchingMode, TabboxConfig,
};
use crate::models::{
    FocusChain, OutputId, StackingOrder, SubspaceChain, SubspaceId, SubspaceManager, Window,
    WindowHandle,
};

/// Everything the window list depends on.
pub struct ClientContext<'a> {
    pub windows: &'a [Window],
    pub focus_chain: &'a FocusChain,
    pub stacking: &'a StackingOrder,
    pub current_subspace: SubspaceId,
    pub active_window: Option<WindowHandle>,
    pub active_output: Option<OutputId>,
}

impl<'a> ClientContext<'a> {
    fn window(&self, handle: WindowHandle) -> Option<&'a Window> {
        self.windows.iter().find(|w| w.handle == handle)
    }

    fn active(&self) -> Option<&'a Window> {
        self.active_window.and_then(|handle| self.window(handle))
    }

    fn desktop_window(&self) -> Option<WindowHandle> {
        self.stacking.top_down().find(|handle| {
            self.window(*handle).is_some_and(|w| {
                w.is_desktop()
                    && w.is_on_subspace(self.current_subspace)
                    && self.active_output.map_or(true, |o| w.output.map_or(true, |wo| wo == o))
            })
        })
    }
}

fn accepts(config: &TabboxConfig, ctx: &ClientContext, window: &Window) -> bool {
    let on_current = window.is_on_subspace(ctx.current_subspace);
    let desktop = match config.desktop_mode {
        DesktopMode::AllDesktops => true,
        DesktopMode::OnlyCurrentDesktop => on_current,
        DesktopMode::ExcludeCurrentDesktop => !on_current,
    };
    let screen = match (config.multi_screen_mode, ctx.active_output) {
        (MultiScreenMode::IgnoreMultiScreen, _) | (_, None) => true,
        (MultiScreenMode::OnlyCurrentScreen, Some(output)) => window.is_on_output(output),
        (MultiScreenMode::ExcludeCurrentScreen, Some(output)) => !window.is_on_output(output),
    };
    let application = match config.applications_mode {
        ApplicationsMode::AllWindowsCurrentApplication => {
            ctx.active().is_some_and(|active| active.same_application(window))
        }
        _ => true,
    };
    let minimized = match config.minimized_mode {
        MinimizedMode::IgnoreMinimizedStatus => true,
        MinimizedMode::ExcludeMinimized => !window.is_minimized(),
        MinimizedMode::OnlyMinimized => window.is_minimized(),
    };
    desktop
        && screen
        && application
        && minimized
        && window.is_mapped()
        && window.wants_tab_focus()
        && !window.skip_switcher
}

fn focus_chain_order(ctx: &ClientContext) -> Vec<WindowHandle> {
    let chain = ctx.focus_chain;
    let start = ctx
        .active_window
        .filter(|handle| chain.is_in_any_chain(*handle))
        .or_else(|| chain.first_most_recently_used());
    let Some(start) = start else {
        return vec![];
    };
    let mut order = vec![start];
    let mut handle = start;
    while let Some(next) = chain.next_most_recently_used(handle) {
        if next == start || order.contains(&next) {
            break;
        }
        order.push(next);
        handle = next;
    }
    order
}

/// Windows for a window switching mode, in walking order.
pub fn window_candidates(config: &TabboxConfig, ctx: &ClientContext) -> Vec<WindowHandle> {
    let order = match config.switching_mode {
        SwitchingMode::FocusChainSwitching => focus_chain_order(ctx),
        SwitchingMode::StackingOrderSwitching => ctx.stacking.top_down().collect(),
    };
    let one_per_application = config.applications_mode == ApplicationsMode::OneWindowPerApplication;
    let mut list: Vec<&Window> = vec![];
    for handle in order {
        let Some(window) = ctx.window(handle) else {
            continue;
        };
        if !accepts(config, ctx, window) {
            continue;
        }
        if one_per_application && list.iter().any(|w| w.same_application(window)) {
            continue;
        }
        list.push(window);
    }
    if config.order_minimized_mode == OrderMinimizedMode::GroupByMinimized {
        list.sort_by_key(|w| w.is_minimized());
    }
    let mut handles: Vec<WindowHandle> = list.into_iter().map(|w| w.handle).collect();

    let wants_desktop = config.show_desktop_mode == ShowDesktopMode::ShowDesktopClient
        || (handles.is_empty()
            && config.applications_mode != ApplicationsMode::AllWindowsCurrentApplication);
    if wants_desktop {
        if let Some(desktop) = ctx.desktop_window() {
            if !handles.contains(&desktop) {
                handles.push(desktop);
            }
        }
    }
    handles
}

/// Subspace ordinals for a desktop switching mode, in walking order.
pub fn desktop_candidates(
    config: &TabboxConfig,
    subspaces: &SubspaceManager,
    chain: &SubspaceChain,
) -> Vec<u32> {
    let count = subspaces.count();
    if config.desktop_switching_mode == DesktopSwitchingMode::Static {
        return (1..=count).collect();
    }
    let start = subspaces.current_x11_id();
    let mut list = vec![start];
    let mut desktop = start;
    for _ in 0..chain.as_slice().len() {
        desktop = chain.next(desktop);
        if desktop == start {
            break;
        }
        if desktop <= count && !list.contains(&desktop) {
            list.push(desktop);
        }
    }
    // the chain may lag behind a count change
    let missing: Vec<u32> = (1..=count).filter(|d| !list.contains(d)).collect();
    list.extend(missing);
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChainChange, WindowType};
    use crate::tabbox::config::TabboxConfig;

    struct Fixture {
        windows: Vec<Window>,
        focus_chain: FocusChain,
        stacking: StackingOrder,
        current: SubspaceId,
        other: SubspaceId,
    }

    impl Fixture {
        fn new() -> Self {
            let current = SubspaceId::generate();
            let other = SubspaceId::generate();
            Self {
                windows: vec![],
                focus_chain: FocusChain::new(&[current, other]),
                stacking: StackingOrder::default(),
                current,
                other,
            }
        }

        fn add(&mut self, handle: u32, subspace: SubspaceId) -> &mut Window {
            let mut window = Window::new(WindowHandle(handle), None);
            window.set_subspaces(vec![subspace]);
            self.focus_chain.update(&window, ChainChange::MakeFirst);
            self.stacking.push(window.handle);
            self.windows.push(window);
            self.windows.last_mut().unwrap()
        }

        fn context(&self, active: Option<u32>) -> ClientContext {
            ClientContext {
                windows: &self.windows,
                focus_chain: &self.focus_chain,
                stacking: &self.stacking,
                current_subspace: self.current,
                active_window: active.map(WindowHandle),
                active_output: None,
            }
        }
    }

    #[test]
    fn focus_chain_order_starts_at_the_active_window() {
        let mut fixture = Fixture::new();
        let current = fixture.current;
        fixture.add(1, current);
        fixture.add(2, current);
        fixture.add(3, current);
        let list = window_candidates(&TabboxConfig::default(), &fixture.context(Some(3)));
        assert_eq!(list, [WindowHandle(3), WindowHandle(2), WindowHandle(1)]);
    }

    #[test]
    fn only_current_desktop_skips_other_subspaces() {
        let mut fixture = Fixture::new();
        let (current, other) = (fixture.current, fixture.other);
        fixture.add(1, current);
        fixture.add(2, other);
        let config = TabboxConfig::default();
        assert_eq!(
            window_candidates(&config, &fixture.context(Some(1))),
            [WindowHandle(1)]
        );
        let all = TabboxConfig {
            desktop_mode: DesktopMode::AllDesktops,
            ..TabboxConfig::default()
        };
        assert_eq!(window_candidates(&all, &fixture.context(Some(1))).len(), 2);
    }

    #[test]
    fn current_application_filter_needs_an_active_window() {
        let mut fixture = Fixture::new();
        let current = fixture.current;
        fixture.add(1, current).res_class = Some("term".to_owned());
        fixture.add(2, current).res_class = Some("term".to_owned());
        fixture.add(3, current).res_class = Some("mail".to_owned());
        let config = TabboxConfig::default().for_current_application();
        assert_eq!(
            window_candidates(&config, &fixture.context(Some(2))),
            [WindowHandle(2), WindowHandle(1)]
        );
        assert!(window_candidates(&config, &fixture.context(None)).is_empty());
    }

    #[test]
    fn one_window_per_application() {
        let mut fixture = Fixture::new();
        let current = fixture.current;
        fixture.add(1, current).pid = Some(10);
        fixture.add(2, current).pid = Some(10);
        fixture.add(3, current).pid = Some(11);
        let config = TabboxConfig {
            applications_mode: ApplicationsMode::OneWindowPerApplication,
            ..TabboxConfig::default()
        };
        assert_eq!(
            window_candidates(&config, &fixture.context(Some(3))),
            [WindowHandle(3), WindowHandle(2)]
        );
    }

    #[test]
    fn minimized_handling() {
        let mut fixture = Fixture::new();
        let current = fixture.current;
        fixture.add(1, current).set_minimized(true);
        fixture.add(2, current);
        fixture.add(3, current);
        let grouped = TabboxConfig {
            order_minimized_mode: OrderMinimizedMode::GroupByMinimized,
            ..TabboxConfig::default()
        };
        assert_eq!(
            window_candidates(&grouped, &fixture.context(Some(3))),
            [WindowHandle(3), WindowHandle(2), WindowHandle(1)]
        );
        let only = TabboxConfig {
            minimized_mode: MinimizedMode::OnlyMinimized,
            ..TabboxConfig::default()
        };
        assert_eq!(
            window_candidates(&only, &fixture.context(Some(3))),
            [WindowHandle(1)]
        );
    }

    #[test]
    fn stacking_order_switching_walks_top_down() {
        let mut fixture = Fixture::new();
        let current = fixture.current;
        fixture.add(1, current);
        fixture.add(2, current);
        fixture.stacking.raise(WindowHandle(1));
        let config = TabboxConfig {
            switching_mode: SwitchingMode::StackingOrderSwitching,
            ..TabboxConfig::default()
        };
        assert_eq!(
            window_candidates(&config, &fixture.context(Some(2))),
            [WindowHandle(1), WindowHandle(2)]
        );
    }

    #[test]
    fn desktop_window_fills_an_empty_list() {
        let mut fixture = Fixture::new();
        let current = fixture.current;
        fixture.add(1, current).r#type = WindowType::Desktop;
        let config = TabboxConfig::default();
        assert_eq!(
            window_candidates(&config, &fixture.context(None)),
            [WindowHandle(1)]
        );
        let current_app = config.for_current_application();
        assert!(window_candidates(&current_app, &fixture.context(None)).is_empty());
    }

    #[test]
    fn skip_switcher_windows_are_left_out() {
        let mut fixture = Fixture::new();
        let current = fixture.current;
        fixture.add(1, current).skip_switcher = true;
        assert!(window_candidates(&TabboxConfig::default(), &fixture.context(None)).is_empty());
    }

    #[test]
    fn desktop_lists() {
        let mut subspaces = SubspaceManager::new();
        subspaces.set_count(4);
        subspaces.set_current(3);
        let mut chain = SubspaceChain::new(4);
        chain.add(2);
        chain.add(3);
        let mru = TabboxConfig::default();
        assert_eq!(desktop_candidates(&mru, &subspaces, &chain), [3, 2, 1, 4]);
        let list = TabboxConfig {
            desktop_switching_mode: DesktopSwitchingMode::Static,
            ..TabboxConfig::default()
        };
        assert_eq!(desktop_candidates(&list, &subspaces, &chain), [1, 2, 3, 4]);
    }

    #[test]
    fn stale_chains_still_list_every_subspace() {
        let mut subspaces = SubspaceManager::new();
        subspaces.set_count(3);
        let chain = SubspaceChain::new(1);
        assert_eq!(
            desktop_candidates(&TabboxConfig::default(), &subspaces, &chain),
            [1, 2, 3]
        );
    }
}
