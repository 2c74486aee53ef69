use std::cell::Cell;
use std::rc::Rc;

use foundation::SectionId;
use runtime::{EventBus, Subscription};
use serde::Serialize;

use crate::config::NavConfig;
use crate::items::NAV_ITEMS;
use crate::menu::MenuState;
use crate::page::{Anchor, Page, parse_section};
use crate::scroll::{ScrollState, ScrollTracker};
use crate::theme::{Theme, ThemePreference};

/// Everything the renderer needs to draw the navigation bar.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct NavSnapshot {
    pub is_scrolled: bool,
    pub is_mobile_menu_open: bool,
    pub active_section: Option<SectionId>,
    pub theme: Theme,
}

/// Result of a navigation request. Informational only: none of these is
/// an error for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Scrolled(SectionId),
    HashChanged(SectionId),
    AnchorMissing(SectionId),
    UnknownSection(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItemView {
    pub id: SectionId,
    pub label: &'static str,
    pub href: String,
    pub special: bool,
    pub highlighted: bool,
}

/// Render model derived from a [`NavSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavView {
    pub header_elevated: bool,
    pub mobile_panel_open: bool,
    pub active_section: Option<SectionId>,
    pub theme: Theme,
    pub theme_icon: &'static str,
    pub items: Vec<NavItemView>,
}

impl NavView {
    pub fn build(snap: &NavSnapshot, config: &NavConfig) -> Self {
        let items = NAV_ITEMS
            .iter()
            .map(|item| NavItemView {
                id: item.id,
                label: item.label,
                href: item.href(),
                special: item.special || config.is_virtual(item.id),
                highlighted: item.is_highlighted(snap.active_section)
                    && !config.is_virtual(item.id),
            })
            .collect();
        NavView {
            header_elevated: snap.is_scrolled,
            mobile_panel_open: snap.is_mobile_menu_open,
            active_section: snap.active_section,
            theme: snap.theme,
            theme_icon: snap.theme.toggle_icon(),
            items,
        }
    }
}

/// Navigation bar state: scroll tracking, mobile menu and theme access.
///
/// Owned by one mounted navigation component. Mutation happens only through
/// the command methods; each command that changes the snapshot notifies
/// subscribers once. Theme toggles made through any clone of the
/// [`ThemePreference`] handle notify as well.
pub struct NavigationState<P: Page> {
    page: P,
    config: NavConfig,
    tracker: ScrollTracker,
    menu: MenuState,
    theme: ThemePreference,
    changes: Rc<EventBus<NavSnapshot>>,
    // Last emitted snapshot; the theme listener patches its `theme` field.
    last: Rc<Cell<NavSnapshot>>,
    _theme_sync: Subscription,
}

impl<P: Page> NavigationState<P> {
    pub fn new(page: P, config: NavConfig, theme: ThemePreference) -> Self {
        let tracker = ScrollTracker::new(&config);
        let menu = MenuState::Closed;
        let changes = Rc::new(EventBus::new());
        let last = Rc::new(Cell::new(NavSnapshot {
            is_scrolled: tracker.scroll().is_scrolled,
            is_mobile_menu_open: menu.is_open(),
            active_section: tracker.active(),
            theme: theme.current_theme(),
        }));
        let theme_sync = {
            let changes = Rc::clone(&changes);
            let last = Rc::clone(&last);
            theme.subscribe(move |&theme| {
                let snap = NavSnapshot { theme, ..last.get() };
                last.set(snap);
                changes.emit(&snap);
            })
        };
        Self {
            page,
            config,
            tracker,
            menu,
            theme,
            changes,
            last,
            _theme_sync: theme_sync,
        }
    }

    pub fn theme(&self) -> &ThemePreference {
        &self.theme
    }

    pub fn scroll(&self) -> ScrollState {
        self.tracker.scroll()
    }

    pub fn active_section(&self) -> Option<SectionId> {
        self.tracker.active()
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            is_scrolled: self.tracker.scroll().is_scrolled,
            is_mobile_menu_open: self.menu.is_open(),
            active_section: self.tracker.active(),
            theme: self.theme.current_theme(),
        }
    }

    pub fn view(&self) -> NavView {
        NavView::build(&self.snapshot(), &self.config)
    }

    /// Registers a render callback. Dropping the returned guard removes it.
    pub fn subscribe(&self, listener: impl Fn(&NavSnapshot) + 'static) -> Subscription {
        self.changes.subscribe(listener)
    }

    /// Scroll event: recompute the scrolled flag and the active section.
    pub fn handle_scroll(&mut self) -> bool {
        let update = self.tracker.update(&self.page);
        if update.any() {
            self.notify();
        }
        update.any()
    }

    /// Layout moved under a fixed scroll offset; same computation as a scroll.
    pub fn handle_resize(&mut self) -> bool {
        self.handle_scroll()
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.menu = self.menu.toggled();
        tracing::debug!(open = self.menu.is_open(), "mobile menu toggled");
        self.notify();
    }

    pub fn close_mobile_menu(&mut self) {
        if self.menu.is_open() {
            self.menu = MenuState::Closed;
            self.notify();
        }
    }

    /// Navigates to the section named `raw` (`"projects"` or `"#projects"`).
    ///
    /// Identifiers outside the section set are ignored entirely.
    pub fn navigate_to(&mut self, raw: &str) -> NavOutcome {
        match parse_section(raw) {
            Ok(id) => self.navigate_to_section(id),
            Err(err) => {
                tracing::debug!("navigation ignored: {err}");
                NavOutcome::UnknownSection(raw.to_string())
            }
        }
    }

    /// Closes the mobile menu, then either changes the location hash
    /// (virtual destinations) or smooth-scrolls to the section's anchor.
    pub fn navigate_to_section(&mut self, id: SectionId) -> NavOutcome {
        self.close_mobile_menu();

        if self.config.is_virtual(id) {
            self.page.set_location_hash(id.as_str());
            tracing::debug!(section = %id, "location hash set");
            return NavOutcome::HashChanged(id);
        }

        match self.page.anchor(id) {
            Some(anchor) => {
                anchor.scroll_into_view();
                tracing::debug!(section = %id, "scrolling into view");
                NavOutcome::Scrolled(id)
            }
            None => {
                tracing::debug!(section = %id, "anchor not mounted; navigation skipped");
                NavOutcome::AnchorMissing(id)
            }
        }
    }

    /// Subscribers hear about the change through the theme listener.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle_theme()
    }

    fn notify(&self) {
        let snap = self.snapshot();
        self.last.set(snap);
        self.changes.emit(&snap);
    }
}

impl<P: Page> std::fmt::Debug for NavigationState<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationState")
            .field("snapshot", &self.snapshot())
            .field("config", &self.config)
            .finish()
    }
}
