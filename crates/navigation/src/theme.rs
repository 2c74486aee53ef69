use std::cell::{Cell, RefCell};
use std::rc::Rc;

use preferences::PreferenceStore;
use runtime::{EventBus, Subscription};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Theme implied by `prefers-color-scheme`.
    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark { Theme::Dark } else { Theme::Light }
    }

    /// Icon for the toggle button: it shows the theme you would switch to.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Dark => "sun",
            Theme::Light => "moon",
        }
    }
}

struct Shared {
    current: Cell<Theme>,
    changes: EventBus<Theme>,
    store: RefCell<Option<Box<dyn PreferenceStore>>>,
    storage_key: String,
}

/// Process-wide light/dark toggle.
///
/// Cloning yields another handle to the same cell, so any number of
/// components can read it or subscribe without threading it through
/// each other. Writes go through [`ThemePreference::toggle_theme`] only.
#[derive(Clone)]
pub struct ThemePreference {
    shared: Rc<Shared>,
}

impl ThemePreference {
    /// In-memory preference, forgotten at the end of the session.
    pub fn new(initial: Theme) -> Self {
        Self::build(initial, None, String::new())
    }

    /// Loads the stored theme from `store`, falling back to `fallback` when
    /// nothing usable is stored. Later toggles are written back to `store`.
    pub fn restore(
        store: Box<dyn PreferenceStore>,
        storage_key: impl Into<String>,
        fallback: Theme,
    ) -> Self {
        let storage_key = storage_key.into();
        let initial = match preferences::load_value::<Theme>(store.as_ref(), &storage_key) {
            Ok(Some(theme)) => theme,
            Ok(None) => fallback,
            Err(err) => {
                tracing::warn!("ignoring stored theme: {err}");
                fallback
            }
        };
        tracing::debug!(theme = initial.as_str(), "theme restored");
        Self::build(initial, Some(store), storage_key)
    }

    fn build(
        initial: Theme,
        store: Option<Box<dyn PreferenceStore>>,
        storage_key: String,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                current: Cell::new(initial),
                changes: EventBus::new(),
                store: RefCell::new(store),
                storage_key,
            }),
        }
    }

    pub fn current_theme(&self) -> Theme {
        self.shared.current.get()
    }

    /// Flips the theme, persists it if a store is attached, then notifies
    /// subscribers. Returns the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let next = self.shared.current.get().toggled();
        self.shared.current.set(next);

        if let Some(store) = self.shared.store.borrow_mut().as_mut() {
            if let Err(err) = preferences::save_value(store.as_mut(), &self.shared.storage_key, &next)
            {
                tracing::warn!("theme not persisted: {err}");
            }
        }

        tracing::info!(theme = next.as_str(), "theme toggled");
        self.shared.changes.emit(&next);
        next
    }

    pub fn subscribe(&self, listener: impl Fn(&Theme) + 'static) -> Subscription {
        self.shared.changes.subscribe(listener)
    }

    pub fn is_persistent(&self) -> bool {
        self.shared.store.borrow().is_some()
    }
}

impl std::fmt::Debug for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemePreference")
            .field("current", &self.current_theme())
            .field("persistent", &self.is_persistent())
            .finish()
    }
}
