use std::cell::RefCell;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use navigation::{
    NavConfig, NavOutcome, NavigationState, Subscription, THEME_STORAGE_KEY, Theme,
    ThemePreference,
};
use preferences::{InMemoryPreferenceStore, LocalStoragePreferenceStore, PreferenceStore};
use wasm_bindgen::prelude::*;

mod dom;
mod logging;
mod mount;
mod render;

use dom::DomPage;
use mount::MountedSite;
use render::DomRenderer;

// Guard to prevent double-initialization of global state (relevant during hot reload).
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

const STORAGE_PREFIX: &str = "folio";

thread_local! {
    static THEME: RefCell<Option<ThemePreference>> = const { RefCell::new(None) };
    /// Root-element theme sync; lives as long as the page.
    static THEME_ROOT_SYNC: RefCell<Option<Subscription>> = const { RefCell::new(None) };
    static SITE: RefCell<Option<MountedSite>> = const { RefCell::new(None) };
}

/// Safe TLS access helper that returns a default on teardown instead of panicking.
fn with_site<F, R>(f: F) -> R
where
    F: FnOnce(&RefCell<Option<MountedSite>>) -> R,
    R: Default,
{
    SITE.try_with(f).unwrap_or_default()
}

fn with_nav<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut NavigationState<DomPage>) -> R,
{
    with_site(|site| {
        let site = site.borrow();
        let site = site.as_ref()?;
        let mut nav = site.nav().try_borrow_mut().ok()?;
        Some(f(&mut nav))
    })
}

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = info.to_string();
            web_sys::console::error_1(&JsValue::from_str(&msg));
        }));
    });
}

fn preference_store() -> Box<dyn PreferenceStore> {
    match LocalStoragePreferenceStore::new(STORAGE_PREFIX) {
        Ok(s) => Box::new(s),
        Err(err) => {
            tracing::warn!("theme will not persist: {err}");
            Box::new(InMemoryPreferenceStore::new())
        }
    }
}

/// The process-wide theme, restored from storage on first use.
fn theme_preference() -> ThemePreference {
    THEME.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| {
                let fallback = Theme::from_system(dom::prefers_dark());
                ThemePreference::restore(preference_store(), THEME_STORAGE_KEY, fallback)
            })
            .clone()
    })
}

fn sync_root_theme() -> Result<(), JsValue> {
    let page = DomPage::from_window()?;
    let renderer = DomRenderer::new(page.document().clone());
    let theme = theme_preference();
    renderer.apply_theme(theme.current_theme());
    let sub = theme.subscribe(move |t| renderer.apply_theme(*t));
    THEME_ROOT_SYNC.with(|slot| *slot.borrow_mut() = Some(sub));
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Avoid double-initialization (can happen during hot-reload edge cases).
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    init_panic_hook();
    logging::init(tracing::Level::INFO);
    sync_root_theme()
}

/// Attaches navigation to the current document. `config_json` is an
/// optional partial `NavConfig`. Mounting again replaces (and releases) the
/// previous instance.
#[wasm_bindgen]
pub fn mount(config_json: Option<String>) -> Result<(), JsValue> {
    let config = NavConfig::from_json(config_json.as_deref().unwrap_or(""))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    // Release the old listeners before the new ones attach.
    unmount();
    let site = MountedSite::mount(config, theme_preference())?;
    with_site(|slot| *slot.borrow_mut() = Some(site));
    Ok(())
}

#[wasm_bindgen]
pub fn unmount() {
    let previous = with_site(|slot| slot.borrow_mut().take());
    drop(previous);
}

#[wasm_bindgen]
pub fn is_mounted() -> bool {
    with_site(|slot| slot.borrow().is_some())
}

/// Returns true when the request scrolled or changed the hash.
#[wasm_bindgen]
pub fn navigate_to(section: &str) -> bool {
    with_nav(|nav| nav.navigate_to(section))
        .map(|outcome| matches!(outcome, NavOutcome::Scrolled(_) | NavOutcome::HashChanged(_)))
        .unwrap_or(false)
}

/// Returns the new open state.
#[wasm_bindgen]
pub fn toggle_mobile_menu() -> bool {
    with_nav(|nav| {
        nav.toggle_mobile_menu();
        nav.is_mobile_menu_open()
    })
    .unwrap_or(false)
}

#[wasm_bindgen]
pub fn close_mobile_menu() {
    with_nav(|nav| nav.close_mobile_menu());
}

/// Works with or without a mounted navigation bar. Returns the new theme.
#[wasm_bindgen]
pub fn toggle_theme() -> String {
    let theme = with_nav(|nav| nav.toggle_theme())
        .unwrap_or_else(|| theme_preference().toggle_theme());
    theme.as_str().to_string()
}

#[wasm_bindgen]
pub fn current_theme() -> String {
    theme_preference().current_theme().as_str().to_string()
}

/// Current render model as JSON, or `null` when not mounted.
#[wasm_bindgen]
pub fn nav_state() -> Result<String, JsValue> {
    let view = with_nav(|nav| nav.view());
    serde_json::to_string(&view).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// `[x, y]` hero offset in CSS pixels.
#[wasm_bindgen]
pub fn parallax_offset() -> Vec<f64> {
    with_site(|slot| {
        slot.borrow()
            .as_ref()
            .map(|site| {
                let p = site.parallax();
                vec![p.x, p.y]
            })
            .unwrap_or_else(|| vec![0.0, 0.0])
    })
}
