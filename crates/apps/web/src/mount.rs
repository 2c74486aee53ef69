use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use navigation::{
    NavConfig, NavView, NavigationState, PointerParallax, Subscription, ThemePreference,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent};

use crate::dom::DomPage;
use crate::render::DomRenderer;

pub type SharedNav = Rc<RefCell<NavigationState<DomPage>>>;

/// Delegated click targets, checked innermost-first via `closest`.
const NAV_TARGET_ATTR: &str = "data-nav-target";
const CLICK_COMMANDS: &str =
    "[data-nav-target], [data-nav-toggle-menu], [data-nav-toggle-theme], [data-nav-backdrop]";

/// A mounted navigation bar with its listeners.
///
/// Every browser listener and bus subscription lives in this value;
/// dropping it (unmount, remount, or teardown of the wasm instance)
/// detaches all of them.
pub struct MountedSite {
    nav: SharedNav,
    parallax: Rc<Cell<PointerParallax>>,
    _listeners: Vec<EventListener>,
    _subscription: Subscription,
}

impl MountedSite {
    pub fn mount(
        config: NavConfig,
        theme: ThemePreference,
    ) -> Result<Self, wasm_bindgen::JsValue> {
        let page = DomPage::from_window()?;
        let renderer = Rc::new(DomRenderer::new(page.document().clone()));
        let nav: SharedNav = Rc::new(RefCell::new(NavigationState::new(
            page.clone(),
            config.clone(),
            theme,
        )));
        let parallax = Rc::new(Cell::new(PointerParallax::default()));

        // Theme changes made outside this bar reach the root element through
        // the page-wide sync installed at start-up.
        let subscription = {
            let renderer = Rc::clone(&renderer);
            nav.borrow().subscribe(move |snap| {
                renderer.apply_nav(&NavView::build(snap, &config));
            })
        };

        let listeners = vec![
            scroll_listener(&page, &nav),
            resize_listener(&page, &nav),
            pointer_listener(&page, &parallax, &renderer),
            click_listener(&page, &nav),
        ];

        // First paint: geometry may already be scrolled (reload mid-page).
        {
            let mut n = nav.borrow_mut();
            n.handle_scroll();
            renderer.apply_theme(n.theme().current_theme());
            renderer.apply_nav(&n.view());
        }
        tracing::info!("navigation mounted");

        Ok(Self {
            nav,
            parallax,
            _listeners: listeners,
            _subscription: subscription,
        })
    }

    pub fn nav(&self) -> &SharedNav {
        &self.nav
    }

    pub fn parallax(&self) -> PointerParallax {
        self.parallax.get()
    }
}

impl Drop for MountedSite {
    fn drop(&mut self) {
        tracing::info!("navigation unmounted");
    }
}

fn scroll_listener(page: &DomPage, nav: &SharedNav) -> EventListener {
    let nav = Rc::clone(nav);
    EventListener::new(page.window(), "scroll", move |_event: &Event| {
        // A command already holds the state; its own notify covers this tick.
        if let Ok(mut nav) = nav.try_borrow_mut() {
            nav.handle_scroll();
        }
    })
}

fn resize_listener(page: &DomPage, nav: &SharedNav) -> EventListener {
    let nav = Rc::clone(nav);
    EventListener::new(page.window(), "resize", move |_event: &Event| {
        if let Ok(mut nav) = nav.try_borrow_mut() {
            nav.handle_resize();
        }
    })
}

fn pointer_listener(
    page: &DomPage,
    parallax: &Rc<Cell<PointerParallax>>,
    renderer: &Rc<DomRenderer>,
) -> EventListener {
    let page_for_size = page.clone();
    let parallax = Rc::clone(parallax);
    let renderer = Rc::clone(renderer);
    EventListener::new(page.window(), "mousemove", move |event: &Event| {
        let Some(event) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let (width, height) = page_for_size.viewport_size();
        let mut p = parallax.get();
        if p.on_pointer_move(
            f64::from(event.client_x()),
            f64::from(event.client_y()),
            width,
            height,
        ) {
            parallax.set(p);
            renderer.apply_parallax(p);
        }
    })
}

fn click_listener(page: &DomPage, nav: &SharedNav) -> EventListener {
    let nav = Rc::clone(nav);
    EventListener::new_with_options(
        page.document(),
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event: &Event| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(CLICK_COMMANDS).ok().flatten())
            else {
                return;
            };
            let Ok(mut nav) = nav.try_borrow_mut() else {
                return;
            };

            if let Some(section) = target.get_attribute(NAV_TARGET_ATTR) {
                event.prevent_default();
                let outcome = nav.navigate_to(&section);
                tracing::debug!(?outcome, "nav link clicked");
            } else if target.has_attribute("data-nav-toggle-menu") {
                nav.toggle_mobile_menu();
            } else if target.has_attribute("data-nav-toggle-theme") {
                nav.toggle_theme();
            } else if target.has_attribute("data-nav-backdrop") {
                nav.close_mobile_menu();
            }
        },
    )
}
