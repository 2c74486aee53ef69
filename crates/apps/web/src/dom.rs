use foundation::{ClientRect, SectionId};
use navigation::{Anchor, Page};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, Window};

/// The live document, addressed by section id.
#[derive(Debug, Clone)]
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    pub fn from_window() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn viewport_size(&self) -> (f64, f64) {
        let width = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let height = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        (width, height)
    }
}

#[derive(Debug, Clone)]
pub struct DomAnchor(Element);

impl Anchor for DomAnchor {
    fn bounding_rect(&self) -> ClientRect {
        let r = self.0.get_bounding_client_rect();
        ClientRect::new(r.left(), r.top(), r.right(), r.bottom())
    }

    fn scroll_into_view(&self) {
        let opts = ScrollIntoViewOptions::new();
        opts.set_behavior(ScrollBehavior::Smooth);
        self.0.scroll_into_view_with_scroll_into_view_options(&opts);
    }
}

impl Page for DomPage {
    type Anchor = DomAnchor;

    fn anchor(&self, id: SectionId) -> Option<DomAnchor> {
        self.document.get_element_by_id(id.as_str()).map(DomAnchor)
    }

    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn set_location_hash(&self, hash: &str) {
        if let Err(err) = self.window.location().set_hash(hash) {
            tracing::warn!("location.hash = {hash:?} failed: {err:?}");
        }
    }
}

/// `prefers-color-scheme: dark`, false when the query is unsupported.
pub fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}
