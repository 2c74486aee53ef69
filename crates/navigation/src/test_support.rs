//! In-memory page used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use foundation::{ClientRect, SectionId};

use crate::page::{Anchor, Page};

#[derive(Debug, Default)]
struct Inner {
    scroll_y: Cell<f64>,
    /// Document-space (top, bottom) per mounted section.
    layout: RefCell<BTreeMap<SectionId, (f64, f64)>>,
    scroll_requests: RefCell<Vec<SectionId>>,
    hash_writes: RefCell<Vec<String>>,
}

/// Fake document: sections laid out at fixed document offsets, viewport
/// rects derived from the current scroll position.
#[derive(Debug, Default, Clone)]
pub struct FakePage {
    inner: Rc<Inner>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out `sections` back to back starting at each given top.
    /// Every section ends where the next begins; the last is `last_height` tall.
    pub fn stacked(sections: &[(SectionId, f64)], last_height: f64) -> Self {
        let page = Self::new();
        for (i, (id, top)) in sections.iter().enumerate() {
            let bottom = sections
                .get(i + 1)
                .map(|(_, next)| *next)
                .unwrap_or(top + last_height);
            page.mount(*id, *top, bottom);
        }
        page
    }

    pub fn mount(&self, id: SectionId, doc_top: f64, doc_bottom: f64) {
        self.inner
            .layout
            .borrow_mut()
            .insert(id, (doc_top, doc_bottom));
    }

    pub fn unmount(&self, id: SectionId) {
        self.inner.layout.borrow_mut().remove(&id);
    }

    pub fn scroll_to(&self, y: f64) {
        self.inner.scroll_y.set(y);
    }

    pub fn scroll_requests(&self) -> Vec<SectionId> {
        self.inner.scroll_requests.borrow().clone()
    }

    pub fn hash_writes(&self) -> Vec<String> {
        self.inner.hash_writes.borrow().clone()
    }
}

#[derive(Debug, Clone)]
pub struct FakeAnchor {
    id: SectionId,
    page: FakePage,
}

impl Anchor for FakeAnchor {
    fn bounding_rect(&self) -> ClientRect {
        let scroll_y = self.page.inner.scroll_y.get();
        let (top, bottom) = self.page.inner.layout.borrow()[&self.id];
        ClientRect::vertical(top - scroll_y, bottom - scroll_y)
    }

    fn scroll_into_view(&self) {
        self.page.inner.scroll_requests.borrow_mut().push(self.id);
    }
}

impl Page for FakePage {
    type Anchor = FakeAnchor;

    fn anchor(&self, id: SectionId) -> Option<FakeAnchor> {
        self.inner
            .layout
            .borrow()
            .contains_key(&id)
            .then(|| FakeAnchor {
                id,
                page: self.clone(),
            })
    }

    fn scroll_offset(&self) -> f64 {
        self.inner.scroll_y.get()
    }

    fn set_location_hash(&self, hash: &str) {
        self.inner.hash_writes.borrow_mut().push(hash.to_string());
    }
}
