use foundation::SectionId;
use serde::Serialize;

use crate::config::NavConfig;
use crate::page::{Anchor, Page};

/// Viewport scroll position as far as navigation cares.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScrollState {
    pub offset_px: u32,
    pub is_scrolled: bool,
}

impl ScrollState {
    /// Normalizes a raw browser offset. Overscroll bounce can report
    /// negative values; those (and NaN) count as the top of the page.
    pub fn from_offset(raw_px: f64, threshold_px: u32) -> Self {
        let offset_px = if raw_px.is_finite() && raw_px > 0.0 {
            raw_px.round().min(u32::MAX as f64) as u32
        } else {
            0
        };
        Self {
            offset_px,
            is_scrolled: raw_px.is_finite() && raw_px > f64::from(threshold_px),
        }
    }
}

/// First section in `order` whose anchor covers the horizontal line at
/// `reference_line_px`. Unmounted anchors never match.
pub fn locate_active<P: Page>(
    page: &P,
    order: &[SectionId],
    reference_line_px: f64,
) -> Option<SectionId> {
    order.iter().copied().find(|id| {
        page.anchor(*id)
            .is_some_and(|a| a.bounding_rect().straddles(reference_line_px))
    })
}

/// What a scroll/resize pass changed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct ScrollUpdate {
    pub scrolled_changed: bool,
    pub active_changed: bool,
}

impl ScrollUpdate {
    pub fn any(self) -> bool {
        self.scrolled_changed || self.active_changed
    }
}

/// Tracks the scroll offset and the active section.
///
/// When no section covers the reference line (fast scrolls, gaps between
/// sections, anchors still mounting) the previous active section is kept.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    order: Vec<SectionId>,
    reference_line_px: f64,
    threshold_px: u32,
    scroll: ScrollState,
    active: Option<SectionId>,
}

impl ScrollTracker {
    pub fn new(config: &NavConfig) -> Self {
        Self {
            order: config.tracked_sections.clone(),
            reference_line_px: config.reference_line_px,
            threshold_px: config.scroll_threshold_px,
            scroll: ScrollState::default(),
            active: config.initial_section,
        }
    }

    pub fn scroll(&self) -> ScrollState {
        self.scroll
    }

    pub fn active(&self) -> Option<SectionId> {
        self.active
    }

    /// Re-reads the viewport offset and anchor geometry from `page`.
    pub fn update<P: Page>(&mut self, page: &P) -> ScrollUpdate {
        let scroll = ScrollState::from_offset(page.scroll_offset(), self.threshold_px);
        let scrolled_changed = scroll.is_scrolled != self.scroll.is_scrolled;
        self.scroll = scroll;

        let mut active_changed = false;
        if let Some(found) = locate_active(page, &self.order, self.reference_line_px) {
            if self.active != Some(found) {
                tracing::debug!(from = ?self.active, to = %found, "active section changed");
                self.active = Some(found);
                active_changed = true;
            }
        }

        ScrollUpdate {
            scrolled_changed,
            active_changed,
        }
    }
}
