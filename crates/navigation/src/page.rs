use foundation::{ClientRect, SectionId};

use crate::error::NavError;

/// An on-page anchor element for one section.
pub trait Anchor {
    /// Current viewport-relative bounds.
    fn bounding_rect(&self) -> ClientRect;

    /// Requests a smooth scroll bringing the anchor into view.
    ///
    /// Fire-and-forget: a later request supersedes one still animating.
    fn scroll_into_view(&self);
}

/// The rendered document as seen by the navigation core.
pub trait Page {
    type Anchor: Anchor;

    /// Looks up the anchor element for `id`. `None` while the section is
    /// not mounted.
    fn anchor(&self, id: SectionId) -> Option<Self::Anchor>;

    /// Vertical scroll offset of the viewport, in CSS pixels.
    fn scroll_offset(&self) -> f64;

    fn set_location_hash(&self, hash: &str);
}

impl<P: Page + ?Sized> Page for &P {
    type Anchor = P::Anchor;

    fn anchor(&self, id: SectionId) -> Option<Self::Anchor> {
        (**self).anchor(id)
    }

    fn scroll_offset(&self) -> f64 {
        (**self).scroll_offset()
    }

    fn set_location_hash(&self, hash: &str) {
        (**self).set_location_hash(hash)
    }
}

pub fn parse_section(raw: &str) -> Result<SectionId, NavError> {
    SectionId::parse(raw).ok_or_else(|| NavError::UnknownSection(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_section_reports_the_raw_input() {
        assert_eq!(parse_section("#about"), Ok(SectionId::About));
        assert_eq!(
            parse_section("missing-section"),
            Err(NavError::UnknownSection("missing-section".to_string()))
        );
    }
}
