use foundation::SectionId;
use serde::Serialize;

/// One link in the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: SectionId,
    pub label: &'static str,
    /// Virtual destinations get a distinct marker and are never highlighted.
    pub special: bool,
}

impl NavItem {
    pub const fn new(id: SectionId, label: &'static str) -> Self {
        Self {
            id,
            label,
            special: false,
        }
    }

    pub const fn special(id: SectionId, label: &'static str) -> Self {
        Self {
            id,
            label,
            special: true,
        }
    }

    pub fn href(&self) -> String {
        self.id.href()
    }

    pub fn is_highlighted(&self, active: Option<SectionId>) -> bool {
        !self.special && active == Some(self.id)
    }
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem::new(SectionId::Home, "Home"),
    NavItem::new(SectionId::About, "About"),
    NavItem::new(SectionId::Projects, "Projects"),
    NavItem::new(SectionId::Kanedev, "KANEDEV"),
    NavItem::special(SectionId::Echos, "My Dream"),
    NavItem::new(SectionId::Contact, "Contact"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_follow_section_order() {
        let ids: Vec<SectionId> = NAV_ITEMS.iter().map(|i| i.id).collect();
        assert_eq!(ids, SectionId::ALL.to_vec());
    }

    #[test]
    fn special_items_never_highlight() {
        let echos = &NAV_ITEMS[4];
        assert!(echos.special);
        assert!(!echos.is_highlighted(Some(SectionId::Echos)));
    }

    #[test]
    fn regular_items_highlight_when_active() {
        let about = &NAV_ITEMS[1];
        assert!(about.is_highlighted(Some(SectionId::About)));
        assert!(!about.is_highlighted(Some(SectionId::Home)));
        assert!(!about.is_highlighted(None));
        assert_eq!(about.href(), "#about");
    }
}
