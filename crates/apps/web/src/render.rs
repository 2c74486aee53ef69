use foundation::SectionId;
use navigation::{NavView, PointerParallax, Theme};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

pub const HEADER_SELECTOR: &str = "[data-nav-header]";
pub const MOBILE_PANEL_SELECTOR: &str = "[data-nav-mobile-panel], [data-nav-backdrop]";
pub const MENU_TOGGLE_SELECTOR: &str = "[data-nav-toggle-menu]";
pub const THEME_ICON_SELECTOR: &str = "[data-theme-icon]";
pub const PARALLAX_SELECTOR: &str = "[data-hero-parallax]";

pub fn link_selector(id: SectionId) -> String {
    format!("[data-nav-link=\"{}\"]", id.as_str())
}

pub fn parallax_properties(p: PointerParallax) -> [(&'static str, String); 2] {
    [
        ("--parallax-x", format!("{:.2}px", p.x)),
        ("--parallax-y", format!("{:.2}px", p.y)),
    ]
}

/// Writes navigation state onto marked-up elements.
///
/// Styling belongs to the stylesheet; this only flips classes, attributes
/// and CSS custom properties. Elements that are absent are skipped.
#[derive(Debug, Clone)]
pub struct DomRenderer {
    document: Document,
}

impl DomRenderer {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    pub fn apply_nav(&self, view: &NavView) {
        for header in self.query_all(HEADER_SELECTOR) {
            set_class(&header, "is-scrolled", view.header_elevated);
        }

        for item in &view.items {
            for link in self.query_all(&link_selector(item.id)) {
                set_class(&link, "is-active", item.highlighted);
                if item.highlighted {
                    let _ = link.set_attribute("aria-current", "location");
                } else {
                    let _ = link.remove_attribute("aria-current");
                }
            }
        }

        for panel in self.query_all(MOBILE_PANEL_SELECTOR) {
            let _ = panel.toggle_attribute_with_force("hidden", !view.mobile_panel_open);
        }
        for toggle in self.query_all(MENU_TOGGLE_SELECTOR) {
            let _ = toggle.set_attribute("aria-expanded", bool_attr(view.mobile_panel_open));
        }

        for icon in self.query_all(THEME_ICON_SELECTOR) {
            let _ = icon.set_attribute("data-icon", view.theme_icon);
        }
    }

    pub fn apply_theme(&self, theme: Theme) {
        let Some(root) = self.document.document_element() else {
            return;
        };
        let _ = root.set_attribute("data-theme", theme.as_str());
        set_class(&root, "dark", theme == Theme::Dark);
        for icon in self.query_all(THEME_ICON_SELECTOR) {
            let _ = icon.set_attribute("data-icon", theme.toggle_icon());
        }
    }

    pub fn apply_parallax(&self, p: PointerParallax) {
        let props = parallax_properties(p);
        for el in self.query_all(PARALLAX_SELECTOR) {
            let Ok(el) = el.dyn_into::<HtmlElement>() else {
                continue;
            };
            let style = el.style();
            for (name, value) in &props {
                let _ = style.set_property(name, value);
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            tracing::warn!("bad selector {selector:?}");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

fn bool_attr(v: bool) -> &'static str {
    if v { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn link_selector_quotes_dom_id() {
        assert_eq!(
            link_selector(SectionId::Kanedev),
            "[data-nav-link=\"kanedev\"]"
        );
    }

    #[test]
    fn parallax_properties_are_pixel_values() {
        let props = parallax_properties(PointerParallax { x: -10.0, y: 2.5 });
        assert_eq!(props[0], ("--parallax-x", "-10.00px".to_string()));
        assert_eq!(props[1], ("--parallax-y", "2.50px".to_string()));
    }

    #[test]
    fn bool_attr_matches_aria_values() {
        assert_eq!(bool_attr(true), "true");
        assert_eq!(bool_attr(false), "false");
    }
}
