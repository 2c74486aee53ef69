use foundation::SectionId;
use serde::{Deserialize, Serialize};

use crate::error::NavError;

/// Distance from the viewport top, in CSS pixels, that a section must cover to be active.
pub const REFERENCE_LINE_PX: f64 = 150.0;

/// Scroll offset above which the header switches to its elevated style.
pub const SCROLL_THRESHOLD_PX: u32 = 20;

/// Preference key the theme is persisted under.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Tunables for the navigation core.
///
/// Every field has a default, so a partial JSON object (or `{}`) is a valid
/// config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    pub reference_line_px: f64,
    pub scroll_threshold_px: u32,
    /// Sections tested for activation, in tie-break order.
    pub tracked_sections: Vec<SectionId>,
    /// Sections reached by changing the location hash instead of scrolling.
    pub virtual_destinations: Vec<SectionId>,
    /// Active section before the first scroll event.
    pub initial_section: Option<SectionId>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            reference_line_px: REFERENCE_LINE_PX,
            scroll_threshold_px: SCROLL_THRESHOLD_PX,
            tracked_sections: SectionId::ALL.to_vec(),
            virtual_destinations: vec![SectionId::Echos],
            initial_section: Some(SectionId::Home),
        }
    }
}

impl NavConfig {
    pub fn from_json(text: &str) -> Result<Self, NavError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: NavConfig =
            serde_json::from_str(text).map_err(|e| NavError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), NavError> {
        if !self.reference_line_px.is_finite() {
            return Err(NavError::Config(
                "reference_line_px must be finite".to_string(),
            ));
        }
        let mut seen = Vec::with_capacity(self.tracked_sections.len());
        for id in &self.tracked_sections {
            if seen.contains(id) {
                return Err(NavError::Config(format!("section {id} tracked twice")));
            }
            seen.push(*id);
        }
        Ok(())
    }

    pub fn is_virtual(&self, id: SectionId) -> bool {
        self.virtual_destinations.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_stable() {
        let cfg = NavConfig::default();
        assert_eq!(cfg.reference_line_px, 150.0);
        assert_eq!(cfg.scroll_threshold_px, 20);
        assert_eq!(cfg.tracked_sections, SectionId::ALL.to_vec());
        assert_eq!(cfg.virtual_destinations, vec![SectionId::Echos]);
        assert_eq!(cfg.initial_section, Some(SectionId::Home));
        assert!(cfg.is_virtual(SectionId::Echos));
        assert!(!cfg.is_virtual(SectionId::Projects));
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let cfg = NavConfig::from_json(r#"{ "reference_line_px": 96 }"#).unwrap();
        assert_eq!(cfg.reference_line_px, 96.0);
        assert_eq!(cfg.scroll_threshold_px, 20);
        assert_eq!(cfg.initial_section, Some(SectionId::Home));
    }

    #[test]
    fn blank_json_is_default() {
        assert_eq!(NavConfig::from_json("  ").unwrap(), NavConfig::default());
    }

    #[test]
    fn section_lists_use_dom_ids() {
        let cfg = NavConfig::from_json(
            r#"{ "tracked_sections": ["home", "contact"], "initial_section": null }"#,
        )
        .unwrap();
        assert_eq!(
            cfg.tracked_sections,
            vec![SectionId::Home, SectionId::Contact]
        );
        assert_eq!(cfg.initial_section, None);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = NavConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, NavError::Config(_)));
    }

    #[test]
    fn rejects_misspelled_keys() {
        let err = NavConfig::from_json(r#"{ "refernce_line_px": 96 }"#).unwrap_err();
        match err {
            NavError::Config(msg) => assert!(msg.contains("refernce_line_px"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_section_names() {
        let err = NavConfig::from_json(r#"{ "tracked_sections": ["blog"] }"#).unwrap_err();
        assert!(matches!(err, NavError::Config(_)));
    }

    #[test]
    fn rejects_duplicate_tracked_sections() {
        let err =
            NavConfig::from_json(r#"{ "tracked_sections": ["home", "home"] }"#).unwrap_err();
        assert_eq!(
            err,
            NavError::Config("section home tracked twice".to_string())
        );
    }
}
