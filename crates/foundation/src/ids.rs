use serde::{Deserialize, Serialize};

/// Named page region that navigation can target.
///
/// Declaration order is document order; `SectionId::ALL` preserves it and is
/// the default tie-break order for active-section detection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    About,
    Projects,
    Kanedev,
    Echos,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Projects,
        SectionId::Kanedev,
        SectionId::Echos,
        SectionId::Contact,
    ];

    /// DOM id of the section's anchor element.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Projects => "projects",
            SectionId::Kanedev => "kanedev",
            SectionId::Echos => "echos",
            SectionId::Contact => "contact",
        }
    }

    /// Accepts `"projects"`, `"#projects"` or `" Projects "`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
    }

    pub fn href(self) -> String {
        format!("#{}", self.as_str())
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::SectionId;

    #[test]
    fn parse_accepts_hash_and_case() {
        assert_eq!(SectionId::parse("projects"), Some(SectionId::Projects));
        assert_eq!(SectionId::parse("#echos"), Some(SectionId::Echos));
        assert_eq!(SectionId::parse("  KaneDev "), Some(SectionId::Kanedev));
    }

    #[test]
    fn parse_rejects_unknown_ids() {
        assert_eq!(SectionId::parse("missing-section"), None);
        assert_eq!(SectionId::parse(""), None);
        assert_eq!(SectionId::parse("#"), None);
    }

    #[test]
    fn all_is_in_document_order() {
        let names: Vec<&str> = SectionId::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            ["home", "about", "projects", "kanedev", "echos", "contact"]
        );
    }

    #[test]
    fn serde_uses_dom_ids() {
        let json = serde_json::to_string(&SectionId::Kanedev).unwrap();
        assert_eq!(json, "\"kanedev\"");
        let back: SectionId = serde_json::from_str("\"contact\"").unwrap();
        assert_eq!(back, SectionId::Contact);
    }

    #[test]
    fn href_prefixes_hash() {
        assert_eq!(SectionId::About.href(), "#about");
    }
}
