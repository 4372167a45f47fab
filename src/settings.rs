use serde::{Deserialize, Serialize};

/// Interface language. A closed set, unlike the tag taxonomies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Pt,
    Es,
}

/// Global application settings: language plus the two accent colors that
/// shop cards fall back to when a shop has no appearance overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub language: Language,
    pub primary_color: String,
    pub secondary_color: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            primary_color: "#6366f1".to_string(),
            secondary_color: "#a855f7".to_string(),
        }
    }
}
