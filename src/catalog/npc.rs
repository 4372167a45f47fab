use serde::{Deserialize, Serialize};

/// A shopkeeper. Catalog-resident NPCs carry an id; keepers synthesized at
/// generation time do not. Shops own their keeper by full copy, so editing
/// a shop's NPC never touches the catalog record it was seeded from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Npc {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub race: String,
    pub personality: String,
    pub description: String,
    pub avatar_url: String,
}

impl Npc {
    /// Fallback keeper when a requested catalog NPC id is missing.
    pub fn placeholder() -> Npc {
        Npc {
            id: None,
            name: "Unknown".to_string(),
            race: "Unknown".to_string(),
            personality: "Unknown".to_string(),
            description: String::new(),
            avatar_url: String::new(),
        }
    }
}
