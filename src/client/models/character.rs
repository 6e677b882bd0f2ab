//! Character identity

use serde::{Deserialize, Serialize};

use super::Region;

/// The character whose profile data is fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterInfo {
    pub name: String,

    /// Realm slug, e.g. `draenor` or `argent-dawn`
    pub realm: String,

    pub region: Region,
}

impl CharacterInfo {
    pub fn new(name: &str, realm: &str, region: Region) -> Self {
        Self {
            name: name.trim().to_string(),
            realm: realm_slug(realm),
            region,
        }
    }
}

/// Normalize a realm name to its API slug
pub fn realm_slug(realm: &str) -> String {
    realm
        .trim()
        .to_lowercase()
        .replace('\'', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_realm_slug() {
        assert_eq!(realm_slug("Draenor"), "draenor");
        assert_eq!(realm_slug("Argent Dawn"), "argent-dawn");
        assert_eq!(realm_slug("Kel'Thuzad"), "kelthuzad");
        assert_eq!(realm_slug("  twisting-nether "), "twisting-nether");
    }

    #[test]
    fn test_new_normalizes() {
        let info = CharacterInfo::new(" Thrall ", "Argent Dawn", Region::Eu);
        assert_eq!(info.name, "Thrall");
        assert_eq!(info.realm, "argent-dawn");
    }

    #[test]
    fn test_wire_shape() {
        let info = CharacterInfo::new("Thrall", "draenor", Region::Us);
        assert_eq!(
            serde_json::to_value(&info).unwrap(),
            serde_json::json!({"name": "Thrall", "realm": "draenor", "region": "us"})
        );
    }
}
