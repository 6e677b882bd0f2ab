//! Ways to earn reputation, joined onto API standings by faction id

use serde::{Deserialize, Serialize};

use crate::client::models::Reputation;
use crate::error::Result;

const REPUTATIONS_JSON: &str = include_str!("../../data/reputations.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReputationMethod {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub reputation: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wowhead_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FactionMethods {
    pub id: u64,
    pub methods: Vec<ReputationMethod>,
}

/// A reputation standing with the known ways to raise it
#[derive(Debug, Clone, Serialize)]
pub struct EnhancedReputation {
    #[serde(flatten)]
    pub reputation: Reputation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methods: Option<Vec<ReputationMethod>>,
}

#[derive(Debug, Deserialize)]
struct ReputationsFile {
    factions: Vec<FactionMethods>,
}

#[derive(Debug, Clone)]
pub struct ReputationCatalog {
    factions: Vec<FactionMethods>,
}

impl ReputationCatalog {
    pub fn embedded() -> Result<Self> {
        let file: ReputationsFile = serde_json::from_str(REPUTATIONS_JSON)?;
        Ok(Self {
            factions: file.factions,
        })
    }

    pub fn methods_for(&self, faction_id: u64) -> Option<&[ReputationMethod]> {
        self.factions
            .iter()
            .find(|f| f.id == faction_id)
            .map(|f| f.methods.as_slice())
    }

    /// Attach methods to each standing. Order is preserved.
    pub fn enhance(&self, reputations: Vec<Reputation>) -> Vec<EnhancedReputation> {
        reputations
            .into_iter()
            .map(|reputation| {
                let methods = self.methods_for(reputation.faction.id).map(<[_]>::to_vec);
                EnhancedReputation {
                    reputation,
                    methods,
                }
            })
            .collect()
    }
}
