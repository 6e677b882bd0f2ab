//! Reputation display model

use serde::Serialize;
use tabled::Tabled;

use super::common::{progress_bar, truncate_string};
use crate::catalog::EnhancedReputation;

/// Reputation row for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ReputationDisplay {
    #[tabled(rename = "FACTION")]
    pub faction: String,

    /// Standing name, e.g. "Renown 12" or "Exalted"
    #[tabled(rename = "STANDING")]
    pub standing: String,

    #[tabled(rename = "PROGRESS")]
    pub progress: String,

    /// Count of known ways to raise this reputation
    #[tabled(rename = "METHODS")]
    pub methods: String,
}

impl From<&EnhancedReputation> for ReputationDisplay {
    fn from(enhanced: &EnhancedReputation) -> Self {
        let rep = &enhanced.reputation;
        let progress = match &rep.paragon {
            Some(paragon) => format!("paragon {}/{}", paragon.value, paragon.max),
            None => format!(
                "{} {}/{}",
                progress_bar(rep.progress_percent(), 10),
                rep.standing.value,
                rep.standing.max
            ),
        };

        Self {
            faction: truncate_string(&rep.faction.name, 32),
            standing: rep.standing.name.clone(),
            progress,
            methods: enhanced
                .methods
                .as_ref()
                .map(|m| m.len().to_string())
                .unwrap_or_else(|| "--".to_string()),
        }
    }
}
