//! Static game data embedded at build time
//!
//! Task definitions and reputation-earning methods are read-only. User edits
//! live in the vault and are merged on top by the tracker.

pub mod reputation;

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::Result;
use crate::tracker::Expansion;

pub use reputation::{EnhancedReputation, ReputationCatalog};

const TASKS_JSON: &str = include_str!("../../data/tasks.json");

/// Expansion shown when none is requested
pub const DEFAULT_EXPANSION: &str = "tww";

#[derive(Debug, Deserialize)]
struct TasksFile {
    expansions: BTreeMap<String, Expansion>,
}

/// Predefined tasks keyed by expansion
#[derive(Debug, Clone)]
pub struct TaskCatalog {
    expansions: BTreeMap<String, Expansion>,
}

impl TaskCatalog {
    /// Catalog compiled into the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json(TASKS_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: TasksFile = serde_json::from_str(json)?;
        Ok(Self {
            expansions: file.expansions,
        })
    }

    pub fn expansions(&self) -> &BTreeMap<String, Expansion> {
        &self.expansions
    }

    /// Whether `task_id` is a predefined task of `expansion`
    pub fn contains(&self, expansion: &str, task_id: &str) -> bool {
        self.expansions
            .get(expansion)
            .is_some_and(|e| e.tasks.contains(task_id))
    }

    /// Whether any expansion defines `task_id`
    pub fn defines(&self, task_id: &str) -> bool {
        self.expansions.values().any(|e| e.tasks.contains(task_id))
    }
}
