//! Task checklist data types

use std::collections::BTreeMap;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A checklist entry, either from the static catalog or user-defined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_countable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Task {
    pub fn is_countable(&self) -> bool {
        self.is_countable.unwrap_or(false)
    }

    /// Apply saved state on top of the definition
    pub fn with_state(mut self, state: &TaskState) -> Self {
        self.completed = state.completed;
        self.current_count = if self.is_countable() {
            Some(state.current_count.unwrap_or(0))
        } else {
            None
        };
        self.notes = state.notes.clone();
        self
    }
}

/// How often a task resets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Daily,
    Weekly,
}

impl Cadence {
    pub const ALL: [Cadence; 2] = [Cadence::Daily, Cadence::Weekly];
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cadence::Daily => write!(f, "daily"),
            Cadence::Weekly => write!(f, "weekly"),
        }
    }
}

/// Saved progress for one task
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskState {
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl TaskState {
    pub fn is_deleted(&self) -> bool {
        self.deleted.unwrap_or(false)
    }
}

/// Progress for every task the user has touched, keyed by task id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedProgress(pub BTreeMap<String, TaskState>);

impl SavedProgress {
    pub fn get(&self, task_id: &str) -> Option<&TaskState> {
        self.0.get(task_id)
    }
}

/// Task lists for one expansion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskLists {
    #[serde(default)]
    pub daily: Vec<Task>,
    #[serde(default)]
    pub weekly: Vec<Task>,
}

impl TaskLists {
    pub fn list(&self, cadence: Cadence) -> &[Task] {
        match cadence {
            Cadence::Daily => &self.daily,
            Cadence::Weekly => &self.weekly,
        }
    }

    pub fn list_mut(&mut self, cadence: Cadence) -> &mut Vec<Task> {
        match cadence {
            Cadence::Daily => &mut self.daily,
            Cadence::Weekly => &mut self.weekly,
        }
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.daily.iter().chain(&self.weekly).any(|t| t.id == task_id)
    }
}

/// User-defined tasks keyed by expansion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomTasks(pub BTreeMap<String, TaskLists>);

/// An expansion with its display name and task lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expansion {
    pub name: String,
    #[serde(flatten)]
    pub tasks: TaskLists,
}

/// Fields a user supplies for a new custom task
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub name: String,
    pub subtitle: Option<String>,
    pub target_count: Option<u32>,
    pub notes: Option<String>,
}
