//! Task display models

use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::tracker::{Cadence, Task};

/// Task row for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct TaskDisplay {
    #[tabled(rename = "")]
    pub done: String,

    #[tabled(rename = "TASK ID")]
    pub id: String,

    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "CADENCE")]
    pub cadence: String,

    /// `current/target` for countable tasks
    #[tabled(rename = "PROGRESS")]
    pub progress: String,

    #[tabled(rename = "NOTES")]
    pub notes: String,
}

impl TaskDisplay {
    pub fn new(task: &Task, cadence: Cadence) -> Self {
        let progress = match (task.is_countable(), task.target_count) {
            (true, Some(target)) => format!("{}/{}", task.current_count.unwrap_or(0), target),
            (true, None) => task.current_count.unwrap_or(0).to_string(),
            (false, _) => "--".to_string(),
        };

        Self {
            done: if task.completed { "✓" } else { " " }.to_string(),
            id: task.id.clone(),
            name: truncate_string(&task.name, 40),
            cadence: cadence.to_string(),
            progress,
            notes: task
                .notes
                .as_deref()
                .map(|n| truncate_string(n, 30))
                .unwrap_or_default(),
        }
    }
}
