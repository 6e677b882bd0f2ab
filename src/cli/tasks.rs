//! Task checklist commands

use colored::Colorize;
use serde::Serialize;

use crate::catalog::DEFAULT_EXPANSION;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::TaskDisplay;
use crate::output::{self, json};
use crate::tracker::{Cadence, Deletion, NewTask, Task};

/// One cadence of an expansion, for JSON output
#[derive(Debug, Serialize)]
struct TaskGroup<'a> {
    expansion: &'a str,
    cadence: Cadence,
    tasks: Vec<Task>,
}

/// List tasks with their saved progress
pub fn list(
    ctx: &CommandContext,
    expansion: Option<&str>,
    cadence: Option<Cadence>,
    pending: bool,
) -> Result<()> {
    let tracker = ctx.tracker()?;
    let expansion = expansion.unwrap_or(DEFAULT_EXPANSION);
    let cadences: Vec<Cadence> = match cadence {
        Some(c) => vec![c],
        None => Cadence::ALL.to_vec(),
    };

    let groups: Vec<TaskGroup> = cadences
        .into_iter()
        .map(|cadence| {
            let mut tasks = tracker.tasks_with_progress(expansion, cadence);
            if pending {
                tasks.retain(|t| !t.completed);
            }
            TaskGroup {
                expansion,
                cadence,
                tasks,
            }
        })
        .collect();

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&groups)?),
        OutputFormat::Table => {
            let title = tracker
                .expansions()
                .get(expansion)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| expansion.to_string());
            println!("{}", title.bold());

            for group in &groups {
                let done = group.tasks.iter().filter(|t| t.completed).count();
                println!(
                    "\n{} ({}/{} done)",
                    group.cadence.to_string().to_uppercase().cyan(),
                    done,
                    group.tasks.len()
                );
                if group.tasks.is_empty() {
                    println!("{}", "  No tasks".dimmed());
                    continue;
                }
                let rows: Vec<TaskDisplay> = group
                    .tasks
                    .iter()
                    .map(|t| TaskDisplay::new(t, group.cadence))
                    .collect();
                output::print(&rows, OutputFormat::Table)?;
            }
        }
    }

    Ok(())
}

/// Mark a task complete or not complete
pub fn set_done(ctx: &CommandContext, id: &str, completed: bool) -> Result<()> {
    let mut tracker = ctx.tracker()?;
    let task = tracker.set_completed(id, completed)?;

    output::print_outcome(&task, ctx.format, || {
        if task.completed {
            format!("{} {}", "✓".green(), task.name)
        } else {
            format!("{} {} marked not done", "○".dimmed(), task.name)
        }
    })
}

/// Set progress on a countable task
pub fn count(ctx: &CommandContext, id: &str, count: u32) -> Result<()> {
    let mut tracker = ctx.tracker()?;
    let task = tracker.set_count(id, count)?;

    output::print_outcome(&task, ctx.format, || {
        let progress = match task.target_count {
            Some(target) => format!("{}/{}", task.current_count.unwrap_or(0), target),
            None => task.current_count.unwrap_or(0).to_string(),
        };
        let mark = if task.completed { "✓".green() } else { "○".dimmed() };
        format!("{} {} {}", mark, task.name, progress)
    })
}

/// Attach or clear a note
pub fn note(ctx: &CommandContext, id: &str, text: Option<String>) -> Result<()> {
    let mut tracker = ctx.tracker()?;
    let task = tracker.set_note(id, text)?;

    output::print_outcome(&task, ctx.format, || match &task.notes {
        Some(note) => format!("Note on {}: {}", task.name, note),
        None => format!("Cleared note on {}", task.name),
    })
}

/// Add a custom task
pub fn add(
    ctx: &CommandContext,
    expansion: Option<&str>,
    cadence: Cadence,
    new_task: NewTask,
) -> Result<()> {
    let mut tracker = ctx.tracker()?;
    let expansion = expansion.unwrap_or(DEFAULT_EXPANSION);
    let task = tracker.add_custom_task(expansion, cadence, new_task)?;

    output::print_outcome(&task, ctx.format, || {
        format!(
            "{} Added {} task {} ({})",
            "✓".green(),
            cadence,
            task.name.bold(),
            task.id
        )
    })
}

#[derive(Serialize)]
struct DeleteOutcome<'a> {
    id: &'a str,
    expansion: &'a str,
    removed: bool,
}

/// Delete a custom task or hide a predefined one
pub fn delete(ctx: &CommandContext, id: &str, expansion: Option<&str>) -> Result<()> {
    let mut tracker = ctx.tracker()?;
    let expansion = expansion.unwrap_or(DEFAULT_EXPANSION);
    let deletion = tracker.delete_task(id, expansion)?;

    let outcome = DeleteOutcome {
        id,
        expansion,
        removed: deletion == Deletion::Removed,
    };
    output::print_outcome(&outcome, ctx.format, || match deletion {
        Deletion::Removed => format!("Deleted custom task {}", id),
        Deletion::Hidden => format!("Hid task {}", id),
    })
}

/// Forget all progress
pub fn reset(ctx: &CommandContext) -> Result<()> {
    ctx.tracker()?.reset_progress()?;

    output::print_outcome(&serde_json::json!({ "reset": true }), ctx.format, || {
        "Task progress reset".to_string()
    })
}
