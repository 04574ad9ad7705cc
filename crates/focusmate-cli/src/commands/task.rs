//! Task management commands for CLI.

use clap::Subcommand;
use focusmate_core::normalize::{normalize, parse_due_date};
use focusmate_core::{EnergyLevel, StoreError, Task, TaskDraft, TaskPatch};

use crate::render::task_line;
use crate::session::Session;

pub(crate) fn parse_energy(raw: &str) -> Result<EnergyLevel, String> {
    raw.parse().map_err(|e: focusmate_core::ValidationError| e.to_string())
}

/// Accept a calendar date and store it as `YYYY-MM-DD`.
pub(crate) fn parse_due(raw: &str) -> Result<String, String> {
    parse_due_date(Some(raw))
        .map(|d| d.format("%Y-%m-%d").to_string())
        .ok_or_else(|| format!("expected YYYY-MM-DD, got '{raw}'"))
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text
        content: String,
        /// Project to file the task under
        #[arg(long)]
        project: Option<String>,
        /// Position within the project (1 = first)
        #[arg(long, allow_negative_numbers = true)]
        step: Option<i64>,
        /// Energy needed: low, medium or high
        #[arg(long, default_value = "medium", value_parser = parse_energy)]
        energy: EnergyLevel,
        /// Mark as urgent
        #[arg(long)]
        urgent: bool,
        /// Due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_due)]
        due: Option<String>,
        /// File straight into the someday bucket
        #[arg(long)]
        someday: bool,
    },
    /// List stored tasks
    List {
        /// Only tasks of this project
        #[arg(long)]
        project: Option<String>,
        /// Include completed tasks
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Edit a task
    Edit {
        /// Task ID
        id: String,
        /// New text
        #[arg(long)]
        content: Option<String>,
        /// New project
        #[arg(long, conflicts_with = "no_project")]
        project: Option<String>,
        /// Remove the project
        #[arg(long)]
        no_project: bool,
        /// New step
        #[arg(long, allow_negative_numbers = true, conflicts_with = "no_step")]
        step: Option<i64>,
        /// Remove the step
        #[arg(long)]
        no_step: bool,
        /// New energy level
        #[arg(long, value_parser = parse_energy)]
        energy: Option<EnergyLevel>,
        /// Set or clear the urgent flag
        #[arg(long)]
        urgent: Option<bool>,
        /// New due date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_due, conflicts_with = "no_due")]
        due: Option<String>,
        /// Remove the due date
        #[arg(long)]
        no_due: bool,
    },
    /// Mark a task as completed
    Done {
        /// Task ID
        id: String,
    },
    /// Move a task into or out of the someday bucket
    Someday {
        /// Task ID
        id: String,
    },
    /// Add a checklist item to a task
    Subtask {
        /// Task ID
        id: String,
        /// Checklist text
        content: String,
    },
    /// Toggle a checklist item
    Check {
        /// Task ID
        id: String,
        /// Subtask ID
        subtask_id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction, today: chrono::NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let store = session.store.as_ref();
    let user = &session.user;

    match action {
        TaskAction::Add {
            content,
            project,
            step,
            energy,
            urgent,
            due,
            someday,
        } => {
            let draft = TaskDraft {
                content,
                project: project.unwrap_or_default(),
                step: step.map(|s| s.to_string()).unwrap_or_default(),
                energy,
                is_urgent: urgent,
                due_date: due.unwrap_or_default(),
                as_someday: someday,
            };
            let task = store.create_task(user, &draft.into_task()?)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { project, all, json } => {
            let tasks: Vec<Task> = store
                .list_tasks(user)?
                .into_iter()
                .filter(|t| all || !t.is_completed)
                .filter(|t| project.as_deref().map_or(true, |p| t.belongs_to(p)))
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks.");
            } else {
                for task in &tasks {
                    let status = normalize(task, today).due_status();
                    let someday = if task.is_someday { "  (someday)" } else { "" };
                    println!("{}{someday}", task_line(task, status));
                }
            }
        }
        TaskAction::Get { id } => {
            let task = store.get_task(user, &id)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Edit {
            id,
            content,
            project,
            no_project,
            step,
            no_step,
            energy,
            urgent,
            due,
            no_due,
        } => {
            let patch = TaskPatch {
                content,
                project: if no_project { Some(None) } else { project.map(Some) },
                step: if no_step { Some(None) } else { step.map(Some) },
                energy,
                is_urgent: urgent,
                due_date: if no_due { Some(None) } else { due.map(Some) },
                ..Default::default()
            };
            if patch.is_empty() {
                return Err("nothing to change".into());
            }
            let mut task = store.get_task(user, &id)?;
            task.apply(patch)?;
            let task = store.update_task(user, &task)?;
            println!("Task updated:");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Done { id } => {
            let mut task = store.get_task(user, &id)?;
            task.complete();
            store.update_task(user, &task)?;
            println!("Task completed: {}", task.content);
        }
        TaskAction::Someday { id } => {
            let mut task = store.get_task(user, &id)?;
            task.toggle_someday();
            store.update_task(user, &task)?;
            if task.is_someday {
                println!("Moved to someday: {}", task.content);
            } else {
                println!("Back in the bucket: {}", task.content);
            }
        }
        TaskAction::Subtask { id, content } => {
            let mut task = store.get_task(user, &id)?;
            let subtask_id = task.add_subtask(content).id.clone();
            store.update_task(user, &task)?;
            println!("Subtask added: {subtask_id}");
        }
        TaskAction::Check { id, subtask_id } => {
            let mut task = store.get_task(user, &id)?;
            if !task.toggle_subtask(&subtask_id) {
                return Err(StoreError::NotFound {
                    kind: "Subtask",
                    id: subtask_id,
                }
                .into());
            }
            store.update_task(user, &task)?;
            println!("Subtask toggled: {subtask_id}");
        }
        TaskAction::Delete { id } => {
            store.delete_task(user, &id)?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
