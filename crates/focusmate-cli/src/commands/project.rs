//! Project overview commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use focusmate_core::{group_by_project, project_progress, FocusSelector};

use crate::render::{progress_line, task_line};
use crate::session::Session;

#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects with active tasks and their progress
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one project's tasks in step order
    Show {
        /// Project name
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: ProjectAction, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let tasks = session.store.list_tasks(&session.user)?;

    match action {
        ProjectAction::List { json } => {
            let sections = group_by_project(&tasks, today);
            if json {
                println!("{}", serde_json::to_string_pretty(&sections)?);
            } else if sections.is_empty() {
                println!("No active projects.");
            } else {
                for section in &sections {
                    println!("{}", progress_line(section.name, &section.progress));
                }
            }
        }
        ProjectAction::Show { name, json } => {
            let section = group_by_project(&tasks, today)
                .into_iter()
                .find(|s| s.name == name.trim());

            let Some(section) = section else {
                // a project can be finished and still have completed tasks
                let progress = project_progress(&tasks, &name);
                if progress.total == 0 {
                    return Err(format!("Project not found: {name}").into());
                }
                if json {
                    println!("{}", serde_json::to_string_pretty(&progress)?);
                } else {
                    println!("{}", progress_line(name.trim(), &progress));
                }
                return Ok(());
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&section)?);
                return Ok(());
            }

            println!("{}", progress_line(section.name, &section.progress));
            let current = FocusSelector::new(session.config.focus.default_mode, today)
                .with_project(section.name)
                .select(&tasks)
                .map(|t| t.id.as_str());
            for ranked in &section.tasks {
                let marker = if Some(ranked.task.id.as_str()) == current { ">" } else { " " };
                println!("{marker} {}", task_line(ranked.task, ranked.due_status));
            }
        }
    }
    Ok(())
}
