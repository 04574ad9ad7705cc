use chrono::NaiveDate;
use clap::Args;
use focusmate_core::{EnergyMode, FocusSelector};

use crate::render::{reason_text, task_line};
use crate::session::Session;

#[derive(Args)]
pub struct FocusArgs {
    /// Energy mode: tired or ready (default from config; unknown values mean ready)
    #[arg(long)]
    mode: Option<String>,
    /// Only consider one project
    #[arg(long)]
    project: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
    /// Mark the selected task as completed
    #[arg(long)]
    done: bool,
}

pub fn run(args: FocusArgs, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    let mode = args
        .mode
        .as_deref()
        .map(EnergyMode::parse_lenient)
        .unwrap_or(session.config.focus.default_mode);

    let tasks = session.store.list_tasks(&session.user)?;
    let selector = match &args.project {
        Some(project) => FocusSelector::new(mode, today).with_project(project.as_str()),
        None => FocusSelector::new(mode, today),
    };
    let report = selector.report(&tasks);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        match (&report.selected, &report.reason) {
            (Some(pick), reason) => {
                println!("Focus ({mode}): {}", pick.task.content);
                println!("  {}", task_line(pick.task, pick.due_status));
                if let Some(reason) = reason {
                    println!("  why: {}", reason_text(reason));
                }
            }
            (None, _) => {
                println!("You're free!");
                if report.blocked_by_sequence > 0 || report.filtered_by_energy > 0 {
                    println!(
                        "  {} waiting on an earlier step, {} not matching {mode} mode",
                        report.blocked_by_sequence, report.filtered_by_energy
                    );
                }
            }
        }
    }

    if args.done {
        if let Some(task) = report.task() {
            let mut task = task.clone();
            task.complete();
            session.store.update_task(&session.user, &task)?;
            if !args.json {
                println!("Task completed: {}", task.content);
            }
        }
    }
    Ok(())
}
