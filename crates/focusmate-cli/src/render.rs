//! Plain-text rendering for terminal output.

use focusmate_core::{DueStatus, FocusReason, ProjectProgress, Task};

/// One task as a single line: markers, content, project step and due badge.
pub fn task_line(task: &Task, status: DueStatus) -> String {
    let mut line = String::new();
    line.push_str(if task.is_completed { "[x] " } else { "[ ] " });
    if task.is_urgent {
        line.push_str("! ");
    }
    line.push_str(&task.content);

    if let Some(project) = task.project_label() {
        match task.step {
            Some(step) => line.push_str(&format!("  #{project} step {step}")),
            None => line.push_str(&format!("  #{project}")),
        }
    }
    if let Some(due) = task.due_date.as_deref().filter(|d| !d.trim().is_empty()) {
        let badge = match status {
            DueStatus::Overdue => " (overdue)",
            DueStatus::Today => " (today)",
            _ => "",
        };
        line.push_str(&format!("  due {due}{badge}"));
    }
    line.push_str(&format!("  [{}]  {}", task.energy, task.id));
    line
}

pub fn progress_line(name: &str, progress: &ProjectProgress) -> String {
    format!(
        "{name}  {}/{} ({}%){}",
        progress.completed,
        progress.total,
        progress.progress,
        if progress.is_done() { "  done" } else { "" }
    )
}

pub fn reason_text(reason: &FocusReason) -> String {
    match reason {
        FocusReason::Overdue { due_date } => format!("overdue since {due_date}"),
        FocusReason::DueToday => "due today".to_string(),
        FocusReason::EarliestDeadline { due_date } => format!("earliest deadline ({due_date})"),
        FocusReason::Urgent => "marked urgent".to_string(),
        FocusReason::ProjectStep {
            project,
            step: Some(step),
        } => format!("step {step} of {project}"),
        FocusReason::ProjectStep { project, step: None } => format!("next in {project}"),
        FocusReason::NextInLine => "next in line".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_shows_project_step_and_badge() {
        let mut task = Task::new("Write intro")
            .with_project("Thesis", Some(1))
            .with_due_date("2024-01-01")
            .urgent();
        task.id = "t1".into();
        let line = task_line(&task, DueStatus::Overdue);
        assert_eq!(
            line,
            "[ ] ! Write intro  #Thesis step 1  due 2024-01-01 (overdue)  [medium]  t1"
        );
    }

    #[test]
    fn progress_marks_finished_projects() {
        let done = ProjectProgress::from_counts(2, 2);
        assert_eq!(progress_line("Move", &done), "Move  2/2 (100%)  done");
    }
}
