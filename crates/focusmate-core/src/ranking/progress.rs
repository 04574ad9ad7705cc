//! Project progress summary for project view headers.

use serde::Serialize;

use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct ProjectProgress {
    /// Active plus completed tasks of the project
    pub total: usize,
    pub completed: usize,
    /// Rounded percentage, 0 for an empty project
    pub progress: u8,
}

impl ProjectProgress {
    pub fn from_counts(total: usize, completed: usize) -> Self {
        let progress = if total == 0 {
            0
        } else {
            ((completed as f64 * 100.0) / total as f64).round().min(100.0) as u8
        };
        Self {
            total,
            completed,
            progress,
        }
    }

    pub fn is_done(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Summarize one project. Someday tasks that are not completed count as
/// neither active nor completed and are left out.
pub fn project_progress(tasks: &[Task], project: &str) -> ProjectProgress {
    let mut total = 0;
    let mut completed = 0;
    for task in tasks.iter().filter(|t| t.belongs_to(project)) {
        if task.is_completed {
            total += 1;
            completed += 1;
        } else if !task.is_someday {
            total += 1;
        }
    }
    ProjectProgress::from_counts(total, completed)
}
