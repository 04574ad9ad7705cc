//! Input shapes for creating and editing tasks.

use serde::{Deserialize, Serialize};

use super::{parse_step_text, EnergyLevel, Task};
use crate::error::ValidationError;

/// Raw values captured by the "brain dump" entry form.
///
/// Text fields are kept as typed; [`TaskDraft::into_task`] trims them and
/// turns blanks into absent values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDraft {
    pub content: String,
    pub project: String,
    pub step: String,
    pub energy: EnergyLevel,
    pub is_urgent: bool,
    pub due_date: String,
    /// File straight into the someday bucket
    pub as_someday: bool,
}

impl TaskDraft {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    /// Build a new task. Fails only on blank content.
    pub fn into_task(self) -> Result<Task, ValidationError> {
        let mut task = Task::new(self.content.trim());
        task.project = non_blank(self.project);
        task.step = parse_step_text(&self.step);
        task.energy = self.energy;
        task.is_urgent = self.is_urgent;
        task.due_date = non_blank(self.due_date);
        task.is_someday = self.as_someday;
        task.validate()?;
        Ok(task)
    }
}

/// Partial edit for an existing task.
///
/// Outer `None` leaves a field unchanged; for optional fields `Some(None)`
/// clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    pub content: Option<String>,
    pub project: Option<Option<String>>,
    pub step: Option<Option<i64>>,
    pub energy: Option<EnergyLevel>,
    pub is_urgent: Option<bool>,
    pub due_date: Option<Option<String>>,
    pub is_someday: Option<bool>,
    pub is_completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.project.is_none()
            && self.step.is_none()
            && self.energy.is_none()
            && self.is_urgent.is_none()
            && self.due_date.is_none()
            && self.is_someday.is_none()
            && self.is_completed.is_none()
    }
}

fn non_blank(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
