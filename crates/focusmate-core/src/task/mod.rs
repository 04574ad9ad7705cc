//! Task model shared by the ranking engine, the focus selector and the stores.
//!
//! A [`Task`] is a snapshot of a record owned by a task store. Wire names
//! follow the web client (`isUrgent`, `dueDate`, `isSomeday`, `isCompleted`),
//! and decoding is lenient: records written by older clients may carry an
//! empty project, a textual step or an unknown energy label, and those must
//! still load so the normalizer can fall back to safe values.

mod draft;

pub use draft::{TaskDraft, TaskPatch};

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Energy a task requires.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Can be done while tired
    Low,
    /// Default
    Medium,
    /// Needs full focus
    High,
}

impl Default for EnergyLevel {
    fn default() -> Self {
        EnergyLevel::Medium
    }
}

impl EnergyLevel {
    /// Parse a label, falling back to [`EnergyLevel::Medium`] for anything
    /// unrecognized.
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(EnergyLevel::Low),
            "medium" | "med" => Ok(EnergyLevel::Medium),
            "high" => Ok(EnergyLevel::High),
            other => Err(ValidationError::InvalidValue {
                field: "energy".to_string(),
                message: format!("expected low, medium or high, got '{other}'"),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for EnergyLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw
            .as_deref()
            .map(EnergyLevel::parse_lenient)
            .unwrap_or_default())
    }
}

/// Checklist entry attached to a task. Never affects ranking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub is_completed: bool,
}

/// A task as stored by the user's task store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque identifier, unique within one user's tasks
    pub id: String,
    /// Display text
    pub content: String,
    /// Project label; `None` or blank means a standalone task
    #[serde(default)]
    pub project: Option<String>,
    /// Position inside the project. Kept as stored; see [`crate::normalize`]
    /// for how absent, zero or negative values sort.
    #[serde(default, deserialize_with = "deserialize_lenient_step")]
    pub step: Option<i64>,
    #[serde(default)]
    pub energy: EnergyLevel,
    #[serde(default)]
    pub is_urgent: bool,
    /// Calendar date as `YYYY-MM-DD`; blank or unparsable means no deadline
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub is_someday: bool,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Create a new task with default values.
    pub fn new(content: impl Into<String>) -> Self {
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            project: None,
            step: None,
            energy: EnergyLevel::Medium,
            is_urgent: false,
            due_date: None,
            is_someday: false,
            is_completed: false,
            subtasks: Vec::new(),
        }
    }

    pub fn with_project(mut self, project: impl Into<String>, step: Option<i64>) -> Self {
        self.project = Some(project.into());
        self.step = step;
        self
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }

    pub fn urgent(mut self) -> Self {
        self.is_urgent = true;
        self
    }

    pub fn someday(mut self) -> Self {
        self.is_someday = true;
        self
    }

    /// Content must contain something other than whitespace.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        Ok(())
    }

    /// Active tasks are the only ones the ranking engine and the focus
    /// selector ever look at.
    pub fn is_active(&self) -> bool {
        !self.is_completed && !self.is_someday
    }

    /// Trimmed project label, `None` when missing or blank.
    pub fn project_label(&self) -> Option<&str> {
        self.project
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn belongs_to(&self, project: &str) -> bool {
        self.project_label() == Some(project.trim())
    }

    pub fn complete(&mut self) {
        self.is_completed = true;
    }

    pub fn toggle_someday(&mut self) {
        self.is_someday = !self.is_someday;
    }

    pub fn add_subtask(&mut self, content: impl Into<String>) -> &Subtask {
        self.subtasks.push(Subtask {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            is_completed: false,
        });
        &self.subtasks[self.subtasks.len() - 1]
    }

    /// Flip a subtask's completion flag. Returns `false` when no subtask has
    /// that id.
    pub fn toggle_subtask(&mut self, subtask_id: &str) -> bool {
        match self.subtasks.iter_mut().find(|s| s.id == subtask_id) {
            Some(subtask) => {
                subtask.is_completed = !subtask.is_completed;
                true
            }
            None => false,
        }
    }

    /// Apply a partial edit. The result is validated before it replaces the
    /// current values, so a failed edit leaves the task untouched.
    pub fn apply(&mut self, patch: TaskPatch) -> Result<(), ValidationError> {
        let mut next = self.clone();
        if let Some(content) = patch.content {
            next.content = content;
        }
        if let Some(project) = patch.project {
            next.project = project;
        }
        if let Some(step) = patch.step {
            next.step = step;
        }
        if let Some(energy) = patch.energy {
            next.energy = energy;
        }
        if let Some(urgent) = patch.is_urgent {
            next.is_urgent = urgent;
        }
        if let Some(due_date) = patch.due_date {
            next.due_date = due_date;
        }
        if let Some(someday) = patch.is_someday {
            next.is_someday = someday;
        }
        if let Some(completed) = patch.is_completed {
            next.is_completed = completed;
        }
        next.validate()?;
        *self = next;
        Ok(())
    }
}

/// Parse a step the way the entry form does: blank is "no step", anything
/// that is not an integer is dropped.
pub(crate) fn parse_step_text(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

fn deserialize_lenient_step<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Some(serde_json::Value::String(s)) => parse_step_text(&s),
        _ => None,
    })
}
