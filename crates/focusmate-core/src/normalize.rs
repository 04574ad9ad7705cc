//! Task pool normalization.
//!
//! Derives the comparison-ready fields the ranking engine and the focus
//! selector share, without touching the stored record:
//!
//! - `effective_step`: the task's step when it is a positive integer, else
//!   [`UNORDERED_STEP`]
//! - `due_key`: canonical `YYYY-MM-DD` text of a valid due date
//! - `is_overdue` / `is_due_today`: relative to the caller's calendar day
//!
//! Malformed input never fails here. A non-positive step sorts as unordered
//! and an unparsable date counts as "no deadline".

use chrono::NaiveDate;
use serde::Serialize;

use crate::task::Task;

/// Effective step of a task without a usable step number. Sorts after every
/// real step of the same project.
pub const UNORDERED_STEP: u64 = u64::MAX;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Where a due date sits relative to today, for badge rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DueStatus {
    Overdue,
    Today,
    Upcoming,
    None,
}

/// A task paired with its derived sort fields.
#[derive(Debug, Clone)]
pub struct NormalizedTask<'a> {
    pub task: &'a Task,
    pub effective_step: u64,
    pub due_key: Option<String>,
    pub is_overdue: bool,
    pub is_due_today: bool,
}

impl<'a> NormalizedTask<'a> {
    pub fn has_due_date(&self) -> bool {
        self.due_key.is_some()
    }

    pub fn due_status(&self) -> DueStatus {
        if self.is_overdue {
            DueStatus::Overdue
        } else if self.is_due_today {
            DueStatus::Today
        } else if self.has_due_date() {
            DueStatus::Upcoming
        } else {
            DueStatus::None
        }
    }

    pub fn project(&self) -> Option<&'a str> {
        self.task.project_label()
    }
}

/// Map a stored step to its sort value.
pub fn effective_step(step: Option<i64>) -> u64 {
    match step {
        Some(n) if n > 0 => n as u64,
        _ => UNORDERED_STEP,
    }
}

/// True when `text` is exactly `DDDD-DD-DD`. chrono's `%Y-%m-%d` accepts
/// short fields (`24-01-05`, `2024-1-5`), which would break text ordering.
fn has_iso_date_shape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Parse a strict, zero-padded `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    if !has_iso_date_shape(text) {
        return None;
    }
    NaiveDate::parse_from_str(text, ISO_DATE_FORMAT).ok()
}

/// Parse a stored due date. Accepts `YYYY-MM-DD`, optionally followed by a
/// time part (`2024-01-05T09:00:00`), which is ignored.
pub fn parse_due_date(raw: Option<&str>) -> Option<NaiveDate> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        return None;
    }
    let date_part = match trimmed.get(10..11) {
        Some("T") | Some(" ") => trimmed.get(..10)?,
        _ => trimmed,
    };
    let parsed = parse_iso_date(date_part);
    if parsed.is_none() {
        tracing::debug!(raw = trimmed, "ignoring unparsable due date");
    }
    parsed
}

/// Derive the sort fields of one task as of `today`.
pub fn normalize(task: &Task, today: NaiveDate) -> NormalizedTask<'_> {
    let due = parse_due_date(task.due_date.as_deref());
    NormalizedTask {
        task,
        effective_step: effective_step(task.step),
        due_key: due.map(|d| d.format(ISO_DATE_FORMAT).to_string()),
        is_overdue: due.is_some_and(|d| d < today),
        is_due_today: due.is_some_and(|d| d == today),
    }
}

/// Normalize every task, keeping input order.
pub fn normalize_pool(tasks: &[Task], today: NaiveDate) -> Vec<NormalizedTask<'_>> {
    tasks.iter().map(|task| normalize(task, today)).collect()
}
