//! Next-action selection.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use super::mode::EnergyMode;
use crate::normalize::{normalize, NormalizedTask, UNORDERED_STEP};
use crate::ranking::{first_in_order, RankedTask};
use crate::task::Task;

/// Why the selected task came out on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FocusReason {
    /// Due date already passed
    Overdue { due_date: String },
    DueToday,
    /// Has a deadline, earliest among candidates
    EarliestDeadline { due_date: String },
    Urgent,
    /// Current step of a project
    ProjectStep { project: String, step: Option<u64> },
    /// Nothing stands out; first in line
    NextInLine,
}

impl FocusReason {
    fn for_task(n: &NormalizedTask<'_>) -> Self {
        if let Some(due) = &n.due_key {
            if n.is_overdue {
                return FocusReason::Overdue {
                    due_date: due.clone(),
                };
            }
            if n.is_due_today {
                return FocusReason::DueToday;
            }
            return FocusReason::EarliestDeadline {
                due_date: due.clone(),
            };
        }
        if n.task.is_urgent {
            return FocusReason::Urgent;
        }
        if let Some(project) = n.project() {
            return FocusReason::ProjectStep {
                project: project.to_string(),
                step: (n.effective_step != UNORDERED_STEP).then_some(n.effective_step),
            };
        }
        FocusReason::NextInLine
    }
}

/// Outcome of one selection, with the counts needed to explain an empty
/// result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusReport<'a> {
    pub mode: EnergyMode,
    pub selected: Option<RankedTask<'a>>,
    pub reason: Option<FocusReason>,
    /// Tasks left after sequencing and energy filters
    pub candidates: usize,
    /// Active tasks waiting on an earlier step of their project
    pub blocked_by_sequence: usize,
    /// Unblocked tasks that do not match the energy mode
    pub filtered_by_energy: usize,
    /// Completed or someday tasks (and tasks outside the project filter)
    pub excluded_inactive: usize,
}

impl<'a> FocusReport<'a> {
    pub fn task(&self) -> Option<&'a Task> {
        self.selected.as_ref().map(|r| r.task)
    }

    pub fn is_free(&self) -> bool {
        self.selected.is_none()
    }
}

/// Minimum effective step per project over the given pool.
pub fn current_steps<'a>(pool: &[NormalizedTask<'a>]) -> HashMap<&'a str, u64> {
    let mut steps: HashMap<&'a str, u64> = HashMap::new();
    for n in pool {
        if let Some(project) = n.project() {
            steps
                .entry(project)
                .and_modify(|s| *s = (*s).min(n.effective_step))
                .or_insert(n.effective_step);
        }
    }
    steps
}

/// Picks the single task to work on in a focus session.
///
/// Selection is a pure function of the snapshot, the mode, the optional
/// project filter and the calendar day: the same inputs always return the
/// same task.
#[derive(Debug, Clone)]
pub struct FocusSelector {
    mode: EnergyMode,
    project: Option<String>,
    today: NaiveDate,
}

impl FocusSelector {
    pub fn new(mode: EnergyMode, today: NaiveDate) -> Self {
        Self {
            mode,
            project: None,
            today,
        }
    }

    /// Restrict the session to one project. Matching follows
    /// [`Task::belongs_to`], so a blank name matches no task.
    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = Some(project.into());
        self
    }

    pub fn mode(&self) -> EnergyMode {
        self.mode
    }

    /// The recommended task, or `None` when nothing matches.
    pub fn select<'a>(&self, tasks: &'a [Task]) -> Option<&'a Task> {
        self.report(tasks).task()
    }

    /// Run the selection and keep the intermediate counts.
    pub fn report<'a>(&self, tasks: &'a [Task]) -> FocusReport<'a> {
        let total = tasks.len();

        // 1. active pool, optionally one project
        let pool: Vec<NormalizedTask<'a>> = tasks
            .iter()
            .filter(|t| t.is_active())
            .filter(|t| match &self.project {
                Some(name) => t.belongs_to(name),
                None => true,
            })
            .map(|t| normalize(t, self.today))
            .collect();
        let excluded_inactive = total - pool.len();

        // 2-3. sequencing gate, computed before the energy filter so a
        // low-energy first step still blocks later steps in ready mode
        let current = current_steps(&pool);
        let (unblocked, blocked): (Vec<_>, Vec<_>) = pool.into_iter().partition(|n| {
            match n.project() {
                Some(project) => current
                    .get(project)
                    .map_or(true, |&min| n.effective_step <= min),
                None => true,
            }
        });

        // 4. energy filter
        let (candidates, filtered): (Vec<_>, Vec<_>) = unblocked
            .into_iter()
            .partition(|n| self.mode.accepts(n.task.energy));

        // 5-6. rank and take the first
        let best = first_in_order(&candidates);
        let reason = best.map(FocusReason::for_task);
        let selected = best.cloned().map(RankedTask::from);

        match &selected {
            Some(pick) => tracing::debug!(
                mode = %self.mode,
                task_id = %pick.task.id,
                candidates = candidates.len(),
                blocked = blocked.len(),
                "selected next action"
            ),
            None => tracing::debug!(
                mode = %self.mode,
                blocked = blocked.len(),
                filtered = filtered.len(),
                "no actionable task"
            ),
        }

        FocusReport {
            mode: self.mode,
            selected,
            reason,
            candidates: candidates.len(),
            blocked_by_sequence: blocked.len(),
            filtered_by_energy: filtered.len(),
            excluded_inactive,
        }
    }
}

/// Convenience wrapper around [`FocusSelector`].
pub fn select_next_action<'a>(
    tasks: &'a [Task],
    mode: EnergyMode,
    project: Option<&str>,
    today: NaiveDate,
) -> Option<&'a Task> {
    let selector = FocusSelector::new(mode, today);
    let selector = match project {
        Some(name) => selector.with_project(name),
        None => selector,
    };
    selector.select(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::EnergyLevel;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn task(id: &str) -> Task {
        let mut t = Task::new(id);
        t.id = id.to_string();
        t
    }

    fn pick<'a>(tasks: &'a [Task], mode: EnergyMode) -> Option<&'a str> {
        select_next_action(tasks, mode, None, today()).map(|t| t.id.as_str())
    }

    #[test]
    fn only_current_step_is_eligible() {
        let tasks = vec![
            task("s3").with_project("Launch", Some(3)),
            task("s1").with_project("Launch", Some(1)),
            task("s2").with_project("Launch", Some(2)),
        ];
        assert_eq!(pick(&tasks, EnergyMode::Ready), Some("s1"));

        let report = FocusSelector::new(EnergyMode::Ready, today()).report(&tasks);
        assert_eq!(report.candidates, 1);
        assert_eq!(report.blocked_by_sequence, 2);
        assert_eq!(
            report.reason,
            Some(FocusReason::ProjectStep {
                project: "Launch".into(),
                step: Some(1)
            })
        );
    }

    #[test]
    fn blank_project_filter_matches_nothing() {
        let tasks = vec![task("solo"), task("p1").with_project("P", Some(1))];
        assert!(crate::ranking::rank_project(&tasks, "").is_empty());
        assert_eq!(
            select_next_action(&tasks, EnergyMode::Ready, Some(""), today()),
            None
        );
        assert_eq!(
            select_next_action(&tasks, EnergyMode::Ready, Some(" P "), today()).map(|t| &t.id[..]),
            Some("p1")
        );
    }

    #[test]
    fn ready_mode_ignores_low_energy() {
        let tasks = vec![task("rest").with_energy(EnergyLevel::Low)];
        assert_eq!(pick(&tasks, EnergyMode::Ready), None);
        assert_eq!(pick(&tasks, EnergyMode::Tired), Some("rest"));
    }

    #[test]
    fn low_energy_first_step_still_blocks() {
        let tasks = vec![
            task("s1").with_project("P", Some(1)).with_energy(EnergyLevel::Low),
            task("s2").with_project("P", Some(2)),
        ];
        let report = FocusSelector::new(EnergyMode::Ready, today()).report(&tasks);
        assert!(report.is_free());
        assert_eq!(report.blocked_by_sequence, 1);
        assert_eq!(report.filtered_by_energy, 1);
    }

    #[test]
    fn malformed_step_waits_for_numbered_steps() {
        let json = r#"[
            {"id": "bad", "content": "x", "project": "P", "step": "abc"},
            {"id": "two", "content": "y", "project": "P", "step": 2}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();
        assert_eq!(pick(&tasks, EnergyMode::Ready), Some("two"));

        let report = FocusSelector::new(EnergyMode::Ready, today()).report(&tasks);
        assert_eq!(report.blocked_by_sequence, 1);
    }

    #[test]
    fn unordered_only_project_is_not_blocked() {
        let tasks = vec![
            task("a").with_project("P", None),
            task("b").with_project("P", None),
        ];
        let report = FocusSelector::new(EnergyMode::Ready, today()).report(&tasks);
        assert_eq!(report.candidates, 2);
        assert_eq!(report.task().map(|t| t.id.as_str()), Some("a"));
    }

    #[test]
    fn deadline_beats_urgency_and_overdue_is_reported() {
        let tasks = vec![
            task("urgent").urgent(),
            task("late").with_due_date("2024-02-28"),
        ];
        let report = FocusSelector::new(EnergyMode::Ready, today()).report(&tasks);
        assert_eq!(report.task().map(|t| t.id.as_str()), Some("late"));
        assert_eq!(
            report.reason,
            Some(FocusReason::Overdue {
                due_date: "2024-02-28".into()
            })
        );
    }

    #[test]
    fn project_filter_limits_pool() {
        let tasks = vec![
            task("solo").urgent(),
            task("p1").with_project("P", Some(1)),
        ];
        let selected = select_next_action(&tasks, EnergyMode::Ready, Some("P"), today());
        assert_eq!(selected.map(|t| t.id.as_str()), Some("p1"));

        let none = select_next_action(&tasks, EnergyMode::Ready, Some("Nope"), today());
        assert!(none.is_none());
    }

    #[test]
    fn repeated_calls_agree() {
        let tasks = vec![
            task("a").urgent().with_due_date("2024-03-05"),
            task("b").urgent().with_due_date("2024-03-05"),
        ];
        let first = pick(&tasks, EnergyMode::Ready);
        for _ in 0..10 {
            assert_eq!(pick(&tasks, EnergyMode::Ready), first);
        }
        assert_eq!(first, Some("a"));
    }

    #[test]
    fn inactive_tasks_never_selected() {
        let mut done = task("done").urgent();
        done.complete();
        let tasks = vec![done, task("later").urgent().someday()];
        let report = FocusSelector::new(EnergyMode::Ready, today()).report(&tasks);
        assert!(report.is_free());
        assert_eq!(report.excluded_inactive, 2);
    }
}
