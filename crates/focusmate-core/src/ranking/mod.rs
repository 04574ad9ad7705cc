//! Ranking engine for the "Bucket" views.
//!
//! Two display modes over the active pool (not completed, not someday):
//!
//! - **Project view** ([`rank_project`]): one project's tasks by effective
//!   step, ties in input order.
//! - **Dashboard view** ([`rank_dashboard`]): every active task under the
//!   composite ordering in [`key`].
//!
//! Someday tasks are returned separately by [`someday_bucket`] and are never
//! interleaved with the active ranking.

mod key;
mod progress;

pub use key::{dashboard_order, first_in_order, rank_keys, RankKey};
pub use progress::{project_progress, ProjectProgress};

use chrono::NaiveDate;
use serde::Serialize;

use crate::normalize::{effective_step, normalize, normalize_pool, DueStatus, NormalizedTask};
use crate::task::Task;

/// A task in a ranked list, with the derived values the list renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedTask<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    pub due_status: DueStatus,
}

impl<'a> From<NormalizedTask<'a>> for RankedTask<'a> {
    fn from(n: NormalizedTask<'a>) -> Self {
        let due_status = n.due_status();
        RankedTask {
            task: n.task,
            due_status,
        }
    }
}

/// Active ranking plus the someday bucket, ready for display.
#[derive(Debug, Clone, Serialize)]
pub struct Bucket<'a> {
    pub active: Vec<RankedTask<'a>>,
    pub someday: Vec<RankedTask<'a>>,
}

impl<'a> Bucket<'a> {
    pub fn is_caught_up(&self) -> bool {
        self.active.is_empty()
    }
}

/// One project's tasks with its progress header.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSection<'a> {
    pub name: &'a str,
    pub progress: ProjectProgress,
    pub tasks: Vec<RankedTask<'a>>,
}

fn active_pool(tasks: &[Task], today: NaiveDate) -> Vec<NormalizedTask<'_>> {
    normalize_pool(tasks, today)
        .into_iter()
        .filter(|n| n.task.is_active())
        .collect()
}

fn project_order<'a>(
    tasks: &'a [Task],
    project: &str,
    today: NaiveDate,
) -> Vec<NormalizedTask<'a>> {
    let mut pool: Vec<NormalizedTask<'a>> = active_pool(tasks, today)
        .into_iter()
        .filter(|n| n.task.belongs_to(project))
        .collect();
    // sort_by_key is stable: equal steps keep input order
    pool.sort_by_key(|n| n.effective_step);
    pool
}

/// Project view: the project's active tasks by effective step.
///
/// An unknown project yields an empty list.
pub fn rank_project<'a>(tasks: &'a [Task], project: &str) -> Vec<&'a Task> {
    let mut ranked: Vec<&'a Task> = tasks
        .iter()
        .filter(|t| t.is_active() && t.belongs_to(project))
        .collect();
    ranked.sort_by_key(|t| effective_step(t.step));
    ranked
}

/// Dashboard view: every active task under the composite ordering.
pub fn rank_dashboard(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    dashboard_order(active_pool(tasks, today))
        .into_iter()
        .map(|n| n.task)
        .collect()
}

/// Someday bucket: not completed, marked someday, in input order.
pub fn someday_bucket(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| !t.is_completed && t.is_someday)
        .collect()
}

/// Build both buckets for display. With a project filter the active list is
/// the project view and the someday list is limited to that project.
pub fn build_bucket<'a>(tasks: &'a [Task], project: Option<&str>, today: NaiveDate) -> Bucket<'a> {
    let active: Vec<RankedTask<'a>> = match project {
        Some(name) => project_order(tasks, name, today)
            .into_iter()
            .map(RankedTask::from)
            .collect(),
        None => dashboard_order(active_pool(tasks, today))
            .into_iter()
            .map(RankedTask::from)
            .collect(),
    };
    let someday: Vec<RankedTask<'a>> = someday_bucket(tasks)
        .into_iter()
        .filter(|t| project.map_or(true, |name| t.belongs_to(name)))
        .map(|t| RankedTask::from(normalize(t, today)))
        .collect();

    tracing::debug!(
        project = project.unwrap_or("*"),
        active = active.len(),
        someday = someday.len(),
        "built bucket"
    );
    Bucket { active, someday }
}

/// Distinct project labels of active tasks, in first-seen order.
pub fn project_names(tasks: &[Task]) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for name in tasks.iter().filter(|t| t.is_active()).filter_map(Task::project_label) {
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

/// Every project with active tasks, each in project-view order.
pub fn group_by_project(tasks: &[Task], today: NaiveDate) -> Vec<ProjectSection<'_>> {
    project_names(tasks)
        .into_iter()
        .map(|name| ProjectSection {
            name,
            progress: project_progress(tasks, name),
            tasks: project_order(tasks, name, today)
                .into_iter()
                .map(RankedTask::from)
                .collect(),
        })
        .collect()
}
