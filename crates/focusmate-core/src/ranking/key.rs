//! The composite ordering shared by the dashboard view and the focus selector.
//!
//! Criteria, first difference wins:
//! 1. tasks with a due date before tasks without one
//! 2. earlier due date first (ISO `YYYY-MM-DD` text comparison)
//! 3. urgent before not urgent
//! 4. within one project, lower effective step first
//! 5. otherwise input order
//!
//! Criterion 4 only relates tasks of the same project, so it cannot be used
//! as a pairwise comparator: a standalone task would tie with both step 1 and
//! step 2 of a project that must not tie with each other. Instead each task
//! gets a [`RankKey`] whose `anchor` is the input position of the first task
//! of its project within its (due date, urgency) class. A project's tasks are
//! gathered at that position and ordered by step; every other task keeps its
//! input position. The derived `Ord` on the key is a total order.

use std::collections::HashMap;

use crate::normalize::NormalizedTask;

/// Sort key for the composite ordering. Field order is comparison order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    due_absent: bool,
    due_key: String,
    not_urgent: bool,
    anchor: usize,
    effective_step: u64,
    index: usize,
}

/// Compute one key per task, in input order.
pub fn rank_keys(pool: &[NormalizedTask<'_>]) -> Vec<RankKey> {
    let mut anchors: HashMap<(Option<&str>, bool, &str), usize> = HashMap::new();

    pool.iter()
        .enumerate()
        .map(|(index, n)| {
            let anchor = match n.project() {
                Some(project) => *anchors
                    .entry((n.due_key.as_deref(), n.task.is_urgent, project))
                    .or_insert(index),
                None => index,
            };
            RankKey {
                due_absent: n.due_key.is_none(),
                due_key: n.due_key.clone().unwrap_or_default(),
                not_urgent: !n.task.is_urgent,
                anchor,
                effective_step: n.effective_step,
                index,
            }
        })
        .collect()
}

/// Sort a normalized pool by the composite ordering.
pub fn dashboard_order<'a>(pool: Vec<NormalizedTask<'a>>) -> Vec<NormalizedTask<'a>> {
    let keys = rank_keys(&pool);
    let mut keyed: Vec<(RankKey, NormalizedTask<'a>)> = keys.into_iter().zip(pool).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, n)| n).collect()
}

/// First task under the composite ordering, without sorting the whole pool.
pub fn first_in_order<'a, 'p>(pool: &'p [NormalizedTask<'a>]) -> Option<&'p NormalizedTask<'a>> {
    rank_keys(pool)
        .into_iter()
        .zip(pool)
        .min_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, n)| n)
}
