//! Property tests for ranking and next-action selection.

use chrono::NaiveDate;
use focusmate_core::normalize::effective_step;
use focusmate_core::{
    rank_dashboard, rank_project, select_next_action, EnergyLevel, EnergyMode, FocusSelector,
    Task,
};
use proptest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

fn arb_energy() -> impl Strategy<Value = EnergyLevel> {
    prop_oneof![
        Just(EnergyLevel::Low),
        Just(EnergyLevel::Medium),
        Just(EnergyLevel::High),
    ]
}

fn arb_mode() -> impl Strategy<Value = EnergyMode> {
    prop_oneof![Just(EnergyMode::Tired), Just(EnergyMode::Ready)]
}

/// Canonical ISO dates around `today()`, so overdue, today and upcoming all occur.
fn arb_due() -> impl Strategy<Value = Option<String>> {
    prop::option::of((1u32..=20).prop_map(|d| format!("2024-01-{d:02}")))
}

fn arb_task() -> impl Strategy<Value = Task> {
    (
        prop::option::of(prop::sample::select(vec!["A", "B", "C"])),
        prop::option::of(-1i64..5),
        arb_energy(),
        any::<bool>(),
        arb_due(),
        prop::bool::weighted(0.15),
        prop::bool::weighted(0.15),
    )
        .prop_map(|(project, step, energy, urgent, due, someday, completed)| {
            let mut task = Task::new("generated");
            task.project = project.map(str::to_string);
            task.step = step;
            task.energy = energy;
            task.is_urgent = urgent;
            task.due_date = due;
            task.is_someday = someday;
            task.is_completed = completed;
            task
        })
}

fn arb_pool() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(arb_task(), 0..24).prop_map(|mut tasks| {
        for (i, task) in tasks.iter_mut().enumerate() {
            task.id = format!("t{i}");
            task.content = format!("task {i}");
        }
        tasks
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn inactive_tasks_never_ranked_or_selected(pool in arb_pool(), mode in arb_mode()) {
        for task in rank_dashboard(&pool, today()) {
            prop_assert!(task.is_active());
        }
        for project in ["A", "B", "C"] {
            for task in rank_project(&pool, project) {
                prop_assert!(task.is_active());
            }
        }
        if let Some(task) = select_next_action(&pool, mode, None, today()) {
            prop_assert!(task.is_active());
        }
    }

    #[test]
    fn dashboard_respects_due_date_then_urgency(pool in arb_pool()) {
        let ranked = rank_dashboard(&pool, today());
        for (i, a) in ranked.iter().enumerate() {
            for b in &ranked[i + 1..] {
                match (&a.due_date, &b.due_date) {
                    (None, Some(_)) => prop_assert!(false, "undated {} before dated {}", a.id, b.id),
                    (Some(da), Some(db)) => prop_assert!(da <= db, "{} after {}", da, db),
                    _ => {}
                }
                if a.due_date == b.due_date {
                    prop_assert!(
                        a.is_urgent || !b.is_urgent,
                        "non-urgent {} before urgent {}",
                        a.id,
                        b.id
                    );
                }
            }
        }
    }

    #[test]
    fn dashboard_keeps_every_active_task(pool in arb_pool()) {
        let ranked = rank_dashboard(&pool, today());
        let active = pool.iter().filter(|t| t.is_active()).count();
        prop_assert_eq!(ranked.len(), active);
    }

    #[test]
    fn project_view_sorted_by_effective_step(pool in arb_pool()) {
        for project in ["A", "B", "C"] {
            let steps: Vec<u64> = rank_project(&pool, project)
                .iter()
                .map(|t| effective_step(t.step))
                .collect();
            prop_assert!(steps.windows(2).all(|w| w[0] <= w[1]), "{:?}", steps);
        }
    }

    #[test]
    fn selection_never_skips_a_step(pool in arb_pool(), mode in arb_mode()) {
        if let Some(task) = select_next_action(&pool, mode, None, today()) {
            if let Some(project) = task.project_label() {
                let current = pool
                    .iter()
                    .filter(|t| t.is_active() && t.belongs_to(project))
                    .map(|t| effective_step(t.step))
                    .min()
                    .unwrap();
                prop_assert!(effective_step(task.step) <= current);
            }
        }
    }

    #[test]
    fn selection_matches_energy_mode(pool in arb_pool(), mode in arb_mode()) {
        if let Some(task) = select_next_action(&pool, mode, None, today()) {
            prop_assert!(mode.accepts(task.energy));
        }
    }

    #[test]
    fn selection_is_deterministic(pool in arb_pool(), mode in arb_mode()) {
        let first = select_next_action(&pool, mode, None, today()).map(|t| t.id.clone());
        let second = select_next_action(&pool, mode, None, today()).map(|t| t.id.clone());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn empty_candidate_set_selects_nothing(pool in arb_pool(), mode in arb_mode()) {
        let report = FocusSelector::new(mode, today()).report(&pool);
        prop_assert_eq!(report.candidates == 0, report.is_free());
        prop_assert_eq!(
            report.candidates
                + report.blocked_by_sequence
                + report.filtered_by_energy
                + report.excluded_inactive,
            pool.len()
        );
    }

    #[test]
    fn tired_mode_on_energetic_pool_is_free(pool in arb_pool()) {
        let energetic: Vec<Task> = pool
            .into_iter()
            .filter(|t| t.energy != EnergyLevel::Low)
            .collect();
        prop_assert!(select_next_action(&energetic, EnergyMode::Tired, None, today()).is_none());
    }
}
