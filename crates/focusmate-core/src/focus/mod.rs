//! Focus sessions: pick exactly one task to work on.
//!
//! The selector works on the active pool and applies, in order:
//!
//! 1. project sequencing: a project task is eligible only while its effective
//!    step equals the lowest effective step among the project's active tasks
//! 2. the energy mode filter (`tired` → low energy, otherwise medium/high)
//! 3. the dashboard ordering, taking the first task
//!
//! An empty candidate set is a normal outcome ("you're free"), not an error.

mod mode;
mod selector;

pub use mode::EnergyMode;
pub use selector::{current_steps, select_next_action, FocusReason, FocusReport, FocusSelector};
