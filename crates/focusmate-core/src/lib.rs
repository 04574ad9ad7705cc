//! # Focus Mate Core Library
//!
//! This library provides the core logic for Focus Mate, a task manager that
//! answers one question: what should I work on next? All operations are
//! available through the standalone CLI binary, which is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Normalizer**: Turns raw task fields into comparable values (effective
//!   step, canonical due date, overdue / due-today flags)
//! - **Ranking Engine**: Dashboard ordering (deadline, then urgency, then
//!   project step) and per-project step ordering
//! - **Next-Action Selector**: Project sequencing gate plus an energy filter,
//!   then the first task in dashboard order
//! - **Storage**: SQLite or remote task store, and TOML-based configuration
//!
//! The engine is pure: given the same task snapshot, mode and calendar day it
//! always returns the same result.
//!
//! ## Key Components
//!
//! - [`Task`]: Task record as stored
//! - [`build_bucket`]: Active and someday lists for display
//! - [`FocusSelector`]: Single next action for a focus session
//! - [`TaskStore`]: Persistence trait with SQLite and HTTP backends
//! - [`Config`]: Application configuration management

pub mod agenda;
pub mod error;
pub mod focus;
pub mod identity;
pub mod normalize;
pub mod ranking;
pub mod storage;
pub mod task;

pub use agenda::{agenda_for_day, sort_agenda, AgendaItem};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use focus::{select_next_action, EnergyMode, FocusReason, FocusReport, FocusSelector};
pub use identity::Identity;
pub use normalize::{normalize, DueStatus, NormalizedTask, UNORDERED_STEP};
pub use ranking::{
    build_bucket, group_by_project, project_names, project_progress, rank_dashboard,
    rank_project, someday_bucket, Bucket, ProjectProgress, ProjectSection, RankedTask,
};
pub use storage::{
    AgendaStore, BlockingRemoteStore, Config, RemoteTaskStore, SqliteTaskStore, StoreBackend,
    TaskStore,
};
pub use task::{EnergyLevel, Subtask, Task, TaskDraft, TaskPatch};
