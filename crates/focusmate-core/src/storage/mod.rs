mod config;
pub mod migrations;
pub mod remote;
pub mod task_db;

pub use config::{Config, FocusConfig, IdentityConfig, LogConfig, StoreBackend, StoreConfig};
pub use remote::{BlockingRemoteStore, RemoteTaskStore};
pub use task_db::SqliteTaskStore;

use std::path::PathBuf;

use crate::agenda::AgendaItem;
use crate::error::{ConfigError, StoreError};
use crate::identity::Identity;
use crate::task::Task;

/// Persistence for one user's tasks.
///
/// Every call is scoped by the caller's identity: a user never sees, edits or
/// deletes another user's records. Listing preserves insertion order, which
/// is the tie-break order the ranking engine relies on.
pub trait TaskStore {
    fn list_tasks(&self, user: &Identity) -> Result<Vec<Task>, StoreError>;

    fn get_task(&self, user: &Identity, id: &str) -> Result<Task, StoreError> {
        self.list_tasks(user)?
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::task_not_found(id))
    }

    /// Persist a new task and return it as stored. The store may assign a
    /// new id.
    fn create_task(&self, user: &Identity, task: &Task) -> Result<Task, StoreError>;

    /// Replace the task with the same id.
    fn update_task(&self, user: &Identity, task: &Task) -> Result<Task, StoreError>;

    fn delete_task(&self, user: &Identity, id: &str) -> Result<(), StoreError>;
}

/// Persistence for agenda items.
pub trait AgendaStore {
    fn list_agenda(&self, user: &Identity) -> Result<Vec<AgendaItem>, StoreError>;
    fn create_agenda_item(&self, user: &Identity, item: &AgendaItem) -> Result<(), StoreError>;
    fn set_agenda_completed(
        &self,
        user: &Identity,
        id: &str,
        completed: bool,
    ) -> Result<(), StoreError>;
    fn delete_agenda_item(&self, user: &Identity, id: &str) -> Result<(), StoreError>;
}

/// Returns the focusmate data directory, creating it if needed.
///
/// `FOCUSMATE_DATA_DIR` overrides the location. Otherwise this is
/// `~/.config/focusmate/`, or `~/.config/focusmate-dev/` when
/// `FOCUSMATE_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("FOCUSMATE_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("FOCUSMATE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusmate-dev")
            } else {
                base_dir.join("focusmate")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
