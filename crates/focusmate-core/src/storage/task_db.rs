//! SQLite-backed task and agenda store.
//!
//! Tasks are kept per user and listed in insertion order. Subtasks live in a
//! JSON column since they are only ever read and written with their task.

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use super::{data_dir, migrations, AgendaStore, TaskStore};
use crate::agenda::AgendaItem;
use crate::error::StoreError;
use crate::identity::Identity;
use crate::task::{EnergyLevel, Subtask, Task};

const TASK_COLUMNS: &str =
    "id, content, project, step, energy, is_urgent, due_date, is_someday, is_completed, subtasks";

/// Build a Task from a database row selected with [`TASK_COLUMNS`].
fn row_to_task(row: &rusqlite::Row) -> Result<Task, rusqlite::Error> {
    let id: String = row.get(0)?;
    let energy: String = row.get(4)?;
    let subtasks_json: String = row.get(9)?;
    let subtasks: Vec<Subtask> = serde_json::from_str(&subtasks_json).unwrap_or_else(|e| {
        tracing::warn!(task_id = %id, error = %e, "dropping unreadable subtasks");
        Vec::new()
    });

    Ok(Task {
        id,
        content: row.get(1)?,
        project: row.get(2)?,
        step: row.get(3)?,
        energy: EnergyLevel::parse_lenient(&energy),
        is_urgent: row.get(5)?,
        due_date: row.get(6)?,
        is_someday: row.get(7)?,
        is_completed: row.get(8)?,
        subtasks,
    })
}

fn row_to_agenda_item(row: &rusqlite::Row) -> Result<AgendaItem, rusqlite::Error> {
    Ok(AgendaItem {
        id: row.get(0)?,
        content: row.get(1)?,
        time_slot: row.get(2)?,
        date: row.get(3)?,
        is_completed: row.get(4)?,
    })
}

fn subtasks_json(task: &Task) -> Result<String, StoreError> {
    serde_json::to_string(&task.subtasks).map_err(|e| StoreError::Corrupt(e.to_string()))
}

/// SQLite database for tasks and agenda items.
pub struct SqliteTaskStore {
    conn: Connection,
}

impl SqliteTaskStore {
    /// Open the task database at `~/.config/focusmate/focusmate.db`.
    ///
    /// Creates tables if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory is unavailable or the database
    /// cannot be opened or migrated.
    pub fn open() -> crate::error::Result<Self> {
        let path = data_dir()?.join("focusmate.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        migrations::migrate(&self.conn)?;
        Ok(())
    }
}

impl TaskStore for SqliteTaskStore {
    fn list_tasks(&self, user: &Identity) -> Result<Vec<Task>, StoreError> {
        user.validate()?;
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = ?1 ORDER BY seq"
        ))?;
        let tasks = stmt
            .query_map(params![user.user_id], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    fn get_task(&self, user: &Identity, id: &str) -> Result<Task, StoreError> {
        user.validate()?;
        self.conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1 AND user_id = ?2"),
                params![id, user.user_id],
                row_to_task,
            )
            .optional()?
            .ok_or_else(|| StoreError::task_not_found(id))
    }

    fn create_task(&self, user: &Identity, task: &Task) -> Result<Task, StoreError> {
        user.validate()?;
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                id, user_id, content, project, step, energy, is_urgent,
                due_date, is_someday, is_completed, subtasks
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                task.id,
                user.user_id,
                task.content,
                task.project,
                task.step,
                task.energy.as_str(),
                task.is_urgent,
                task.due_date,
                task.is_someday,
                task.is_completed,
                subtasks_json(task)?,
            ],
        )?;

        tracing::info!(task_id = %task.id, "task created");
        Ok(task.clone())
    }

    fn update_task(&self, user: &Identity, task: &Task) -> Result<Task, StoreError> {
        user.validate()?;
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET content = ?1, project = ?2, step = ?3, energy = ?4, is_urgent = ?5,
                 due_date = ?6, is_someday = ?7, is_completed = ?8, subtasks = ?9
             WHERE id = ?10 AND user_id = ?11",
            params![
                task.content,
                task.project,
                task.step,
                task.energy.as_str(),
                task.is_urgent,
                task.due_date,
                task.is_someday,
                task.is_completed,
                subtasks_json(task)?,
                task.id,
                user.user_id,
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::task_not_found(&task.id));
        }
        tracing::info!(task_id = %task.id, "task updated");
        Ok(task.clone())
    }

    fn delete_task(&self, user: &Identity, id: &str) -> Result<(), StoreError> {
        user.validate()?;
        let changed = self.conn.execute(
            "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
            params![id, user.user_id],
        )?;
        if changed == 0 {
            return Err(StoreError::task_not_found(id));
        }
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }
}

impl AgendaStore for SqliteTaskStore {
    fn list_agenda(&self, user: &Identity) -> Result<Vec<AgendaItem>, StoreError> {
        user.validate()?;
        let mut stmt = self.conn.prepare(
            "SELECT id, content, time_slot, date, is_completed
             FROM agenda WHERE user_id = ?1 ORDER BY date, time_slot, seq",
        )?;
        let items = stmt
            .query_map(params![user.user_id], row_to_agenda_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn create_agenda_item(&self, user: &Identity, item: &AgendaItem) -> Result<(), StoreError> {
        user.validate()?;
        self.conn.execute(
            "INSERT INTO agenda (id, user_id, content, time_slot, date, is_completed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                item.id,
                user.user_id,
                item.content,
                item.time_slot,
                item.date,
                item.is_completed,
            ],
        )?;
        tracing::info!(item_id = %item.id, date = %item.date, "agenda item created");
        Ok(())
    }

    fn set_agenda_completed(
        &self,
        user: &Identity,
        id: &str,
        completed: bool,
    ) -> Result<(), StoreError> {
        user.validate()?;
        let changed = self.conn.execute(
            "UPDATE agenda SET is_completed = ?1 WHERE id = ?2 AND user_id = ?3",
            params![completed, id, user.user_id],
        )?;
        if changed == 0 {
            return Err(StoreError::agenda_not_found(id));
        }
        Ok(())
    }

    fn delete_agenda_item(&self, user: &Identity, id: &str) -> Result<(), StoreError> {
        user.validate()?;
        let changed = self.conn.execute(
            "DELETE FROM agenda WHERE id = ?1 AND user_id = ?2",
            params![id, user.user_id],
        )?;
        if changed == 0 {
            return Err(StoreError::agenda_not_found(id));
        }
        tracing::info!(item_id = %id, "agenda item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Identity {
        Identity::new("alice", None).unwrap()
    }

    fn bob() -> Identity {
        Identity::new("bob", None).unwrap()
    }

    #[test]
    fn create_and_list_preserves_insertion_order() {
        let db = SqliteTaskStore::open_memory().unwrap();
        for content in ["first", "second", "third"] {
            db.create_task(&alice(), &Task::new(content)).unwrap();
        }
        let listed: Vec<String> = db
            .list_tasks(&alice())
            .unwrap()
            .into_iter()
            .map(|t| t.content)
            .collect();
        assert_eq!(listed, ["first", "second", "third"]);
    }

    #[test]
    fn roundtrips_every_field() {
        let db = SqliteTaskStore::open_memory().unwrap();
        let mut task = Task::new("write report")
            .with_project("Thesis", Some(2))
            .with_energy(EnergyLevel::High)
            .with_due_date("2024-06-01")
            .urgent();
        task.add_subtask("outline");

        db.create_task(&alice(), &task).unwrap();
        let loaded = db.get_task(&alice(), &task.id).unwrap();
        assert_eq!(loaded, task);
    }

    #[test]
    fn tasks_are_scoped_by_user() {
        let db = SqliteTaskStore::open_memory().unwrap();
        let task = Task::new("private");
        db.create_task(&alice(), &task).unwrap();

        assert!(db.list_tasks(&bob()).unwrap().is_empty());
        assert!(db.get_task(&bob(), &task.id).unwrap_err().is_not_found());
        assert!(db.delete_task(&bob(), &task.id).unwrap_err().is_not_found());
        assert!(db.update_task(&bob(), &task).unwrap_err().is_not_found());
        assert_eq!(db.list_tasks(&alice()).unwrap().len(), 1);
    }

    #[test]
    fn update_replaces_fields() {
        let db = SqliteTaskStore::open_memory().unwrap();
        let mut task = Task::new("draft");
        db.create_task(&alice(), &task).unwrap();

        task.complete();
        task.content = "final".into();
        db.update_task(&alice(), &task).unwrap();

        let loaded = db.get_task(&alice(), &task.id).unwrap();
        assert!(loaded.is_completed);
        assert_eq!(loaded.content, "final");
    }

    #[test]
    fn delete_missing_task_is_not_found() {
        let db = SqliteTaskStore::open_memory().unwrap();
        let task = Task::new("gone");
        db.create_task(&alice(), &task).unwrap();
        db.delete_task(&alice(), &task.id).unwrap();
        assert!(db.delete_task(&alice(), &task.id).unwrap_err().is_not_found());
    }

    #[test]
    fn rejects_blank_content_and_user() {
        let db = SqliteTaskStore::open_memory().unwrap();
        let blank = Task::new("   ");
        assert!(matches!(
            db.create_task(&alice(), &blank),
            Err(StoreError::Invalid(_))
        ));

        let nobody = Identity::default();
        assert!(matches!(
            db.list_tasks(&nobody),
            Err(StoreError::Invalid(_))
        ));
    }

    #[test]
    fn unknown_energy_loads_as_medium() {
        let db = SqliteTaskStore::open_memory().unwrap();
        let task = Task::new("legacy");
        db.create_task(&alice(), &task).unwrap();
        db.conn
            .execute("UPDATE tasks SET energy = 'extreme'", [])
            .unwrap();
        let loaded = db.get_task(&alice(), &task.id).unwrap();
        assert_eq!(loaded.energy, EnergyLevel::Medium);
    }

    #[test]
    fn agenda_lists_by_date_and_slot() {
        let db = SqliteTaskStore::open_memory().unwrap();
        let late = AgendaItem::new("review", "2024-05-01", "15:00").unwrap();
        let early = AgendaItem::new("standup", "2024-05-01", "09:30").unwrap();
        db.create_agenda_item(&alice(), &late).unwrap();
        db.create_agenda_item(&alice(), &early).unwrap();

        db.set_agenda_completed(&alice(), &early.id, true).unwrap();
        let items = db.list_agenda(&alice()).unwrap();
        assert_eq!(items[0].content, "standup");
        assert!(items[0].is_completed);
        assert_eq!(items[1].content, "review");

        db.delete_agenda_item(&alice(), &late.id).unwrap();
        assert_eq!(db.list_agenda(&alice()).unwrap().len(), 1);
        assert!(db
            .set_agenda_completed(&bob(), &early.id, false)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn reopens_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focusmate.db");
        let task = Task::new("persisted");
        {
            let db = SqliteTaskStore::open_at(&path).unwrap();
            db.create_task(&alice(), &task).unwrap();
        }
        let db = SqliteTaskStore::open_at(&path).unwrap();
        assert_eq!(db.get_task(&alice(), &task.id).unwrap().content, "persisted");
    }
}
