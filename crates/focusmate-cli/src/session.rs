//! Store and identity shared by the task-facing commands.

use focusmate_core::{
    BlockingRemoteStore, Config, Identity, SqliteTaskStore, StoreBackend, TaskStore,
};

pub struct Session {
    pub config: Config,
    pub user: Identity,
    pub store: Box<dyn TaskStore>,
}

impl Session {
    /// Load config, resolve the identity and open the configured task store.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let user = config.identity()?;
        let store: Box<dyn TaskStore> = match config.store.backend {
            StoreBackend::Local => Box::new(SqliteTaskStore::open()?),
            StoreBackend::Remote => Box::new(BlockingRemoteStore::new(&config.store.remote_url)?),
        };
        tracing::debug!(backend = ?config.store.backend, user = %user.user_id, "session opened");
        Ok(Self {
            config,
            user,
            store,
        })
    }

    /// Agenda items are always kept in the local database.
    pub fn open_agenda() -> Result<(Identity, SqliteTaskStore), Box<dyn std::error::Error>> {
        let config = Config::load()?;
        Ok((config.identity()?, SqliteTaskStore::open()?))
    }
}
