//! Identity of the user whose tasks are loaded.
//!
//! Sign-in happens elsewhere; the core only needs a stable user id to scope
//! store calls, plus an email for greeting.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Identity {
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, email: Option<String>) -> Result<Self, ValidationError> {
        let identity = Identity {
            user_id: user_id.into().trim().to_string(),
            email: email.filter(|e| !e.trim().is_empty()),
        };
        identity.validate()?;
        Ok(identity)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.user_id.trim().is_empty() {
            return Err(ValidationError::MissingUserId);
        }
        Ok(())
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.user_id)
    }
}
