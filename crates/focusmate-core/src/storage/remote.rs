//! Client for the hosted task API.
//!
//! Speaks the existing backend contract:
//!
//! | call                  | request                 |
//! |-----------------------|-------------------------|
//! | list                  | `GET /tasks`            |
//! | create                | `POST /tasks`           |
//! | update                | `PUT /tasks/{id}`       |
//! | delete                | `DELETE /tasks/{id}`    |
//!
//! Every request carries the user id in the `x-user-id` header. The server
//! assigns ids on create and answers unknown ids with 404 and a JSON body
//! `{"detail": "..."}`. Subtasks are not part of the contract: a task that
//! carries any is rejected with [`StoreError::Unsupported`] before a request
//! is made.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::TaskStore;
use crate::error::StoreError;
use crate::identity::Identity;
use crate::task::Task;

const USER_HEADER: &str = "x-user-id";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Request body accepted by `POST /tasks` and `PUT /tasks/{id}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskPayload<'a> {
    content: &'a str,
    project: &'a str,
    energy: &'static str,
    is_urgent: bool,
    is_someday: bool,
    is_completed: bool,
    due_date: &'a str,
    step: Option<i64>,
}

impl<'a> From<&'a Task> for TaskPayload<'a> {
    fn from(task: &'a Task) -> Self {
        Self {
            content: &task.content,
            project: task.project.as_deref().unwrap_or(""),
            energy: task.energy.as_str(),
            is_urgent: task.is_urgent,
            is_someday: task.is_someday,
            is_completed: task.is_completed,
            due_date: task.due_date.as_deref().unwrap_or(""),
            step: task.step,
        }
    }
}

fn ensure_no_subtasks(task: &Task) -> Result<(), StoreError> {
    if task.subtasks.is_empty() {
        Ok(())
    } else {
        Err(StoreError::Unsupported("subtasks"))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Async client for the task API.
#[derive(Debug, Clone)]
pub struct RemoteTaskStore {
    client: Client,
    base_url: Url,
}

impl RemoteTaskStore {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Map a non-2xx response to a store error. 404 becomes `not_found`.
    async fn check(
        response: reqwest::Response,
        not_found: impl FnOnce() -> StoreError,
    ) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(not_found());
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.detail)
            .unwrap_or(text);
        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    pub async fn list_tasks(&self, user: &Identity) -> Result<Vec<Task>, StoreError> {
        user.validate()?;
        let response = self
            .client
            .get(self.endpoint(&["tasks"]))
            .header(USER_HEADER, &user.user_id)
            .send()
            .await?;
        let response = Self::check(response, || StoreError::Remote {
            status: 404,
            message: "task endpoint not found".to_string(),
        })
        .await?;
        let tasks: Vec<Task> = response.json().await?;
        tracing::debug!(count = tasks.len(), "fetched remote tasks");
        Ok(tasks)
    }

    pub async fn create_task(&self, user: &Identity, task: &Task) -> Result<Task, StoreError> {
        user.validate()?;
        task.validate()?;
        ensure_no_subtasks(task)?;
        let response = self
            .client
            .post(self.endpoint(&["tasks"]))
            .header(USER_HEADER, &user.user_id)
            .json(&TaskPayload::from(task))
            .send()
            .await?;
        let response = Self::check(response, || StoreError::Remote {
            status: 404,
            message: "task endpoint not found".to_string(),
        })
        .await?;
        let created: Task = response.json().await?;
        tracing::info!(task_id = %created.id, "task created");
        Ok(created)
    }

    pub async fn update_task(&self, user: &Identity, task: &Task) -> Result<Task, StoreError> {
        user.validate()?;
        task.validate()?;
        ensure_no_subtasks(task)?;
        let response = self
            .client
            .put(self.endpoint(&["tasks", &task.id]))
            .header(USER_HEADER, &user.user_id)
            .json(&TaskPayload::from(task))
            .send()
            .await?;
        let response = Self::check(response, || StoreError::task_not_found(&task.id)).await?;
        let updated: Task = response.json().await?;
        tracing::info!(task_id = %updated.id, "task updated");
        Ok(updated)
    }

    pub async fn delete_task(&self, user: &Identity, id: &str) -> Result<(), StoreError> {
        user.validate()?;
        let response = self
            .client
            .delete(self.endpoint(&["tasks", id]))
            .header(USER_HEADER, &user.user_id)
            .send()
            .await?;
        Self::check(response, || StoreError::task_not_found(id)).await?;
        tracing::info!(task_id = %id, "task deleted");
        Ok(())
    }
}

/// [`RemoteTaskStore`] behind the synchronous [`TaskStore`] trait.
///
/// Owns a current-thread runtime, so it must not be used from inside another
/// tokio runtime.
pub struct BlockingRemoteStore {
    inner: RemoteTaskStore,
    runtime: tokio::runtime::Runtime,
}

impl BlockingRemoteStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(StoreError::Runtime)?;
        Ok(Self {
            inner: RemoteTaskStore::new(base_url)?,
            runtime,
        })
    }
}

impl TaskStore for BlockingRemoteStore {
    fn list_tasks(&self, user: &Identity) -> Result<Vec<Task>, StoreError> {
        self.runtime.block_on(self.inner.list_tasks(user))
    }

    fn create_task(&self, user: &Identity, task: &Task) -> Result<Task, StoreError> {
        self.runtime.block_on(self.inner.create_task(user, task))
    }

    fn update_task(&self, user: &Identity, task: &Task) -> Result<Task, StoreError> {
        self.runtime.block_on(self.inner.update_task(user, task))
    }

    fn delete_task(&self, user: &Identity, id: &str) -> Result<(), StoreError> {
        self.runtime.block_on(self.inner.delete_task(user, id))
    }
}
