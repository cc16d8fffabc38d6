//! HTTP boundary to the remote task service.
//!
//! `TaskGateway` performs the actual network calls and reports
//! success/failure; it never touches UI state. `Dispatcher` wraps it for
//! fire-and-forget use from the TUI thread: requests run on the tokio
//! runtime and outcomes come back as [`TaskEvent`]s on a channel the event
//! loop polls. The gateway performs no deduplication and no retry of its
//! own; a double submit creates two remote tasks.

use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::dto::{AddTaskCommentForm, AddTaskForm, Task, TaskComment, TaskListsResponse};

/// Transport failures at the service boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Where a created task lands: group plus task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub group_id: String,
    pub task_list_id: u64,
}

/// Client for the remote task service.
pub struct TaskGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl TaskGateway {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        TaskGateway {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn tasks_url(&self, destination: &Destination) -> String {
        format!(
            "{}/groups/{}/task-lists/{}/tasks",
            self.base_url, destination.group_id, destination.task_list_id
        )
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Send a request, check the status, then parse the body.
    ///
    /// The body is read as text first so a non-2xx response surfaces the
    /// service's message and a 2xx with an unexpected shape is a decode
    /// error, not a generic network one.
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> GatewayResult<T> {
        let resp = self.with_auth(builder).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(GatewayError::Status { status, body: text });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Create a task in the destination list.
    pub async fn create_task(
        &self,
        destination: &Destination,
        form: &AddTaskForm,
    ) -> GatewayResult<Task> {
        let builder = self.client.post(self.tasks_url(destination)).json(form);
        self.send_json(builder).await
    }

    /// Add a comment to a task.
    pub async fn add_comment(
        &self,
        task_id: u64,
        form: &AddTaskCommentForm,
    ) -> GatewayResult<TaskComment> {
        let url = format!("{}/tasks/{}/comments", self.base_url, task_id);
        self.send_json(self.client.post(url).json(form)).await
    }

    /// List the task lists of a group.
    pub async fn list_task_lists(&self, group_id: &str) -> GatewayResult<TaskListsResponse> {
        let url = format!("{}/groups/{}/task-lists", self.base_url, group_id);
        self.send_json(self.client.get(url)).await
    }

    /// List a task list's tasks for one date.
    pub async fn list_tasks(
        &self,
        destination: &Destination,
        date: NaiveDate,
    ) -> GatewayResult<Vec<Task>> {
        let builder = self
            .client
            .get(self.tasks_url(destination))
            .query(&[("date", date.format("%Y-%m-%d").to_string())]);
        self.send_json(builder).await
    }
}

/// Outcome signals flowing from gateway calls back into the UI event loop.
#[derive(Debug)]
pub enum TaskEvent {
    /// A submission landed; carries the server's representation.
    Created(Task),
    /// A submission failed; the payload is retained so the UI can offer a
    /// retry instead of silently losing the task.
    CreateFailed {
        destination: Destination,
        form: AddTaskForm,
        error: String,
    },
    TasksLoaded {
        destination: Destination,
        date: NaiveDate,
        tasks: Vec<Task>,
    },
    LoadFailed {
        date: NaiveDate,
        error: String,
    },
    CommentAdded(TaskComment),
    CommentFailed {
        task_id: u64,
        error: String,
    },
}

/// Fire-and-forget front of the gateway for the UI thread.
pub struct Dispatcher {
    gateway: Arc<TaskGateway>,
    handle: Handle,
    events: UnboundedSender<TaskEvent>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<TaskGateway>, handle: Handle, events: UnboundedSender<TaskEvent>) -> Self {
        Dispatcher { gateway, handle, events }
    }

    /// Dispatch a task creation. Returns immediately; the outcome arrives
    /// later as `Created` or `CreateFailed`.
    pub fn submit_task(&self, destination: Destination, form: AddTaskForm) {
        let gateway = Arc::clone(&self.gateway);
        let events = self.events.clone();
        self.handle.spawn(async move {
            match gateway.create_task(&destination, &form).await {
                Ok(task) => {
                    tracing::info!(id = task.id, name = %task.name, "task created");
                    let _ = events.send(TaskEvent::Created(task));
                }
                Err(error) => {
                    tracing::error!(name = %form.name, error = %error, "task submission failed");
                    let _ = events.send(TaskEvent::CreateFailed {
                        destination,
                        form,
                        error: error.to_string(),
                    });
                }
            }
        });
    }

    /// Fetch a board's tasks in the background.
    pub fn fetch_tasks(&self, destination: Destination, date: NaiveDate) {
        let gateway = Arc::clone(&self.gateway);
        let events = self.events.clone();
        self.handle.spawn(async move {
            match gateway.list_tasks(&destination, date).await {
                Ok(tasks) => {
                    let _ = events.send(TaskEvent::TasksLoaded { destination, date, tasks });
                }
                Err(error) => {
                    tracing::error!(%date, error = %error, "task fetch failed");
                    let _ = events.send(TaskEvent::LoadFailed { date, error: error.to_string() });
                }
            }
        });
    }

    /// Dispatch a comment creation.
    pub fn submit_comment(&self, task_id: u64, form: AddTaskCommentForm) {
        let gateway = Arc::clone(&self.gateway);
        let events = self.events.clone();
        self.handle.spawn(async move {
            match gateway.add_comment(task_id, &form).await {
                Ok(comment) => {
                    tracing::info!(task_id, "comment added");
                    let _ = events.send(TaskEvent::CommentAdded(comment));
                }
                Err(error) => {
                    tracing::error!(task_id, error = %error, "comment submission failed");
                    let _ = events.send(TaskEvent::CommentFailed { task_id, error: error.to_string() });
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let gateway = TaskGateway::new("https://api.example.com/", None);
        let destination = Destination { group_id: "3".to_string(), task_list_id: 7 };
        assert_eq!(
            gateway.tasks_url(&destination),
            "https://api.example.com/groups/3/task-lists/7/tasks"
        );
    }

    #[test]
    fn status_error_reports_code_and_body() {
        let err = GatewayError::Status {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: "{\"message\":\"invalid monthDay\"}".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("422"));
        assert!(text.contains("invalid monthDay"));
    }
}
