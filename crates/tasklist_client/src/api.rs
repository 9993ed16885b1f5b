//! Task API access.
//!
//! # Responsibility
//! - Define the request surface the controller depends on (`TaskApi`).
//! - Implement it over HTTP/JSON with `reqwest`.
//!
//! # Invariants
//! - Any non-success status is an error; callers never see a partial body.
//! - 404 is reported as `ApiError::NotFound`, distinct from other statuses.

use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tasklist_core::{Task, TaskId};

#[derive(Debug)]
pub enum ApiError {
    /// Connection, timeout or body decoding failure.
    Transport(reqwest::Error),
    /// The server has no task with the requested id.
    NotFound(String),
    /// Any other non-success status.
    Status {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "request failed: {err}"),
            Self::NotFound(message) => write!(f, "not found: {message}"),
            Self::Status {
                status,
                code: Some(code),
                message,
            } => write!(f, "server returned {status} {code}: {message}"),
            Self::Status {
                status,
                code: None,
                message,
            } => write!(f, "server returned {status}: {message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// One request per call; implementations must not retry.
#[allow(async_fn_in_trait)]
pub trait TaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;
    async fn create_task(&self, text: &str) -> Result<Task, ApiError>;
    async fn delete_task(&self, id: TaskId) -> Result<(), ApiError>;
    async fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task, ApiError>;
    async fn update_text(&self, id: TaskId, text: &str) -> Result<Task, ApiError>;
}

#[derive(Serialize)]
struct TextBody<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct CompletionBody {
    completed: bool,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}

/// `TaskApi` over the HTTP service.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskApi {
    /// `base_url` is the service root, e.g. `http://localhost:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }
}

impl TaskApi for HttpTaskApi {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let response = self.client.get(self.tasks_url()).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn create_task(&self, text: &str) -> Result<Task, ApiError> {
        let response = self
            .client
            .post(self.tasks_url())
            .json(&TextBody { text })
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), ApiError> {
        let response = self.client.delete(self.task_url(id)).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn set_completed(&self, id: TaskId, completed: bool) -> Result<Task, ApiError> {
        let response = self
            .client
            .patch(self.task_url(id))
            .json(&CompletionBody { completed })
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn update_text(&self, id: TaskId, text: &str) -> Result<Task, ApiError> {
        let response = self
            .client
            .put(self.task_url(id))
            .json(&TextBody { text })
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let raw = response.text().await.unwrap_or_default();
    let (code, message) = match serde_json::from_str::<ErrorBody>(&raw) {
        Ok(body) => (Some(body.code), body.message),
        Err(_) => (None, raw),
    };

    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(message));
    }
    Err(ApiError::Status {
        status: status.as_u16(),
        code,
        message,
    })
}
