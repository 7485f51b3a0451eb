//! Blocking HTTP transport towards the battalion backend.
//!
//! Requests carry the signed-in user's bearer token. Failures are classified
//! so callers can tell an expired session from a backend message or a
//! connection problem.

use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use reqwest::blocking::{Client, Request};
use serde_json::Value;

use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Backend error codes meaning the bearer token is missing or no longer valid.
pub const SESSION_EXPIRED_CODES: [&str; 2] = ["Token not provided", "Token invalid"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Display for Method {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        })
    }
}

/// One backend call, independent of the transport executing it.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            body: None,
        }
    }
}

/// Executes backend calls. Successful responses yield the decoded JSON body,
/// `Value::Null` when the body is empty.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ApiRequest, token: Option<&str>) -> RepositoryResult<Value>;
}

/// Reqwest-backed transport rooted at the configured API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Arc<str>,
}

impl ApiClient {
    /// Builds the client. Must be called outside of an async runtime.
    pub fn new(base_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        let http = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Prepares the outgoing request with JSON body and bearer credential.
    pub fn build(&self, request: &ApiRequest, token: Option<&str>) -> RepositoryResult<Request> {
        let url = self.url(&request.path);
        let mut builder = match request.method {
            Method::Get => self.http.get(url),
            Method::Post => self.http.post(url),
            Method::Put => self.http.put(url),
            Method::Delete => self.http.delete(url),
        };
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        Ok(builder.build()?)
    }
}

impl Transport for ApiClient {
    fn send(&self, request: &ApiRequest, token: Option<&str>) -> RepositoryResult<Value> {
        let outgoing = self.build(request, token)?;
        let response = self.http.execute(outgoing)?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let err = classify_failure(status.as_u16(), &body);
            log::debug!("{} {} failed: {err}", request.method, request.path);
            return Err(err);
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&body)?)
    }
}

/// Maps a failed backend response to a repository error.
///
/// Token errors win over the status code: the backend reports them with
/// different statuses depending on the route.
pub fn classify_failure(status: u16, body: &str) -> RepositoryError {
    let message = backend_message(body);

    if message
        .as_deref()
        .is_some_and(|message| SESSION_EXPIRED_CODES.contains(&message))
    {
        return RepositoryError::SessionExpired;
    }

    if status == 404 {
        return RepositoryError::NotFound;
    }

    RepositoryError::Backend(message.unwrap_or_else(|| format!("HTTP {status}")))
}

/// Extracts `error` (or `message`) from a backend error payload.
fn backend_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
