//! In-memory backend recording every call, for exercising services end to end.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::repository::ApiRepository;
use crate::repository::api_client::{ApiRequest, Method, Transport, classify_failure};
use crate::repository::errors::RepositoryResult;

#[derive(Clone, Debug)]
enum Reply {
    Json(Value),
    Failure(u16, Value),
}

/// A request as seen by the fake backend.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub token: Option<String>,
}

/// Answers canned replies per `(method, path)`; unknown reads return an empty
/// list and unknown writes an empty body.
#[derive(Default)]
pub struct FakeBackend {
    replies: Mutex<HashMap<(Method, String), Reply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, method: Method, path: &str, body: Value) -> &Self {
        self.insert(method, path, Reply::Json(body))
    }

    pub fn fail(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        self.insert(method, path, Reply::Failure(status, body))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    /// Repository over this backend carrying a fixed test token.
    pub fn repository(backend: &Arc<Self>) -> ApiRepository<Self> {
        ApiRepository::new(Arc::clone(backend)).with_token("test-token")
    }

    fn insert(&self, method: Method, path: &str, reply: Reply) -> &Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.insert((method, path.to_string()), reply);
        }
        self
    }
}

impl Transport for FakeBackend {
    fn send(&self, request: &ApiRequest, token: Option<&str>) -> RepositoryResult<Value> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                method: request.method,
                path: request.path.clone(),
                body: request.body.clone(),
                token: token.map(str::to_string),
            });
        }

        let reply = self
            .replies
            .lock()
            .ok()
            .and_then(|replies| replies.get(&(request.method, request.path.clone())).cloned());

        match reply {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Failure(status, body)) => Err(classify_failure(status, &body.to_string())),
            None if request.method == Method::Get => Ok(json!([])),
            None => Ok(Value::Null),
        }
    }
}
