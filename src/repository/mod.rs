//! Access to the battalion REST backend.
//!
//! Services depend on the reader/writer traits below; [`ApiRepository`]
//! implements them on top of a [`Transport`].

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::auth::{Credentials, SignedIn};
use crate::domain::book_day::{BookDay, NewBookDay, UpdateBookDay};
use crate::domain::entry::{ChildEntry, EntryKind, NewEntry};
use crate::domain::productivity::{NewProductivity, Productivity, UpdateProductivity};
use crate::domain::types::RecordId;
use crate::repository::api_client::{ApiClient, ApiRequest, Transport};
use crate::repository::errors::{RepositoryError, RepositoryResult};

pub mod api_client;
pub mod auth;
pub mod book_day;
pub mod entry;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod productivity;
pub mod records;
#[cfg(any(test, feature = "test-mocks"))]
pub mod test;

/// Page size used by paginated backend listings.
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page: page.max(1),
            per_page,
        }
    }

    /// Total number of pages for `total` records.
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page.max(1))
    }
}

/// Record stored under a backend collection with uniform CRUD endpoints.
pub trait RestResource: DeserializeOwned {
    /// Body sent on create and update.
    type Payload: Serialize;

    /// Collection listing endpoint.
    const LIST_PATH: &'static str;
    /// Item endpoint prefix; `{ITEM_PATH}/{id}` addresses one record.
    const ITEM_PATH: &'static str;
}

pub trait AuthGateway {
    fn sign_in(&self, credentials: &Credentials) -> RepositoryResult<SignedIn>;
}

pub trait BookDayReader {
    fn list_book_days(&self) -> RepositoryResult<Vec<BookDay>>;
    fn get_book_day(&self, id: &RecordId) -> RepositoryResult<Option<BookDay>>;
}

pub trait BookDayWriter {
    /// Persists a new log, returning its identifier when the backend echoes it.
    fn create_book_day(&self, new_book_day: &NewBookDay) -> RepositoryResult<Option<RecordId>>;
    fn update_book_day(&self, id: &RecordId, updates: &UpdateBookDay) -> RepositoryResult<()>;
    fn delete_book_day(&self, id: &RecordId) -> RepositoryResult<()>;
}

pub trait ProductivityReader {
    fn list_productivity(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<Productivity>)>;
    fn get_productivity(&self, id: &RecordId) -> RepositoryResult<Option<Productivity>>;
}

pub trait ProductivityWriter {
    fn create_productivity(
        &self,
        new_report: &NewProductivity,
    ) -> RepositoryResult<Option<RecordId>>;
    fn update_productivity(
        &self,
        id: &RecordId,
        updates: &UpdateProductivity,
    ) -> RepositoryResult<()>;
    fn delete_productivity(&self, id: &RecordId) -> RepositoryResult<()>;
}

pub trait EntryReader {
    fn list_entries(&self, kind: EntryKind, parent_id: &RecordId)
    -> RepositoryResult<Vec<ChildEntry>>;
}

pub trait EntryWriter {
    fn create_entry(&self, kind: EntryKind, entry: &NewEntry) -> RepositoryResult<()>;
    fn update_entry(&self, kind: EntryKind, id: &RecordId, entry: &NewEntry)
    -> RepositoryResult<()>;
}

pub trait RecordReader {
    fn list_records<T: RestResource>(&self) -> RepositoryResult<Vec<T>>;
    fn list_records_page<T: RestResource>(
        &self,
        pagination: Pagination,
    ) -> RepositoryResult<(usize, Vec<T>)>;
    fn get_record<T: RestResource>(&self, id: &RecordId) -> RepositoryResult<Option<T>>;
}

pub trait RecordWriter {
    fn create_record<T: RestResource>(&self, payload: &T::Payload) -> RepositoryResult<()>;
    fn update_record<T: RestResource>(
        &self,
        id: &RecordId,
        payload: &T::Payload,
    ) -> RepositoryResult<()>;
    fn delete_record<T: RestResource>(&self, id: &RecordId) -> RepositoryResult<()>;
}

/// Repository backed by the REST API, scoped to one user's token.
pub struct ApiRepository<T = ApiClient> {
    transport: Arc<T>,
    token: Option<String>,
}

impl<T> Clone for ApiRepository<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            token: self.token.clone(),
        }
    }
}

impl<T: Transport> ApiRepository<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    /// Returns a copy sending the given bearer token with every request.
    #[must_use]
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            token: Some(token.into()),
        }
    }

    fn call(&self, request: ApiRequest) -> RepositoryResult<Value> {
        self.transport.send(&request, self.token.as_deref())
    }

    fn fetch<R: DeserializeOwned>(&self, path: String) -> RepositoryResult<R> {
        let value = self.call(ApiRequest::get(path))?;
        Ok(serde_json::from_value(value)?)
    }

    /// Fetches one record, mapping a missing record to `None`.
    fn fetch_optional<R: DeserializeOwned>(&self, path: String) -> RepositoryResult<Option<R>> {
        match self.call(ApiRequest::get(path)) {
            Ok(Value::Null) | Err(RepositoryError::NotFound) => Ok(None),
            Ok(value) => Ok(Some(serde_json::from_value(value)?)),
            Err(err) => Err(err),
        }
    }

    fn fetch_list<R: DeserializeOwned>(&self, path: String) -> RepositoryResult<(usize, Vec<R>)> {
        let value = self.call(ApiRequest::get(path))?;
        decode_listing(value)
    }

    fn create<B: Serialize>(&self, path: String, body: &B) -> RepositoryResult<Value> {
        self.call(ApiRequest::post(path, serde_json::to_value(body)?))
    }

    fn update<B: Serialize>(&self, path: String, body: &B) -> RepositoryResult<()> {
        self.call(ApiRequest::put(path, serde_json::to_value(body)?))
            .map(|_| ())
    }

    fn remove(&self, path: String) -> RepositoryResult<()> {
        self.call(ApiRequest::delete(path)).map(|_| ())
    }
}

/// Listing endpoints answer either with a bare array or with `{result, count}`.
fn decode_listing<R: DeserializeOwned>(value: Value) -> RepositoryResult<(usize, Vec<R>)> {
    match value {
        Value::Null => Ok((0, Vec::new())),
        Value::Array(_) => {
            let items: Vec<R> = serde_json::from_value(value)?;
            Ok((items.len(), items))
        }
        Value::Object(mut map) => {
            let items: Vec<R> = match map.remove("result") {
                Some(result) => serde_json::from_value(result)?,
                None => Vec::new(),
            };
            let count = map
                .get("count")
                .and_then(Value::as_u64)
                .map_or(items.len(), |count| count as usize);
            Ok((count, items))
        }
        other => Err(RepositoryError::Unexpected(format!(
            "Unexpected listing payload: {other}"
        ))),
    }
}

/// Reads the identifier echoed back by a create call, if any.
fn created_id(value: &Value) -> Option<RecordId> {
    value
        .get("_id")
        .and_then(Value::as_str)
        .and_then(|id| RecordId::new(id).ok())
}
