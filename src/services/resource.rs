//! Generic CRUD client
//!
//! Categories, expenses and budgets share one request shape: create by POST to
//! the collection, list by GET, update by PUT and delete by DELETE on
//! `{collection}/{id}`. [`ResourceClient`] implements that shape once and a
//! [`Resource`] marker type fills in the path, the nouns used in error
//! messages and the payload types.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::transport::{ApiResponse, Transport};

/// Describes one backend collection
pub trait Resource: Send + Sync + 'static {
    /// Collection path, e.g. `/api/categories`
    const PATH: &'static str;

    /// Singular noun in lower case, e.g. `category`
    const SINGULAR: &'static str;

    /// Plural noun in lower case, e.g. `categories`
    const PLURAL: &'static str;

    type Id: fmt::Display + Copy + Send + Sync;

    /// What the collection lists
    type Record: DeserializeOwned;

    /// Body sent on create and update
    type Draft: Serialize + Sync;
}

/// An update: the record id plus the fields to send
///
/// Only `fields` goes into the request body; `id` goes into the path.
#[derive(Debug, Clone, PartialEq)]
pub struct Form<K, D> {
    pub id: K,
    pub fields: D,
}

impl<K, D> Form<K, D> {
    pub fn new(id: K, fields: D) -> Self {
        Self { id, fields }
    }
}

/// The four request kinds, each with its own fallback error prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    List,
    Update,
    Delete,
}

impl Operation {
    /// Prefix used when the server gave nothing structured to pass through
    pub fn error_prefix<R: Resource>(self) -> String {
        match self {
            Self::Create => format!("{} creation failed", capitalize(R::SINGULAR)),
            Self::List => format!("Failed to fetch {}", R::PLURAL),
            Self::Update => format!("Failed to update {}", R::SINGULAR),
            Self::Delete => format!("Failed to delete {}", R::SINGULAR),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// CRUD client for one [`Resource`]
///
/// Every operation hands back the raw [`ApiResponse`] on success and the
/// normalized [`ApiError`] on failure.
pub struct ResourceClient<R: Resource> {
    transport: Transport,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceClient<R> {
    fn clone(&self) -> Self {
        Self::new(self.transport.clone())
    }
}

impl<R: Resource> fmt::Debug for ResourceClient<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("path", &R::PATH)
            .finish()
    }
}

impl<R: Resource> ResourceClient<R> {
    pub fn new(transport: Transport) -> Self {
        Self {
            transport,
            _resource: PhantomData,
        }
    }

    /// `POST {path}` with the draft as body
    pub async fn create(&self, draft: &R::Draft) -> Result<ApiResponse, ApiError> {
        debug!(resource = R::PLURAL, "creating record");
        self.transport
            .post(R::PATH, draft)
            .await
            .map_err(|e| ApiError::normalize(&Operation::Create.error_prefix::<R>(), e))
    }

    /// `GET {path}`
    pub async fn list(&self) -> Result<ApiResponse, ApiError> {
        self.list_with(&[]).await
    }

    /// `PUT {path}/{id}` with the form's fields as body
    pub async fn update(&self, form: &Form<R::Id, R::Draft>) -> Result<ApiResponse, ApiError> {
        debug!(resource = R::PLURAL, id = %form.id, "updating record");
        self.transport
            .put(&Self::member_path(form.id), &form.fields)
            .await
            .map_err(|e| ApiError::normalize(&Operation::Update.error_prefix::<R>(), e))
    }

    /// `DELETE {path}/{id}`
    pub async fn delete(&self, id: R::Id) -> Result<ApiResponse, ApiError> {
        debug!(resource = R::PLURAL, %id, "deleting record");
        self.transport
            .delete(&Self::member_path(id))
            .await
            .map_err(|e| ApiError::normalize(&Operation::Delete.error_prefix::<R>(), e))
    }

    /// [`list`](Self::list) decoded into records
    pub async fn fetch_all(&self) -> Result<Vec<R::Record>, ApiError> {
        let response = self.list().await?;
        decode_records(&response, &Operation::List.error_prefix::<R>())
    }

    pub(crate) async fn list_with(
        &self,
        query: &[(&str, String)],
    ) -> Result<ApiResponse, ApiError> {
        self.transport
            .get(R::PATH, query)
            .await
            .map_err(|e| ApiError::normalize(&Operation::List.error_prefix::<R>(), e))
    }

    fn member_path(id: R::Id) -> String {
        format!("{}/{}", R::PATH, id)
    }
}

/// Decode a listing that is either a bare array or wrapped as `{data: [...]}`
pub(crate) fn decode_records<T: DeserializeOwned>(
    response: &ApiResponse,
    prefix: &str,
) -> Result<Vec<T>, ApiError> {
    let value = response
        .json_value()
        .map_err(|e| ApiError::decode(prefix, response.status, e))?;
    let items = match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(items).map_err(|e| ApiError::decode(prefix, response.status, e))
}
