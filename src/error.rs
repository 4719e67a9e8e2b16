//! Custom error types for Spendwise
//!
//! Two layers of errors live here:
//! - [`ApiError`]: the single normalized shape every resource operation fails
//!   with, whatever went wrong on the wire
//! - [`ClientError`]: the crate-level error for configuration, local storage
//!   and anything else that is not a backend response

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::transport::TransportError;

/// Normalized error returned by every resource client operation
///
/// When the backend answered with a JSON object, that object is passed
/// through: `message` and `errors` are lifted out and every other key lands in
/// `fields` unchanged. Otherwise the message is synthesized from the operation
/// name and the underlying error text.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    /// HTTP status, `None` when no response was received
    pub status: Option<u16>,

    /// Human-readable message
    pub message: String,

    /// Per-field validation messages (HTTP 422)
    pub errors: Option<BTreeMap<String, Vec<String>>>,

    /// Any other keys from the server body
    pub fields: Map<String, Value>,
}

impl ApiError {
    /// Normalize a transport failure for the named operation
    ///
    /// `operation` is the static prefix used when the server gave us nothing
    /// structured to pass through, e.g. `"Category creation failed"`.
    pub fn normalize(operation: &str, err: TransportError) -> Self {
        match err {
            TransportError::Status(response) => {
                let fallback = format!(
                    "{}: Request failed with status code {}",
                    operation, response.status
                );
                let body = match response.json_value() {
                    Ok(Value::Object(body)) => Some(body),
                    _ => None,
                };
                Self::from_body(Some(response.status), body, fallback)
            }
            TransportError::Network(text) | TransportError::Encode(text) => Self {
                status: None,
                message: format!("{}: {}", operation, text),
                errors: None,
                fields: Map::new(),
            },
        }
    }

    /// Error for a successful response whose body could not be decoded
    pub fn decode(operation: &str, status: u16, err: serde_json::Error) -> Self {
        Self {
            status: Some(status),
            message: format!("{}: {}", operation, err),
            errors: None,
            fields: Map::new(),
        }
    }

    /// Error for a successful response whose local follow-up failed,
    /// e.g. persisting an issued token
    pub fn local(operation: &str, status: u16, err: &ClientError) -> Self {
        Self {
            status: Some(status),
            message: format!("{}: {}", operation, err),
            errors: None,
            fields: Map::new(),
        }
    }

    fn from_body(status: Option<u16>, body: Option<Map<String, Value>>, fallback: String) -> Self {
        let Some(mut body) = body else {
            return Self {
                status,
                message: fallback,
                errors: None,
                fields: Map::new(),
            };
        };

        let message = match body.remove("message") {
            Some(Value::String(message)) => message,
            Some(other) => {
                body.insert("message".to_string(), other);
                fallback
            }
            None => fallback,
        };

        let errors = match body.remove("errors") {
            Some(Value::Object(map)) => Some(field_errors(map)),
            Some(other) => {
                body.insert("errors".to_string(), other);
                None
            }
            None => None,
        };

        if let Some(errors) = &errors {
            debug!(?status, ?errors, "server reported validation errors");
        }

        Self {
            status,
            message,
            errors,
            fields: body,
        }
    }

    /// Messages reported for a single field
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors
            .as_ref()
            .and_then(|errors| errors.get(field))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Check if the server rejected the payload (HTTP 422)
    pub fn is_validation(&self) -> bool {
        self.status == Some(422)
    }

    /// Check if the server rejected the credential (HTTP 401)
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// Check if the request never got a response
    pub fn is_network(&self) -> bool {
        self.status.is_none()
    }
}

/// Serializes as one flat object. Server keys that collide with `status`,
/// `message` or `errors` are dropped in favor of the normalized values.
impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        const RESERVED: [&str; 3] = ["status", "message", "errors"];

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("status", &self.status)?;
        map.serialize_entry("message", &self.message)?;
        if let Some(errors) = &self.errors {
            map.serialize_entry("errors", errors)?;
        }
        for (key, value) in &self.fields {
            if !RESERVED.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

/// Per-field messages arrive as `{field: [msg, ...]}`; a bare string is
/// promoted to a one-element list.
fn field_errors(map: Map<String, Value>) -> BTreeMap<String, Vec<String>> {
    map.into_iter()
        .map(|(field, value)| {
            let messages = match value {
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
                Value::String(s) => vec![s],
                other => vec![other.to_string()],
            };
            (field, messages)
        })
        .collect()
}

/// The main error type for Spendwise operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Persisted client state errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Input rejected before anything was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found in the last fetched list
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Report export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Backend or transport failure, already normalized
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ClientError {
    /// Create a "category not found" error
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create an "expense not found" error
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "budget not found" error
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The normalized API error, if this is one
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Check if this is a validation error (local or HTTP 422)
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Api(err) => err.is_validation(),
            _ => false,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Spendwise operations
pub type ClientResult<T> = Result<T, ClientError>;
