//! Typed error handling for the food service
//!
//! Handlers return [`ServiceResult`] so that every failure is mapped to an
//! HTTP response in one place instead of being logged and dropped.
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookups that found nothing
//! - [`ValidationError`]: request bodies or path parameters that cannot be used
//! - [`StorageError`]: the backing store failed, rejected the call or timed out
//! - [`RequestError`]: protocol-level problems such as media type negotiation
//!
//! # Example
//!
//! ```rust,ignore
//! use food_service::prelude::*;
//!
//! async fn get(store: &dyn FoodStore, id: &str) -> ServiceResult<Food> {
//!     store
//!         .find_by_id(id)
//!         .await
//!         .map_err(StorageError::from_store)?
//!         .ok_or_else(|| EntityError::not_found(id).into())
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use crate::core::food::wire_field_name;
use serde::Serialize;
use std::fmt;

/// The main error type for the food service
#[derive(Debug)]
pub enum ServiceError {
    /// Entity lookups (primary key misses)
    Entity(EntityError),

    /// Malformed input
    Validation(ValidationError),

    /// Store failures
    Storage(StorageError),

    /// HTTP/Request errors
    Request(RequestError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Entity(e) => write!(f, "{}", e),
            ServiceError::Validation(e) => write!(f, "{}", e),
            ServiceError::Storage(e) => write!(f, "{}", e),
            ServiceError::Request(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Entity(e) => Some(e),
            ServiceError::Validation(e) => Some(e),
            ServiceError::Storage(e) => Some(e),
            ServiceError::Request(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ServiceError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Entity(e) => e.status_code(),
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Request(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Entity(e) => e.error_code(),
            ServiceError::Validation(_) => "VALIDATION_ERROR",
            ServiceError::Storage(e) => e.error_code(),
            ServiceError::Request(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ServiceError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        // A primary-key miss is answered with a bare 404.
        if let ServiceError::Entity(EntityError::NotFound { .. }) = &self {
            return StatusCode::NOT_FOUND.into_response();
        }

        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug)]
pub enum EntityError {
    /// No record with this primary key
    NotFound { entity_type: String, id: String },
}

impl EntityError {
    /// Shorthand for a missing food record
    pub fn not_found(id: impl Into<String>) -> Self {
        EntityError::NotFound {
            entity_type: "food".to_string(),
            id: id.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl From<EntityError> for ServiceError {
    fn from(err: EntityError) -> Self {
        ServiceError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Body is not valid JSON or does not fit the entity shape
    InvalidJson { message: String },

    /// A path parameter is missing or blank
    MissingArgument { argument: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
            ValidationError::MissingArgument { argument } => {
                write!(f, "Missing required argument: {}", argument)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: wire_field_name(&field).to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the backing store
#[derive(Debug)]
pub enum StorageError {
    /// The store could not be reached
    ConnectionError { backend: String, message: String },

    /// The store rejected or failed the operation
    QueryError { message: String },

    /// The store did not answer in time
    Timeout { operation: String, millis: u128 },

    /// Backend not available in this build
    Unavailable { backend: String },
}

impl StorageError {
    /// Wrap an error coming out of a [`FoodStore`](crate::core::FoodStore) call
    ///
    /// A `StorageError` raised inside the store is kept as is; anything else
    /// becomes a `QueryError` carrying the full context chain.
    pub fn from_store(err: anyhow::Error) -> Self {
        match err.downcast::<StorageError>() {
            Ok(storage) => storage,
            Err(err) => StorageError::QueryError {
                message: format!("{:#}", err),
            },
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ConnectionError { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::QueryError { .. } => "STORAGE_ERROR",
            StorageError::Timeout { .. } => "STORAGE_TIMEOUT",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ConnectionError { backend, message } => {
                write!(f, "Failed to connect to {}: {}", backend, message)
            }
            StorageError::QueryError { message } => {
                write!(f, "Store query error: {}", message)
            }
            StorageError::Timeout { operation, millis } => {
                write!(f, "Store operation '{}' timed out after {}ms", operation, millis)
            }
            StorageError::Unavailable { backend } => {
                write!(f, "Storage backend '{}' is unavailable", backend)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        ServiceError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// The client does not accept JSON
    NotAcceptable { accept: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NotAcceptable { accept } => {
                write!(f, "Cannot produce application/json for Accept: {}", accept)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::NotAcceptable { .. } => StatusCode::NOT_ACCEPTABLE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::NotAcceptable { .. } => "NOT_ACCEPTABLE",
        }
    }
}

impl From<RequestError> for ServiceError {
    fn from(err: RequestError) -> Self {
        ServiceError::Request(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<axum::extract::rejection::JsonRejection> for ServiceError {
    fn from(err: axum::extract::rejection::JsonRejection) -> Self {
        ServiceError::Validation(ValidationError::InvalidJson {
            message: err.body_text(),
        })
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::Validation(err.into())
    }
}

/// A specialized Result type for handler operations
pub type ServiceResult<T> = Result<T, ServiceError>;
