//! Error handling for the libris HTTP layer.
//!
//! Every handler failure is expressed as an [`ApiError`] carrying the name of
//! the operation that produced it. The `IntoResponse` impl performs the
//! status mapping, logs the failure, and writes a body containing only the
//! `errors` array (not the full envelope) — with one deliberate exception:
//! a missing delete target answers 404 with a completely empty body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::response::ResponseError;

/// Handler failures that map to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A path parameter failed numeric coercion.
    #[error("bad request in {source_op}: {message}")]
    BadRequest {
        source_op: &'static str,
        message: String,
    },

    /// The request body could not be deserialized into the expected shape.
    #[error("unprocessable body in {source_op}: {message}")]
    UnprocessableEntity {
        source_op: &'static str,
        message: String,
    },

    /// No live record matched the requested id.
    #[error("not found in {source_op}: {message}")]
    NotFound {
        source_op: &'static str,
        message: String,
    },

    /// Delete's existence check found nothing. Answered with an empty 404
    /// body, no error array.
    #[error("not found in {source_op}")]
    NotFoundEmpty { source_op: &'static str },

    /// Any storage-engine failure (query, insert, update, commit).
    #[error("storage failure in {source_op}: {message}")]
    Storage {
        source_op: &'static str,
        message: String,
    },
}

impl ApiError {
    pub fn bad_request(source_op: &'static str, err: impl ToString) -> Self {
        Self::BadRequest {
            source_op,
            message: err.to_string(),
        }
    }

    pub fn unprocessable(source_op: &'static str, err: impl ToString) -> Self {
        Self::UnprocessableEntity {
            source_op,
            message: err.to_string(),
        }
    }

    pub fn not_found(source_op: &'static str, message: impl Into<String>) -> Self {
        Self::NotFound {
            source_op,
            message: message.into(),
        }
    }

    pub fn not_found_empty(source_op: &'static str) -> Self {
        Self::NotFoundEmpty { source_op }
    }

    pub fn storage(source_op: &'static str, err: impl ToString) -> Self {
        Self::Storage {
            source_op,
            message: err.to_string(),
        }
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::UnprocessableEntity { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound { .. } | Self::NotFoundEmpty { .. } => StatusCode::NOT_FOUND,
            Self::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn parts(self) -> (StatusCode, &'static str, Option<String>) {
        let status = self.status();
        match self {
            Self::BadRequest { source_op, message }
            | Self::UnprocessableEntity { source_op, message }
            | Self::NotFound { source_op, message }
            | Self::Storage { source_op, message } => (status, source_op, Some(message)),
            Self::NotFoundEmpty { source_op } => (status, source_op, None),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, source_op, message) = self.parts();

        tracing::error!(
            source = source_op,
            status = status.as_u16(),
            error = message.as_deref().unwrap_or("record not found"),
            "request failed"
        );

        // The empty-body 404 for a missing delete target carries no envelope
        // and no error array.
        let Some(message) = message else {
            return status.into_response();
        };

        let error = ResponseError {
            code: status.as_u16(),
            source: source_op.to_string(),
            title: status.canonical_reason().unwrap_or_default().to_string(),
            message,
        };

        (status, Json(json!({ "errors": [error] }))).into_response()
    }
}
