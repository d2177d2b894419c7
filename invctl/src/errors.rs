//! Service error taxonomy and its HTTP mapping.
//!
//! Typed results replace exception-as-control-flow: handlers return
//! `Result<_, Error>` and the transport mapping lives here, in one place.
//! Categorization, aggregation and filtering are total and never construct
//! these; reconciliation failures are logged per tag and never surface.

use crate::db::errors::DbError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
    /// Referenced tag or item does not exist
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// Operation attempted against a record whose status forbids it
    #[error("{message}")]
    InvalidState { message: String },

    /// A write did not affect the expected number of rows
    #[error("failed to {operation}: the update did not take effect")]
    PersistenceFailure { operation: &'static str },

    /// Unparseable request input
    #[error("{message}")]
    MalformedInput { message: String },

    /// Database operation error
    #[error(transparent)]
    Database(#[from] DbError),

    /// Unexpected error with full context chain
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidState { .. } => StatusCode::BAD_REQUEST,
            Error::PersistenceFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::MalformedInput { .. } => StatusCode::BAD_REQUEST,
            Error::Database(db_err) => match db_err {
                DbError::NotFound => StatusCode::NOT_FOUND,
                DbError::UniqueViolation { .. } => StatusCode::CONFLICT,
                DbError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-safe message, without leaking internal detail
    pub fn user_message(&self) -> String {
        match self {
            Error::NotFound { resource, id } => format!("{resource} {id} not found"),
            Error::InvalidState { message } => message.clone(),
            Error::PersistenceFailure { operation } => format!("failed to {operation}"),
            Error::MalformedInput { message } => message.clone(),
            Error::Database(DbError::NotFound) => "Resource not found".to_string(),
            Error::Database(DbError::UniqueViolation { .. }) => "Resource already exists".to_string(),
            Error::Database(DbError::Other(_)) | Error::Other(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Full detail goes to the log at a severity matching the class of
        // failure; the response body carries only the user-safe message.
        match &self {
            Error::Database(DbError::Other(_)) | Error::Other(_) | Error::PersistenceFailure { .. } => {
                tracing::error!("Internal service error: {:#}", self);
            }
            Error::Database(_) => {
                tracing::warn!("Database constraint error: {}", self);
            }
            Error::NotFound { .. } | Error::InvalidState { .. } | Error::MalformedInput { .. } => {
                tracing::debug!("Client error: {}", self);
            }
        }

        let status = self.status_code();
        let body = json!({ "error": self.user_message() });
        (status, axum::response::Json(body)).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_transport_statuses() {
        let not_found = Error::NotFound {
            resource: "Tag",
            id: "T1".to_string(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let invalid = Error::InvalidState {
            message: "tag T1 is not a resale item".to_string(),
        };
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let persistence = Error::PersistenceFailure {
            operation: "mark tag sold",
        };
        assert_eq!(persistence.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let malformed = Error::MalformedInput {
            message: "tag id must not be empty".to_string(),
        };
        assert_eq!(malformed.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_do_not_leak_detail() {
        let err = Error::Other(anyhow::anyhow!("pool exhausted on shard 7"));
        assert_eq!(err.user_message(), "Internal server error");
    }
}
