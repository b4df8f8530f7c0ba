use crate::api::validation::ParamProblem;
use crate::db::errors::DbError;
use crate::types::Report;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error as ThisError;
use utoipa::ToSchema;

#[derive(ThisError, Debug)]
pub enum Error {
    /// One or more query parameters failed validation
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<ParamProblem>,
    },

    /// The backing view could not be queried
    #[error("{report} report unavailable")]
    Unavailable {
        report: Report,
        #[source]
        source: DbError,
    },
}

/// Wire shape of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable description of what went wrong
    pub error: String,
    /// Per-parameter violations, present only when validation failed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ParamProblem>,
}

impl Error {
    /// Reject a request with a single message and no per-parameter detail.
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Reject a request, itemizing every violated parameter.
    pub fn invalid_params(details: Vec<ParamProblem>) -> Self {
        Error::Validation {
            message: "Parámetros inválidos".to_string(),
            details,
        }
    }

    /// Wrap a store failure under the report it interrupted.
    pub fn unavailable(report: Report, source: DbError) -> Self {
        Error::Unavailable { report, source }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Unavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns a user-safe error message, without leaking internal implementation details
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation { message, .. } => message.clone(),
            Error::Unavailable { report, .. } => report.unavailable_message().to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Log full error details for debugging - different log levels based on severity
        match &self {
            Error::Unavailable { report, source } => {
                tracing::error!("Report {report} unavailable: {source}");
            }
            Error::Validation { message, details } => {
                tracing::debug!("Rejected request: {message} {details:?}");
            }
        }

        let status = self.status_code();
        let error = self.user_message();
        let details = match self {
            Error::Validation { details, .. } => details,
            Error::Unavailable { .. } => Vec::new(),
        };

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

/// Type alias for service operation results
pub type Result<T> = std::result::Result<T, Error>;
