use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use strum::Display;
use thiserror::Error;

use crate::models::ComponentKind;

/// Classification of a failed call to the learning-component API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum TransportErrorKind {
    /// The learning space or component does not exist (404)
    NotFound,
    /// The server rejected the payload (400 / 422)
    ValidationRejected,
    /// The request conflicts with the current state (409)
    Conflict,
    /// The server failed to process the request (5xx)
    ServerError,
    /// The request did not complete within the client timeout
    Timeout,
    /// Connection could not be established or was interrupted
    Network,
    /// The response body could not be decoded
    InvalidResponse,
    /// Any other non-success status
    Unexpected,
}

impl TransportErrorKind {
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => Self::NotFound,
            400 | 422 => Self::ValidationRejected,
            409 => Self::Conflict,
            500..=599 => Self::ServerError,
            _ => Self::Unexpected,
        }
    }

    /// Whether retrying the same request later could succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::ServerError | Self::Timeout | Self::Network)
    }
}

/// A failed create/update/read call, with enough detail for the caller to
/// tell "not found", "validation rejected" and "server error" apart.
#[derive(Debug, Clone, Error)]
#[error("{kind} error{}: {message}", status_suffix(.status))]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub status: Option<u16>,
    pub message: String,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::from_status(status), Some(status), message)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_decode() {
            TransportErrorKind::InvalidResponse
        } else if let Some(status) = err.status() {
            TransportErrorKind::from_status(status.as_u16())
        } else {
            TransportErrorKind::Network
        };
        Self::new(kind, err.status().map(|s| s.as_u16()), err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ComponentError {
    #[error("Unsupported component type: {type_name}")]
    UnsupportedType { type_name: &'static str },

    #[error("Mapper shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("More than one handler registered for component kind {0}")]
    DuplicateRegistration(ComponentKind),

    #[error("Missing required field '{field}' on {kind} payload")]
    MissingField {
        kind: ComponentKind,
        field: &'static str,
    },

    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidField { field: &'static str, value: String },

    #[error("Component {component_id} not found in learning space {space_id}")]
    NotFound { space_id: i64, component_id: i64 },

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl ComponentError {
    /// Registration and mapping defects: fixed in code, never by the caller.
    pub fn is_defect(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType { .. }
                | Self::ShapeMismatch { .. }
                | Self::DuplicateRegistration(_)
                | Self::MissingField { .. }
        )
    }
}

/// Convert ComponentError to AppError for standardized error responses
impl From<ComponentError> for AppError {
    fn from(err: ComponentError) -> Self {
        match err {
            ComponentError::NotFound { .. } => AppError::NotFound(err.to_string()),
            ComponentError::Validation(msg) => AppError::BadRequest(msg),
            ComponentError::InvalidField { .. } | ComponentError::MissingField { .. } => {
                AppError::UnprocessableEntity(err.to_string())
            }
            ComponentError::Transport(ref transport) if transport.kind.is_transient() => {
                AppError::ServiceUnavailable(err.to_string())
            }
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}

impl IntoResponse for ComponentError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
