//! API error responses.
//!
//! Successful routes relay the store's JSON unchanged; failures are wrapped
//! in a common envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ErrorResponse, WooError};

/// Error envelope returned by every route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error information.
    pub error: ErrorResponse,
    /// Identifier correlating the response with server logs.
    pub request_id: Uuid,
    /// Response timestamp.
    pub timestamp: DateTime<Utc>,
}

/// A route failure, rendered as an [`ErrorEnvelope`].
#[derive(Debug)]
pub struct ApiError {
    /// Underlying error.
    pub error: WooError,
    /// Request identifier.
    pub request_id: Uuid,
}

impl ApiError {
    /// Wraps an error for the given request.
    pub fn new(error: WooError, request_id: Uuid) -> Self {
        Self { error, request_id }
    }

    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.error.code().http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Builds the response envelope.
    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            error: ErrorResponse::from_error(&self.error),
            request_id: self.request_id,
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.envelope())).into_response()
    }
}
