// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classified failures to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use petsafe_core::{ApiError, ErrorKind, PetsafeError};
use serde::Serialize;
use tracing::{error, warn};

/// Where the browser is sent when it has no usable credential.
pub const LOGIN_PATH: &str = "/login";

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handler error. Wraps whatever failed so the response can be chosen from
/// the classification.
#[derive(Debug)]
pub struct WebError(pub PetsafeError);

impl From<PetsafeError> for WebError {
    fn from(err: PetsafeError) -> Self {
        Self(err)
    }
}

impl From<ApiError> for WebError {
    fn from(err: ApiError) -> Self {
        Self(PetsafeError::Api(err))
    }
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let err = match self.0 {
            PetsafeError::Api(err) => err,
            other => {
                error!(error = %other, "request failed locally");
                return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal error.");
            }
        };

        match err.kind {
            ErrorKind::Unauthenticated => Redirect::to(LOGIN_PATH).into_response(),
            ErrorKind::Rejected => json_error(StatusCode::UNPROCESSABLE_ENTITY, err.message),
            ErrorKind::UpstreamFault => {
                warn!(
                    status = ?err.http_status,
                    detail = err.detail.as_deref().unwrap_or(""),
                    "upstream fault"
                );
                json_error(StatusCode::BAD_GATEWAY, err.message)
            }
            ErrorKind::TransportFailure => {
                warn!(detail = err.detail.as_deref().unwrap_or(""), "upstream unreachable");
                json_error(StatusCode::SERVICE_UNAVAILABLE, err.message)
            }
        }
    }
}
