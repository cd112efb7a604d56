// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps upstream responses onto the four error kinds.
//!
//! Status decides the kind: 401 is `Unauthenticated`, any other 4xx is
//! `Rejected`, and 5xx (or anything else that is not 2xx) is
//! `UpstreamFault`. The body only ever contributes text.

use petsafe_core::{ApiError, RawResponse};
use petsafe_security::redact;
use serde::de::DeserializeOwned;

/// Upstream text carried in an error body: `message` first, then `error`.
pub fn upstream_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "error"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

/// Classify a non-2xx response.
///
/// Rejections show the upstream's own text when it has one, else
/// `fallback`. Other kinds always show a fixed message; the upstream text
/// goes to `detail` for logging.
pub fn classify(response: RawResponse, fallback: &str) -> ApiError {
    let RawResponse { status, body } = response;
    let detail = upstream_message(&body).map(|m| redact(&m, &[]));

    match status {
        401 => ApiError::unauthenticated(detail, body),
        400..=499 => {
            let message = detail.clone().unwrap_or_else(|| fallback.to_string());
            ApiError::rejected(status, message, detail, body)
        }
        _ => ApiError::upstream_fault(status, detail, body),
    }
}

/// Decode a 2xx body; a body that does not parse is an upstream fault.
pub fn decode<T: DeserializeOwned>(response: RawResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| {
        ApiError::upstream_fault(
            response.status,
            Some(format!("unreadable response body: {e}")),
            response.body.clone(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use petsafe_core::ErrorKind;
    use petsafe_core::error::{SESSION_EXPIRED, UPSTREAM_UNAVAILABLE};

    #[test]
    fn unauthorized_without_body_has_fallback_message() {
        let err = classify(RawResponse::new(401, ""), "unused");
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
        assert_eq!(err.message, SESSION_EXPIRED);
        assert_eq!(err.detail, None);
    }

    #[test]
    fn server_error_message_is_logged_not_shown() {
        let err = classify(RawResponse::new(500, r#"{"message": "x"}"#), "fallback");
        assert_eq!(err.kind, ErrorKind::UpstreamFault);
        assert_eq!(err.detail.as_deref(), Some("x"));
        assert_eq!(err.message, UPSTREAM_UNAVAILABLE);
    }

    #[test]
    fn rejection_prefers_message_over_error() {
        let body = r#"{"error": "e", "message": "m"}"#;
        let err = classify(RawResponse::new(409, body), "fallback");
        assert_eq!(err.kind, ErrorKind::Rejected);
        assert_eq!(err.message, "m");
        assert_eq!(err.raw_body, body);
    }

    #[test]
    fn rejection_uses_error_field() {
        let err = classify(RawResponse::new(400, r#"{"error":"Pet not found!"}"#), "fallback");
        assert_eq!(err.message, "Pet not found!");
        assert_eq!(err.http_status, Some(400));
    }

    #[test]
    fn unreadable_rejection_uses_fallback() {
        let err = classify(RawResponse::new(404, "<html>nope</html>"), "Pet not found.");
        assert!(err.is_not_found());
        assert_eq!(err.message, "Pet not found.");
    }

    #[test]
    fn other_client_errors_are_rejections() {
        for status in [403, 422, 429] {
            assert_eq!(classify(RawResponse::new(status, ""), "f").kind, ErrorKind::Rejected);
        }
    }

    #[test]
    fn unexpected_statuses_are_faults() {
        assert_eq!(classify(RawResponse::new(302, ""), "f").kind, ErrorKind::UpstreamFault);
        assert_eq!(classify(RawResponse::new(503, ""), "f").kind, ErrorKind::UpstreamFault);
    }

    #[test]
    fn token_in_error_text_is_redacted() {
        let body = r#"{"error":"bad token Bearer abcdefghijklmnop"}"#;
        let err = classify(RawResponse::new(400, body), "f");
        assert!(!err.message.contains("abcdefghijklmnop"));
    }

    #[test]
    fn unparseable_success_is_fault() {
        let err = decode::<serde_json::Value>(RawResponse::new(200, "not json")).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UpstreamFault);
        assert_eq!(err.http_status, Some(200));
    }
}
