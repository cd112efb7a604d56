// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TLS policy for the upstream origin.

use std::time::Duration;

use petsafe_core::PetsafeError;
use tracing::error;

/// Build the reqwest client used for every upstream call.
///
/// TLS 1.2 minimum; timeouts are applied to the client itself so that every
/// request inherits them.
pub fn build_secure_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> Result<reqwest::Client, PetsafeError> {
    reqwest::Client::builder()
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .user_agent(concat!("petsafe/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            error!("failed to build upstream HTTP client: {e}");
            PetsafeError::Security(format!("failed to build upstream HTTP client: {e}"))
        })
}

/// Check an upstream origin against the TLS policy.
///
/// Localhost may use any scheme; a remote origin must be HTTPS when
/// `require_tls` is set.
pub fn validate_base_url(base_url: &str, require_tls: bool) -> Result<url::Url, PetsafeError> {
    let parsed = url::Url::parse(base_url)
        .map_err(|e| PetsafeError::Security(format!("invalid upstream URL: {e}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PetsafeError::Security(format!(
            "unsupported upstream scheme `{}`",
            parsed.scheme()
        )));
    }

    let host = parsed.host_str().unwrap_or("");
    if require_tls && parsed.scheme() != "https" && !is_localhost(host) {
        error!(url = %base_url, "TLS required for remote upstream");
        return Err(PetsafeError::Security(
            "TLS required for remote upstream -- use HTTPS".to_string(),
        ));
    }

    Ok(parsed)
}

/// Check if a host refers to the loopback interface.
pub fn is_localhost(host: &str) -> bool {
    matches!(host, "localhost" | "::1" | "[::1]") || host.starts_with("127.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_client_builds() {
        let client = build_secure_client(Duration::from_secs(30), Duration::from_secs(30));
        assert!(client.is_ok());
    }

    #[test]
    fn https_remote_allowed() {
        assert!(validate_base_url("https://api.petsafe.example", true).is_ok());
    }

    #[test]
    fn http_remote_blocked_when_required() {
        let err = validate_base_url("http://api.petsafe.example", true).unwrap_err();
        assert!(err.to_string().contains("TLS required"));
    }

    #[test]
    fn http_remote_allowed_when_not_required() {
        assert!(validate_base_url("http://api.petsafe.example", false).is_ok());
    }

    #[test]
    fn http_localhost_always_allowed() {
        assert!(validate_base_url("http://127.0.0.1:8080", true).is_ok());
        assert!(validate_base_url("http://localhost:8080", true).is_ok());
        assert!(validate_base_url("http://[::1]:8080", true).is_ok());
    }

    #[test]
    fn other_schemes_rejected() {
        assert!(validate_base_url("ftp://127.0.0.1", false).is_err());
    }

    #[test]
    fn loopback_detection() {
        assert!(is_localhost("127.0.0.2"));
        assert!(is_localhost("localhost"));
        assert!(!is_localhost("10.0.0.1"));
        assert!(!is_localhost("api.petsafe.example"));
    }
}
