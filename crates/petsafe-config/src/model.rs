// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the PetSafe client proxy.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};

/// Top-level PetSafe configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PetsafeConfig {
    /// Remote pet-tracking API settings.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Device-local credential storage.
    #[serde(default)]
    pub session: SessionConfig,

    /// Browser-facing server (web instantiation).
    #[serde(default)]
    pub web: WebConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the upstream API lives and how patiently to talk to it.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base origin, e.g. `https://api.petsafe.example`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path prefix prepended to every route.
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Seconds allowed to establish a connection.
    #[serde(default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Seconds allowed for a whole request, body included.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Extra attempts made when the connection could not be established.
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Refuse plaintext HTTP to anything but localhost.
    #[serde(default = "default_require_tls")]
    pub require_tls: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
            connect_timeout_secs: default_timeout_secs(),
            request_timeout_secs: default_timeout_secs(),
            connect_retries: default_connect_retries(),
            require_tls: default_require_tls(),
        }
    }
}

impl UpstreamConfig {
    /// Base origin joined with the API prefix, without a trailing slash.
    pub fn api_root(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');
        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{prefix}")
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_api_prefix() -> String {
    "/api/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_retries() -> u32 {
    1
}

fn default_require_tls() -> bool {
    true
}

/// Device-local credential storage.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Path to the SQLite file holding the signed-in credential.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("petsafe").join("session.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("petsafe-session.db"))
        .to_string_lossy()
        .into_owned()
}

/// Browser-facing server settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Name of the cookie carrying the session identifier.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Seconds a browser session may stay unused before its credential is dropped.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cookie_name: default_cookie_name(),
            session_idle_secs: default_session_idle_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cookie_name() -> String {
    "petsafe_session".to_string()
}

fn default_session_idle_secs() -> u64 {
    1800 // 30 minutes
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter level (trace, debug, info, warn, error).
    /// `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_root_joins_without_double_slash() {
        let upstream = UpstreamConfig {
            base_url: "https://pets.example.com/".into(),
            ..UpstreamConfig::default()
        };
        assert_eq!(upstream.api_root(), "https://pets.example.com/api/v1");
    }

    #[test]
    fn empty_prefix_uses_bare_origin() {
        let upstream = UpstreamConfig {
            api_prefix: "".into(),
            ..UpstreamConfig::default()
        };
        assert_eq!(upstream.api_root(), "http://localhost:8080");
    }

    #[test]
    fn defaults_match_mobile_timeouts() {
        let config = PetsafeConfig::default();
        assert_eq!(config.upstream.connect_timeout_secs, 30);
        assert_eq!(config.upstream.request_timeout_secs, 30);
        assert!(config.upstream.require_tls);
        assert_eq!(config.web.cookie_name, "petsafe_session");
        assert_eq!(config.web.session_idle_secs, 1800);
    }
}
