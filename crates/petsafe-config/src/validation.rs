// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks run after deserialization.
//!
//! Every problem is collected; validation never stops at the first one.

use url::Url;

use crate::diagnostic::ConfigError;
use crate::model::PetsafeConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
pub fn validate_config(config: &PetsafeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let upstream = &config.upstream;

    match Url::parse(&upstream.base_url) {
        Ok(url) => {
            if !matches!(url.scheme(), "http" | "https") {
                errors.push(ConfigError::validation(format!(
                    "upstream.base_url must use http or https, got `{}`",
                    url.scheme()
                )));
            } else if upstream.require_tls && url.scheme() == "http" && !is_local(&url) {
                errors.push(ConfigError::validation(format!(
                    "upstream.base_url `{}` uses plain HTTP for a remote host; \
                     use https or set upstream.require_tls = false",
                    upstream.base_url
                )));
            }
            if url.query().is_some() || url.fragment().is_some() {
                errors.push(ConfigError::validation(
                    "upstream.base_url must not carry a query or fragment",
                ));
            }
        }
        Err(e) => errors.push(ConfigError::validation(format!(
            "upstream.base_url `{}` is not a valid URL: {e}",
            upstream.base_url
        ))),
    }

    if !upstream.api_prefix.is_empty() && !upstream.api_prefix.starts_with('/') {
        errors.push(ConfigError::validation(format!(
            "upstream.api_prefix must start with `/`, got `{}`",
            upstream.api_prefix
        )));
    }

    if upstream.connect_timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "upstream.connect_timeout_secs must be greater than 0",
        ));
    }
    if upstream.request_timeout_secs == 0 {
        errors.push(ConfigError::validation(
            "upstream.request_timeout_secs must be greater than 0",
        ));
    }

    if config.session.database_path.trim().is_empty() {
        errors.push(ConfigError::validation(
            "session.database_path must not be empty",
        ));
    }

    let host = config.web.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::validation("web.host must not be empty"));
    } else if host.parse::<std::net::IpAddr>().is_err()
        && !host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        errors.push(ConfigError::validation(format!(
            "web.host `{host}` is not a valid IP address or hostname"
        )));
    }
    if config.web.port == 0 {
        errors.push(ConfigError::validation("web.port must not be 0"));
    }
    if config.web.session_idle_secs == 0 {
        errors.push(ConfigError::validation(
            "web.session_idle_secs must be greater than 0",
        ));
    }

    let cookie = &config.web.cookie_name;
    if cookie.is_empty()
        || !cookie
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        errors.push(ConfigError::validation(format!(
            "web.cookie_name `{cookie}` must be non-empty and use only letters, digits, `_` or `-`"
        )));
    }

    if !LOG_LEVELS.contains(&config.logging.level.as_str()) {
        errors.push(ConfigError::validation(format!(
            "logging.level `{}` must be one of: {}",
            config.logging.level,
            LOG_LEVELS.join(", ")
        )));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_local(url: &Url) -> bool {
    matches!(
        url.host_str(),
        Some("localhost" | "127.0.0.1" | "[::1]" | "::1")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &PetsafeConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .into_iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn default_config_validates() {
        assert!(validate_config(&PetsafeConfig::default()).is_ok());
    }

    #[test]
    fn remote_plain_http_rejected_when_tls_required() {
        let mut config = PetsafeConfig::default();
        config.upstream.base_url = "http://pets.example.com".into();
        let errors = messages(&config);
        assert!(errors.iter().any(|m| m.contains("plain HTTP")));
    }

    #[test]
    fn remote_plain_http_allowed_when_tls_off() {
        let mut config = PetsafeConfig::default();
        config.upstream.base_url = "http://pets.example.com".into();
        config.upstream.require_tls = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn unparseable_base_url_reported() {
        let mut config = PetsafeConfig::default();
        config.upstream.base_url = "not a url".into();
        assert!(messages(&config).iter().any(|m| m.contains("not a valid URL")));
    }

    #[test]
    fn all_problems_collected() {
        let mut config = PetsafeConfig::default();
        config.upstream.connect_timeout_secs = 0;
        config.upstream.request_timeout_secs = 0;
        config.web.cookie_name = "".into();
        config.logging.level = "loud".into();
        assert_eq!(validate_config(&config).unwrap_err().len(), 4);
    }

    #[test]
    fn zero_session_idle_rejected() {
        let mut config = PetsafeConfig::default();
        config.web.session_idle_secs = 0;
        assert!(messages(&config).iter().any(|m| m.contains("session_idle_secs")));
    }

    #[test]
    fn prefix_without_leading_slash_rejected() {
        let mut config = PetsafeConfig::default();
        config.upstream.api_prefix = "api/v1".into();
        assert!(messages(&config).iter().any(|m| m.contains("api_prefix")));
    }
}
