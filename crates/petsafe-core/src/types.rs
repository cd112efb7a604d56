// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the credential store, the transport, and callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Token type used when the upstream does not state one.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Identifier of one server-side browser session (web instantiation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a fresh random session identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Cached copy of the authenticated user's server-side profile.
///
/// Overwritten wholesale whenever a fresher copy arrives; never edited
/// field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The authenticated identity held by a client.
///
/// `Debug` never prints the tokens.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub principal: UserSnapshot,
}

impl Credential {
    /// Value for the `Authorization` header: `"{token_type} {access_token}"`.
    pub fn authorization_header(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }

    /// Copy of this credential with `principal` replaced and tokens kept.
    pub fn with_principal(&self, principal: UserSnapshot) -> Self {
        Self {
            access_token: self.access_token.clone(),
            refresh_token: self.refresh_token.clone(),
            token_type: self.token_type.clone(),
            principal,
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("token_type", &self.token_type)
            .field("principal", &self.principal)
            .finish()
    }
}

fn default_token_type() -> String {
    DEFAULT_TOKEN_TYPE.to_string()
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// HTTP verbs used against the upstream API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

/// A fully built upstream call, ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    /// Path relative to the API root, starting with `/`.
    pub path: String,
    /// Header name/value pairs, already including authorization if any.
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl OutboundRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of an upstream response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> UserSnapshot {
        UserSnapshot {
            id: 7,
            email: "a@b.com".into(),
            full_name: "Ana".into(),
            phone: None,
            created_at: None,
        }
    }

    #[test]
    fn authorization_header_joins_type_and_token() {
        let cred = Credential {
            access_token: "abc".into(),
            refresh_token: None,
            token_type: "Bearer".into(),
            principal: snapshot(),
        };
        assert_eq!(cred.authorization_header(), "Bearer abc");
    }

    #[test]
    fn credential_debug_hides_tokens() {
        let cred = Credential {
            access_token: "secret-access".into(),
            refresh_token: Some("secret-refresh".into()),
            token_type: "Bearer".into(),
            principal: snapshot(),
        };
        let debug = format!("{cred:?}");
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn missing_token_type_defaults_to_bearer() {
        let json = serde_json::json!({
            "access_token": "t",
            "principal": {"id": 1, "email": "x@y.z"}
        });
        let cred: Credential = serde_json::from_value(json).unwrap();
        assert_eq!(cred.token_type, "Bearer");
        assert_eq!(cred.principal.full_name, "");
    }

    #[test]
    fn empty_phone_reads_as_none() {
        let json = serde_json::json!({"id": 1, "email": "x@y.z", "phone": ""});
        let user: UserSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(user.phone, None);
    }

    #[test]
    fn user_snapshot_ignores_unknown_fields() {
        let json = serde_json::json!({
            "id": 3,
            "email": "x@y.z",
            "full_name": "X",
            "updated_at": "2025-01-01T00:00:00Z",
            "created_at": "2024-12-31T10:00:00Z"
        });
        let user: UserSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(user.id, 3);
        assert!(user.created_at.is_some());
    }

    #[test]
    fn with_principal_keeps_tokens() {
        let cred = Credential {
            access_token: "a".into(),
            refresh_token: Some("r".into()),
            token_type: "Bearer".into(),
            principal: snapshot(),
        };
        let mut fresher = snapshot();
        fresher.full_name = "Ana Maria".into();
        let updated = cred.with_principal(fresher);
        assert_eq!(updated.access_token, "a");
        assert_eq!(updated.refresh_token.as_deref(), Some("r"));
        assert_eq!(updated.principal.full_name, "Ana Maria");
    }

    #[test]
    fn http_method_renders_uppercase() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
        assert_eq!("DELETE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let req = OutboundRequest {
            method: HttpMethod::Get,
            path: "/me".into(),
            headers: vec![("Authorization".into(), "Bearer x".into())],
            body: None,
        };
        assert_eq!(req.header("authorization"), Some("Bearer x"));
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }
}
