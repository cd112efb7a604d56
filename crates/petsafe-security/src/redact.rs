// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret redaction for log output and error messages.
//!
//! Regex patterns catch token-shaped strings (bearer headers, JWTs, token
//! fields in JSON bodies); exact-match values catch the credential that is
//! currently held, whatever its shape.

use std::io::Write;
use std::sync::{Arc, LazyLock, RwLock};

use regex::Regex;

/// Token shapes that must never reach a log line.
static REDACTION_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Authorization header values
        (r"Bearer\s+[A-Za-z0-9._~+/\-]{10,}=*", REDACTED),
        // Bare JWTs: header.payload.signature
        (r"eyJ[A-Za-z0-9_\-]{5,}\.[A-Za-z0-9_\-]{5,}\.[A-Za-z0-9_\-]*", REDACTED),
        // Token and password fields inside JSON bodies
        (
            r#""(access_token|refresh_token|fcm_token|password|current_password|new_password)"\s*:\s*"[^"]*""#,
            r#""$1":"[REDACTED]""#,
        ),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// The redaction placeholder.
const REDACTED: &str = "[REDACTED]";

/// Shared list of exact secret values to scrub (the live access token).
pub type SecretList = Arc<RwLock<Vec<String>>>;

/// Redact token-shaped strings and every value in `secrets` from `input`.
pub fn redact(input: &str, secrets: &[String]) -> String {
    let mut result = input.to_string();

    for (pattern, replacement) in REDACTION_PATTERNS.iter() {
        result = pattern.replace_all(&result, *replacement).into_owned();
    }

    // Longest first so a secret that contains another is replaced whole.
    let mut sorted: Vec<&String> = secrets.iter().filter(|s| !s.is_empty()).collect();
    sorted.sort_by_key(|v| std::cmp::Reverse(v.len()));
    for value in sorted {
        result = result.replace(value.as_str(), REDACTED);
    }

    result
}

/// A writer that redacts everything passing through it.
///
/// Installed under the tracing subscriber so that no layer has to remember
/// to call [`redact`] itself.
pub struct RedactingWriter<W> {
    inner: W,
    secrets: SecretList,
}

impl<W: Write> RedactingWriter<W> {
    pub fn new(inner: W, secrets: SecretList) -> Self {
        Self { inner, secrets }
    }

    /// Register a value to scrub from now on. Duplicates are ignored.
    pub fn add_secret(secrets: &SecretList, value: String) {
        if let Ok(mut values) = secrets.write()
            && !value.is_empty()
            && !values.contains(&value)
        {
            values.push(value);
        }
    }

    /// Forget every registered value (after logout).
    pub fn clear_secrets(secrets: &SecretList) {
        if let Ok(mut values) = secrets.write() {
            values.clear();
        }
    }
}

impl<W: Write> Write for RedactingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let input = String::from_utf8_lossy(buf);
        let secrets = self.secrets.read().map(|v| v.clone()).unwrap_or_default();
        self.inner.write_all(redact(&input, &secrets).as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
