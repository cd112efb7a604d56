// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Password acquisition via TTY prompt or the `PETSAFE_PASSWORD` environment variable.

use petsafe_core::PetsafeError;
use secrecy::SecretString;

/// The environment variable read before prompting.
pub const PASSWORD_ENV_VAR: &str = "PETSAFE_PASSWORD";

/// Get the account password from the environment or an interactive prompt.
///
/// Priority:
/// 1. `PETSAFE_PASSWORD` (scripts, CI)
/// 2. Interactive TTY prompt via `rpassword`
pub fn get_password() -> Result<SecretString, PetsafeError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV_VAR)
        && !password.is_empty()
    {
        return Ok(SecretString::from(password));
    }
    read_secret("Password: ")
}

/// Prompt for a secret on the terminal. Never falls back to the environment.
pub fn read_secret(label: &str) -> Result<SecretString, PetsafeError> {
    if !std::io::IsTerminal::is_terminal(&std::io::stdin()) {
        return Err(PetsafeError::Internal(format!(
            "no password provided. Set {PASSWORD_ENV_VAR} or run interactively."
        )));
    }
    eprint!("{label}");
    let value = rpassword::read_password()
        .map_err(|e| PetsafeError::Internal(format!("failed to read password: {e}")))?;
    if value.is_empty() {
        return Err(PetsafeError::Internal("empty password not allowed".to_string()));
    }
    Ok(SecretString::from(value))
}
