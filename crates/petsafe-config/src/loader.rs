// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Merge order (later overrides earlier):
//! 1. Compiled defaults
//! 2. `/etc/petsafe/petsafe.toml`
//! 3. `~/.config/petsafe/petsafe.toml`
//! 4. `./petsafe.toml`
//! 5. `PETSAFE_*` environment variables

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::PetsafeConfig;
use crate::CONFIG_FILE_NAME;

/// Sections of [`PetsafeConfig`]; used to map env var names onto keys.
const SECTIONS: &[&str] = &["upstream", "session", "web", "logging"];

/// Config files of the hierarchy, lowest precedence first.
pub fn hierarchy_paths() -> Vec<PathBuf> {
    let mut paths = vec![Path::new("/etc/petsafe").join(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("petsafe").join(CONFIG_FILE_NAME));
    }
    paths.push(PathBuf::from(CONFIG_FILE_NAME));
    paths
}

/// Build the full layered Figment without extracting it.
pub fn build_figment() -> Figment {
    hierarchy_paths()
        .into_iter()
        .fold(
            Figment::new().merge(Serialized::defaults(PetsafeConfig::default())),
            |figment, path| figment.merge(Toml::file(path)),
        )
        .merge(env_provider())
}

/// Load configuration from the XDG hierarchy with env var overrides.
pub fn load_config() -> Result<PetsafeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PetsafeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PetsafeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from one file, with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PetsafeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PetsafeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// `PETSAFE_UPSTREAM_BASE_URL` -> `upstream.base_url`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// keys that contain underscores themselves stay intact. Variables outside
/// the known sections (such as `PETSAFE_PASSWORD`) are not configuration.
fn env_provider() -> Env {
    Env::prefixed("PETSAFE_")
        .filter(|key| section_key(key.as_str()).is_some())
        .map(|key| {
            section_key(key.as_str())
                .unwrap_or_else(|| key.as_str().to_ascii_lowercase())
                .into()
        })
}

fn section_key(key: &str) -> Option<String> {
    let key = key.to_ascii_lowercase();
    SECTIONS.iter().find_map(|section| {
        key.strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|rest| !rest.is_empty())
            .map(|rest| format!("{section}.{rest}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_overrides_nested_key_with_underscores() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PETSAFE_UPSTREAM_BASE_URL", "https://pets.example.com");
            jail.set_env("PETSAFE_UPSTREAM_REQUEST_TIMEOUT_SECS", "12");
            let config: PetsafeConfig = Figment::new()
                .merge(Serialized::defaults(PetsafeConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.upstream.base_url, "https://pets.example.com");
            assert_eq!(config.upstream.request_timeout_secs, 12);
            Ok(())
        });
    }

    #[test]
    fn non_section_variables_are_ignored() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PETSAFE_PASSWORD", "hunter22");
            jail.set_env("PETSAFE_WEB_PORT", "4000");
            let config: PetsafeConfig = Figment::new()
                .merge(Serialized::defaults(PetsafeConfig::default()))
                .merge(env_provider())
                .extract()?;
            assert_eq!(config.web.port, 4000);
            Ok(())
        });
    }

    #[test]
    fn section_key_mapping() {
        assert_eq!(section_key("SESSION_DATABASE_PATH").as_deref(), Some("session.database_path"));
        assert_eq!(section_key("logging_level").as_deref(), Some("logging.level"));
        assert_eq!(section_key("PASSWORD"), None);
        assert_eq!(section_key("WEB_"), None);
    }

    #[test]
    fn local_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "custom.toml",
                r#"
[web]
port = 8081
"#,
            )?;
            let config = load_config_from_path(Path::new("custom.toml"))?;
            assert_eq!(config.web.port, 8081);
            assert_eq!(config.web.host, "127.0.0.1");
            Ok(())
        });
    }

    #[test]
    fn hierarchy_ends_with_local_file() {
        let paths = hierarchy_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from(CONFIG_FILE_NAME)));
        assert!(paths[0].starts_with("/etc/petsafe"));
    }
}
