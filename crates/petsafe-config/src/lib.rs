// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the PetSafe client proxy.
//!
//! TOML files are merged over compiled defaults following the XDG hierarchy,
//! `PETSAFE_*` environment variables override them, unknown keys are rejected,
//! and every problem is reported as a miette diagnostic with a typo
//! suggestion where one is close enough.
//!
//! # Usage
//!
//! ```no_run
//! use petsafe_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Upstream: {}", config.upstream.base_url);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::PetsafeConfig;

/// File name looked up in every directory of the hierarchy.
pub const CONFIG_FILE_NAME: &str = "petsafe.toml";

/// Load configuration from the XDG hierarchy and validate it.
///
/// Figment errors are converted into diagnostics (with source spans when the
/// offending file can be read back); semantic checks run only once the
/// configuration deserialized.
pub fn load_and_validate() -> Result<PetsafeConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load configuration from an explicit file and validate it.
pub fn load_and_validate_path(path: &std::path::Path) -> Result<PetsafeConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PetsafeConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Render the effective configuration as TOML, as it would be written to
/// `petsafe.toml`.
pub fn render_toml(config: &PetsafeConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

/// Read back every config file of the hierarchy that exists, for spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    loader::hierarchy_paths()
        .into_iter()
        .filter_map(|path| {
            std::fs::read_to_string(&path)
                .ok()
                .map(|content| (path.display().to_string(), content))
        })
        .collect()
}
