// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PetSafe - track your pets from the command line.
//!
//! Signs in once, keeps the credential in a local database and forwards
//! every command to the PetSafe service. `petsafe web` serves the browser
//! front end instead.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod cli;
mod commands;
mod logging;
mod prompt;

use std::sync::{Arc, RwLock};

use clap::Parser;
use colored::Colorize;
use petsafe_client::{HttpTransport, PetsafeClient};
use petsafe_config::PetsafeConfig;
use petsafe_core::{PetsafeError, Transport};
use petsafe_session::{CredentialStore, SqlitePersistence};
use petsafe_web::{ServerConfig, WebState};
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::commands::App;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match petsafe_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            petsafe_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let secrets = Arc::new(RwLock::new(Vec::new()));
    logging::init_tracing(&config.logging.level, secrets.clone());

    let Some(command) = cli.command else {
        println!("petsafe: use --help for available commands");
        return;
    };

    if let Err(e) = run(&config, command, secrets).await {
        eprintln!("{}: {}", "error".red(), commands::describe_error(&e));
        std::process::exit(1);
    }
}

async fn run(
    config: &PetsafeConfig,
    command: Commands,
    secrets: petsafe_security::SecretList,
) -> Result<(), PetsafeError> {
    if let Commands::Config = command {
        let rendered = petsafe_config::render_toml(config)
            .map_err(|e| PetsafeError::Config(e.to_string()))?;
        print!("{rendered}");
        return Ok(());
    }

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::from_config(&config.upstream)?);

    if let Commands::Web = command {
        let state = WebState::from_config(transport, &config.web);
        info!(upstream = %config.upstream.base_url, "starting web front end");
        return petsafe_web::start_server(&ServerConfig::from(&config.web), state).await;
    }

    let persistence = SqlitePersistence::open(&config.session.database_path).await?;
    let store = Arc::new(CredentialStore::new(Arc::new(persistence)));
    store.restore().await?;

    let app = App::new(PetsafeClient::new(transport, store), secrets);
    let output = commands::execute(&app, command).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
