// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand execution against the device-local credential store.
//!
//! Every command returns the text to print instead of printing it, so the
//! same code paths are exercised by the tests.

use colored::Colorize;
use petsafe_client::{AuthManager, NotificationRegistrar, PetsafeClient};
use petsafe_core::{ApiError, PetsafeError, UserSnapshot};
use petsafe_model::{PasswordChange, RegisterRequest};
use petsafe_security::{RedactingWriter, SecretList};
use serde::Serialize;
use tracing::debug;

use crate::cli::{AlertCommand, Commands, DeviceCommand, GeofenceCommand, PetCommand, ProfileCommand};
use crate::prompt;

/// Everything a command needs.
pub struct App {
    pub client: PetsafeClient,
    pub secrets: SecretList,
}

impl App {
    pub fn new(client: PetsafeClient, secrets: SecretList) -> Self {
        let app = Self { client, secrets };
        app.track_credential();
        app
    }

    /// Make the held tokens known to the log redactor.
    fn track_credential(&self) {
        if let Some(credential) = self.client.current_credential() {
            RedactingWriter::<std::io::Stderr>::add_secret(&self.secrets, credential.access_token.clone());
            if let Some(refresh) = &credential.refresh_token {
                RedactingWriter::<std::io::Stderr>::add_secret(&self.secrets, refresh.clone());
            }
        }
    }

    fn auth(&self) -> AuthManager {
        AuthManager::new(self.client.clone())
    }
}

/// Run one subcommand. `Web` and `Config` are handled by `main`.
pub async fn execute(app: &App, command: Commands) -> Result<String, PetsafeError> {
    match command {
        Commands::Login { email } => {
            let password = prompt::get_password()?;
            let credential = app.auth().login(&email, password).await?;
            app.track_credential();
            Ok(format!("{} {}", "Signed in as".green(), describe(&credential.principal)))
        }
        Commands::Register(args) => {
            let password = prompt::get_password()?;
            let user = app
                .auth()
                .register(RegisterRequest {
                    email: args.email.trim().to_string(),
                    password,
                    full_name: args.full_name,
                    phone: args.phone,
                })
                .await?;
            Ok(format!(
                "{} {}. Sign in with `petsafe login`.",
                "Account created for".green(),
                user.email
            ))
        }
        Commands::Logout => {
            app.auth().logout().await?;
            RedactingWriter::<std::io::Stderr>::clear_secrets(&app.secrets);
            Ok("Signed out.".to_string())
        }
        Commands::Whoami => {
            let credential = app.client.current_credential().ok_or_else(ApiError::not_signed_in)?;
            Ok(describe(&credential.principal))
        }
        Commands::Profile(command) => profile(app, command).await,
        Commands::Pets(command) => pets(app, command).await,
        Commands::Devices(command) => devices(app, command).await,
        Commands::Geofence(command) => geofence(app, command).await,
        Commands::Alerts(command) => alerts(app, command).await,
        Commands::PushToken { token } => {
            if NotificationRegistrar::new(app.client.clone()).register(&token).await {
                Ok("Push token registered.".to_string())
            } else {
                Ok("Push token was not registered; see the log for details.".to_string())
            }
        }
        Commands::Web | Commands::Config => Err(PetsafeError::Internal(
            "command needs no credential store".to_string(),
        )),
    }
}

async fn profile(app: &App, command: ProfileCommand) -> Result<String, PetsafeError> {
    let profile = app.client.profile();
    match command {
        ProfileCommand::Show => render(&profile.get().await?),
        ProfileCommand::Update(args) => {
            let update = args.to_update();
            if update.is_empty() {
                return Ok("Nothing to change.".to_string());
            }
            render(&profile.update(&update).await?)
        }
        ProfileCommand::Password => {
            let change = PasswordChange {
                current_password: prompt::read_secret("Current password: ")?,
                new_password: prompt::read_secret("New password: ")?,
            };
            profile.change_password(&change).await?;
            Ok("Password changed.".to_string())
        }
    }
}

async fn pets(app: &App, command: PetCommand) -> Result<String, PetsafeError> {
    let pets = app.client.pets();
    match command {
        PetCommand::List => render(&pets.list().await?),
        PetCommand::Show { id } => render(&pets.get(id).await?),
        PetCommand::Add(args) => render(&pets.create(&args.to_request()).await?),
        PetCommand::Update { id, changes } => render(&pets.update(id, &changes.to_request()).await?),
        PetCommand::Remove { id } => {
            pets.delete(id).await?;
            Ok(format!("Pet {id} removed."))
        }
    }
}

async fn devices(app: &App, command: DeviceCommand) -> Result<String, PetsafeError> {
    let devices = app.client.devices();
    match command {
        DeviceCommand::List => render(&devices.list().await?),
        DeviceCommand::Status { id } => render(&devices.status(id).await?),
        DeviceCommand::Locations { id, limit } => render(&devices.locations(id, limit).await?),
        DeviceCommand::Add(args) => render(&devices.create(&args.to_request()).await?),
        DeviceCommand::Update { id, changes } => {
            render(&devices.update(id, &changes.to_request()).await?)
        }
        DeviceCommand::Remove { id } => {
            devices.delete(id).await?;
            Ok(format!("Device {id} removed."))
        }
    }
}

async fn geofence(app: &App, command: GeofenceCommand) -> Result<String, PetsafeError> {
    let geofence = app.client.geofence();
    match command {
        GeofenceCommand::Show => match geofence.get().await? {
            Some(zone) => render(&zone),
            None => Ok("No safe zone configured.".to_string()),
        },
        GeofenceCommand::Create(args) => render(&geofence.create(&args.to_request()).await?),
        GeofenceCommand::Update(args) => render(&geofence.update(&args.to_request()).await?),
        GeofenceCommand::Remove => {
            geofence.delete().await?;
            Ok("Safe zone removed.".to_string())
        }
    }
}

async fn alerts(app: &App, command: AlertCommand) -> Result<String, PetsafeError> {
    let alerts = app.client.alerts();
    match command {
        AlertCommand::List => render(&alerts.list().await?),
        AlertCommand::Count => Ok(format!("{} unread", alerts.unread_count().await?)),
        AlertCommand::Read { id } => render(&alerts.mark_read(id).await?),
        AlertCommand::ReadAll => Ok(alerts
            .mark_all_read()
            .await?
            .unwrap_or_else(|| "All alerts marked as read.".to_string())),
    }
}

fn describe(user: &UserSnapshot) -> String {
    if user.full_name.is_empty() {
        user.email.clone()
    } else {
        format!("{} <{}>", user.full_name, user.email)
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, PetsafeError> {
    debug!("rendering response");
    serde_json::to_string_pretty(value)
        .map_err(|e| PetsafeError::Internal(format!("failed to render response: {e}")))
}

/// One-line, end-user description of a failure.
pub fn describe_error(err: &PetsafeError) -> String {
    match err {
        PetsafeError::Api(api) if api.is_unauthenticated() => {
            format!("{} Run `petsafe login` to sign in.", api.message)
        }
        PetsafeError::Api(api) => api.message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, PetArgs};
    use clap::Parser;
    use petsafe_core::ErrorKind;
    use petsafe_session::CredentialStore;
    use petsafe_test_utils::{MockTransport, fixtures};
    use serde_json::json;
    use std::sync::{Arc, RwLock};

    async fn app(signed_in: bool) -> (Arc<MockTransport>, App) {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(CredentialStore::in_memory());
        if signed_in {
            store.save(fixtures::credential(1)).await.unwrap();
        }
        let client = PetsafeClient::new(transport.clone(), store);
        let app = App::new(client, Arc::new(RwLock::new(Vec::new())));
        (transport, app)
    }

    fn command(args: &[&str]) -> Commands {
        Cli::try_parse_from(args).unwrap().command.unwrap()
    }

    #[tokio::test]
    async fn held_tokens_are_registered_for_redaction() {
        let (_, app) = app(true).await;
        let secrets = app.secrets.read().unwrap().clone();
        assert!(secrets.contains(&fixtures::ACCESS_TOKEN.to_string()));
        assert!(secrets.contains(&fixtures::REFRESH_TOKEN.to_string()));
    }

    #[tokio::test]
    async fn whoami_reads_cache_only() {
        let (transport, app) = app(true).await;
        let out = execute(&app, Commands::Whoami).await.unwrap();
        assert_eq!(out, "Owner 1 <owner1@example.com>");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn whoami_signed_out() {
        let (_, app) = app(false).await;
        let err = execute(&app, Commands::Whoami).await.unwrap_err();
        assert_eq!(err.api_kind(), Some(ErrorKind::Unauthenticated));
        assert!(describe_error(&err).contains("petsafe login"));
    }

    #[tokio::test]
    async fn logout_forgets_credential_and_secrets() {
        let (transport, app) = app(true).await;
        execute(&app, Commands::Logout).await.unwrap();
        assert!(app.client.current_credential().is_none());
        assert!(app.secrets.read().unwrap().is_empty());

        let err = execute(&app, command(&["petsafe", "pets", "list"])).await.unwrap_err();
        assert_eq!(err.api_kind(), Some(ErrorKind::Unauthenticated));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn pet_add_renders_created_pet() {
        let (transport, app) = app(true).await;
        transport
            .push_json(201, json!({"data": fixtures::pet_json(3, "Mia")}))
            .await;
        let args = PetArgs {
            name: Some("Mia".into()),
            ..Default::default()
        };
        let out = execute(&app, Commands::Pets(PetCommand::Add(args))).await.unwrap();
        assert!(out.contains("\"name\": \"Mia\""));
        assert_eq!(
            transport.last_request().await.unwrap().body,
            Some(json!({"name": "Mia"}))
        );
    }

    #[tokio::test]
    async fn empty_profile_update_sends_nothing() {
        let (transport, app) = app(true).await;
        let out = execute(&app, command(&["petsafe", "profile", "update"])).await.unwrap();
        assert_eq!(out, "Nothing to change.");
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn missing_geofence_message() {
        let (transport, app) = app(true).await;
        transport.push_json(404, json!({"error": "not found"})).await;
        let out = execute(&app, command(&["petsafe", "geofence", "show"])).await.unwrap();
        assert_eq!(out, "No safe zone configured.");
    }

    #[tokio::test]
    async fn alert_count() {
        let (transport, app) = app(true).await;
        transport.push_json(200, json!({"count": 2})).await;
        let out = execute(&app, command(&["petsafe", "alerts", "count"])).await.unwrap();
        assert_eq!(out, "2 unread");
    }

    #[tokio::test]
    async fn push_token_failure_is_reported_not_raised() {
        let (transport, app) = app(true).await;
        transport.push_json(500, json!({"error": "boom"})).await;
        let out = execute(&app, command(&["petsafe", "push-token", "tok"])).await.unwrap();
        assert!(out.contains("not registered"));
    }

    #[test]
    fn rejected_error_shows_upstream_text() {
        let err = PetsafeError::Api(ApiError::rejected(400, "Pet not found!", None, String::new()));
        assert_eq!(describe_error(&err), "Pet not found!");
    }
}
