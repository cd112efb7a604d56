// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Web server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, patch, post},
};
use petsafe_config::model::WebConfig;
use petsafe_core::{PetsafeError, Transport};
use petsafe_session::SessionRegistry;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::handlers;

/// Longest pause between two idle-session sweeps.
const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct WebState {
    /// Upstream transport shared by every session.
    pub transport: Arc<dyn Transport>,
    /// One credential store per browser session.
    pub sessions: Arc<SessionRegistry>,
    /// Name of the cookie carrying the session id.
    pub cookie_name: Arc<str>,
}

impl WebState {
    /// State whose sessions only end on logout.
    pub fn new(transport: Arc<dyn Transport>, cookie_name: &str) -> Self {
        Self::with_sessions(transport, cookie_name, SessionRegistry::new())
    }

    /// State for the configured cookie and session idle timeout.
    pub fn from_config(transport: Arc<dyn Transport>, config: &WebConfig) -> Self {
        let sessions =
            SessionRegistry::with_idle_timeout(Duration::from_secs(config.session_idle_secs));
        Self::with_sessions(transport, &config.cookie_name, sessions)
    }

    fn with_sessions(transport: Arc<dyn Transport>, cookie_name: &str, sessions: SessionRegistry) -> Self {
        Self {
            transport,
            sessions: Arc::new(sessions),
            cookie_name: Arc::from(cookie_name),
        }
    }
}

/// Bind address of the web server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl From<&WebConfig> for ServerConfig {
    fn from(config: &WebConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
        }
    }
}

/// All routes, with state attached.
pub fn router(state: WebState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/logout", post(handlers::logout))
        .route("/me", get(handlers::get_profile).patch(handlers::update_profile))
        .route("/me/password", patch(handlers::change_password))
        .route("/me/push-token", post(handlers::register_push_token))
        .route("/pets", get(handlers::list_pets).post(handlers::create_pet))
        .route(
            "/pets/{id}",
            get(handlers::get_pet)
                .patch(handlers::update_pet)
                .delete(handlers::delete_pet),
        )
        .route("/devices", get(handlers::list_devices).post(handlers::create_device))
        .route(
            "/devices/{id}",
            patch(handlers::update_device).delete(handlers::delete_device),
        )
        .route("/devices/{id}/status", get(handlers::device_status))
        .route("/devices/{id}/locations", get(handlers::device_locations))
        .route(
            "/geofence",
            get(handlers::get_geofence)
                .post(handlers::create_geofence)
                .patch(handlers::update_geofence)
                .delete(handlers::delete_geofence),
        )
        .route("/alerts", get(handlers::list_alerts))
        .route("/alerts/count", get(handlers::unread_alerts))
        .route("/alerts/read-all", patch(handlers::mark_all_alerts_read))
        .route("/alerts/{id}/read", patch(handlers::mark_alert_read))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Periodically evict sessions idle past the registry's timeout.
///
/// Returns `None` when sessions never expire.
pub fn spawn_idle_sweep(sessions: Arc<SessionRegistry>) -> Option<JoinHandle<()>> {
    let period = sessions.idle_timeout()?.min(MAX_SWEEP_INTERVAL);
    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        // Skip the first immediate tick.
        interval.tick().await;
        loop {
            interval.tick().await;
            if let Err(e) = sessions.evict_idle().await {
                warn!(error = %e, "idle session sweep failed");
            }
        }
    }))
}

/// Bind to `config.host:config.port` and serve until the process ends.
pub async fn start_server(config: &ServerConfig, state: WebState) -> Result<(), PetsafeError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PetsafeError::Internal(format!("failed to bind web server to {addr}: {e}")))?;

    tracing::info!("web server listening on {addr}");

    let sweep = spawn_idle_sweep(state.sessions.clone());
    let served = axum::serve(listener, router(state))
        .await
        .map_err(|e| PetsafeError::Internal(format!("web server error: {e}")));
    if let Some(sweep) = sweep {
        sweep.abort();
    }
    served
}

#[cfg(test)]
mod tests {
    use super::*;
    use petsafe_core::SessionId;
    use petsafe_test_utils::{MockTransport, fixtures};

    #[test]
    fn server_config_from_web_config() {
        let config = ServerConfig::from(&WebConfig::default());
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn configured_state_expires_sessions() {
        let config = WebConfig {
            session_idle_secs: 90,
            ..WebConfig::default()
        };
        let state = WebState::from_config(Arc::new(MockTransport::new()), &config);
        assert_eq!(state.sessions.idle_timeout(), Some(Duration::from_secs(90)));
        assert_eq!(&*state.cookie_name, "petsafe_session");
    }

    #[test]
    fn no_sweep_without_timeout() {
        assert!(spawn_idle_sweep(Arc::new(SessionRegistry::new())).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_evicts_abandoned_sessions() {
        let sessions = Arc::new(SessionRegistry::with_idle_timeout(Duration::from_secs(30)));
        let store = sessions.get_or_create(&SessionId("gone".into()));
        store.save(fixtures::credential(4)).await.unwrap();
        let sweep = spawn_idle_sweep(sessions.clone()).unwrap();

        tokio::time::sleep(Duration::from_secs(65)).await;
        assert!(sessions.is_empty());
        assert!(!store.is_signed_in());
        sweep.abort();
    }
}
