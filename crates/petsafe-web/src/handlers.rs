// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers.
//!
//! Every handler forwards to the upstream with the caller's session
//! credential. Tokens are never included in a response.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use petsafe_client::{AuthManager, NotificationRegistrar, PetsafeClient};
use petsafe_core::{PetsafeError, UserSnapshot};
use petsafe_model::{
    Alert, Device, DeviceRequest, Geofence, GeofenceRequest, Location, PasswordChange, Pet,
    PetRequest, ProfileUpdate, RegisterRequest,
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::error::{ErrorResponse, WebError};
use crate::form::FormInput;
use crate::server::WebState;
use crate::session::{
    anonymous_client, new_session, removal_cookie, session_cookie, session_id, signed_in_client,
};

type WebResult<T> = Result<T, WebError>;

/// Location history size when the browser does not ask for one.
pub const DEFAULT_LOCATION_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct PushTokenForm {
    pub fcm_token: String,
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: u64,
}

pub async fn health() -> Json<Value> {
    Json(json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

/// POST /login
///
/// Signs in under a new session id and answers with the principal only.
/// The session the browser came with, if any, is destroyed once the new one
/// exists. A refused e-mail/password pair is a 401 with the message to show,
/// not a redirect, and leaves the previous session as it was.
pub async fn login(
    State(state): State<WebState>,
    jar: CookieJar,
    Json(form): Json<LoginForm>,
) -> WebResult<Response> {
    let (id, store) = new_session();
    let client = PetsafeClient::new(state.transport.clone(), store.clone());
    let credential = match AuthManager::new(client)
        .login(&form.email, SecretString::from(form.password))
        .await
    {
        Ok(credential) => credential,
        Err(PetsafeError::Api(err)) if err.is_unauthenticated() => {
            let body = ErrorResponse { error: err.message };
            return Ok((StatusCode::UNAUTHORIZED, Json(body)).into_response());
        }
        Err(e) => return Err(e.into()),
    };
    state.sessions.insert(id.clone(), store);
    if let Some(previous) = session_id(&state, &jar) {
        state.sessions.invalidate(&previous).await?;
    }
    let jar = jar.add(session_cookie(&state, &id));
    Ok((jar, Json(credential.principal)).into_response())
}

/// POST /register
pub async fn register(
    State(state): State<WebState>,
    Json(form): Json<RegisterForm>,
) -> WebResult<(StatusCode, Json<UserSnapshot>)> {
    let request = RegisterRequest {
        email: form.email.trim().to_string(),
        password: SecretString::from(form.password),
        full_name: form.full_name.filter(|n| !n.trim().is_empty()),
        phone: form.phone.filter(|p| !p.trim().is_empty()),
    };
    let user = AuthManager::new(anonymous_client(&state)).register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /logout
///
/// Destroys the session's store. Always succeeds from the browser's view.
pub async fn logout(State(state): State<WebState>, jar: CookieJar) -> WebResult<(CookieJar, StatusCode)> {
    if let Some(id) = session_id(&state, &jar) {
        state.sessions.invalidate(&id).await?;
        info!("session signed out");
    }
    Ok((jar.remove(removal_cookie(&state)), StatusCode::NO_CONTENT))
}

pub async fn get_profile(State(state): State<WebState>, jar: CookieJar) -> WebResult<Json<UserSnapshot>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.profile().get().await?))
}

/// PATCH /me
///
/// Absent or blank fields stay unchanged; `null` clears the field.
pub async fn update_profile(
    State(state): State<WebState>,
    jar: CookieJar,
    Json(update): Json<ProfileUpdate>,
) -> WebResult<Json<UserSnapshot>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.profile().update(&update.normalized()).await?))
}

pub async fn change_password(
    State(state): State<WebState>,
    jar: CookieJar,
    Json(form): Json<PasswordForm>,
) -> WebResult<StatusCode> {
    let client = signed_in_client(&state, &jar)?;
    let change = PasswordChange {
        current_password: SecretString::from(form.current_password),
        new_password: SecretString::from(form.new_password),
    };
    client.profile().change_password(&change).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /me/push-token
///
/// Accepted immediately; the upstream registration runs in the background.
pub async fn register_push_token(
    State(state): State<WebState>,
    jar: CookieJar,
    Json(form): Json<PushTokenForm>,
) -> WebResult<StatusCode> {
    let client = signed_in_client(&state, &jar)?;
    NotificationRegistrar::new(client).spawn_register(form.fcm_token);
    Ok(StatusCode::ACCEPTED)
}

pub async fn list_pets(State(state): State<WebState>, jar: CookieJar) -> WebResult<Json<Vec<Pet>>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.pets().list().await?))
}

pub async fn get_pet(
    State(state): State<WebState>,
    jar: CookieJar,
    Path(id): Path<u64>,
) -> WebResult<Json<Pet>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.pets().get(id).await?))
}

pub async fn create_pet(
    State(state): State<WebState>,
    jar: CookieJar,
    Json(pet): Json<PetRequest>,
) -> WebResult<(StatusCode, Json<Pet>)> {
    let client = signed_in_client(&state, &jar)?;
    Ok((StatusCode::CREATED, Json(client.pets().create(&pet.normalized()).await?)))
}

pub async fn update_pet(
    State(state): State<WebState>,
    jar: CookieJar,
    Path(id): Path<u64>,
    Json(changes): Json<PetRequest>,
) -> WebResult<Json<Pet>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.pets().update(id, &changes.normalized()).await?))
}

pub async fn delete_pet(
    State(state): State<WebState>,
    jar: CookieJar,
    Path(id): Path<u64>,
) -> WebResult<StatusCode> {
    let client = signed_in_client(&state, &jar)?;
    client.pets().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_devices(State(state): State<WebState>, jar: CookieJar) -> WebResult<Json<Vec<Device>>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.devices().list().await?))
}

pub async fn device_status(
    State(state): State<WebState>,
    jar: CookieJar,
    Path(id): Path<u64>,
) -> WebResult<Json<Device>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.devices().status(id).await?))
}

pub async fn device_locations(
    State(state): State<WebState>,
    jar: CookieJar,
    Path(id): Path<u64>,
    Query(query): Query<LocationQuery>,
) -> WebResult<Json<Vec<Location>>> {
    let client = signed_in_client(&state, &jar)?;
    let limit = query.limit.unwrap_or(DEFAULT_LOCATION_LIMIT);
    Ok(Json(client.devices().locations(id, limit).await?))
}

pub async fn create_device(
    State(state): State<WebState>,
    jar: CookieJar,
    Json(device): Json<DeviceRequest>,
) -> WebResult<(StatusCode, Json<Device>)> {
    let client = signed_in_client(&state, &jar)?;
    Ok((StatusCode::CREATED, Json(client.devices().create(&device.normalized()).await?)))
}

pub async fn update_device(
    State(state): State<WebState>,
    jar: CookieJar,
    Path(id): Path<u64>,
    Json(changes): Json<DeviceRequest>,
) -> WebResult<Json<Device>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.devices().update(id, &changes.normalized()).await?))
}

pub async fn delete_device(
    State(state): State<WebState>,
    jar: CookieJar,
    Path(id): Path<u64>,
) -> WebResult<StatusCode> {
    let client = signed_in_client(&state, &jar)?;
    client.devices().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /geofence
///
/// `null` when the owner has none.
pub async fn get_geofence(
    State(state): State<WebState>,
    jar: CookieJar,
) -> WebResult<Json<Option<Geofence>>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.geofence().get().await?))
}

pub async fn create_geofence(
    State(state): State<WebState>,
    jar: CookieJar,
    Json(geofence): Json<GeofenceRequest>,
) -> WebResult<(StatusCode, Json<Geofence>)> {
    let client = signed_in_client(&state, &jar)?;
    Ok((StatusCode::CREATED, Json(client.geofence().create(&geofence.normalized()).await?)))
}

pub async fn update_geofence(
    State(state): State<WebState>,
    jar: CookieJar,
    Json(changes): Json<GeofenceRequest>,
) -> WebResult<Json<Geofence>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.geofence().update(&changes.normalized()).await?))
}

pub async fn delete_geofence(State(state): State<WebState>, jar: CookieJar) -> WebResult<StatusCode> {
    let client = signed_in_client(&state, &jar)?;
    client.geofence().delete().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_alerts(State(state): State<WebState>, jar: CookieJar) -> WebResult<Json<Vec<Alert>>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.alerts().list().await?))
}

pub async fn unread_alerts(State(state): State<WebState>, jar: CookieJar) -> WebResult<Json<CountResponse>> {
    let client = signed_in_client(&state, &jar)?;
    let count = client.alerts().unread_count().await?;
    Ok(Json(CountResponse { count }))
}

pub async fn mark_alert_read(
    State(state): State<WebState>,
    jar: CookieJar,
    Path(id): Path<u64>,
) -> WebResult<Json<Alert>> {
    let client = signed_in_client(&state, &jar)?;
    Ok(Json(client.alerts().mark_read(id).await?))
}

pub async fn mark_all_alerts_read(
    State(state): State<WebState>,
    jar: CookieJar,
) -> WebResult<impl IntoResponse> {
    let client = signed_in_client(&state, &jar)?;
    let message = client.alerts().mark_all_read().await?;
    Ok(Json(json!({"message": message})))
}
