// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session cookie handling.

use std::sync::Arc;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use petsafe_client::PetsafeClient;
use petsafe_core::{ApiError, SessionId};
use petsafe_session::CredentialStore;

use crate::server::WebState;

/// Session id carried by the request's cookie, if any.
pub fn session_id(state: &WebState, jar: &CookieJar) -> Option<SessionId> {
    jar.get(&state.cookie_name)
        .map(|cookie| cookie.value().trim())
        .filter(|value| !value.is_empty())
        .map(|value| SessionId(value.to_string()))
}

/// Client bound to the caller's existing session.
///
/// A missing cookie or an unknown session is the same as having no
/// credential: the call fails as unauthenticated without reaching upstream.
pub fn signed_in_client(state: &WebState, jar: &CookieJar) -> Result<PetsafeClient, ApiError> {
    let store = session_id(state, jar)
        .and_then(|id| state.sessions.get(&id))
        .ok_or_else(ApiError::not_signed_in)?;
    Ok(PetsafeClient::new(state.transport.clone(), store))
}

/// Unregistered session for a sign-in. It is only registered once the
/// sign-in succeeds, so an id the browser already had is never reused.
pub fn new_session() -> (SessionId, Arc<CredentialStore>) {
    (SessionId::generate(), Arc::new(CredentialStore::in_memory()))
}

/// Client for calls that carry no credential.
pub fn anonymous_client(state: &WebState) -> PetsafeClient {
    PetsafeClient::new(state.transport.clone(), Arc::new(CredentialStore::in_memory()))
}

pub fn session_cookie(state: &WebState, id: &SessionId) -> Cookie<'static> {
    Cookie::build((state.cookie_name.to_string(), id.as_str().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

pub fn removal_cookie(state: &WebState) -> Cookie<'static> {
    Cookie::build((state.cookie_name.to_string(), "")).path("/").build()
}
