// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The request builder: authentication, dispatch, classification.

use std::sync::Arc;

use petsafe_core::{ApiError, Credential, RawResponse, Transport};
use petsafe_model::Envelope;
use petsafe_session::CredentialStore;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::classify::{classify, decode};
use crate::request::{ApiRequest, AuthMode};
use crate::resources::{Alerts, Devices, GeofenceApi, Pets, Profile};

/// Client bound to one credential store.
///
/// Cheap to clone. The transport is shared across every client of the
/// process; the store belongs to one principal or browser session.
#[derive(Clone)]
pub struct PetsafeClient {
    transport: Arc<dyn Transport>,
    store: Arc<CredentialStore>,
}

impl std::fmt::Debug for PetsafeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetsafeClient")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl PetsafeClient {
    pub fn new(transport: Arc<dyn Transport>, store: Arc<CredentialStore>) -> Self {
        Self { transport, store }
    }

    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    pub fn current_credential(&self) -> Option<Arc<Credential>> {
        self.store.current()
    }

    pub fn authorization_header(&self) -> Option<String> {
        self.store.authorization_header()
    }

    /// Dispatch `request` and return the 2xx response, or the classified error.
    ///
    /// A request that needs a credential fails as `Unauthenticated` before
    /// anything is sent when the store is empty.
    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let authorization = match request.auth {
            AuthMode::Required => match self.store.authorization_header() {
                Some(header) => Some(header),
                None => {
                    debug!(path = %request.path, "no credential; request not sent");
                    return Err(ApiError::not_signed_in());
                }
            },
            AuthMode::Anonymous => None,
        };

        let method = request.method;
        let path = request.path.clone();
        let fallback = request.fallback.clone();
        let response = self
            .transport
            .execute(request.into_outbound(authorization))
            .await?;

        if response.is_success() {
            return Ok(response);
        }

        let err = classify(response, &fallback);
        warn!(
            %method,
            %path,
            kind = %err.kind,
            status = ?err.http_status,
            detail = err.detail.as_deref().unwrap_or(""),
            "upstream call failed"
        );
        Err(err)
    }

    /// Send and decode a bare (non-enveloped) JSON body.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        decode(self.send(request).await?)
    }

    /// Send and unwrap `{"data": …}`; `null` data yields `None`.
    pub async fn fetch_data<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Option<T>, ApiError> {
        Ok(self.fetch::<Envelope<T>>(request).await?.into_option())
    }

    /// Send and unwrap `{"data": …}`; missing data is an upstream fault.
    pub async fn fetch_one<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let status = response.status;
        let body = response.body.clone();
        decode::<Envelope<T>>(response)?
            .into_option()
            .ok_or_else(|| ApiError::upstream_fault(status, Some("response carried no data".into()), body))
    }

    /// Send and unwrap a list; `null` data yields an empty vector.
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Vec<T>, ApiError> {
        Ok(self.fetch::<Envelope<Vec<T>>>(request).await?.into_list())
    }

    /// Send and ignore the body of a successful response.
    pub async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    pub fn profile(&self) -> Profile<'_> {
        Profile::new(self)
    }

    pub fn pets(&self) -> Pets<'_> {
        Pets::new(self)
    }

    pub fn devices(&self) -> Devices<'_> {
        Devices::new(self)
    }

    pub fn geofence(&self) -> GeofenceApi<'_> {
        GeofenceApi::new(self)
    }

    pub fn alerts(&self) -> Alerts<'_> {
        Alerts::new(self)
    }
}
