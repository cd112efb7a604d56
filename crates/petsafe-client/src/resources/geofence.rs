// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use petsafe_core::ApiError;
use petsafe_model::{Geofence, GeofenceRequest};

use crate::client::PetsafeClient;
use crate::request::ApiRequest;

/// `/geofence` operations. An owner has at most one geofence.
pub struct GeofenceApi<'a> {
    client: &'a PetsafeClient,
}

impl<'a> GeofenceApi<'a> {
    pub(crate) fn new(client: &'a PetsafeClient) -> Self {
        Self { client }
    }

    /// The owner's geofence; `None` when none has been created (upstream 404).
    pub async fn get(&self) -> Result<Option<Geofence>, ApiError> {
        match self
            .client
            .fetch_data(ApiRequest::get("/geofence").fallback("Could not load the geofence."))
            .await
        {
            Err(e) if e.is_not_found() => Ok(None),
            other => other,
        }
    }

    pub async fn create(&self, geofence: &GeofenceRequest) -> Result<Geofence, ApiError> {
        let request = ApiRequest::post("/geofence")
            .json(geofence)?
            .fallback("Could not create the geofence.");
        self.client.fetch_one(request).await
    }

    pub async fn update(&self, changes: &GeofenceRequest) -> Result<Geofence, ApiError> {
        let request = ApiRequest::patch("/geofence")
            .json(changes)?
            .fallback("Could not update the geofence.");
        self.client.fetch_one(request).await
    }

    pub async fn delete(&self) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::delete("/geofence").fallback("Could not delete the geofence."))
            .await
    }
}
