// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use petsafe_core::ApiError;
use petsafe_model::{Device, DeviceRequest, Location};

use crate::client::PetsafeClient;
use crate::request::ApiRequest;

/// `/devices` operations.
pub struct Devices<'a> {
    client: &'a PetsafeClient,
}

impl<'a> Devices<'a> {
    pub(crate) fn new(client: &'a PetsafeClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Device>, ApiError> {
        self.client
            .fetch_list(ApiRequest::get("/devices").fallback("Could not load your devices."))
            .await
    }

    /// The device record with its latest reported state (battery, position,
    /// last contact). The upstream has no other single-device read.
    pub async fn status(&self, id: u64) -> Result<Device, ApiError> {
        self.client
            .fetch_one(
                ApiRequest::get(format!("/devices/{id}/status"))
                    .fallback("Could not load the device status."),
            )
            .await
    }

    /// Most recent `limit` position reports, newest first.
    pub async fn locations(&self, id: u64, limit: u32) -> Result<Vec<Location>, ApiError> {
        self.client
            .fetch_list(
                ApiRequest::get(format!("/devices/{id}/locations/{limit}"))
                    .fallback("Could not load the location history."),
            )
            .await
    }

    pub async fn create(&self, device: &DeviceRequest) -> Result<Device, ApiError> {
        let request = ApiRequest::post("/devices")
            .json(device)?
            .fallback("Invalid data or duplicate serial number. Check the information.");
        self.client.fetch_one(request).await
    }

    pub async fn update(&self, id: u64, changes: &DeviceRequest) -> Result<Device, ApiError> {
        let request = ApiRequest::patch(format!("/devices/{id}"))
            .json(changes)?
            .fallback("Could not update the device.");
        self.client.fetch_one(request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client
            .execute(
                ApiRequest::delete(format!("/devices/{id}")).fallback("Could not delete the device."),
            )
            .await
    }
}
