// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use petsafe_core::ApiError;
use petsafe_model::{Pet, PetRequest};

use crate::client::PetsafeClient;
use crate::request::ApiRequest;

/// `/pets` operations.
pub struct Pets<'a> {
    client: &'a PetsafeClient,
}

impl<'a> Pets<'a> {
    pub(crate) fn new(client: &'a PetsafeClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Pet>, ApiError> {
        self.client
            .fetch_list(ApiRequest::get("/pets").fallback("Could not load your pets."))
            .await
    }

    pub async fn get(&self, id: u64) -> Result<Pet, ApiError> {
        self.client
            .fetch_one(ApiRequest::get(format!("/pets/{id}")).fallback("Pet not found."))
            .await
    }

    pub async fn create(&self, pet: &PetRequest) -> Result<Pet, ApiError> {
        let request = ApiRequest::post("/pets")
            .json(pet)?
            .fallback("Invalid pet data. Check the information.");
        self.client.fetch_one(request).await
    }

    pub async fn update(&self, id: u64, changes: &PetRequest) -> Result<Pet, ApiError> {
        let request = ApiRequest::patch(format!("/pets/{id}"))
            .json(changes)?
            .fallback("Could not update the pet.");
        self.client.fetch_one(request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), ApiError> {
        self.client
            .execute(ApiRequest::delete(format!("/pets/{id}")).fallback("Could not delete the pet."))
            .await
    }
}
