// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Browser form input.
//!
//! An edit form posts every text field, so a blank one means "no value",
//! never "erase it". Only a JSON `null` on a clearable field clears.

use petsafe_model::{DeviceRequest, GeofenceRequest, Patch, PetRequest, ProfileUpdate};

/// Body the browser sends, normalized before it goes upstream.
pub trait FormInput {
    /// Trim text fields and drop the blank ones.
    fn normalized(self) -> Self;
}

fn text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn text_patch(patch: Patch<String>) -> Patch<String> {
    match patch {
        Patch::Set(value) => Patch::from_form(&value),
        other => other,
    }
}

impl FormInput for ProfileUpdate {
    fn normalized(self) -> Self {
        Self {
            full_name: text_patch(self.full_name),
            phone: text_patch(self.phone),
        }
    }
}

impl FormInput for PetRequest {
    fn normalized(self) -> Self {
        Self {
            name: text(self.name),
            species: text(self.species),
            breed: text(self.breed),
            microchip_id: text(self.microchip_id),
            ..self
        }
    }
}

impl FormInput for DeviceRequest {
    fn normalized(self) -> Self {
        Self {
            serial_number: text(self.serial_number),
            imei: text(self.imei),
            model: text(self.model),
            firmware: text(self.firmware),
            connectivity: text(self.connectivity),
            ..self
        }
    }
}

impl FormInput for GeofenceRequest {
    fn normalized(self) -> Self {
        Self {
            name: text(self.name),
            ..self
        }
    }
}
