// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed wrappers, one per upstream resource.

mod alerts;
mod devices;
mod geofence;
mod pets;
mod profile;

pub use alerts::Alerts;
pub use devices::Devices;
pub use geofence::GeofenceApi;
pub use pets::Pets;
pub use profile::Profile;
