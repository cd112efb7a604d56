// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An alert raised for one of the owner's devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u64,
    pub device_id: u64,
    #[serde(default)]
    pub geofence_id: Option<u64>,
    #[serde(default)]
    pub event_id: Option<u64>,
    pub alert_type: String,
    pub alert_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub acknowledged_by: Option<u64>,
    #[serde(default)]
    pub acknowledged_at: Option<DateTime<Utc>>,
    /// Name of the pet linked to the device, when there is one.
    #[serde(default)]
    pub pet_name: Option<String>,
}

impl Alert {
    pub fn is_read(&self) -> bool {
        self.acknowledged_at.is_some()
    }
}

/// `GET /alerts/count` body (not enveloped).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AlertCount {
    pub count: u64,
}

/// `{"message": …}` acknowledgement bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatusMessage {
    #[serde(default)]
    pub message: Option<String>,
}
