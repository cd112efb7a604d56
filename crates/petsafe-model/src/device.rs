// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tracker device as returned by the upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: u64,
    pub serial_number: String,
    #[serde(default)]
    pub imei: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub firmware: String,
    #[serde(default)]
    pub owner_id: u64,
    #[serde(default)]
    pub pet_id: Option<u64>,
    #[serde(default)]
    pub connectivity: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub last_comm: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_latitude: Option<f64>,
    #[serde(default)]
    pub last_longitude: Option<f64>,
    #[serde(default)]
    pub battery_percent: Option<f32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Device {
    /// Last reported position, when both coordinates are known.
    pub fn last_position(&self) -> Option<(f64, f64)> {
        self.last_latitude.zip(self.last_longitude)
    }
}

/// Create/update body for `/devices`. Unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imei: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firmware: Option<String>,
    /// Pet to link. The upstream ignores `null` here, so a device can be
    /// moved to another pet but not unlinked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connectivity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

/// One position report of a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: u64,
    pub device_id: u64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<f32>,
    #[serde(default)]
    pub speed: Option<f32>,
    #[serde(default)]
    pub heading: Option<f32>,
    /// Device-side timestamp (epoch milliseconds).
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
}
