// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned values shaped like the upstream's.

use petsafe_core::{Credential, UserSnapshot};
use serde_json::{Value, json};

pub const ACCESS_TOKEN: &str = "test-access-token";
pub const REFRESH_TOKEN: &str = "test-refresh-token";

pub fn user(id: u64) -> UserSnapshot {
    UserSnapshot {
        id,
        email: format!("owner{id}@example.com"),
        full_name: format!("Owner {id}"),
        phone: None,
        created_at: None,
    }
}

pub fn credential(id: u64) -> Credential {
    Credential {
        access_token: ACCESS_TOKEN.to_string(),
        refresh_token: Some(REFRESH_TOKEN.to_string()),
        token_type: "Bearer".to_string(),
        principal: user(id),
    }
}

/// Body of a successful `POST /auth/login`.
pub fn login_body(id: u64) -> Value {
    json!({
        "access_token": ACCESS_TOKEN,
        "refresh_token": REFRESH_TOKEN,
        "user": {"id": id, "email": format!("owner{id}@example.com"), "full_name": format!("Owner {id}")}
    })
}

/// Body of `GET /me`.
pub fn profile_body(id: u64, full_name: &str, phone: &str) -> Value {
    json!({
        "data": {
            "id": id,
            "email": format!("owner{id}@example.com"),
            "full_name": full_name,
            "phone": phone,
            "created_at": "2025-01-10T09:00:00Z",
            "updated_at": "2025-02-01T09:00:00Z"
        }
    })
}

pub fn pet_json(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "owner_id": 1,
        "name": name,
        "species": "dog",
        "breed": "mixed",
        "dob": null,
        "microchip_id": "",
        "created_at": "2025-01-10T09:00:00Z"
    })
}

pub fn device_json(id: u64, serial: &str) -> Value {
    json!({
        "id": id,
        "serial_number": serial,
        "imei": "356938035643809",
        "model": "PS-1",
        "firmware": "1.2.0",
        "owner_id": 1,
        "pet_id": null,
        "connectivity": "lte",
        "active": true,
        "last_comm": null,
        "last_latitude": null,
        "last_longitude": null,
        "battery_percent": 87.0,
        "created_at": "2025-01-10T09:00:00Z"
    })
}

pub fn geofence_json(id: u64) -> Value {
    json!({
        "id": id,
        "owner_id": 1,
        "name": "Home",
        "latitude": -23.55,
        "longitude": -46.63,
        "radius_m": 200,
        "active": true,
        "created_at": "2025-01-10T09:00:00Z"
    })
}

pub fn alert_json(id: u64, read: bool) -> Value {
    json!({
        "id": id,
        "device_id": 1,
        "geofence_id": 1,
        "event_id": null,
        "alert_type": "geofence_exit",
        "alert_timestamp": "2025-03-03T18:30:00Z",
        "acknowledged_by": if read { json!(1) } else { Value::Null },
        "acknowledged_at": if read { json!("2025-03-03T19:00:00Z") } else { Value::Null },
        "pet_name": "Rex"
    })
}
