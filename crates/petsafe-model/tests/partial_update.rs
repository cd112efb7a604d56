// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A request with exactly one field set serializes to exactly that key.

use chrono::{TimeZone, Utc};
use petsafe_model::{DeviceRequest, GeofenceRequest, Patch, PetRequest, ProfileUpdate};
use proptest::prelude::*;
use serde::Serialize;
use serde_json::Value;

fn keys<T: Serialize>(request: &T) -> Vec<String> {
    match serde_json::to_value(request).unwrap() {
        Value::Object(map) => map.keys().cloned().collect(),
        other => panic!("expected an object, got {other}"),
    }
}

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ]{1,20}"
}

fn pet_with_one_field() -> impl Strategy<Value = (&'static str, PetRequest)> {
    prop_oneof![
        text().prop_map(|v| ("name", PetRequest { name: Some(v), ..Default::default() })),
        text().prop_map(|v| ("species", PetRequest { species: Some(v), ..Default::default() })),
        text().prop_map(|v| ("breed", PetRequest { breed: Some(v), ..Default::default() })),
        text().prop_map(|v| ("microchip_id", PetRequest { microchip_id: Some(v), ..Default::default() })),
        (0i64..2_000_000_000).prop_map(|secs| (
            "dob",
            PetRequest {
                dob: Some(Utc.timestamp_opt(secs, 0).unwrap()),
                ..Default::default()
            }
        )),
    ]
}

fn device_with_one_field() -> impl Strategy<Value = (&'static str, DeviceRequest)> {
    prop_oneof![
        text().prop_map(|v| ("serial_number", DeviceRequest { serial_number: Some(v), ..Default::default() })),
        text().prop_map(|v| ("imei", DeviceRequest { imei: Some(v), ..Default::default() })),
        text().prop_map(|v| ("model", DeviceRequest { model: Some(v), ..Default::default() })),
        text().prop_map(|v| ("firmware", DeviceRequest { firmware: Some(v), ..Default::default() })),
        any::<u64>().prop_map(|v| ("pet_id", DeviceRequest { pet_id: Some(v), ..Default::default() })),
        text().prop_map(|v| ("connectivity", DeviceRequest { connectivity: Some(v), ..Default::default() })),
        any::<bool>().prop_map(|v| ("active", DeviceRequest { active: Some(v), ..Default::default() })),
    ]
}

fn geofence_with_one_field() -> impl Strategy<Value = (&'static str, GeofenceRequest)> {
    prop_oneof![
        text().prop_map(|v| ("name", GeofenceRequest { name: Some(v), ..Default::default() })),
        (-90.0f64..90.0).prop_map(|v| ("latitude", GeofenceRequest { latitude: Some(v), ..Default::default() })),
        (-180.0f64..180.0).prop_map(|v| ("longitude", GeofenceRequest { longitude: Some(v), ..Default::default() })),
        (1i32..100_000).prop_map(|v| ("radius_m", GeofenceRequest { radius_m: Some(v), ..Default::default() })),
        any::<bool>().prop_map(|v| ("active", GeofenceRequest { active: Some(v), ..Default::default() })),
    ]
}

fn text_patch() -> impl Strategy<Value = Patch<String>> {
    prop_oneof![text().prop_map(Patch::Set), Just(Patch::Clear)]
}

fn profile_with_one_field() -> impl Strategy<Value = (&'static str, ProfileUpdate)> {
    prop_oneof![
        text_patch().prop_map(|p| ("full_name", ProfileUpdate { full_name: p, ..Default::default() })),
        text_patch().prop_map(|p| ("phone", ProfileUpdate { phone: p, ..Default::default() })),
    ]
}

proptest! {
    #[test]
    fn pet_request_carries_only_the_set_field((field, request) in pet_with_one_field()) {
        prop_assert_eq!(keys(&request), vec![field.to_string()]);
    }

    #[test]
    fn device_request_carries_only_the_set_field((field, request) in device_with_one_field()) {
        prop_assert_eq!(keys(&request), vec![field.to_string()]);
    }

    #[test]
    fn geofence_request_carries_only_the_set_field((field, request) in geofence_with_one_field()) {
        prop_assert_eq!(keys(&request), vec![field.to_string()]);
    }

    #[test]
    fn profile_update_carries_only_the_set_field((field, request) in profile_with_one_field()) {
        prop_assert_eq!(keys(&request), vec![field.to_string()]);
    }
}

#[test]
fn set_value_is_carried_verbatim() {
    let request = GeofenceRequest {
        radius_m: Some(150),
        ..Default::default()
    };
    assert_eq!(
        serde_json::to_value(&request).unwrap(),
        serde_json::json!({"radius_m": 150})
    );
}
