// SPDX-FileCopyrightText: 2026 PetSafe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed resource wrappers against a mocked upstream.

use std::sync::Arc;

use petsafe_client::{HttpTransport, PetsafeClient};
use petsafe_config::model::UpstreamConfig;
use petsafe_core::ErrorKind;
use petsafe_core::error::UPSTREAM_UNAVAILABLE;
use petsafe_model::{DeviceRequest, GeofenceRequest, Patch, PetRequest, ProfileUpdate};
use petsafe_session::CredentialStore;
use petsafe_test_utils::fixtures;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client(server: &MockServer) -> PetsafeClient {
    let config = UpstreamConfig {
        base_url: server.uri(),
        ..UpstreamConfig::default()
    };
    let store = Arc::new(CredentialStore::in_memory());
    store.save(fixtures::credential(1)).await.unwrap();
    PetsafeClient::new(Arc::new(HttpTransport::from_config(&config).unwrap()), store)
}

fn bearer() -> String {
    format!("Bearer {}", fixtures::ACCESS_TOKEN)
}

#[tokio::test]
async fn pets_list_null_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/pets"))
        .and(header("authorization", bearer().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": null})))
        .expect(1)
        .mount(&server)
        .await;

    let pets = client(&server).await.pets().list().await.unwrap();
    assert!(pets.is_empty());
}

#[tokio::test]
async fn pets_list_unwraps_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/pets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [fixtures::pet_json(1, "Rex"), fixtures::pet_json(2, "Mia")]
        })))
        .mount(&server)
        .await;

    let pets = client(&server).await.pets().list().await.unwrap();
    assert_eq!(pets.len(), 2);
    assert_eq!(pets[1].name, "Mia");
}

#[tokio::test]
async fn pet_update_sends_only_changed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/pets/5"))
        .and(body_json(json!({"breed": "beagle"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": fixtures::pet_json(5, "Rex")})))
        .expect(1)
        .mount(&server)
        .await;

    let changes = PetRequest {
        breed: Some("beagle".into()),
        ..Default::default()
    };
    let pet = client(&server).await.pets().update(5, &changes).await.unwrap();
    assert_eq!(pet.id, 5);
}

#[tokio::test]
async fn missing_pet_is_rejected_with_upstream_text() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/pets/99"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Pet not found!"})))
        .mount(&server)
        .await;

    let err = client(&server).await.pets().delete(99).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Rejected);
    assert_eq!(err.message, "Pet not found!");
}

#[tokio::test]
async fn server_error_message_stays_in_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/pets"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "x"})))
        .mount(&server)
        .await;

    let err = client(&server)
        .await
        .pets()
        .create(&PetRequest {
            name: Some("Rex".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::UpstreamFault);
    assert_eq!(err.detail.as_deref(), Some("x"));
    assert_eq!(err.message, UPSTREAM_UNAVAILABLE);
}

#[tokio::test]
async fn expired_token_is_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server).await.devices().list().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthenticated);
    assert!(!err.message.is_empty());
}

#[tokio::test]
async fn device_link_sends_only_pet_id() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/devices/3"))
        .and(body_json(json!({"pet_id": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": fixtures::device_json(3, "SN-3")})))
        .expect(1)
        .mount(&server)
        .await;

    let changes = DeviceRequest {
        pet_id: Some(5),
        ..Default::default()
    };
    let device = client(&server).await.devices().update(3, &changes).await.unwrap();
    assert_eq!(device.id, 3);
}

#[tokio::test]
async fn device_locations_use_limit_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/devices/3/locations/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [
            {"id": 1, "device_id": 3, "latitude": -23.5, "longitude": -46.6, "updated_at": 1700000000000i64, "received_at": "2025-01-01T00:00:00Z"},
            {"id": 2, "device_id": 3, "latitude": -23.6, "longitude": -46.7, "accuracy": 5.0, "updated_at": 1700000060000i64}
        ]})))
        .expect(1)
        .mount(&server)
        .await;

    let locations = client(&server).await.devices().locations(3, 2).await.unwrap();
    assert_eq!(locations.len(), 2);
    assert_eq!(locations[1].accuracy, Some(5.0));
}

#[tokio::test]
async fn device_status_route() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/devices/8/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": fixtures::device_json(8, "SN-8")})))
        .expect(1)
        .mount(&server)
        .await;

    let device = client(&server).await.devices().status(8).await.unwrap();
    assert_eq!(device.serial_number, "SN-8");
}

#[tokio::test]
async fn missing_geofence_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/geofence"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "geofence not found"})))
        .mount(&server)
        .await;

    assert_eq!(client(&server).await.geofence().get().await.unwrap(), None);
}

#[tokio::test]
async fn geofence_create_and_get() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/geofence"))
        .and(body_json(json!({"name": "Home", "latitude": -23.55, "longitude": -46.63, "radius_m": 200})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"data": fixtures::geofence_json(1)})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/geofence"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": fixtures::geofence_json(1)})))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let created = client
        .geofence()
        .create(&GeofenceRequest {
            name: Some("Home".into()),
            latitude: Some(-23.55),
            longitude: Some(-46.63),
            radius_m: Some(200),
            active: None,
        })
        .await
        .unwrap();
    assert_eq!(created.radius_m, Some(200));
    assert_eq!(client.geofence().get().await.unwrap().unwrap().id, 1);
}

#[tokio::test]
async fn alerts_count_and_read_all() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/alerts/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 3})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/alerts/read-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "All alerts marked as read"})))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/alerts/4/read"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": fixtures::alert_json(4, true)})))
        .mount(&server)
        .await;

    let client = client(&server).await;
    assert_eq!(client.alerts().unread_count().await.unwrap(), 3);
    assert!(client.alerts().mark_read(4).await.unwrap().is_read());
    assert_eq!(
        client.alerts().mark_all_read().await.unwrap().as_deref(),
        Some("All alerts marked as read")
    );
}

#[tokio::test]
async fn profile_refresh_updates_cached_principal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::profile_body(1, "Fresh Name", "+55 11 91234-5678")))
        .mount(&server)
        .await;

    let client = client(&server).await;
    let user = client.profile().get().await.unwrap();
    assert_eq!(user.full_name, "Fresh Name");

    let credential = client.current_credential().unwrap();
    assert_eq!(credential.principal.full_name, "Fresh Name");
    assert_eq!(credential.principal.phone.as_deref(), Some("+55 11 91234-5678"));
    assert_eq!(credential.access_token, fixtures::ACCESS_TOKEN);
}

#[tokio::test]
async fn profile_clear_phone_sends_empty_string() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/v1/me"))
        .and(body_json(json!({"phone": ""})))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::profile_body(1, "Owner 1", "")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server).await;
    let user = client
        .profile()
        .update(&ProfileUpdate {
            phone: Patch::Clear,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(user.phone, None);
    assert_eq!(client.current_credential().unwrap().principal.phone, None);
}

#[tokio::test]
async fn unreadable_success_body_is_fault() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = client(&server).await.alerts().list().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::UpstreamFault);
    assert_eq!(err.http_status, Some(200));
}
