//! Registry API client against a mock server.

use std::time::Duration;

use fleet_health_core::{RegistryClient, RegistryDevice, UpstreamError};
use fleet_health_registry::{RegistryApi, RegistryCredentials};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// base64("device-health-checker:password")
const BASIC_AUTH: &str = "Basic ZGV2aWNlLWhlYWx0aC1jaGVja2VyOnBhc3N3b3Jk";

fn api(server: &MockServer) -> RegistryApi {
    RegistryApi::new(
        &server.uri(),
        RegistryCredentials {
            username: "device-health-checker".to_string(),
            password: "password".to_string(),
        },
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn lists_devices_with_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "serial": "serial1",
                "platform": "darwin",
                "username": "user1@example.com",
                "isHealthy": true,
                "lastSeenAt": 1589952551,
            },
            {
                "serial": "serial2",
                "platform": "linux",
                "username": "user2@example.com",
                "isHealthy": false,
                "lastSeenAt": null,
            },
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let devices = api(&server).list_devices().await.unwrap();

    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].last_seen_at, Some(1_589_952_551));
    assert!(!devices[1].is_healthy);
    assert!(devices[1].last_seen_at.is_none());
}

#[tokio::test]
async fn updates_devices_in_one_put() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/devices"))
        .and(header("authorization", BASIC_AUTH))
        .and(body_json(json!([
            {
                "serial": "serial1",
                "platform": "darwin",
                "username": "user1@example.com",
                "isHealthy": false,
                "lastSeenAt": 1589956403,
            },
        ])))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let devices = vec![RegistryDevice {
        serial: "serial1".to_string(),
        platform: "darwin".to_string(),
        username: "user1@example.com".to_string(),
        is_healthy: false,
        last_seen_at: Some(1_589_956_403),
    }];

    api(&server).update_devices(&devices).await.unwrap();
}

#[tokio::test]
async fn rejected_update_is_an_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&server)
        .await;

    let err = api(&server).update_devices(&[]).await.unwrap_err();

    assert!(matches!(
        err,
        UpstreamError::Api { service: "device registry", status: 403, .. }
    ));
}
