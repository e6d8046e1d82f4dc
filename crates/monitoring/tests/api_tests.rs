//! Monitoring API client against a mock server: pagination, authentication,
//! absent checks and error mapping.

use std::time::Duration;

use fleet_health_core::{MonitoringClient, UpstreamError};
use fleet_health_monitoring::{MonitoringApi, MonitoringApiError};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api(server: &MockServer) -> MonitoringApi {
    MonitoringApi::new("secret-token", &format!("{}/api/v0/", server.uri()), Duration::from_secs(5))
        .unwrap()
}

fn device(id: i64, serial: &str) -> serde_json::Value {
    json!({
        "id": id,
        "serial": serial,
        "platform": "darwin",
        "assigned_owner": { "email": "user@example.com" },
        "failure_count": 0,
        "last_seen_at": "2020-05-20T06:33:23.000Z",
    })
}

#[tokio::test]
async fn follows_cursor_until_exhausted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices"))
        .and(query_param("cursor", ""))
        .and(query_param("per_page", "100"))
        .and(header("authorization", "Bearer secret-token"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [device(1, "serial1"), device(2, "serial2")],
            "pagination": { "next_cursor": "page2" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [device(3, "serial3")],
            "pagination": { "next_cursor": "" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let devices = api(&server).list_devices().await.unwrap();

    let ids: Vec<i64> = devices.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(devices[0].owner_email(), Some("user@example.com"));
    assert_eq!(devices[0].last_seen_epoch(), Some(1_589_956_403));
}

#[tokio::test]
async fn missing_pagination_block_is_a_single_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/devices/7/failures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "check_id": 15,
                "resolved_at": null,
                "timestamp": "2020-01-01T16:24:06.000Z",
                "title": "some failing check",
            }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let failures = api(&server).list_device_failures(7).await.unwrap();

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].check_id, 15);
    assert!(!failures[0].is_resolved());
}

#[tokio::test]
async fn check_failures_use_check_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/checks/15/failures"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "pagination": { "next_cursor": null },
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert!(api(&server).check_failures(15).await.unwrap().is_empty());
}

#[tokio::test]
async fn get_check_returns_tags() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/checks/8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 8,
            "name": "Screen lock",
            "tags": ["NOTICE", "MACOS"],
        })))
        .mount(&server)
        .await;

    let check = api(&server).get_check(8).await.unwrap().unwrap();

    assert_eq!(check.tags, vec!["NOTICE".to_string(), "MACOS".to_string()]);
}

#[tokio::test]
async fn client_error_on_get_check_means_absent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/checks/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&server)
        .await;

    assert!(api(&server).get_check(404).await.unwrap().is_none());
}

#[tokio::test]
async fn server_error_on_get_check_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/checks/9"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = api(&server).get_check(9).await.unwrap_err();

    assert!(matches!(err, UpstreamError::Api { status: 500, ref body, .. } if body == "boom"));
}

#[tokio::test]
async fn listing_error_status_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/checks"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let err = api(&server).all_checks().await.unwrap_err();

    assert!(matches!(err, MonitoringApiError::ApiError { status: 401, .. }));
}

#[tokio::test]
async fn malformed_payload_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v0/checks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = api(&server).list_checks().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Decode { .. }));
}
