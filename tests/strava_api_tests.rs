// SPDX-License-Identifier: MIT

//! End-to-end adapter behavior against a mocked Strava service.

mod common;

use serde_json::json;
use std::sync::Arc;
use strava_mcp::store::{MemoryTokenStore, StoreError, TokenStore};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_bundle() -> serde_json::Value {
    json!({
        "access_token": "new-access",
        "refresh_token": "new-refresh",
        "expires_at": 1700000000,
        "expires_in": 21600,
        "athlete": { "id": 777, "firstname": "Ada" },
        "token_type": "Bearer",
        "scope": "read,activity:read_all"
    })
}

#[tokio::test]
async fn test_exchange_code_happy_path_persists_and_fetches() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=goodcode"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_bundle()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(query_param("per_page", "60"))
        .and(header("authorization", "Bearer new-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let adapter = common::mock_adapter(&server.uri(), store.clone());

    let result = adapter
        .exchange_code_for_activities("goodcode", None, None)
        .await
        .unwrap();

    assert_eq!(result["activities"], json!([{ "id": 1 }]));
    assert_eq!(
        result["tokens"],
        json!({
            "access_token": "new-access",
            "refresh_token": "new-refresh",
            "expires_at": 1700000000,
            "expires_in": 21600,
        })
    );
    assert_eq!(result["persisted"], true);
    assert!(result.get("persist_error").is_none());

    // The store holds the full bundle, athlete and scope included.
    let persisted = store.read().unwrap();
    assert_eq!(persisted["access_token"], "new-access");
    assert_eq!(persisted["athlete"]["id"], 777);
    assert_eq!(persisted["token_type"], "Bearer");
    assert_eq!(persisted["scope"], "read,activity:read_all");
}

#[tokio::test]
async fn test_exchange_code_upstream_401_writes_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string("{\"message\":\"Authorization Error\"}"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let adapter = common::mock_adapter(&server.uri(), store.clone());

    let err = adapter
        .exchange_code_for_activities("badcode", Some(1), Some("s".to_string()))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_value(),
        json!({
            "error": "token request failed",
            "status_code": 401,
            "response": "{\"message\":\"Authorization Error\"}",
        })
    );
    assert!(matches!(store.read(), Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_exchange_code_activities_failure_still_persists_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_bundle()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let adapter = common::mock_adapter(&server.uri(), store.clone());

    let err = adapter
        .exchange_code_for_activities("goodcode", None, None)
        .await
        .unwrap_err();

    let payload = err.to_value();
    assert_eq!(payload["error"], "activities request failed");
    assert_eq!(payload["status_code"], 500);

    // The exchange succeeded, so the bundle is already on disk.
    assert_eq!(store.read().unwrap()["access_token"], "new-access");
}

#[tokio::test]
async fn test_refresh_returns_token_subset_only() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=old-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_bundle()))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let adapter = common::mock_adapter(&server.uri(), store.clone());

    let result = adapter
        .refresh_access_token("old-refresh", None, None)
        .await
        .unwrap();

    assert_eq!(result["access_token"], "new-access");
    assert_eq!(result["refresh_token"], "new-refresh");
    assert_eq!(result["expires_at"], 1700000000);
    assert_eq!(result["expires_in"], 21600);
    assert!(result.get("athlete").is_none());

    // Refresh never persists.
    assert!(matches!(store.read(), Err(StoreError::NotFound)));
}

#[tokio::test]
async fn test_refresh_upstream_error_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string("invalid_grant"))
        .mount(&server)
        .await;

    let adapter = common::mock_adapter(&server.uri(), Arc::new(MemoryTokenStore::new()));
    let err = adapter
        .refresh_access_token("stale-refresh", None, None)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_value(),
        json!({
            "error": "token refresh failed",
            "status_code": 400,
            "response": "invalid_grant",
        })
    );
}

#[tokio::test]
async fn test_fetch_activities_with_token_passthrough() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .and(query_param("per_page", "60"))
        .and(header("authorization", "Bearer existing-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "id": 42, "name": "Morning Ride" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let adapter = common::mock_adapter(&server.uri(), Arc::new(MemoryTokenStore::new()));
    let activities = adapter
        .fetch_activities_with_token("existing-token")
        .await
        .unwrap();

    // Raw decoded body, no wrapping.
    assert_eq!(activities, json!([{ "id": 42, "name": "Morning Ride" }]));
}

#[tokio::test]
async fn test_fetch_activities_with_expired_token() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/athlete/activities"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    let adapter = common::mock_adapter(&server.uri(), Arc::new(MemoryTokenStore::new()));
    let err = adapter
        .fetch_activities_with_token("expired-token")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_value(),
        json!({
            "error": "activities request failed",
            "status_code": 401,
            "response": "token expired",
        })
    );
}
