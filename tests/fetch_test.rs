mod common;

use common::{MockApi, expired_session, session};
use serde_json::json;
use spotdeck::spotify::{ErrorKind, FetchError, SpotifyClient};

#[tokio::test]
async fn test_no_session_skips_network() {
    let api = MockApi::start().await;
    api.json("/me", json!({ "id": "user-1" }));
    let client = api.client();

    let result = client.get_json(&format!("{}/me", api.base_url), None).await;

    assert!(matches!(result, Err(FetchError::Unauthenticated)));
    assert_eq!(api.hit_count(), 0);
}

#[tokio::test]
async fn test_expired_session_is_no_session() {
    let api = MockApi::start().await;
    api.json("/me", json!({ "id": "user-1" }));
    let client = api.client();
    let expired = expired_session();

    let result = client
        .get_json(&format!("{}/me", api.base_url), Some(&expired))
        .await;

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Unauthenticated);
    assert_eq!(api.hit_count(), 0);
}

#[tokio::test]
async fn test_sends_bearer_token() {
    let api = MockApi::start().await;
    api.json("/me", json!({ "id": "user-1" }));
    let client = api.client();
    let session = session();

    let value = client
        .get_json(&format!("{}/me", api.base_url), Some(&session))
        .await
        .unwrap();

    assert_eq!(value["id"], "user-1");
    let hits = api.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].authorization.as_deref(), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_non_success_status() {
    let api = MockApi::start().await;
    api.route("/me", 500, r#"{"error":"boom"}"#);
    api.route("/albums/x", 404, r#"{"error":"missing"}"#);
    let client = api.client();
    let session = session();

    let server_error = client
        .get_json(&format!("{}/me", api.base_url), Some(&session))
        .await
        .unwrap_err();
    assert!(matches!(server_error, FetchError::Status { status: 500, .. }));
    assert_eq!(server_error.kind(), ErrorKind::TransientHttp);
    assert!(server_error.is_retryable());

    let not_found = client
        .get_json(&format!("{}/albums/x", api.base_url), Some(&session))
        .await
        .unwrap_err();
    assert!(matches!(not_found, FetchError::Status { status: 404, .. }));
    assert!(!not_found.is_retryable());
}

#[tokio::test]
async fn test_empty_body() {
    let api = MockApi::start().await;
    api.route("/me", 200, "");
    let client = api.client();
    let session = session();

    let err = client
        .get_json(&format!("{}/me", api.base_url), Some(&session))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::EmptyBody));
    assert_eq!(err.kind(), ErrorKind::EmptyBody);
}

#[tokio::test]
async fn test_malformed_body() {
    let api = MockApi::start().await;
    api.route("/me", 200, "this is not json");
    let client = api.client();
    let session = session();

    let err = client
        .get_json(&format!("{}/me", api.base_url), Some(&session))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DecodeError);
}

#[tokio::test]
async fn test_unexpected_shape_is_decode_error() {
    let api = MockApi::start().await;
    api.json("/browse/new-releases?country=IN&limit=15", json!({ "unexpected": true }));
    let client = api.client();
    let session = session();

    let err = client.new_releases(Some(&session)).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::DecodeError);
}

#[tokio::test]
async fn test_transport_failure() {
    let client = SpotifyClient::new("http://127.0.0.1:1/v1");
    let session = session();

    let err = client
        .get_json("http://127.0.0.1:1/v1/me", Some(&session))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_custom_get_collapses_failures() {
    let api = MockApi::start().await;
    api.json("/me", json!({ "id": "user-1" }));
    api.route("/broken", 502, "");
    let client = api.client();
    let session = session();

    let ok = client
        .custom_get(&format!("{}/me", api.base_url), Some(&session))
        .await;
    assert_eq!(ok, Some(json!({ "id": "user-1" })));

    let missing = client
        .custom_get(&format!("{}/me", api.base_url), None)
        .await;
    assert_eq!(missing, None);

    let broken = client
        .custom_get(&format!("{}/broken", api.base_url), Some(&session))
        .await;
    assert_eq!(broken, None);
}
