//! Integration tests for the 401 refresh-and-retry pipeline.
//!
//! These exercise the full path through a mock server: bearer injection,
//! the single shared refresh under concurrency, and the fatal-failure
//! cleanup (cleared credentials plus session-expired events).

use std::sync::Arc;
use std::time::Duration;

use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use watchdesk_client::{ApiClient, ClientConfig};
use watchdesk_core::{
    ClientEvent, CredentialStore, Error, MemoryCredentialStore, Persistence, SessionCredentials,
};

fn credentials(access: &str, refresh: &str) -> SessionCredentials {
    SessionCredentials {
        username: "aturing".to_string(),
        fullname: "Alan Turing".to_string(),
        role: "ROLE_ADMIN".to_string(),
        access_token: access.to_string(),
        refresh_token: refresh.to_string(),
    }
}

async fn logged_in_client(
    server: &MockServer,
    access: &str,
    refresh: &str,
) -> (ApiClient, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::new());
    store
        .store(credentials(access, refresh), Persistence::Session)
        .await
        .unwrap();
    let config = ClientConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
    };
    let client = ApiClient::new(config, store.clone()).unwrap();
    (client, store)
}

fn me_envelope() -> serde_json::Value {
    serde_json::json!({
        "status": 200,
        "message": "ok",
        "data": {
            "id": 3,
            "emailId": "alan@watchdesk.example",
            "username": "aturing",
            "role": "ROLE_ADMIN",
            "fullName": "Alan Turing",
            "status": "ACTIVE"
        }
    })
}

#[tokio::test]
async fn test_401_triggers_refresh_and_retry_with_new_bearer() {
    let server = MockServer::start().await;

    // The stale token is rejected.
    Mock::given(method("GET"))
        .and(path("/user/me"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    // The refresh exchange carries the stored pair and returns a new one.
    Mock::given(method("POST"))
        .and(path("/api/auth/token"))
        .and(body_partial_json(serde_json::json!({
            "refreshToken": "refresh-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "accessToken": "access-2",
            "refreshToken": "refresh-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The retry goes out with the refreshed token.
    Mock::given(method("GET"))
        .and(path("/user/me"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(me_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = logged_in_client(&server, "access-1", "refresh-1").await;

    let me = client.me().await.unwrap();
    assert_eq!(me.username, "aturing");

    // The new pair is installed in the store.
    let stored = store.load().await.unwrap().unwrap();
    assert_eq!(stored.access_token, "access-2");
    assert_eq!(stored.refresh_token, "refresh-2");
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/me"))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    // Slow refresh so the other requests 401 and queue while the first
    // refresh is still in flight. expect(1) is the point of this test.
    Mock::given(method("POST"))
        .and(path("/api/auth/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({
                    "accessToken": "access-2",
                    "refreshToken": "refresh-2"
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/me"))
        .and(header("authorization", "Bearer access-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(me_envelope()))
        .expect(3)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, "access-1", "refresh-1").await;
    let client = Arc::new(client);

    let mut handles = Vec::new();
    for _ in 0..3 {
        let client = client.clone();
        handles.push(tokio::spawn(async move { client.me().await }));
    }
    for handle in handles {
        let me = handle.await.unwrap().unwrap();
        assert_eq!(me.username, "aturing");
    }
}

#[tokio::test]
async fn test_refresh_without_stored_refresh_token_makes_no_network_call() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, "access-1", "").await;

    let err = client.me().await.unwrap_err();
    assert!(matches!(err, Error::Auth(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_rejected_refresh_clears_session_and_emits_events() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "message": "refresh token expired"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = logged_in_client(&server, "access-1", "refresh-1").await;
    let mut events = client.events().subscribe();

    let err = client.me().await.unwrap_err();
    assert!(matches!(err, Error::SessionExpired(_)), "got {:?}", err);

    // Credentials are gone.
    assert!(store.load().await.unwrap().is_none());

    // The session-expired notification precedes the login redirect.
    let first = events.recv().await.unwrap();
    assert!(matches!(first, ClientEvent::SessionExpired { .. }));
    let second = events.recv().await.unwrap();
    assert_eq!(
        second,
        ClientEvent::Navigate {
            path: "/login".to_string()
        }
    );
}

#[tokio::test]
async fn test_refresh_is_not_reentrant_after_retry() {
    let server = MockServer::start().await;

    // Both tokens are rejected; the retry must NOT trigger a second
    // refresh cycle.
    Mock::given(method("GET"))
        .and(path("/user/me"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "accessToken": "access-2",
            "refreshToken": "refresh-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server, "access-1", "refresh-1").await;

    let err = client.me().await.unwrap_err();
    assert!(
        matches!(err, Error::Http { status: 401, .. }),
        "got {:?}",
        err
    );
}
