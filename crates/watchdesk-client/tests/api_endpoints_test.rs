//! Integration tests for the typed endpoint surface: login persistence
//! policy, server error mapping, query parameter wiring, and the multipart
//! attachment upload.

use std::sync::{Arc, Mutex};

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use watchdesk_client::{ApiClient, ClientConfig};
use watchdesk_core::models::uploads::StagedFile;
use watchdesk_core::{
    CredentialStore, Error, MemoryCredentialStore, Persistence, ProgressFn, SessionCredentials,
};

fn client_for(server: &MockServer) -> (ApiClient, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::new());
    let config = ClientConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
    };
    let client = ApiClient::new(config, store.clone()).unwrap();
    (client, store)
}

async fn install_session(store: &MemoryCredentialStore) {
    store
        .store(
            SessionCredentials {
                username: "aturing".to_string(),
                fullname: "Alan Turing".to_string(),
                role: "ROLE_STAFF".to_string(),
                access_token: "access-1".to_string(),
                refresh_token: "refresh-1".to_string(),
            },
            Persistence::Session,
        )
        .await
        .unwrap();
}

fn login_body() -> serde_json::Value {
    serde_json::json!({
        "username": "aturing",
        "accessToken": "access-1",
        "refreshToken": "refresh-1",
        "role": "ROLE_ADMIN",
        "fullname": "Alan Turing"
    })
}

#[tokio::test]
async fn test_login_keep_logged_in_stores_persistent_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    client.login("aturing", "hunter2", true).await.unwrap();

    assert_eq!(
        store.persistence().await.unwrap(),
        Some(Persistence::Days(7))
    );
    let stored = store.load().await.unwrap().unwrap();
    assert_eq!(stored.access_token, "access-1");
    assert_eq!(stored.role, "ROLE_ADMIN");
}

#[tokio::test]
async fn test_login_without_keep_logged_in_is_session_scoped() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_body()))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    client.login("aturing", "hunter2", false).await.unwrap();

    assert_eq!(
        store.persistence().await.unwrap(),
        Some(Persistence::Session)
    );
}

#[tokio::test]
async fn test_server_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/me"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "message": "database offline"
        })))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    install_session(&store).await;

    let err = client.me().await.unwrap_err();
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database offline");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_without_json_body_falls_back_to_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/me"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    install_session(&store).await;

    let err = client.me().await.unwrap_err();
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected Http error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_comments_sends_paging_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/incidents/42/comment"))
        .and(query_param("pageNo", "1"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "incidentId": 42,
            "pageNo": 1,
            "pageSize": 10,
            "content": [
                {"id": 7, "comments": "Gate secured"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    install_session(&store).await;

    let page = client.fetch_comments(42, 1, 10).await.unwrap();
    assert_eq!(page.incident_id, 42);
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.content[0].comments, "Gate secured");
}

#[tokio::test]
async fn test_upload_attachment_normalizes_url_and_reports_progress() {
    let server = MockServer::start().await;
    // This deployment answers with `fileUrl` rather than `url`.
    Mock::given(method("POST"))
        .and(path("/incidents/upload/attachment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "fileUrl": "https://cdn.watchdesk.example/att/7.png",
            "id": "att-7",
            "fileName": "photo.png",
            "size": 150000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = client_for(&server);
    install_session(&store).await;

    let seen: Arc<Mutex<Vec<u8>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let progress: ProgressFn = Arc::new(move |pct| sink.lock().unwrap().push(pct));

    let file = StagedFile::new(
        "photo.png",
        Some("image/png"),
        bytes::Bytes::from(vec![0u8; 150_000]),
    );
    let stored = client.upload_attachment(&file, progress).await.unwrap();

    assert_eq!(stored.url, "https://cdn.watchdesk.example/att/7.png");
    assert_eq!(stored.id.as_deref(), Some("att-7"));
    assert_eq!(stored.file_name.as_deref(), Some("photo.png"));

    let seen = seen.lock().unwrap();
    assert_eq!(*seen.last().unwrap(), 100);
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "monotonic progress");
}

#[tokio::test]
async fn test_logout_clears_credentials() {
    let server = MockServer::start().await;
    let (client, store) = client_for(&server);
    install_session(&store).await;

    client.logout().await.unwrap();
    assert!(store.load().await.unwrap().is_none());
}
