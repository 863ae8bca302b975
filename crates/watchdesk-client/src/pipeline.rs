//! Authenticated request pipeline.
//!
//! Every outgoing request carries the current access token as a bearer
//! header. On an HTTP 401 the pipeline runs the token refresh procedure at
//! most once per request and resubmits; requests that hit a 401 while a
//! refresh is already in flight park a continuation in a FIFO queue and
//! resubmit once the refresh settles.
//!
//! The refresh flag and the queue live behind one mutex and are only ever
//! mutated from the 401 handling path (single-writer contract).

use std::sync::Arc;
use std::time::Instant;

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{oneshot, Mutex};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use watchdesk_core::defaults::LOGIN_PATH;
use watchdesk_core::models::auth::{TokenRefreshRequest, TokenRefreshResponse};
use watchdesk_core::{ClientEvent, CredentialStore, Error, EventBus, Result};

use crate::config::ClientConfig;

/// Replayable description of one API request.
#[derive(Debug, Clone)]
pub(crate) struct RequestSpec {
    method: Method,
    path: String,
    body: Option<serde_json::Value>,
    query: Vec<(String, String)>,
}

impl RequestSpec {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    pub(crate) fn json(mut self, body: &impl Serialize) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub(crate) fn query(mut self, pairs: &[(&str, String)]) -> Self {
        self.query = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect();
        self
    }
}

/// Outcome of a refresh cycle, delivered to queued continuations.
#[derive(Debug, Clone)]
enum RefreshOutcome {
    Token(String),
    Failed(String),
}

/// Refresh flag plus pending continuations. Only populated while a refresh
/// is outstanding; fully drained exactly once per refresh attempt.
#[derive(Default)]
struct RefreshState {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<RefreshOutcome>>,
}

enum RefreshRole {
    Leader,
    Waiter(oneshot::Receiver<RefreshOutcome>),
}

/// Bearer-authenticated API client with transparent token refresh.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    pub(crate) store: Arc<dyn CredentialStore>,
    pub(crate) events: EventBus,
    refresh: Mutex<RefreshState>,
}

impl ApiClient {
    /// Create a client over the given credential store.
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(base_url = %config.base_url, "Initializing API client");

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            store,
            events: EventBus::default(),
            refresh: Mutex::new(RefreshState::default()),
        })
    }

    /// Replace the event bus (for sharing one bus across components).
    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = events;
        self
    }

    /// The event bus this client publishes on.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Dispatch one attempt of a request. `token_override` carries the
    /// freshly refreshed token on the retry attempt; otherwise the stored
    /// access token (if any) is attached.
    async fn dispatch(&self, spec: &RequestSpec, token_override: Option<&str>) -> Result<Response> {
        let mut req = self.http.request(spec.method.clone(), self.url(&spec.path));
        if !spec.query.is_empty() {
            req = req.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            req = req.json(body);
        }

        let token = match token_override {
            Some(t) => Some(t.to_string()),
            None => self.store.load().await?.map(|c| c.access_token),
        };
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            req = req.bearer_auth(token);
        }

        let request_id = Uuid::now_v7();
        debug!(
            request_id = %request_id,
            method = %spec.method,
            path = %spec.path,
            retry = token_override.is_some(),
            "dispatching request"
        );

        Ok(req.send().await?)
    }

    /// Dispatch one attempt of a multipart POST. The form cannot be
    /// replayed after dispatch, so retries rebuild it via `make_form`.
    async fn dispatch_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        token_override: Option<&str>,
    ) -> Result<Response> {
        let mut req = self.http.post(self.url(path)).multipart(form);

        let token = match token_override {
            Some(t) => Some(t.to_string()),
            None => self.store.load().await?.map(|c| c.access_token),
        };
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            req = req.bearer_auth(token);
        }

        let request_id = Uuid::now_v7();
        debug!(
            request_id = %request_id,
            method = %Method::POST,
            path = %path,
            retry = token_override.is_some(),
            "dispatching multipart request"
        );

        Ok(req.send().await?)
    }

    /// Execute a request with bearer injection and at most one transparent
    /// refresh-and-retry cycle on 401.
    pub(crate) async fn send(&self, spec: RequestSpec) -> Result<Response> {
        let started = Instant::now();
        let resp = self.dispatch(&spec, None).await?;

        if resp.status().as_u16() == 401 {
            let token = self.refreshed_token().await?;
            let resp = self.dispatch(&spec, Some(&token)).await?;
            return self.checked(resp, &spec.method, &spec.path, started).await;
        }

        self.checked(resp, &spec.method, &spec.path, started).await
    }

    /// Multipart counterpart of [`Self::send`]. A refresh-and-retry cycle
    /// rebuilds the form (restarting any progress reporting from zero).
    pub(crate) async fn send_multipart(
        &self,
        path: &str,
        make_form: impl Fn() -> reqwest::multipart::Form,
    ) -> Result<Response> {
        let started = Instant::now();
        let resp = self.dispatch_multipart(path, make_form(), None).await?;

        if resp.status().as_u16() == 401 {
            let token = self.refreshed_token().await?;
            let resp = self
                .dispatch_multipart(path, make_form(), Some(&token))
                .await?;
            return self.checked(resp, &Method::POST, path, started).await;
        }

        self.checked(resp, &Method::POST, path, started).await
    }

    /// Map a settled response: pass 2xx through, otherwise log the
    /// server-provided message (best effort) and surface `Error::Http`.
    async fn checked(
        &self,
        resp: Response,
        method: &Method,
        path: &str,
        started: Instant,
    ) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            debug!(
                method = %method,
                path = %path,
                http_status = status.as_u16(),
                duration_ms = started.elapsed().as_millis() as u64,
                "request ok"
            );
            return Ok(resp);
        }

        let code = status.as_u16();
        let message = match resp.text().await {
            Ok(body) => server_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string()),
            Err(e) => e.to_string(),
        };
        error!(
            method = %method,
            path = %path,
            http_status = code,
            error = %message,
            "request failed"
        );
        Err(Error::Http {
            status: code,
            message,
        })
    }

    /// Obtain a fresh access token, either by running the refresh
    /// procedure (leader) or by waiting on the one already in flight.
    async fn refreshed_token(&self) -> Result<String> {
        let role = {
            let mut state = self.refresh.lock().await;
            if state.in_flight {
                let (tx, rx) = oneshot::channel();
                state.waiters.push(tx);
                debug!(queue_depth = state.waiters.len(), "queued behind in-flight refresh");
                RefreshRole::Waiter(rx)
            } else {
                state.in_flight = true;
                RefreshRole::Leader
            }
        };

        match role {
            RefreshRole::Waiter(rx) => match rx.await {
                Ok(RefreshOutcome::Token(token)) => Ok(token),
                Ok(RefreshOutcome::Failed(msg)) => Err(Error::SessionExpired(msg)),
                Err(_) => Err(Error::SessionExpired("refresh abandoned".to_string())),
            },
            RefreshRole::Leader => {
                let outcome = self.refresh_session().await;
                let waiters = {
                    let mut state = self.refresh.lock().await;
                    state.in_flight = false;
                    std::mem::take(&mut state.waiters)
                };
                match outcome {
                    Ok(token) => {
                        for waiter in waiters {
                            let _ = waiter.send(RefreshOutcome::Token(token.clone()));
                        }
                        Ok(token)
                    }
                    Err(e) => {
                        let msg = e.to_string();
                        for waiter in waiters {
                            let _ = waiter.send(RefreshOutcome::Failed(msg.clone()));
                        }
                        Err(e)
                    }
                }
            }
        }
    }

    /// Exchange the stored refresh token for a new token pair.
    ///
    /// Fails immediately (no network call) without a stored refresh token.
    /// A rejected refresh is fatal to the session: credentials are cleared
    /// and the caller is sent back to the login entry point.
    async fn refresh_session(&self) -> Result<String> {
        let credentials = self.store.load().await?;
        let Some(credentials) = credentials.filter(|c| !c.refresh_token.is_empty()) else {
            return Err(Error::Auth("no refresh token available".to_string()));
        };

        let payload = TokenRefreshRequest {
            username: credentials.username,
            fullname: credentials.fullname,
            role: credentials.role,
            access_token: credentials.access_token,
            refresh_token: credentials.refresh_token,
        };

        // The refresh call itself goes out bare: no bearer header, no
        // recursion into the 401 handling.
        let result: Result<TokenRefreshResponse> = async {
            let resp = self
                .http
                .post(self.url("/api/auth/token"))
                .json(&payload)
                .send()
                .await?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp.text().await.unwrap_or_default();
                let message = server_message(&body)
                    .unwrap_or_else(|| format!("token refresh rejected ({})", status.as_u16()));
                return Err(Error::Auth(message));
            }
            Ok(resp.json().await?)
        }
        .await;

        match result {
            Ok(tokens) => {
                self.store
                    .replace_tokens(&tokens.access_token, &tokens.refresh_token)
                    .await?;
                info!("access token refreshed");
                Ok(tokens.access_token)
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(error = %reason, "token refresh failed, clearing session");
                if let Err(clear_err) = self.store.clear().await {
                    warn!(error = %clear_err, "failed to clear credentials");
                }
                self.events.emit(ClientEvent::SessionExpired {
                    reason: reason.clone(),
                });
                self.events.emit(ClientEvent::Navigate {
                    path: LOGIN_PATH.to_string(),
                });
                Err(Error::SessionExpired(reason))
            }
        }
    }

    // ─── Typed convenience wrappers ────────────────────────────────────

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let resp = self
            .send(RequestSpec::new(Method::GET, path).query(query))
            .await?;
        Ok(resp.json().await?)
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let resp = self
            .send(RequestSpec::new(Method::POST, path).json(body)?)
            .await?;
        Ok(resp.json().await?)
    }

    pub(crate) async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T> {
        let resp = self
            .send(RequestSpec::new(Method::PUT, path).json(body)?)
            .await?;
        Ok(resp.json().await?)
    }

    /// PUT with an empty body, discarding the response payload.
    pub(crate) async fn put_empty(&self, path: &str) -> Result<()> {
        self.send(RequestSpec::new(Method::PUT, path)).await?;
        Ok(())
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        self.send(RequestSpec::new(Method::DELETE, path)).await?;
        Ok(())
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let resp = self.send(RequestSpec::new(Method::GET, path)).await?;
        Ok(resp.bytes().await?.to_vec())
    }
}

/// Pull the `message` field out of a JSON error body, if there is one.
fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
        .filter(|m| !m.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_extraction() {
        assert_eq!(
            server_message(r#"{"message":"token expired"}"#),
            Some("token expired".to_string())
        );
        assert_eq!(server_message(r#"{"message":""}"#), None);
        assert_eq!(server_message("not json"), None);
        assert_eq!(server_message(r#"{"error":"x"}"#), None);
    }

    #[test]
    fn test_request_spec_query() {
        let spec = RequestSpec::new(Method::GET, "/outcomes")
            .query(&[("searchKey", "theft".to_string())]);
        assert_eq!(spec.query.len(), 1);
        assert_eq!(spec.query[0].0, "searchKey");
    }
}
