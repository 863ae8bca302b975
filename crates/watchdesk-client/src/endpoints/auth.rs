//! Login, logout, and password management endpoints.

use tracing::info;

use watchdesk_core::defaults::LOGIN_PATH;
use watchdesk_core::models::auth::{
    ChangePasswordRequest, ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest,
    LoginResponse, ResetPasswordRequest, ResetPasswordResponse,
};
use watchdesk_core::{ClientEvent, Error, Persistence, Result, SessionCredentials};

use crate::pipeline::ApiClient;
use crate::RequestSpec;
use reqwest::Method;

impl ApiClient {
    /// `POST /api/auth/login`, installing the returned credentials.
    ///
    /// `keep_logged_in` selects the persistence policy: a 7-day expiry, or
    /// session-only credentials with no explicit expiry.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        keep_logged_in: bool,
    ) -> Result<LoginResponse> {
        let resp: LoginResponse = self
            .post_json(
                "/api/auth/login",
                &LoginRequest {
                    username: username.to_string(),
                    password: password.to_string(),
                },
            )
            .await?;

        self.store
            .store(
                SessionCredentials {
                    username: resp.username.clone(),
                    fullname: resp.fullname.clone(),
                    role: resp.role.clone(),
                    access_token: resp.access_token.clone(),
                    refresh_token: resp.refresh_token.clone(),
                },
                Persistence::for_keep_logged_in(keep_logged_in),
            )
            .await?;

        info!(username = %resp.username, role = %resp.role, "login succeeded");
        Ok(resp)
    }

    /// Clear the session and send the caller to the login entry point.
    pub async fn logout(&self) -> Result<()> {
        self.store.clear().await?;
        self.events.emit(ClientEvent::Navigate {
            path: LOGIN_PATH.to_string(),
        });
        info!("logged out");
        Ok(())
    }

    /// `PUT /user/change-password`, returning the server's confirmation
    /// text. Failures are normalized to one descriptive error.
    pub async fn change_password(&self, req: &ChangePasswordRequest) -> Result<String> {
        let resp = self
            .send(RequestSpec::new(Method::PUT, "/user/change-password").json(req)?)
            .await
            .map_err(normalize(
                "Failed to change password. Please try again.",
            ))?;
        Ok(resp.text().await?)
    }

    /// `POST /user/forgot-password`.
    pub async fn forgot_password(&self, username: &str) -> Result<ForgotPasswordResponse> {
        self.post_json(
            "/user/forgot-password",
            &ForgotPasswordRequest {
                username: username.to_string(),
            },
        )
        .await
    }

    /// `POST /user/reset-password`.
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<ResetPasswordResponse> {
        self.post_json(
            "/user/reset-password",
            &ResetPasswordRequest {
                token: token.to_string(),
                new_password: new_password.to_string(),
            },
        )
        .await
    }
}

/// Keep server-attributed failures intact; replace transport noise with a
/// stable user-facing message.
pub(crate) fn normalize(fallback: &'static str) -> impl Fn(Error) -> Error {
    move |e| match e {
        Error::Http { .. } | Error::SessionExpired(_) | Error::Auth(_) => e,
        _ => Error::Request(fallback.to_string()),
    }
}
