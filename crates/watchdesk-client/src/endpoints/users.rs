//! Current-user profile endpoint.

use watchdesk_core::models::envelope::ApiEnvelope;
use watchdesk_core::models::users::User;
use watchdesk_core::Result;

use super::auth::normalize;
use crate::pipeline::ApiClient;

impl ApiClient {
    /// `GET /user/me`.
    pub async fn me(&self) -> Result<User> {
        let env: ApiEnvelope<User> = self
            .get_json("/user/me", &[])
            .await
            .map_err(normalize(
                "Failed to fetch user details. Please try again.",
            ))?;
        Ok(env.data)
    }
}
