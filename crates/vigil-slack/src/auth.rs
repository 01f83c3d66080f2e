//! `auth.test`: identity of the bot token.

use serde::Deserialize;

use crate::{SlackClient, error::SlackError};

#[derive(Deserialize)]
struct AuthTestResponse {
    user_id: String,
}

impl SlackClient {
    /// The user id the bot token posts as.
    ///
    /// Used to recognise (and skip) the monitor's own replies.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError`] if the token is invalid or the request fails.
    pub async fn auth_test(&self) -> Result<String, SlackError> {
        let resp: AuthTestResponse = self
            .call_post("auth.test", &serde_json::json!({}))
            .await?;
        Ok(resp.user_id)
    }
}
