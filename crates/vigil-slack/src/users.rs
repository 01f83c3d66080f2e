//! Recipient resolution via `users.lookupByEmail`.

use serde::Deserialize;

use crate::{SlackClient, error::SlackError};

#[derive(Deserialize)]
struct LookupResponse {
    user: UserInfo,
}

#[derive(Deserialize)]
struct UserInfo {
    id: String,
}

impl SlackClient {
    /// Look up a workspace member by email address.
    ///
    /// # Errors
    ///
    /// Returns [`SlackError`] with code `users_not_found` if nobody has that
    /// address, or another [`SlackError`] if the request fails.
    pub async fn lookup_user_by_email(&self, email: &str) -> Result<String, SlackError> {
        let resp: LookupResponse = self
            .call_get("users.lookupByEmail", &[("email", email.to_string())])
            .await?;
        Ok(resp.user.id)
    }

    /// Turn a configured recipient into a user id.
    ///
    /// Email addresses are looked up; anything else is taken to be a user id
    /// already.
    ///
    /// # Errors
    ///
    /// See [`lookup_user_by_email`](Self::lookup_user_by_email).
    pub async fn resolve_recipient(&self, recipient: &str) -> Result<String, SlackError> {
        if recipient.contains('@') {
            self.lookup_user_by_email(recipient).await
        } else {
            Ok(recipient.to_string())
        }
    }
}
