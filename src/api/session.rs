//! Session provisioning: the collaborator seam that hands out a session id
//! before the first turn. Kept behind a trait so embedders can substitute
//! their own provisioning (or a fixed id) in tests.

use async_trait::async_trait;
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct CreatedSession {
    pub id: String,
}

#[async_trait]
pub trait SessionService: Send + Sync {
    /// Provisions a session for `app_name`/`user_id` and returns its id.
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Default provisioning against an agent server's REST surface.
pub struct HttpSessionService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSessionService {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl SessionService for HttpSessionService {
    async fn create_session(
        &self,
        app_name: &str,
        user_id: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let url = format!(
            "{}/apps/{}/users/{}/sessions",
            self.base_url.trim_end_matches('/'),
            app_name,
            user_id
        );
        let response = self.client.post(url).send().await?;
        if !response.status().is_success() {
            return Err(format!("session request failed: {}", response.status()).into());
        }
        let session: CreatedSession = response.json().await?;
        Ok(session.id)
    }
}
