// Minimal Mastodon/Pleroma API client, just enough surface for posting
// statuses on behalf of an admin account.

pub mod models;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, error};

pub use crate::models::{NewStatus, Status, Visibility};

#[derive(Debug, Clone)]
pub struct MastodonOptions {
    /// Instance base URL, e.g. `https://example.social`.
    pub base_url: String,
    pub access_token: String,
}

#[derive(Debug, Error)]
pub enum MastodonError {
    /// HTTP 429 from the instance. Callers are expected to wait and retry.
    #[error("rate limited by the instance")]
    RateLimited,
    #[error("instance returned {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct MastodonService {
    client: Client,
    options: MastodonOptions,
}

impl MastodonService {
    pub fn new(options: MastodonOptions) -> Self {
        Self {
            client: Client::new(),
            options,
        }
    }

    /// Post a status.
    ///
    /// When `idempotency_key` is given it is sent as the `Idempotency-Key`
    /// header, so retrying the same post with the same key will not create
    /// a duplicate status on the instance.
    pub async fn post_status(
        &self,
        draft: &NewStatus,
        idempotency_key: Option<&str>,
    ) -> Result<Status, MastodonError> {
        let url = format!("{}/api/v1/statuses", self.options.base_url);

        let mut request = self
            .client
            .post(url)
            .bearer_auth(&self.options.access_token)
            .form(draft);

        if let Some(key) = idempotency_key {
            request = request.header("Idempotency-Key", key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MastodonError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Status post failed ({}): {}", status, body);
            return Err(MastodonError::Api { status, body });
        }

        let posted = response.json::<Status>().await?;
        debug!("Posted status {}", posted.id);
        Ok(posted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_keeps_base_url() {
        let service = MastodonService::new(MastodonOptions {
            base_url: "https://example.social".to_string(),
            access_token: "token".to_string(),
        });
        assert_eq!(service.options.base_url, "https://example.social");
    }

    #[tokio::test]
    #[ignore] // Requires a live instance and a valid access token
    async fn post_status_live() {
        let base_url = std::env::var("TEST_INSTANCE_URL").expect("TEST_INSTANCE_URL not set");
        let access_token =
            std::env::var("TEST_ACCESS_TOKEN").expect("TEST_ACCESS_TOKEN not set");

        let service = MastodonService::new(MastodonOptions {
            base_url,
            access_token,
        });

        let draft = NewStatus {
            status: "@admin test message".to_string(),
            spoiler_text: Some("test".to_string()),
            visibility: Visibility::Direct,
            language: Some("en".to_string()),
            content_type: Some("text/plain".to_string()),
        };

        let result = service.post_status(&draft, None).await;
        assert!(result.is_ok());
    }
}
