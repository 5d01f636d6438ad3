//! Production implementations of the infrastructure traits.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use mastodon::{MastodonService, NewStatus, Visibility};
use sqlx::PgPool;
use tracing::debug;

use crate::domains::severance::{FollowEdge, Handle};
use crate::kernel::{BaseMessenger, BaseRelationSource};

// =============================================================================
// PgRelationSource (implements BaseRelationSource against the instance DB)
// =============================================================================

/// Reads follow edges straight from the instance's Postgres database.
pub struct PgRelationSource {
    pool: PgPool,
}

impl PgRelationSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseRelationSource for PgRelationSource {
    async fn fetch_outbound_edges(&self, remote_domain: &str) -> Result<Vec<FollowEdge>> {
        FollowEdge::fetch_outbound(remote_domain, &self.pool).await
    }

    async fn fetch_inbound_edges(&self, remote_domain: &str) -> Result<Vec<FollowEdge>> {
        FollowEdge::fetch_inbound(remote_domain, &self.pool).await
    }
}

// =============================================================================
// MastodonAdapter (implements BaseMessenger trait)
// =============================================================================

/// Wrapper around MastodonService that implements the BaseMessenger trait.
///
/// The recipient is addressed through the leading mention in the composed
/// body; a direct-visibility status is delivered to its mentioned accounts.
pub struct MastodonAdapter(pub Arc<MastodonService>);

impl MastodonAdapter {
    pub fn new(service: Arc<MastodonService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseMessenger for MastodonAdapter {
    async fn send_direct(
        &self,
        recipient: &Handle,
        subject: &str,
        body: &str,
        idempotency_key: &str,
    ) -> Result<()> {
        debug!("Posting direct status addressed to {}", recipient);

        let draft = NewStatus {
            status: body.to_string(),
            spoiler_text: Some(subject.to_string()),
            visibility: Visibility::Direct,
            language: Some("en".to_string()),
            content_type: Some("text/plain".to_string()),
        };

        self.0
            .post_status(&draft, Some(idempotency_key))
            .await
            .map(|_| ())
            .map_err(Into::into)
    }
}
