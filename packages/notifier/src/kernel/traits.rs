// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only. The classification and composition
// logic lives in domains/severance and stays free of I/O.
//
// Naming convention: Base* for trait names (e.g., BaseMessenger)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::severance::{FollowEdge, Handle};

// =============================================================================
// Relation Source Trait (Infrastructure - follow graph)
// =============================================================================

#[async_trait]
pub trait BaseRelationSource: Send + Sync {
    /// Local accounts following accounts on `remote_domain`.
    async fn fetch_outbound_edges(&self, remote_domain: &str) -> Result<Vec<FollowEdge>>;

    /// Accounts on `remote_domain` following local accounts.
    async fn fetch_inbound_edges(&self, remote_domain: &str) -> Result<Vec<FollowEdge>>;
}

// =============================================================================
// Messenger Trait (Infrastructure - DM delivery)
// =============================================================================

#[async_trait]
pub trait BaseMessenger: Send + Sync {
    /// Deliver one private message to `recipient`.
    ///
    /// Implementations must honor `idempotency_key`: a retried call with the
    /// same key must not produce a second visible delivery.
    async fn send_direct(
        &self,
        recipient: &Handle,
        subject: &str,
        body: &str,
        idempotency_key: &str,
    ) -> Result<()>;
}
