//! Severance notification pipeline.
//!
//! Data flows one way: raw follow edges are fetched once, partitioned into
//! per-account relation sets, rendered into one message per affected
//! account, and dispatched sequentially.

pub mod compose;
pub mod dispatch;
pub mod models;
pub mod relations;

use std::time::Duration;

use anyhow::{Context, Result};
use tracing::info;

pub use compose::{compose, subject, SeveranceContext};
pub use dispatch::{Dispatcher, NotificationJob, RETRY_DELAY};
pub use models::{FollowEdge, Handle};
pub use relations::{partition, AccountRelations, PartitionError};

use crate::kernel::{BaseMessenger, BaseRelationSource};

/// Runs the full pipeline: fetch edges, partition, compose, dispatch.
///
/// Strictly sequential. Partitioning completes before any message is
/// composed, and each job finishes (including all its retries) before the
/// next one starts.
pub async fn notify_affected_accounts(
    relation_source: &dyn BaseRelationSource,
    messenger: &dyn BaseMessenger,
    ctx: &SeveranceContext,
    retry_delay: Duration,
) -> Result<()> {
    let outbound = relation_source
        .fetch_outbound_edges(&ctx.remote_instance)
        .await
        .context("Failed to fetch local accounts following the remote instance")?;
    let inbound = relation_source
        .fetch_inbound_edges(&ctx.remote_instance)
        .await
        .context("Failed to fetch remote accounts following local accounts")?;

    let affected = partition(&outbound, &inbound)?;
    if affected.is_empty() {
        info!(
            "No local accounts are affected by the suspension of {}",
            ctx.remote_instance
        );
        return Ok(());
    }

    info!(
        "{} local accounts are affected by the suspension of {}",
        affected.len(),
        ctx.remote_instance
    );

    let jobs: Vec<NotificationJob> = affected
        .iter()
        .map(|(account, relations)| {
            NotificationJob::new(account.clone(), compose(account, relations, ctx))
        })
        .collect();

    let dispatcher = Dispatcher::new(messenger, subject(ctx), retry_delay);
    dispatcher.dispatch_all(&jobs).await;

    Ok(())
}
