use std::fmt;

use anyhow::Result;
use sqlx::PgPool;

/// Account handle, local (`@username`) or remote (`username@domain`).
///
/// Opaque value type; equality is exact string equality. The formatting is
/// produced by the SQL projection, never rebuilt in Rust.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(String);

impl Handle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Handle {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Handle {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One raw follow edge between a local and a remote account.
///
/// Duplicates are possible at the source; the partitioner deduplicates by
/// set insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowEdge {
    pub local: Handle,
    pub remote: Handle,
}

impl FollowEdge {
    pub fn new(local: impl Into<Handle>, remote: impl Into<Handle>) -> Self {
        Self {
            local: local.into(),
            remote: remote.into(),
        }
    }

    /// Local accounts following accounts on `remote_domain`.
    pub async fn fetch_outbound(remote_domain: &str, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, FollowEdgeRow>(
            "SELECT '@' || local.username AS local,
                    remote.username || '@' || remote.domain AS remote
             FROM accounts local
             LEFT JOIN follows f ON local.id = f.account_id
             LEFT JOIN accounts remote ON remote.id = f.target_account_id
             WHERE remote.domain = $1 AND local.domain IS NULL",
        )
        .bind(remote_domain)
        .fetch_all(pool)
        .await
        .map(|rows| rows.into_iter().map(Into::into).collect())
        .map_err(Into::into)
    }

    /// Accounts on `remote_domain` following local accounts.
    pub async fn fetch_inbound(remote_domain: &str, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, FollowEdgeRow>(
            "SELECT '@' || local.username AS local,
                    remote.username || '@' || remote.domain AS remote
             FROM accounts local
             LEFT JOIN follows f ON local.id = f.target_account_id
             LEFT JOIN accounts remote ON remote.id = f.account_id
             WHERE remote.domain = $1 AND local.domain IS NULL",
        )
        .bind(remote_domain)
        .fetch_all(pool)
        .await
        .map(|rows| rows.into_iter().map(Into::into).collect())
        .map_err(Into::into)
    }
}

#[derive(Debug, sqlx::FromRow)]
struct FollowEdgeRow {
    local: String,
    remote: String,
}

impl From<FollowEdgeRow> for FollowEdge {
    fn from(row: FollowEdgeRow) -> Self {
        Self {
            local: Handle::from(row.local),
            remote: Handle::from(row.remote),
        }
    }
}
