//! Partitions the raw follow graph into per-account relation categories.
//!
//! Raw edge lists are folded into set-valued maps first, then the relations
//! map is derived fresh from those. No set is mutated while it is being
//! read, so the classification cannot alias itself into a wrong state.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::models::{FollowEdge, Handle};

/// Relations of one local account to accounts on the suspended instance.
///
/// The three sets are pairwise disjoint: a remote account the local account
/// both follows and is followed by appears only in `mutual`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountRelations {
    pub mutual: BTreeSet<Handle>,
    pub outbound_only: BTreeSet<Handle>,
    pub inbound_only: BTreeSet<Handle>,
}

impl AccountRelations {
    pub fn is_empty(&self) -> bool {
        self.mutual.is_empty() && self.outbound_only.is_empty() && self.inbound_only.is_empty()
    }

    fn check_disjoint(&self, account: &Handle) -> Result<(), PartitionError> {
        let overlap = self
            .mutual
            .intersection(&self.outbound_only)
            .chain(self.mutual.intersection(&self.inbound_only))
            .chain(self.outbound_only.intersection(&self.inbound_only))
            .next();

        match overlap {
            Some(handle) => Err(PartitionError::CategoriesOverlap {
                account: account.clone(),
                handle: handle.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Error)]
pub enum PartitionError {
    /// A remote handle landed in more than one category for the same local
    /// account. Logic defect; never silently corrected.
    #[error("relation categories overlap for {account}: {handle} is in more than one set")]
    CategoriesOverlap { account: Handle, handle: Handle },
}

/// Classifies every local account's relations to the remote instance.
///
/// Keys of the returned map are exactly the affected accounts: any account
/// whose three sets would all be empty is dropped. For every key,
/// `mutual ∪ outbound_only ∪ inbound_only` equals the union of its raw
/// follows and raw followers.
pub fn partition(
    outbound: &[FollowEdge],
    inbound: &[FollowEdge],
) -> Result<BTreeMap<Handle, AccountRelations>, PartitionError> {
    let follows = fold_edges(outbound);
    let followers = fold_edges(inbound);

    let locals: BTreeSet<&Handle> = follows.keys().chain(followers.keys()).collect();

    let mut relations = BTreeMap::new();
    for local in locals {
        let raw_follows = follows.get(local).cloned().unwrap_or_default();
        let raw_followers = followers.get(local).cloned().unwrap_or_default();

        let mutual: BTreeSet<Handle> = raw_follows
            .intersection(&raw_followers)
            .cloned()
            .collect();
        let outbound_only: BTreeSet<Handle> =
            raw_follows.difference(&mutual).cloned().collect();
        let inbound_only: BTreeSet<Handle> =
            raw_followers.difference(&mutual).cloned().collect();

        let account = AccountRelations {
            mutual,
            outbound_only,
            inbound_only,
        };

        if account.is_empty() {
            continue;
        }

        account.check_disjoint(local)?;
        relations.insert(local.clone(), account);
    }

    Ok(relations)
}

fn fold_edges(edges: &[FollowEdge]) -> BTreeMap<Handle, BTreeSet<Handle>> {
    let mut map: BTreeMap<Handle, BTreeSet<Handle>> = BTreeMap::new();
    for edge in edges {
        map.entry(edge.local.clone())
            .or_default()
            .insert(edge.remote.clone());
    }
    map
}
