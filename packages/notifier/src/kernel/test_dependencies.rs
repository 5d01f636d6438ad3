// TestDependencies - mock implementations for testing
//
// Provides mock collaborators that can be injected into the severance
// pipeline for tests.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::severance::{FollowEdge, Handle};
use crate::kernel::{BaseMessenger, BaseRelationSource};

// =============================================================================
// Mock Relation Source
// =============================================================================

pub struct MockRelationSource {
    outbound: Vec<FollowEdge>,
    inbound: Vec<FollowEdge>,
}

impl MockRelationSource {
    pub fn new() -> Self {
        Self {
            outbound: Vec::new(),
            inbound: Vec::new(),
        }
    }

    pub fn with_outbound_edge(mut self, local: &str, remote: &str) -> Self {
        self.outbound.push(FollowEdge::new(local, remote));
        self
    }

    pub fn with_inbound_edge(mut self, local: &str, remote: &str) -> Self {
        self.inbound.push(FollowEdge::new(local, remote));
        self
    }
}

impl Default for MockRelationSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRelationSource for MockRelationSource {
    async fn fetch_outbound_edges(&self, _remote_domain: &str) -> Result<Vec<FollowEdge>> {
        Ok(self.outbound.clone())
    }

    async fn fetch_inbound_edges(&self, _remote_domain: &str) -> Result<Vec<FollowEdge>> {
        Ok(self.inbound.clone())
    }
}

// =============================================================================
// Mock Messenger
// =============================================================================

/// Arguments captured from a send_direct call
#[derive(Debug, Clone)]
pub struct SendCall {
    pub recipient: Handle,
    pub subject: String,
    pub body: String,
    pub idempotency_key: String,
}

pub struct MockMessenger {
    calls: Arc<Mutex<Vec<SendCall>>>,
    failures_remaining: Arc<Mutex<u32>>,
}

impl MockMessenger {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            failures_remaining: Arc::new(Mutex::new(0)),
        }
    }

    /// Make the next `count` send attempts fail.
    pub fn fail_times(self, count: u32) -> Self {
        *self.failures_remaining.lock().unwrap() = count;
        self
    }

    /// Get all recorded send calls, including failed attempts.
    pub fn calls(&self) -> Vec<SendCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Check if a recipient received at least one send attempt.
    pub fn was_notified(&self, recipient: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.recipient.as_str() == recipient)
    }
}

impl Default for MockMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMessenger for MockMessenger {
    async fn send_direct(
        &self,
        recipient: &Handle,
        subject: &str,
        body: &str,
        idempotency_key: &str,
    ) -> Result<()> {
        // Record the call, even when it is about to fail
        self.calls.lock().unwrap().push(SendCall {
            recipient: recipient.clone(),
            subject: subject.to_string(),
            body: body.to_string(),
            idempotency_key: idempotency_key.to_string(),
        });

        let mut failures = self.failures_remaining.lock().unwrap();
        if *failures > 0 {
            *failures -= 1;
            anyhow::bail!("simulated send failure");
        }

        Ok(())
    }
}
