//! Sequential delivery of composed notifications with indefinite retry.

use std::time::Duration;

use tracing::{error, info};
use uuid::Uuid;

use super::models::Handle;
use crate::kernel::BaseMessenger;

/// Delay between retries of a failed send.
pub const RETRY_DELAY: Duration = Duration::from_secs(5);

/// One notification to deliver.
///
/// The idempotency key is generated once, before the first attempt, and is
/// reused verbatim on every retry of this job so the instance can
/// deduplicate repeated posts.
#[derive(Debug, Clone)]
pub struct NotificationJob {
    pub recipient: Handle,
    pub body: String,
    pub idempotency_key: String,
}

impl NotificationJob {
    pub fn new(recipient: Handle, body: String) -> Self {
        Self {
            recipient,
            body,
            idempotency_key: format!("sevnot-{}", Uuid::new_v4()),
        }
    }
}

/// Delivers jobs one at a time, retrying each forever until it succeeds.
///
/// A permanently failing send blocks all later jobs; external process
/// termination is the only way out. This is deliberate: the run either
/// notifies everyone or does not finish.
pub struct Dispatcher<'a> {
    messenger: &'a dyn BaseMessenger,
    subject: String,
    retry_delay: Duration,
}

impl<'a> Dispatcher<'a> {
    pub fn new(messenger: &'a dyn BaseMessenger, subject: String, retry_delay: Duration) -> Self {
        Self {
            messenger,
            subject,
            retry_delay,
        }
    }

    pub async fn dispatch_all(&self, jobs: &[NotificationJob]) {
        let total = jobs.len();
        for (i, job) in jobs.iter().enumerate() {
            self.dispatch(job, i + 1, total).await;
        }
    }

    async fn dispatch(&self, job: &NotificationJob, position: usize, total: usize) {
        loop {
            info!("Sending DM {} of {}", position, total);
            match self
                .messenger
                .send_direct(&job.recipient, &self.subject, &job.body, &job.idempotency_key)
                .await
            {
                Ok(()) => return,
                Err(e) => {
                    error!("Failed to send DM to {}: {:#}", job.recipient, e);
                    info!("Will retry in {} seconds.", self.retry_delay.as_secs());
                    tokio::time::sleep(self.retry_delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::test_dependencies::MockMessenger;

    fn job(recipient: &str, body: &str) -> NotificationJob {
        NotificationJob::new(Handle::from(recipient), body.to_string())
    }

    #[test]
    fn idempotency_keys_are_unique_per_job() {
        let first = job("@alice", "hi");
        let second = job("@alice", "hi");
        assert_ne!(first.idempotency_key, second.idempotency_key);
        assert!(first.idempotency_key.starts_with("sevnot-"));
    }

    #[tokio::test]
    async fn delivers_every_job_once_on_success() {
        let messenger = MockMessenger::new();
        let dispatcher = Dispatcher::new(&messenger, "subject".to_string(), Duration::ZERO);

        let jobs = vec![job("@alice", "hello alice"), job("@bob", "hello bob")];
        dispatcher.dispatch_all(&jobs).await;

        let calls = messenger.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].recipient, Handle::from("@alice"));
        assert_eq!(calls[0].body, "hello alice");
        assert_eq!(calls[1].recipient, Handle::from("@bob"));
    }

    #[tokio::test]
    async fn retries_with_the_same_idempotency_key() {
        let messenger = MockMessenger::new().fail_times(2);
        let dispatcher = Dispatcher::new(&messenger, "subject".to_string(), Duration::ZERO);

        let jobs = vec![job("@alice", "hello")];
        dispatcher.dispatch_all(&jobs).await;

        let calls = messenger.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].idempotency_key, calls[1].idempotency_key);
        assert_eq!(calls[1].idempotency_key, calls[2].idempotency_key);
    }

    #[tokio::test]
    async fn failing_job_does_not_reach_later_jobs_until_it_succeeds() {
        let messenger = MockMessenger::new().fail_times(3);
        let dispatcher = Dispatcher::new(&messenger, "subject".to_string(), Duration::ZERO);

        let jobs = vec![job("@alice", "first"), job("@bob", "second")];
        dispatcher.dispatch_all(&jobs).await;

        let calls = messenger.calls();
        // 4 attempts for @alice, then 1 for @bob
        assert_eq!(calls.len(), 5);
        assert!(calls[..4].iter().all(|c| c.recipient == Handle::from("@alice")));
        assert_eq!(calls[4].recipient, Handle::from("@bob"));
    }

    #[tokio::test]
    async fn subject_is_passed_through_unchanged() {
        let messenger = MockMessenger::new();
        let dispatcher = Dispatcher::new(
            &messenger,
            "You are affected by a future suspension (remote.example)".to_string(),
            Duration::ZERO,
        );

        dispatcher.dispatch_all(&[job("@alice", "hello")]).await;

        let calls = messenger.calls();
        assert_eq!(
            calls[0].subject,
            "You are affected by a future suspension (remote.example)"
        );
    }
}
