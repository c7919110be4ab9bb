//! Queue trait and in-memory implementation.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::NotifyError;
use crate::job::NotificationJob;

/// Trait for notification queues.
///
/// Enqueue is fire-and-forget: the caller never waits on job completion,
/// and multiple callers may enqueue concurrently with no cross-call
/// ordering requirement.
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    /// Places a job on the queue.
    async fn enqueue(&self, job: NotificationJob) -> Result<(), NotifyError>;
}

#[derive(Debug, Default)]
struct QueueState {
    enqueued: usize,
    fail_on_enqueue: bool,
}

/// In-memory queue backed by an unbounded channel.
///
/// The receiving half returned by [`InMemoryQueue::new`] feeds a
/// [`Worker`](crate::worker::Worker); the sending half is the handle the
/// order service enqueues through.
#[derive(Clone)]
pub struct InMemoryQueue {
    tx: mpsc::UnboundedSender<NotificationJob>,
    state: Arc<RwLock<QueueState>>,
}

impl InMemoryQueue {
    /// Creates a queue and its consumer end.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<NotificationJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let queue = Self {
            tx,
            state: Arc::new(RwLock::new(QueueState::default())),
        };
        (queue, rx)
    }

    /// Configures the queue to fail every enqueue call.
    pub fn set_fail_on_enqueue(&self, fail: bool) {
        self.state.write().unwrap().fail_on_enqueue = fail;
    }

    /// Returns the number of successfully enqueued jobs.
    pub fn enqueued_count(&self) -> usize {
        self.state.read().unwrap().enqueued
    }
}

#[async_trait]
impl NotificationQueue for InMemoryQueue {
    async fn enqueue(&self, job: NotificationJob) -> Result<(), NotifyError> {
        if self.state.read().unwrap().fail_on_enqueue {
            return Err(NotifyError::Enqueue("injected enqueue failure".to_string()));
        }

        self.tx
            .send(job)
            .map_err(|e| NotifyError::Enqueue(e.to_string()))?;
        self.state.write().unwrap().enqueued += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Money, OrderId};

    #[tokio::test]
    async fn enqueue_delivers_to_consumer() {
        let (queue, mut rx) = InMemoryQueue::new();
        let job =
            NotificationJob::confirmation_email("ada@example.com", OrderId::new(), Money::zero());

        queue.enqueue(job.clone()).await.unwrap();
        assert_eq!(queue.enqueued_count(), 1);
        assert_eq!(rx.recv().await, Some(job));
    }

    #[tokio::test]
    async fn injected_failure_rejects_enqueue() {
        let (queue, mut rx) = InMemoryQueue::new();
        queue.set_fail_on_enqueue(true);

        let job =
            NotificationJob::confirmation_email("ada@example.com", OrderId::new(), Money::zero());
        let err = queue.enqueue(job).await.unwrap_err();
        assert!(matches!(err, NotifyError::Enqueue(_)));
        assert_eq!(queue.enqueued_count(), 0);
        assert!(rx.try_recv().is_err());
    }
}
