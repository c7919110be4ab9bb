//! Worker-side consumer loop.
//!
//! Receives jobs from the queue, matches on the job name, and dispatches
//! to the matching handler. Handler failures are logged and the job is
//! dropped; retry/backoff belongs to the queue system's configuration,
//! not to this loop.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::NotifyError;
use crate::job::{ConfirmationEmailPayload, NotificationJob, SEND_CONFIRMATION_EMAIL};

/// Trait for confirmation-email delivery.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends a confirmation email for a committed order.
    async fn send_confirmation(&self, payload: &ConfirmationEmailPayload)
    -> Result<(), NotifyError>;
}

/// Email sender that only logs the send. Stands in for a real provider.
#[derive(Debug, Clone, Default)]
pub struct LoggingEmailSender;

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send_confirmation(
        &self,
        payload: &ConfirmationEmailPayload,
    ) -> Result<(), NotifyError> {
        tracing::info!(
            email = %payload.email,
            order_id = %payload.order_id,
            amount = %payload.amount,
            "confirmation email sent"
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    sent: Vec<ConfirmationEmailPayload>,
    fail_on_send: bool,
}

/// Email sender for tests: records every delivery.
#[derive(Debug, Clone, Default)]
pub struct RecordingEmailSender {
    state: Arc<RwLock<RecordingState>>,
}

impl RecordingEmailSender {
    /// Creates a new recording sender.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the sender to fail every delivery.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Returns the payloads delivered so far.
    pub fn sent(&self) -> Vec<ConfirmationEmailPayload> {
        self.state.read().unwrap().sent.clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send_confirmation(
        &self,
        payload: &ConfirmationEmailPayload,
    ) -> Result<(), NotifyError> {
        let mut state = self.state.write().unwrap();
        if state.fail_on_send {
            return Err(NotifyError::Delivery("injected send failure".to_string()));
        }
        state.sent.push(payload.clone());
        Ok(())
    }
}

/// The notification worker.
pub struct Worker<E: EmailSender> {
    rx: mpsc::UnboundedReceiver<NotificationJob>,
    sender: E,
}

impl<E: EmailSender> Worker<E> {
    /// Creates a worker over the consumer end of a queue.
    pub fn new(rx: mpsc::UnboundedReceiver<NotificationJob>, sender: E) -> Self {
        Self { rx, sender }
    }

    /// Runs until the queue's sending half is dropped.
    pub async fn run(mut self) {
        while let Some(job) = self.rx.recv().await {
            if let Err(error) = dispatch(&self.sender, &job).await {
                tracing::error!(job = %job.name, %error, "notification job failed");
            }
        }
        tracing::info!("notification queue closed, worker stopping");
    }

    /// Consumes at most one job. Used by tests that need deterministic
    /// stepping instead of a background loop.
    pub async fn run_one(&mut self) -> Option<Result<(), NotifyError>> {
        let job = self.rx.recv().await?;
        Some(dispatch(&self.sender, &job).await)
    }
}

async fn dispatch<E: EmailSender>(sender: &E, job: &NotificationJob) -> Result<(), NotifyError> {
    match job.name.as_str() {
        SEND_CONFIRMATION_EMAIL => {
            let payload: ConfirmationEmailPayload = serde_json::from_value(job.payload.clone())
                .map_err(|source| NotifyError::Payload {
                    name: job.name.clone(),
                    source,
                })?;
            sender.send_confirmation(&payload).await
        }
        other => {
            tracing::warn!(job = other, "unknown job name, discarding");
            Ok(())
        }
    }
}
