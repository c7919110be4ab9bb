use thiserror::Error;

/// Errors from the notification subsystem.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The job could not be placed on the queue.
    #[error("Enqueue failed: {0}")]
    Enqueue(String),

    /// A consumed job carried a payload that does not match its name.
    #[error("Malformed payload for job {name}: {source}")]
    Payload {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The email handler failed; the queue's retry policy applies.
    #[error("Email delivery failed: {0}")]
    Delivery(String),
}
