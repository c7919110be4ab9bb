//! Notification queue and worker.
//!
//! Order placement enqueues a fire-and-forget job after its transaction
//! commits; an out-of-process worker consumes the queue, matches on the
//! job name, and dispatches to a handler. The queue gives at-least-once
//! delivery with no ordering guarantees, and nothing here ever
//! participates in the store transaction.

pub mod error;
pub mod job;
pub mod queue;
pub mod worker;

pub use error::NotifyError;
pub use job::{ConfirmationEmailPayload, NotificationJob, SEND_CONFIRMATION_EMAIL};
pub use queue::{InMemoryQueue, NotificationQueue};
pub use worker::{EmailSender, LoggingEmailSender, RecordingEmailSender, Worker};
