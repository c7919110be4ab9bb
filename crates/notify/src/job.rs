//! Notification job types.

use common::{Money, OrderId};
use serde::{Deserialize, Serialize};

/// Name of the order-confirmation email job.
pub const SEND_CONFIRMATION_EMAIL: &str = "send_confirmation_email";

/// A transient queue record: a job name plus a JSON payload.
///
/// Jobs are never persisted in the primary store; they exist only in the
/// queue subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationJob {
    pub name: String,
    pub payload: serde_json::Value,
}

/// Payload of a [`SEND_CONFIRMATION_EMAIL`] job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationEmailPayload {
    /// Recipient address.
    pub email: String,
    /// The committed order.
    pub order_id: OrderId,
    /// The committed total, in cents.
    pub amount: Money,
}

impl NotificationJob {
    /// Builds a confirmation-email job for a committed order.
    pub fn confirmation_email(email: impl Into<String>, order_id: OrderId, amount: Money) -> Self {
        let payload = ConfirmationEmailPayload {
            email: email.into(),
            order_id,
            amount,
        };
        Self {
            name: SEND_CONFIRMATION_EMAIL.to_string(),
            // Serializing a struct of plain fields cannot fail.
            payload: serde_json::to_value(payload).unwrap_or(serde_json::Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_email_job_carries_named_payload() {
        let order_id = OrderId::new();
        let job =
            NotificationJob::confirmation_email("ada@example.com", order_id, Money::from_cents(1350));

        assert_eq!(job.name, SEND_CONFIRMATION_EMAIL);
        let payload: ConfirmationEmailPayload = serde_json::from_value(job.payload).unwrap();
        assert_eq!(payload.email, "ada@example.com");
        assert_eq!(payload.order_id, order_id);
        assert_eq!(payload.amount, Money::from_cents(1350));
    }
}
