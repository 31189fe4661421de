//! Notification seam between the ticket service and outbound transports.
//!
//! The service announces ticket creation through the [`TicketNotifier`]
//! trait without knowing how (or whether) the announcement leaves the
//! process. Implementations own their failure handling: a notification
//! outcome must never reach the service.

use crate::models::TicketWithContact;

/// Trait for announcing created tickets to interested parties.
///
/// Called strictly after the creating transaction has committed. Delivery
/// is best-effort, at-most-once: implementations must log failures with
/// enough context to diagnose and swallow them, never propagating back to
/// the caller.
#[async_trait::async_trait]
pub trait TicketNotifier: Send + Sync {
    /// Announces a newly created ticket.
    async fn ticket_created(&self, ticket: &TicketWithContact);
}

/// No-op notifier that discards all announcements.
///
/// Used when no webhook endpoint is configured and for testing scenarios
/// where notifications should be ignored.
#[derive(Debug, Default)]
pub struct NoOpNotifier;

impl NoOpNotifier {
    /// Creates a new no-op notifier.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl TicketNotifier for NoOpNotifier {
    async fn ticket_created(&self, _ticket: &TicketWithContact) {}
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{Contact, ContactId, Ticket, TicketId, TicketStatus};

    #[tokio::test]
    async fn no_op_notifier_discards_announcements() {
        let contact = Contact {
            id: ContactId::new(),
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            created_at: Utc::now(),
        };
        let ticket = Ticket {
            id: TicketId::new(),
            contact_id: contact.id,
            issue_description: "broken".to_string(),
            status: TicketStatus::Open,
            created_at: Utc::now(),
        };

        // Should not panic or block
        NoOpNotifier::new().ticket_created(&TicketWithContact::new(ticket, contact)).await;
    }
}
