//! Ticket lifecycle service.
//!
//! Orchestrates validation, contact deduplication, ticket persistence, the
//! resolve transition, and post-commit notification. Contact
//! lookup-or-create and ticket insert share one transaction so concurrent
//! creations under the same email cannot produce duplicate contacts; the
//! notifier runs strictly after commit and its outcome never affects the
//! returned result.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    error::{CoreError, Result},
    models::{Contact, TicketId, TicketWithContact},
    notify::TicketNotifier,
    storage::Storage,
    validate::{self, NormalizedSubmission, TicketSubmission},
};

/// Service implementing the ticket lifecycle operations.
#[derive(Clone)]
pub struct TicketService {
    storage: Storage,
    notifier: Arc<dyn TicketNotifier>,
}

impl TicketService {
    /// Creates a new service over the given storage and notifier.
    pub fn new(storage: Storage, notifier: Arc<dyn TicketNotifier>) -> Self {
        Self { storage, notifier }
    }

    /// Returns the underlying storage.
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Lists all tickets, each with its owning contact.
    ///
    /// Order is store-defined. No side effects.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Database` if the read fails.
    pub async fn list_tickets(&self) -> Result<Vec<TicketWithContact>> {
        self.storage.tickets.list_with_contacts().await
    }

    /// Creates a ticket, lazily creating its contact.
    ///
    /// Validates and normalizes the submission, then persists
    /// contact-creation (if any) and ticket-creation atomically. After the
    /// transaction commits, the notifier is invoked on a spawned task with
    /// the created ticket; notification failure cannot fail this operation.
    ///
    /// If a contact already exists for the normalized email, the submitted
    /// name is discarded in favor of the stored contact (first write wins).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` on a bad email (nothing persisted)
    /// or `CoreError::Database` if the transaction fails (nothing visible).
    #[instrument(name = "create_ticket", skip(self, submission))]
    pub async fn create_ticket(&self, submission: TicketSubmission) -> Result<TicketWithContact> {
        let normalized = validate::normalize(submission)?;

        let mut tx = self.storage.pool().begin().await.map_err(CoreError::from)?;

        let contact = self.find_or_create_contact(&mut tx, &normalized).await?;
        let ticket = self
            .storage
            .tickets
            .create_in_tx(&mut tx, contact.id, &normalized.issue_description)
            .await?;

        tx.commit().await.map_err(CoreError::from)?;

        let created = TicketWithContact::new(ticket, contact);
        info!(ticket_id = %created.id, contact_id = %created.contact_id, "Ticket created");

        // The transaction is committed; the announcement runs on its own
        // task and cannot affect the result.
        let notifier = self.notifier.clone();
        let snapshot = created.clone();
        tokio::spawn(async move {
            notifier.ticket_created(&snapshot).await;
        });

        Ok(created)
    }

    /// Resolves a ticket by ID.
    ///
    /// Idempotent: resolving an already-resolved ticket succeeds and
    /// returns the same terminal state.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if no ticket exists for the ID, or
    /// `CoreError::Database` if the update fails.
    #[instrument(name = "resolve_ticket", skip(self))]
    pub async fn resolve_ticket(&self, ticket_id: TicketId) -> Result<TicketWithContact> {
        let mut tx = self.storage.pool().begin().await.map_err(CoreError::from)?;

        if !self.storage.tickets.mark_resolved_in_tx(&mut tx, ticket_id).await? {
            return Err(CoreError::NotFound(format!("ticket {ticket_id} not found")));
        }

        let resolved = self
            .storage
            .tickets
            .find_with_contact_in_tx(&mut tx, ticket_id)
            .await?
            .ok_or_else(|| CoreError::Database("resolved ticket vanished mid-transaction".to_string()))?;

        tx.commit().await.map_err(CoreError::from)?;

        info!(ticket_id = %ticket_id, "Ticket resolved");
        Ok(resolved)
    }

    /// Looks up the contact for a normalized email, creating it if absent.
    ///
    /// Runs inside the caller's transaction. When the insert loses a
    /// concurrent race for the same email, the committed winner is
    /// re-read instead of surfacing the unique violation.
    async fn find_or_create_contact(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        normalized: &NormalizedSubmission,
    ) -> Result<Contact> {
        if let Some(existing) =
            self.storage.contacts.find_by_email_in_tx(tx, &normalized.email).await?
        {
            debug!(contact_id = %existing.id, "Reusing existing contact");
            return Ok(existing);
        }

        if let Some(created) = self
            .storage
            .contacts
            .insert_if_absent_in_tx(tx, &normalized.full_name, &normalized.email)
            .await?
        {
            debug!(contact_id = %created.id, "Created new contact");
            return Ok(created);
        }

        // Lost the insert race; the winner's row is committed and visible
        // to a fresh read.
        self.storage
            .contacts
            .find_by_email_in_tx(tx, &normalized.email)
            .await?
            .ok_or_else(|| {
                CoreError::Database("contact missing after conflicting insert".to_string())
            })
    }
}
