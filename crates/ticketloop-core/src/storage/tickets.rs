//! Repository for ticket database operations.
//!
//! Tickets are created once, joined with their owning contact on every
//! read, and mutated only by the resolve transition. No deletion path
//! exists.

use std::sync::Arc;

use sqlx::{Executor, PgPool, Postgres, Transaction};

use crate::{
    error::Result,
    models::{ContactId, Ticket, TicketId, TicketStatus, TicketWithContact},
};

/// Repository for ticket database operations.
pub struct Repository {
    pool: Arc<PgPool>,
}

impl Repository {
    /// Creates a new repository instance.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Returns a reference to the database pool.
    pub fn pool(&self) -> Arc<PgPool> {
        self.pool.clone()
    }

    /// Creates a new open ticket within a transaction.
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails or the contact reference is
    /// violated.
    pub async fn create_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        contact_id: ContactId,
        issue_description: &str,
    ) -> Result<Ticket> {
        let ticket = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (id, contact_id, issue_description, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, contact_id, issue_description, status, created_at
            "#,
        )
        .bind(TicketId::new().0)
        .bind(contact_id.0)
        .bind(issue_description)
        .bind(TicketStatus::Open)
        .fetch_one(&mut **tx)
        .await?;

        Ok(ticket)
    }

    /// Lists all tickets, each joined with its owning contact.
    ///
    /// Order is store-defined; callers must not assume creation order.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn list_with_contacts(&self) -> Result<Vec<TicketWithContact>> {
        let tickets = sqlx::query_as::<_, TicketWithContact>(
            r#"
            SELECT t.id, t.contact_id, t.issue_description, t.status, t.created_at,
                   c.full_name AS contact_full_name,
                   c.email AS contact_email,
                   c.created_at AS contact_created_at
            FROM tickets t
            JOIN contacts c ON c.id = t.contact_id
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(tickets)
    }

    /// Finds a ticket by ID, joined with its owning contact.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn find_with_contact(&self, ticket_id: TicketId) -> Result<Option<TicketWithContact>> {
        self.find_with_contact_impl(&*self.pool, ticket_id).await
    }

    /// Finds a ticket with its contact within a transaction.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn find_with_contact_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ticket_id: TicketId,
    ) -> Result<Option<TicketWithContact>> {
        self.find_with_contact_impl(&mut **tx, ticket_id).await
    }

    /// Private helper for the joined lookup with generic executor.
    async fn find_with_contact_impl<'e, E>(
        &self,
        executor: E,
        ticket_id: TicketId,
    ) -> Result<Option<TicketWithContact>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ticket = sqlx::query_as::<_, TicketWithContact>(
            r#"
            SELECT t.id, t.contact_id, t.issue_description, t.status, t.created_at,
                   c.full_name AS contact_full_name,
                   c.email AS contact_email,
                   c.created_at AS contact_created_at
            FROM tickets t
            JOIN contacts c ON c.id = t.contact_id
            WHERE t.id = $1
            "#,
        )
        .bind(ticket_id.0)
        .fetch_optional(executor)
        .await?;

        Ok(ticket)
    }

    /// Marks a ticket as resolved.
    ///
    /// Re-applying the terminal state is allowed: an already-resolved row
    /// still matches and reports one affected row. Returns `false` only
    /// when no ticket exists for the ID.
    ///
    /// # Errors
    ///
    /// Returns error if the update fails.
    pub async fn mark_resolved_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ticket_id: TicketId,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE tickets
            SET status = $1
            WHERE id = $2
            "#,
        )
        .bind(TicketStatus::Resolved)
        .bind(ticket_id.0)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts all tickets.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM tickets").fetch_one(&*self.pool).await?;

        Ok(count.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn repository_can_be_created() {
        let pool = sqlx::PgPool::connect_lazy("postgresql://test").unwrap();
        let _repo = Repository::new(Arc::new(pool));
    }
}
