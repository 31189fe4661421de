//! Repository for contact database operations.
//!
//! Contacts are insert-or-reuse: the email column carries a unique
//! constraint and the insert path tolerates losing a concurrent race for
//! the same address. Rows are never updated or deleted.

use std::sync::Arc;

use sqlx::{Executor, PgPool, Postgres, Transaction};

use crate::{
    error::Result,
    models::{Contact, ContactId},
};

/// Repository for contact database operations.
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

    /// Finds a contact by normalized email.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Contact>> {
        self.find_by_email_impl(&*self.pool, email).await
    }

    /// Finds a contact by normalized email within a transaction.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn find_by_email_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        email: &str,
    ) -> Result<Option<Contact>> {
        self.find_by_email_impl(&mut **tx, email).await
    }

    /// Private helper for finding contacts by email with generic executor.
    async fn find_by_email_impl<'e, E>(&self, executor: E, email: &str) -> Result<Option<Contact>>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, full_name, email, created_at
            FROM contacts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await?;

        Ok(contact)
    }

    /// Finds a contact by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn find_by_id(&self, contact_id: ContactId) -> Result<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            SELECT id, full_name, email, created_at
            FROM contacts
            WHERE id = $1
            "#,
        )
        .bind(contact_id.0)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(contact)
    }

    /// Inserts a contact unless one already exists for the email.
    ///
    /// Returns the inserted row, or `None` when a concurrent transaction
    /// won the insert race for the same email. The unique constraint on
    /// `email` is the authoritative tie-breaker; callers re-read by email
    /// on `None` instead of surfacing the conflict.
    ///
    /// # Errors
    ///
    /// Returns error if the insert fails for any reason other than the
    /// tolerated email conflict.
    pub async fn insert_if_absent_in_tx(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        full_name: &str,
        email: &str,
    ) -> Result<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            INSERT INTO contacts (id, full_name, email)
            VALUES ($1, $2, $3)
            ON CONFLICT (email) DO NOTHING
            RETURNING id, full_name, email, created_at
            "#,
        )
        .bind(ContactId::new().0)
        .bind(full_name)
        .bind(email)
        .fetch_optional(&mut **tx)
        .await?;

        Ok(contact)
    }

    /// Counts all contacts.
    ///
    /// # Errors
    ///
    /// Returns error if the query fails.
    pub async fn count(&self) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM contacts").fetch_one(&*self.pool).await?;

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
