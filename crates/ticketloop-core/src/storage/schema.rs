//! Idempotent schema initialization.
//!
//! Runs at process startup and before each test database is handed out.
//! Every statement is `IF NOT EXISTS` so repeated runs are no-ops.

use sqlx::PgPool;

use crate::error::Result;

/// Creates the `contacts` and `tickets` tables if they do not exist.
///
/// # Errors
///
/// Returns `CoreError::Database` if any statement fails.
pub async fn init(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            full_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tickets (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            contact_id UUID NOT NULL REFERENCES contacts(id),
            issue_description TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'open',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_tickets_contact
        ON tickets(contact_id)
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
