//! Database access layer implementing the repository pattern for ticket
//! persistence.
//!
//! The repository layer translates between domain models and the database
//! schema. All database operations go through these repositories; direct
//! SQL outside this module is forbidden to keep queries in one place.

use std::sync::Arc;

use sqlx::PgPool;

pub mod contacts;
pub mod schema;
pub mod tickets;

use crate::error::Result;

/// Container for all repository instances providing unified database access.
///
/// Entry point for all database operations. Manages a shared connection
/// pool and provides type-safe access to each domain repository.
#[derive(Clone)]
pub struct Storage {
    /// Repository for contact operations.
    pub contacts: Arc<contacts::Repository>,

    /// Repository for ticket operations.
    pub tickets: Arc<tickets::Repository>,
}

impl Storage {
    /// Creates a new storage instance with the given connection pool.
    ///
    /// Both repositories share the same pool with Arc for efficient
    /// resource usage.
    pub fn new(pool: PgPool) -> Self {
        let pool = Arc::new(pool);

        Self {
            contacts: Arc::new(contacts::Repository::new(pool.clone())),
            tickets: Arc::new(tickets::Repository::new(pool)),
        }
    }

    /// Returns the shared connection pool.
    pub fn pool(&self) -> Arc<PgPool> {
        self.tickets.pool()
    }

    /// Performs a health check on the database connection.
    ///
    /// Executes a simple query to verify database connectivity. Used by
    /// the `/health/ready` endpoint.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Database` if the connection is unhealthy or the
    /// query times out.
    pub async fn health_check(&self) -> Result<()> {
        let _: (i32,) = sqlx::query_as("SELECT 1").fetch_one(&*self.pool()).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn storage_can_be_created() {
        // Verifies the Storage struct can be instantiated; actual database
        // testing happens in integration tests.
        let pool = sqlx::PgPool::connect_lazy("postgresql://test").unwrap();
        let _storage = Storage::new(pool);
    }
}
