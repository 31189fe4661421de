//! Test infrastructure for ticketloop integration tests.
//!
//! Provides per-test database isolation, a mock webhook receiver, and
//! fixture builders so tests stay deterministic and clean up after
//! themselves.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;
use ticketloop_core::{storage::Storage, NoOpNotifier, TicketNotifier, TicketService};
use tracing_subscriber::EnvFilter;

pub mod database;
pub mod fixtures;
pub mod webhook;

pub use database::{setup_test_database, TestDatabase};
pub use fixtures::SubmissionBuilder;
pub use webhook::WebhookReceiver;

/// Test environment with all necessary infrastructure.
pub struct TestEnv {
    /// Database pool for this test's isolated database.
    pool: PgPool,
    /// Mock webhook receiver for notification assertions.
    pub webhook: WebhookReceiver,
}

impl TestEnv {
    /// Creates a new test environment with an isolated database and a
    /// running mock webhook receiver.
    pub async fn new() -> Result<Self> {
        // Initialize tracing for tests
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("warn,ticketloop=debug")),
            )
            .with_test_writer()
            .try_init();

        let pool = database::setup_test_database().await?;
        let webhook = WebhookReceiver::start().await;

        Ok(Self { pool, webhook })
    }

    /// Returns the database pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Builds a storage layer over this environment's database.
    pub fn storage(&self) -> Storage {
        Storage::new(self.pool.clone())
    }

    /// Builds a ticket service with notifications disabled.
    pub fn service(&self) -> TicketService {
        self.service_with_notifier(Arc::new(NoOpNotifier::new()))
    }

    /// Builds a ticket service announcing to the given notifier.
    pub fn service_with_notifier(&self, notifier: Arc<dyn TicketNotifier>) -> TicketService {
        TicketService::new(self.storage(), notifier)
    }

    /// Counts rows in a table.
    pub async fn count_rows(&self, table: &str) -> Result<i64> {
        let query = format!("SELECT COUNT(*) FROM {}", table);
        let count = sqlx::query_scalar(&query).fetch_one(&self.pool).await?;
        Ok(count)
    }
}
