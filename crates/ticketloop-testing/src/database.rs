//! Database testing utilities.
//!
//! Provides isolated test databases using PostgreSQL. Each test gets its
//! own uniquely-named database, created through an admin connection and
//! dropped when the guard is released.
//!
//! Tests connect to PostgreSQL on the port specified in the DATABASE_URL
//! environment variable (defaults to 5432).

use anyhow::{Context, Result};
use sqlx::{postgres::PgConnectOptions, PgPool};
use uuid::Uuid;

/// Isolated PostgreSQL database for a single test.
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Creates a new uniquely-named test database with the schema applied.
    pub async fn new() -> Result<Self> {
        let database_name = format!("ticketloop_test_{}", Uuid::new_v4().simple());
        let port = database_port();

        // First connect to the postgres database to create the test database
        let admin_options = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(port)
            .username("postgres")
            .password("postgres")
            .database("postgres");

        let admin_pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(std::time::Duration::from_secs(10))
            .connect_with(admin_options)
            .await
            .context("Failed to connect to PostgreSQL admin database")?;

        let create_db_query = format!("CREATE DATABASE \"{}\"", database_name);
        sqlx::query(&create_db_query)
            .execute(&admin_pool)
            .await
            .context("Failed to create test database")?;

        admin_pool.close().await;

        let connect_options = PgConnectOptions::new()
            .host("127.0.0.1")
            .port(port)
            .username("postgres")
            .password("postgres")
            .database(&database_name);

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(10))
            .connect_with(connect_options)
            .await
            .context("Failed to connect to PostgreSQL test database")?;

        ticketloop_core::storage::schema::init(&pool)
            .await
            .context("Failed to initialize schema in test database")?;

        Ok(Self { pool })
    }

    /// Returns the connection pool for the underlying database.
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}

/// Reads the PostgreSQL port from DATABASE_URL, defaulting to 5432.
fn database_port() -> u16 {
    std::env::var("DATABASE_URL")
        .ok()
        .and_then(|url| {
            url.split(':')
                .nth(3)
                .and_then(|port_str| port_str.split('/').next())
                .and_then(|port_str| port_str.parse::<u16>().ok())
        })
        .unwrap_or(5432)
}

/// Test database instance that cleans up on drop.
pub struct TestDatabaseGuard {
    database: TestDatabase,
    database_name: String,
    port: u16,
}

impl TestDatabaseGuard {
    /// Returns the guarded database's pool.
    pub fn pool(&self) -> PgPool {
        self.database.pool()
    }
}

impl Drop for TestDatabaseGuard {
    fn drop(&mut self) {
        let database_name = self.database_name.clone();
        let port = self.port;

        tokio::spawn(async move {
            if let Err(e) = cleanup_test_database(&database_name, port).await {
                tracing::warn!("Failed to cleanup test database {}: {}", database_name, e);
            }
        });
    }
}

async fn cleanup_test_database(database_name: &str, port: u16) -> Result<()> {
    let admin_options = PgConnectOptions::new()
        .host("127.0.0.1")
        .port(port)
        .username("postgres")
        .password("postgres")
        .database("postgres");

    let admin_pool = sqlx::PgPool::connect_with(admin_options).await?;

    // Terminate all connections to the database
    let terminate_query = format!(
        "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}' AND pid <> pg_backend_pid()",
        database_name
    );
    let _ = sqlx::query(&terminate_query).execute(&admin_pool).await;

    let drop_query = format!("DROP DATABASE IF EXISTS \"{}\"", database_name);
    sqlx::query(&drop_query).execute(&admin_pool).await?;

    admin_pool.close().await;
    Ok(())
}

/// Sets up a test database and returns its connection pool.
pub async fn setup_test_database() -> Result<PgPool> {
    let database_name = format!("ticketloop_test_{}", Uuid::new_v4().simple());
    let port = database_port();

    let db = TestDatabase::new().await?;
    let guard = TestDatabaseGuard { database: db, database_name, port };

    let pool = guard.pool();

    Box::leak(Box::new(guard));

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn database_setup_succeeds() {
        let pool = setup_test_database().await.unwrap();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&pool).await.unwrap();

        assert_eq!(result, 1);
    }

    #[tokio::test]
    async fn schema_creates_tables() {
        let pool = setup_test_database().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT table_name FROM information_schema.tables
             WHERE table_schema = 'public' ORDER BY table_name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        assert!(tables.contains(&"contacts".to_string()));
        assert!(tables.contains(&"tickets".to_string()));
    }
}
