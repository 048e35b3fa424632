use std::fmt;

use anyhow::Context;
use diesel::{connection::SimpleConnection, r2d2::{ConnectionManager, CustomizeConnection}, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use r2d2::{Pool, PooledConnection};
use thiserror::Error;

use crate::{configuration::DatabaseSettings, telemetry::spawn_blocking_with_tracing, utils::fmt_error_chain};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Per-connection pragmas. SQLite leaves foreign keys off unless every
/// connection asks for them, and cascades depend on it.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions{
    pub busy_timeout_ms: u32
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA foreign_keys = ON;",
            self.busy_timeout_ms
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

#[tracing::instrument(
    "Building sqlite connection pool",
    skip(settings),
    fields(path = %settings.path)
)]
pub fn get_connection_pool(settings: &DatabaseSettings) -> Result<DbPool, anyhow::Error>{
    let manager = ConnectionManager::<SqliteConnection>::new(&settings.path);

    Pool::builder()
        .max_size(settings.max_connections)
        .connection_customizer(Box::new(ConnectionOptions{
            busy_timeout_ms: settings.busy_timeout_ms
        }))
        .build(manager)
        .context("Failed to build connection pool")
}

/// Creates the schema on first run. Safe to call on every startup.
#[tracing::instrument(
    "Running pending migrations",
    skip_all
)]
pub fn run_migrations(pool: &DbPool) -> Result<(), anyhow::Error>{
    let mut conn = pool.get()
        .context("Failed to get connection from pool")?;

    let applied = conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

    tracing::info!(applied = applied.len(), "database schema is up to date");
    Ok(())
}

#[derive(Error)]
pub enum CheckoutError{
    #[error("Connection checkout task failed")]
    Join(#[from] tokio::task::JoinError),
    #[error("No sqlite connection available")]
    Pool(#[from] r2d2::Error)
}

impl fmt::Debug for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_error_chain(f, self)
    }
}

/// Takes a connection out of the pool without stalling the async
/// executor; `Pool::get` blocks until one is free or the pool times out.
pub async fn checkout(pool: &DbPool) -> Result<DbConnection, CheckoutError>{
    let pool = pool.clone();

    let conn = spawn_blocking_with_tracing(move || pool.get()).await??;

    Ok(conn)
}
