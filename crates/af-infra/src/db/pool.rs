//! Connection pool and schema migrations for the application store.

use anyhow::Result;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;

/// Migrations compiled into the binary; no migration files ship alongside it.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Build the r2d2 pool over the admissions database and bring its schema up
/// to date. Called once when the portal boots; the wizard assumes the
/// `t_application` table exists from then on.
pub fn init_db_pool(database_url: &str) -> Result<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder().build(manager)?;

    run_migrations(&pool)?;

    Ok(pool)
}

fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get()?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("application store migration failed: {e}"))?;
    info!(
        "application store schema is current, {} migration(s) applied",
        applied.len()
    );

    Ok(())
}
