/// Schema migrations
///
/// The SQL files under this crate's `migrations/` directory are embedded at
/// compile time and applied in timestamp order. Each `{timestamp}_{name}.sql`
/// has a matching `.down.sql` rollback.

use sqlx::migrate::{MigrateDatabase, Migrator};
use sqlx::postgres::PgPool;
use sqlx::Postgres;
use tracing::{debug, info, warn};

/// Embedded migrator over `taskboard-shared/migrations`
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// What the `_sqlx_migrations` bookkeeping table currently records
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Migrations applied successfully so far
    pub applied_migrations: usize,

    /// Timestamp version of the newest applied migration
    pub latest_version: Option<i64>,
}

/// Applies any migrations the database has not seen yet
///
/// Safe to call on every startup; already-applied migrations are skipped.
/// Concurrent callers serialize on sqlx's advisory lock.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Applying pending migrations");

    if let Err(e) = MIGRATOR.run(pool).await {
        warn!("Migration run failed: {}", e);
        return Err(e);
    }

    info!("Schema is up to date");
    Ok(())
}

/// Reads how far the schema has been migrated
///
/// A database that has never been migrated (no bookkeeping table) reports
/// zero applied migrations rather than an error.
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    let bookkeeping: Option<String> =
        sqlx::query_scalar("SELECT to_regclass('public._sqlx_migrations')::text")
            .fetch_one(pool)
            .await?;

    if bookkeeping.is_none() {
        debug!("No migrations applied yet");
        return Ok(MigrationStatus {
            applied_migrations: 0,
            latest_version: None,
        });
    }

    let versions: Vec<i64> =
        sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success ORDER BY version")
            .fetch_all(pool)
            .await?;

    Ok(MigrationStatus {
        applied_migrations: versions.len(),
        latest_version: versions.last().copied(),
    })
}

/// Creates the database when it is missing; no-op when it exists
///
/// Development and test convenience. Production databases are provisioned
/// out of band.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        debug!("Database already exists");
        return Ok(());
    }

    info!("Creating database");
    Postgres::create_database(database_url).await
}

/// Drops the database and everything in it; no-op when it is absent
///
/// Test teardown only.
pub async fn drop_database(database_url: &str) -> Result<(), sqlx::Error> {
    if !Postgres::database_exists(database_url).await? {
        debug!("Database absent, nothing to drop");
        return Ok(());
    }

    warn!("Dropping database");
    Postgres::drop_database(database_url).await
}
