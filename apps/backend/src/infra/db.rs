use db_infra::config::db::{DbKind, DbOwner, RuntimeEnv};
use db_infra::{connect, orchestrate_migration, run_migration};
use migration::MigrationCommand;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::error::AppError;

/// Open the application pool with the schema migrated to the latest version.
///
/// In-memory SQLite lives inside its single pooled connection, so it is
/// migrated on that same connection. Every other engine is migrated by the
/// owner role first and the app pool is opened afterwards.
pub async fn bootstrap_db(env: RuntimeEnv, db_kind: DbKind) -> Result<DatabaseConnection, AppError> {
    let conn = match db_kind {
        DbKind::SqliteMemory => {
            let conn = connect(env, db_kind, DbOwner::App).await?;
            run_migration(&conn, MigrationCommand::Up).await?;
            conn
        }
        DbKind::SqliteFile | DbKind::Postgres => {
            orchestrate_migration(env, db_kind, MigrationCommand::Up).await?;
            connect(env, db_kind, DbOwner::App).await?
        }
    };

    info!(env = ?env, db_kind = ?db_kind, "db_bootstrap=ready");
    Ok(conn)
}
