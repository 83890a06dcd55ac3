use std::future::Future;
use std::time::Duration;

use migration::{is_up_to_date, migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{make_conn_spec, DbKind, DbOwner, RuntimeEnv};
use crate::error::DbInfraError;

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

/// Retry a connection attempt with fixed interval delays
/// Returns the result of the last attempt after all retries are exhausted
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, DbInfraError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DbInfraError>>,
{
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(
                        "connection_retry=success attempts={} interval_ms={}",
                        attempt, interval_ms
                    );
                }
                return Ok(result);
            }
            Err(e) => {
                last_error = Some(e);
                if attempt < max_attempts {
                    warn!(
                        "connection_retry=failed attempt={} max_attempts={} interval_ms={}",
                        attempt, max_attempts, interval_ms
                    );
                    tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| DbInfraError::Connect {
        message: "no error recorded after max attempts".to_string(),
    }))
}

fn connect_options(url: &str, db_kind: DbKind, owner: DbOwner) -> ConnectOptions {
    let mut opt = ConnectOptions::new(url);
    match (db_kind, owner) {
        // An in-memory database lives and dies with its connection, so the
        // pool must hold exactly one that is never reaped.
        (DbKind::SqliteMemory, _) => {
            opt.min_connections(1)
                .max_connections(1)
                .idle_timeout(Duration::from_secs(24 * 60 * 60))
                .max_lifetime(Duration::from_secs(24 * 60 * 60));
        }
        (_, DbOwner::Owner) => {
            opt.min_connections(1).max_connections(1);
        }
        (DbKind::SqliteFile, DbOwner::App) => {
            opt.max_connections(1);
        }
        (DbKind::Postgres, DbOwner::App) => {
            opt.min_connections(1).max_connections(10);
        }
    }
    opt.acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    opt
}

/// Open a connection pool for the given environment, engine and owner.
/// This function does NOT run any migrations.
pub async fn connect(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<DatabaseConnection, DbInfraError> {
    let url = make_conn_spec(env, db_kind, owner)?;
    let opt = connect_options(&url, db_kind, owner);

    info!(
        env = ?env,
        db_kind = ?db_kind,
        owner = ?owner,
        engine = get_db_engine(db_kind),
        url = %sanitize_db_url(&url),
        "db_connect=start"
    );

    let connect_once = || {
        let opt = opt.clone();
        async move {
            Database::connect(opt)
                .await
                .map_err(|e| DbInfraError::Connect {
                    message: format!("failed to connect to {}: {e}", get_db_engine(db_kind)),
                })
        }
    };

    if matches!(db_kind, DbKind::Postgres) {
        retry_connection(connect_once, 5, 500).await
    } else {
        connect_once().await
    }
}

/// Sanitize database URL by masking password in connection strings.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((auth_part, host_part)) = url.rsplit_once('@') else {
        return url.to_string();
    };
    match auth_part.rfind(':') {
        Some(colon_pos) if auth_part[..colon_pos].contains("://") => {
            format!("{}:***@{}", &auth_part[..colon_pos], host_part)
        }
        _ => url.to_string(),
    }
}

/// Apply a migration command on an already-open connection.
///
/// `Up` is a no-op when every defined migration is already applied.
pub async fn run_migration(
    conn: &DatabaseConnection,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    if command == MigrationCommand::Up {
        let up_to_date = is_up_to_date(conn)
            .await
            .map_err(|e| DbInfraError::Migration {
                message: format!("failed to read applied migrations: {e}"),
            })?;
        if up_to_date {
            info!("migrate=skipped up_to_date=true");
            return Ok(());
        }
    }

    migrate(conn, command)
        .await
        .map_err(|e| DbInfraError::Migration {
            message: format!("migration execution failed: {e}"),
        })
}

/// Connect as the schema owner and run a migration command.
pub async fn orchestrate_migration(
    env: RuntimeEnv,
    db_kind: DbKind,
    command: MigrationCommand,
) -> Result<(), DbInfraError> {
    if db_kind == DbKind::SqliteMemory {
        return Err(DbInfraError::config(
            "in-memory SQLite databases cannot be migrated out of process",
        ));
    }

    info!(
        "migrate=start env={:?} db_kind={:?} engine={}",
        env,
        db_kind,
        get_db_engine(db_kind)
    );

    let admin_pool = connect(env, db_kind, DbOwner::Owner).await?;
    let result = run_migration(&admin_pool, command).await;
    if let Err(e) = admin_pool.close().await {
        warn!(error = %e, "failed to close admin pool");
    }

    info!("migrate=done");
    result
}
