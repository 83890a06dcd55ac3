use std::env;

use backend::config::db::{DbKind, RuntimeEnv};
use backend::infra::db::bootstrap_db;
use backend::services::states::StateService;
use sea_orm::TransactionTrait;
use serial_test::serial;

#[actix_web::test]
#[serial]
async fn sqlite_file_bootstrap_is_repeatable() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("states_bootstrap.db");
    env::set_var("STATES_SQLITE_PATH", &path);

    let first = bootstrap_db(RuntimeEnv::Test, DbKind::SqliteFile).await?;
    let txn = first.begin().await?;
    let seeded = StateService::new().seed_defaults(&txn).await?;
    txn.commit().await?;
    assert_eq!(seeded.len(), 3);
    first.close().await?;

    // Second start: migrations are already applied and rows persist.
    let second = bootstrap_db(RuntimeEnv::Test, DbKind::SqliteFile).await?;
    let listed = StateService::new().list(&second, 0, 100).await?;
    assert_eq!(listed.len(), 3);
    second.close().await?;

    env::remove_var("STATES_SQLITE_PATH");
    assert!(path.exists());
    Ok(())
}

#[actix_web::test]
#[serial]
async fn memory_databases_are_private() -> Result<(), Box<dyn std::error::Error>> {
    let a = bootstrap_db(RuntimeEnv::Test, DbKind::SqliteMemory).await?;
    let b = bootstrap_db(RuntimeEnv::Test, DbKind::SqliteMemory).await?;

    let txn = a.begin().await?;
    StateService::new().seed_defaults(&txn).await?;
    txn.commit().await?;

    assert_eq!(StateService::new().list(&a, 0, 100).await?.len(), 3);
    assert!(StateService::new().list(&b, 0, 100).await?.is_empty());
    Ok(())
}
