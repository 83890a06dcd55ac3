use backend::services::states::{NewState, StateService, DEFAULT_STATES};
use sea_orm::TransactionTrait;

use crate::support::build_test_state;
use crate::support::factory::create_state;
use crate::support::test_state::uses_private_db;

#[actix_web::test]
async fn seed_creates_defaults_once() -> Result<(), Box<dyn std::error::Error>> {
    if !uses_private_db() {
        return Ok(());
    }
    let state = build_test_state().await?;
    let db = state.db().expect("test state has a database");
    let service = StateService::new();

    let txn = db.begin().await?;
    let first = service.seed_defaults(&txn).await?;
    txn.commit().await?;

    let seeded: Vec<_> = first
        .iter()
        .map(|s| (s.name.as_str(), s.sort_order, s.is_active))
        .collect();
    assert_eq!(
        seeded,
        [("New", 1, true), ("In Progress", 2, true), ("Done", 3, true)]
    );
    assert!(first.iter().all(|s| s.description.is_some()));

    let txn = db.begin().await?;
    let second = service.seed_defaults(&txn).await?;
    txn.commit().await?;
    assert!(second.is_empty());

    let listed = service.list(db, 0, 100).await?;
    let names: Vec<_> = listed.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["New", "In Progress", "Done"]);
    Ok(())
}

#[actix_web::test]
async fn seed_fills_only_missing_defaults() -> Result<(), Box<dyn std::error::Error>> {
    if !uses_private_db() {
        return Ok(());
    }
    let state = build_test_state().await?;
    let db = state.db().expect("test state has a database");

    // Pre-existing "Done" with different attributes is left alone.
    let (name, _, _) = DEFAULT_STATES[2];
    let existing = create_state(
        &state,
        NewState::new(name).with_sort_order(42).with_active(false),
    )
    .await?;

    let txn = db.begin().await?;
    let created = StateService::new().seed_defaults(&txn).await?;
    txn.commit().await?;

    let names: Vec<_> = created.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["New", "In Progress"]);

    let done = StateService::new()
        .get_by_name(db, name)
        .await?
        .expect("Done still present");
    assert_eq!(done, existing);
    Ok(())
}
