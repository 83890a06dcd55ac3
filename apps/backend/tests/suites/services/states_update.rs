use backend::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use backend::repos::states::StatePatch;
use backend::services::states::{NewState, StateService};
use backend_test_support::unique_helpers::unique_state_name;
use sea_orm::TransactionTrait;

use crate::support::build_test_state;
use crate::support::factory::{create_named_state, create_state, fetch_state};

#[actix_web::test]
async fn sort_order_only_patch_stamps_updated_at() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("test state has a database");

    let created = create_state(
        &state,
        NewState::new(unique_state_name("reorder"))
            .with_description("keep me")
            .with_sort_order(1),
    )
    .await?;
    assert_eq!(created.updated_at, None);

    let txn = db.begin().await?;
    let patch = StatePatch {
        sort_order: Some(5),
        ..StatePatch::default()
    };
    let updated = StateService::new().update(&txn, created.id, patch).await?;
    txn.commit().await?;

    assert_eq!(updated.sort_order, 5);
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.is_active, created.is_active);
    assert_eq!(updated.created_at, created.created_at);
    let stamped = updated.updated_at.expect("updated_at set on write");
    assert!(stamped >= created.created_at);

    assert_eq!(fetch_state(&state, created.id).await?, updated);
    Ok(())
}

#[actix_web::test]
async fn rename_onto_existing_name_conflicts() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("test state has a database");

    let taken = create_named_state(&state, "taken", 1).await?;
    let target = create_named_state(&state, "target", 2).await?;

    let txn = db.begin().await?;
    let patch = StatePatch {
        name: Some(taken.name.clone()),
        sort_order: Some(9),
        ..StatePatch::default()
    };
    let err = StateService::new()
        .update(&txn, target.id, patch)
        .await
        .unwrap_err();
    txn.rollback().await?;

    match &err {
        DomainError::Conflict(ConflictKind::DuplicateStateName, detail) => {
            assert!(detail.contains(&taken.name), "detail: {detail}");
        }
        other => panic!("expected duplicate name, got {other:?}"),
    }

    assert_eq!(fetch_state(&state, target.id).await?, target);
    Ok(())
}

#[actix_web::test]
async fn renaming_to_own_name_is_allowed() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("test state has a database");
    let created = create_named_state(&state, "self", 3).await?;

    let txn = db.begin().await?;
    let patch = StatePatch {
        name: Some(created.name.clone()),
        is_active: Some(false),
        ..StatePatch::default()
    };
    let updated = StateService::new().update(&txn, created.id, patch).await?;
    txn.commit().await?;

    assert_eq!(updated.name, created.name);
    assert!(!updated.is_active);
    Ok(())
}

#[actix_web::test]
async fn update_missing_state_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("test state has a database");

    let txn = db.begin().await?;
    let patch = StatePatch {
        name: Some(unique_state_name("ghost")),
        ..StatePatch::default()
    };
    let err = StateService::new()
        .update(&txn, 987_654, patch)
        .await
        .unwrap_err();
    txn.rollback().await?;

    assert!(matches!(err, DomainError::NotFound(NotFoundKind::State, _)));
    Ok(())
}

#[actix_web::test]
async fn empty_patch_leaves_state_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("test state has a database");
    let created = create_named_state(&state, "noop", 4).await?;

    let txn = db.begin().await?;
    let unchanged = StateService::new()
        .update(&txn, created.id, StatePatch::default())
        .await?;
    txn.commit().await?;

    assert_eq!(unchanged, created);
    assert_eq!(unchanged.updated_at, None);
    Ok(())
}

#[actix_web::test]
async fn explicit_none_clears_description() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = state.db().expect("test state has a database");
    let created = create_state(
        &state,
        NewState::new(unique_state_name("clear")).with_description("temporary"),
    )
    .await?;

    let txn = db.begin().await?;
    let patch = StatePatch {
        description: Some(None),
        ..StatePatch::default()
    };
    let updated = StateService::new().update(&txn, created.id, patch).await?;
    txn.commit().await?;

    assert_eq!(updated.description, None);
    assert!(updated.updated_at.is_some());
    Ok(())
}
