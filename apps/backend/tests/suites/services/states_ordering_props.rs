//! Property tests for the listing order: `sort_order` ascending, ties broken
//! by `name` ascending, independent of insertion order.

use backend::services::states::{NewState, StateService};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, TestCaseError, TestRunner};

use crate::support::build_test_state;
use crate::support::factory::create_state;
use crate::support::test_state::uses_private_db;

fn state_inputs() -> impl Strategy<Value = Vec<(String, i32, bool)>> {
    prop::collection::btree_map("[A-Za-z][A-Za-z0-9 ]{0,11}", (0i32..5, any::<bool>()), 1..8)
        .prop_map(|m| m.into_iter().map(|(name, (o, a))| (name, o, a)).collect())
        .prop_shuffle()
}

async fn check_ordering(inputs: Vec<(String, i32, bool)>) -> Result<(), TestCaseError> {
    let state = build_test_state()
        .await
        .map_err(|e| TestCaseError::fail(format!("build state: {e}")))?;
    let db = state.db().expect("test state has a database");
    let service = StateService::new();

    for (name, sort_order, is_active) in &inputs {
        let input = NewState::new(name.clone())
            .with_sort_order(*sort_order)
            .with_active(*is_active);
        create_state(&state, input)
            .await
            .map_err(|e| TestCaseError::fail(format!("create {name}: {e}")))?;
    }

    let listed = service
        .list(db, 0, 1000)
        .await
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    let active = service
        .list_active(db)
        .await
        .map_err(|e| TestCaseError::fail(e.to_string()))?;

    let mut expected: Vec<(i32, String)> = inputs
        .iter()
        .map(|(name, order, _)| (*order, name.clone()))
        .collect();
    expected.sort();
    let got: Vec<(i32, String)> = listed
        .iter()
        .map(|s| (s.sort_order, s.name.clone()))
        .collect();
    prop_assert_eq!(got, expected);

    let expected_active: Vec<i64> = listed
        .iter()
        .filter(|s| s.is_active)
        .map(|s| s.id)
        .collect();
    let got_active: Vec<i64> = active.iter().map(|s| s.id).collect();
    prop_assert_eq!(got_active, expected_active);
    Ok(())
}

#[test]
fn listing_order_is_sort_order_then_name() {
    if !uses_private_db() {
        return;
    }
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");

    let mut runner = TestRunner::new(ProptestConfig {
        cases: 24,
        ..ProptestConfig::default()
    });
    runner
        .run(&state_inputs(), |inputs| rt.block_on(check_ordering(inputs)))
        .expect("ordering property holds");
}
