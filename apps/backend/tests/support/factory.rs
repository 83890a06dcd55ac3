use backend::db::txn::with_txn;
use backend::services::states::{NewState, StateService};
use backend::state::app_state::AppState;
use backend::{AppError, State};
use backend_test_support::unique_helpers::unique_state_name;

/// Create a state through the service in its own committed transaction.
pub async fn create_state(state: &AppState, input: NewState) -> Result<State, AppError> {
    with_txn(None, state, move |txn| {
        Box::pin(async move {
            StateService::new()
                .create(txn, input)
                .await
                .map_err(AppError::from)
        })
    })
    .await
}

/// Create a state with a unique name derived from `prefix`.
pub async fn create_named_state(
    state: &AppState,
    prefix: &str,
    sort_order: i32,
) -> Result<State, AppError> {
    let input = NewState::new(unique_state_name(prefix)).with_sort_order(sort_order);
    create_state(state, input).await
}

/// Fetch a state by id outside of any request.
pub async fn fetch_state(state: &AppState, state_id: i64) -> Result<State, AppError> {
    with_txn(None, state, move |txn| {
        Box::pin(async move {
            StateService::new()
                .get_by_id(txn, state_id)
                .await
                .map_err(AppError::from)
        })
    })
    .await
}
