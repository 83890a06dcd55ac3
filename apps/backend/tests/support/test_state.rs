use std::env;
use std::env::VarError;
use std::str::FromStr;

use backend::config::db::{DbKind, RuntimeEnv};
use backend::infra::state::{build_state, StateBuilder};
use backend::state::app_state::AppState;
use backend::AppError;

fn read_env_db_kind() -> Result<Option<String>, AppError> {
    match env::var("STATES_TEST_DB_KIND") {
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(AppError::config(format!(
            "failed to read STATES_TEST_DB_KIND: {err}"
        ))),
    }
}

/// Engine for integration tests: `STATES_TEST_DB_KIND`, else a private
/// in-memory SQLite database per state.
pub fn resolve_test_db_kind() -> Result<DbKind, AppError> {
    match read_env_db_kind()? {
        Some(raw) => Ok(DbKind::from_str(raw.as_str())?),
        None => Ok(DbKind::SqliteMemory),
    }
}

/// True when every built state gets its own empty database.
pub fn uses_private_db() -> bool {
    matches!(resolve_test_db_kind(), Ok(DbKind::SqliteMemory))
}

pub fn test_state_builder() -> Result<StateBuilder, AppError> {
    let db_kind = resolve_test_db_kind()?;
    Ok(build_state().with_env(RuntimeEnv::Test).with_db(db_kind))
}

pub async fn build_test_state() -> Result<AppState, AppError> {
    test_state_builder()?.build().await
}
