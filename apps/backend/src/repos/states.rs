//! State repository functions.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::states_sea as states_adapter;
use crate::entities::states;
use crate::errors::domain::DomainError;

pub use states_adapter::{StateCreate, StateUpdate};

/// State domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
}

/// Partial update of a state. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub name: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}

impl StatePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.is_active.is_none()
            && self.sort_order.is_none()
    }

    pub fn into_update(self, id: i64) -> StateUpdate {
        StateUpdate {
            id,
            name: self.name,
            description: self.description,
            is_active: self.is_active,
            sort_order: self.sort_order,
        }
    }
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    skip: u64,
    limit: u64,
) -> Result<Vec<State>, DomainError> {
    let rows = states_adapter::list(conn, skip, limit).await?;
    Ok(rows.into_iter().map(State::from).collect())
}

pub async fn list_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<State>, DomainError> {
    let rows = states_adapter::list_active(conn).await?;
    Ok(rows.into_iter().map(State::from).collect())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    state_id: i64,
) -> Result<Option<State>, DomainError> {
    let row = states_adapter::find_by_id(conn, state_id).await?;
    Ok(row.map(State::from))
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<State>, DomainError> {
    let row = states_adapter::find_by_name(conn, name).await?;
    Ok(row.map(State::from))
}

pub async fn name_taken_by_other<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    exclude_id: i64,
) -> Result<bool, DomainError> {
    Ok(states_adapter::name_taken_by_other(conn, name, exclude_id).await?)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(states_adapter::count(conn).await?)
}

pub async fn create(txn: &DatabaseTransaction, dto: StateCreate) -> Result<State, DomainError> {
    let row = states_adapter::create_state(txn, dto).await?;
    Ok(State::from(row))
}

pub async fn update(txn: &DatabaseTransaction, dto: StateUpdate) -> Result<State, DomainError> {
    let state_id = dto.id;
    let row = states_adapter::update_state(txn, dto)
        .await
        .map_err(|e| match e {
            sea_orm::DbErr::RecordNotUpdated => DomainError::state_not_found(state_id),
            other => DomainError::from(other),
        })?;
    Ok(State::from(row))
}

/// Returns `true` when a row was removed.
pub async fn delete(txn: &DatabaseTransaction, state_id: i64) -> Result<bool, DomainError> {
    let removed = states_adapter::delete_state(txn, state_id).await?;
    Ok(removed > 0)
}

impl From<states::Model> for State {
    fn from(model: states::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            is_active: model.is_active,
            sort_order: model.sort_order,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
