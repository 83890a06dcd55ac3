//! State domain service: uniqueness, presence and seeding rules.
//!
//! Reads accept any connection; writes take the request transaction so a
//! failed write leaves no partial row behind.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{debug, info, warn};

use crate::errors::domain::DomainError;
use crate::repos::states::{self, State, StateCreate, StatePatch};

/// Default states inserted by [`StateService::seed_defaults`], in order.
pub const DEFAULT_STATES: [(&str, i32, &str); 3] = [
    ("New", 1, "Newly created item, not yet started"),
    ("In Progress", 2, "Work on the item is underway"),
    ("Done", 3, "Item is completed"),
];

/// Input for creating a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewState {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

impl NewState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_active: true,
            sort_order: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }
}

impl From<NewState> for StateCreate {
    fn from(input: NewState) -> Self {
        StateCreate {
            name: input.name,
            description: input.description,
            is_active: input.is_active,
            sort_order: input.sort_order,
        }
    }
}

/// State domain service.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateService;

impl StateService {
    pub fn new() -> Self {
        Self
    }

    /// States ordered by `sort_order`, then `name`.
    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<State>, DomainError> {
        states::list(conn, skip, limit).await
    }

    /// Active states, same ordering as [`Self::list`].
    pub async fn list_active<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<State>, DomainError> {
        states::list_active(conn).await
    }

    pub async fn get_by_id<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        state_id: i64,
    ) -> Result<State, DomainError> {
        states::find_by_id(conn, state_id)
            .await?
            .ok_or_else(|| DomainError::state_not_found(state_id))
    }

    /// Exact, case-sensitive name lookup.
    pub async fn get_by_name<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<Option<State>, DomainError> {
        states::find_by_name(conn, name).await
    }

    /// Create a state, rejecting names already in use.
    ///
    /// The lookup is only a fast path: a concurrent insert of the same name
    /// is caught by the unique index and surfaces as the same conflict.
    pub async fn create(
        &self,
        txn: &DatabaseTransaction,
        input: NewState,
    ) -> Result<State, DomainError> {
        if self.get_by_name(txn, &input.name).await?.is_some() {
            warn!(name = %input.name, "state create rejected: duplicate name");
            return Err(DomainError::duplicate_state_name(&input.name));
        }

        let name = input.name.clone();
        let state = states::create(txn, input.into())
            .await
            .map_err(|e| duplicate_name_or(e, &name))?;

        info!(state_id = state.id, name = %state.name, "state created");
        Ok(state)
    }

    /// Apply a partial update. Only supplied fields change and `updated_at`
    /// is stamped on every write. An empty patch returns the state unchanged.
    pub async fn update(
        &self,
        txn: &DatabaseTransaction,
        state_id: i64,
        patch: StatePatch,
    ) -> Result<State, DomainError> {
        let current = self.get_by_id(txn, state_id).await?;

        if patch.is_empty() {
            debug!(state_id, "state update with empty patch; nothing to write");
            return Ok(current);
        }

        if let Some(new_name) = patch.name.as_deref() {
            if new_name != current.name
                && states::name_taken_by_other(txn, new_name, state_id).await?
            {
                warn!(state_id, name = %new_name, "state update rejected: duplicate name");
                return Err(DomainError::duplicate_state_name(new_name));
            }
        }

        let attempted_name = patch.name.clone().unwrap_or_else(|| current.name.clone());
        let state = states::update(txn, patch.into_update(state_id))
            .await
            .map_err(|e| duplicate_name_or(e, &attempted_name))?;

        info!(state_id, name = %state.name, "state updated");
        Ok(state)
    }

    /// Hard delete. Missing ids are `NotFound`; any other storage failure
    /// stays an infra error.
    pub async fn delete(&self, txn: &DatabaseTransaction, state_id: i64) -> Result<(), DomainError> {
        if !states::delete(txn, state_id).await? {
            return Err(DomainError::state_not_found(state_id));
        }
        info!(state_id, "state deleted");
        Ok(())
    }

    /// Insert any of [`DEFAULT_STATES`] that do not exist yet.
    ///
    /// Returns only the states created by this call, so a repeated call
    /// returns an empty list.
    pub async fn seed_defaults(&self, txn: &DatabaseTransaction) -> Result<Vec<State>, DomainError> {
        let mut created = Vec::new();

        for (name, sort_order, description) in DEFAULT_STATES {
            if self.get_by_name(txn, name).await?.is_some() {
                debug!(name, "default state already present");
                continue;
            }
            let input = NewState::new(name)
                .with_description(description)
                .with_active(true)
                .with_sort_order(sort_order);
            created.push(self.create(txn, input).await?);
        }

        info!(created = created.len(), "default states seeded");
        Ok(created)
    }
}

/// Rewrite a storage uniqueness conflict so the detail names the value.
fn duplicate_name_or(err: DomainError, name: &str) -> DomainError {
    if err.is_duplicate_name() {
        warn!(name = %name, "state write hit unique index on name");
        DomainError::duplicate_state_name(name)
    } else {
        err
    }
}
