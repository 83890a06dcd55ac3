//! DTOs for states_sea adapter.
//!
//! Plain column carriers. Callers build them from `NewState` and
//! `StatePatch::into_update`.

/// DTO for inserting a new state row.
#[derive(Debug, Clone)]
pub struct StateCreate {
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub sort_order: i32,
}

/// DTO for a partial update of an existing state row.
///
/// `None` leaves the column untouched. For `description`, `Some(None)`
/// clears the column.
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i32>,
}
