//! SeaORM adapter for the states table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::states;

pub mod dto;

pub use dto::{StateCreate, StateUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

fn ordered() -> sea_orm::Select<states::Entity> {
    states::Entity::find()
        .order_by_asc(states::Column::SortOrder)
        .order_by_asc(states::Column::Name)
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    skip: u64,
    limit: u64,
) -> Result<Vec<states::Model>, sea_orm::DbErr> {
    ordered().offset(skip).limit(limit).all(conn).await
}

pub async fn list_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<states::Model>, sea_orm::DbErr> {
    ordered()
        .filter(states::Column::IsActive.eq(true))
        .all(conn)
        .await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    state_id: i64,
) -> Result<Option<states::Model>, sea_orm::DbErr> {
    states::Entity::find_by_id(state_id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<states::Model>, sea_orm::DbErr> {
    states::Entity::find()
        .filter(states::Column::Name.eq(name))
        .one(conn)
        .await
}

/// Another row (id != `exclude_id`) already carries `name`.
pub async fn name_taken_by_other<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    exclude_id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let count = states::Entity::find()
        .filter(states::Column::Name.eq(name))
        .filter(states::Column::Id.ne(exclude_id))
        .count(conn)
        .await?;
    Ok(count > 0)
}

pub async fn count<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, sea_orm::DbErr> {
    states::Entity::find().count(conn).await
}

pub async fn create_state(
    txn: &DatabaseTransaction,
    dto: StateCreate,
) -> Result<states::Model, sea_orm::DbErr> {
    let state_active = states::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        description: Set(dto.description),
        is_active: Set(dto.is_active),
        sort_order: Set(dto.sort_order),
        created_at: Set(time::OffsetDateTime::now_utc()),
        updated_at: Set(None),
    };

    state_active.insert(txn).await
}

/// Write only the supplied columns plus `updated_at`.
///
/// Returns `DbErr::RecordNotUpdated` when no row has `dto.id`.
pub async fn update_state(
    txn: &DatabaseTransaction,
    dto: StateUpdate,
) -> Result<states::Model, sea_orm::DbErr> {
    let state_active = states::ActiveModel {
        id: Set(dto.id),
        name: dto.name.map_or(NotSet, Set),
        description: dto.description.map_or(NotSet, Set),
        is_active: dto.is_active.map_or(NotSet, Set),
        sort_order: dto.sort_order.map_or(NotSet, Set),
        created_at: NotSet,
        updated_at: Set(Some(time::OffsetDateTime::now_utc())),
    };

    state_active.update(txn).await
}

/// Delete a row by id, returning the number of rows removed.
pub async fn delete_state(txn: &DatabaseTransaction, state_id: i64) -> Result<u64, sea_orm::DbErr> {
    let res = states::Entity::delete_by_id(state_id).exec(txn).await?;
    Ok(res.rows_affected)
}
