use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Expr, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum States {
    Table,
    Id,
    Name,
    Description,
    IsActive,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(States::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(States::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(States::Name).string_len(50).not_null())
                    .col(ColumnDef::new(States::Description).string_len(200).null())
                    .col(
                        ColumnDef::new(States::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(States::SortOrder)
                            .integer()
                            .not_null()
                            .default(0)
                            .check(Expr::col(States::SortOrder).gte(0)),
                    )
                    .col(
                        ColumnDef::new(States::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(States::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The unique index is the source of truth for name uniqueness.
        manager
            .create_index(
                Index::create()
                    .name("idx_states_name")
                    .table(States::Table)
                    .col(States::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_states_sort_order")
                    .table(States::Table)
                    .col(States::SortOrder)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_states_active")
                    .table(States::Table)
                    .col(States::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop indexes before the table
        for name in ["idx_states_active", "idx_states_sort_order", "idx_states_name"] {
            manager
                .drop_index(Index::drop().name(name).table(States::Table).to_owned())
                .await?;
        }

        manager
            .drop_table(Table::drop().table(States::Table).to_owned())
            .await
    }
}
