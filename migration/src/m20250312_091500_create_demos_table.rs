use sea_orm_migration::prelude::*;

use crate::m20250304_105428_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Demos::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Demos::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Demos::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Demos::Description).text())
                    .col(
                        ColumnDef::new(Demos::Status)
                            .string_len(20)
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(Demos::Priority)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Demos::IsFeatured)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Demos::OwnerId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Demos::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Demos::DeletedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Demos::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Demos::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_demos_owner_id")
                            .from(Demos::Table, Demos::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Names are unique among live demos only
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX idx_demos_name_live
                ON demos (name)
                WHERE is_deleted = false;
                "#,
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_demos_owner_id")
                    .table(Demos::Table)
                    .col(Demos::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Default listing: live rows by priority
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_demos_live_priority
                ON demos (is_deleted, priority DESC);
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX idx_demos_featured
                ON demos (priority DESC)
                WHERE is_featured = true AND is_deleted = false;
                "#,
            )
            .await?;

        // update_updated_at_column() is created with the users table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_demos_updated_at
                BEFORE UPDATE ON demos
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS update_demos_updated_at ON demos")
            .await?;

        manager
            .drop_table(Table::drop().table(Demos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Demos {
    Table,
    Id,
    Name,
    Description,
    Status,
    Priority,
    IsFeatured,
    OwnerId,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
