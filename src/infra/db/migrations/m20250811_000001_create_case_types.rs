//! Migration: Create the case_types reference table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CaseTypes::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(CaseTypes::Description).string().not_null())
                    .col(
                        ColumnDef::new(CaseTypes::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaseTypes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CaseTypes {
    Table,
    Id,
    Name,
    Description,
    IsActive,
}
