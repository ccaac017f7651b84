//! Migration: Create the case_history and documents tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CaseHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CaseHistory::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CaseHistory::CaseId).uuid().not_null())
                    .col(ColumnDef::new(CaseHistory::UserId).uuid().not_null())
                    .col(ColumnDef::new(CaseHistory::Action).string().not_null())
                    .col(ColumnDef::new(CaseHistory::Description).text().not_null())
                    .col(
                        ColumnDef::new(CaseHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_history_case")
                            .from(CaseHistory::Table, CaseHistory::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_case_history_user")
                            .from(CaseHistory::Table, CaseHistory::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_case_history_case_id")
                    .table(CaseHistory::Table)
                    .col(CaseHistory::CaseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Documents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Documents::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Documents::CaseId).uuid().not_null())
                    .col(ColumnDef::new(Documents::Name).string().not_null())
                    .col(ColumnDef::new(Documents::Type).string().not_null())
                    .col(ColumnDef::new(Documents::Description).text().null())
                    .col(ColumnDef::new(Documents::Url).string().not_null())
                    .col(ColumnDef::new(Documents::UploadedById).uuid().not_null())
                    .col(
                        ColumnDef::new(Documents::UploadedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_case")
                            .from(Documents::Table, Documents::CaseId)
                            .to(Cases::Table, Cases::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_documents_uploaded_by")
                            .from(Documents::Table, Documents::UploadedById)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_documents_case_id")
                    .table(Documents::Table)
                    .col(Documents::CaseId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Documents::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CaseHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
}

#[derive(Iden)]
enum CaseHistory {
    Table,
    Id,
    CaseId,
    UserId,
    Action,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum Documents {
    Table,
    Id,
    CaseId,
    Name,
    Type,
    Description,
    Url,
    UploadedById,
    UploadedAt,
}
