//! Migration: Create the cases table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cases::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cases::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Cases::Title).string().not_null())
                    .col(ColumnDef::new(Cases::Description).text().not_null())
                    .col(ColumnDef::new(Cases::CaseTypeId).uuid().not_null())
                    .col(ColumnDef::new(Cases::ClientId).uuid().not_null())
                    .col(ColumnDef::new(Cases::CreatedById).uuid().not_null())
                    .col(ColumnDef::new(Cases::AssignedToId).uuid().null())
                    .col(ColumnDef::new(Cases::Location).string().not_null())
                    .col(ColumnDef::new(Cases::Priority).string().not_null())
                    .col(
                        ColumnDef::new(Cases::Status)
                            .string()
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(ColumnDef::new(Cases::Symptoms).text().not_null())
                    .col(
                        ColumnDef::new(Cases::RequiredAssistance)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Cases::MedicalHistory).text().null())
                    .col(ColumnDef::new(Cases::CurrentMedications).text().null())
                    .col(
                        ColumnDef::new(Cases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cases::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cases_case_type")
                            .from(Cases::Table, Cases::CaseTypeId)
                            .to(CaseTypes::Table, CaseTypes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cases_client")
                            .from(Cases::Table, Cases::ClientId)
                            .to(ClientProfiles::Table, ClientProfiles::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cases_created_by")
                            .from(Cases::Table, Cases::CreatedById)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cases_assigned_to")
                            .from(Cases::Table, Cases::AssignedToId)
                            .to(EmployeeProfiles::Table, EmployeeProfiles::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // The scoping predicates filter on these columns for every list/get
        manager
            .create_index(
                Index::create()
                    .name("idx_cases_client_id")
                    .table(Cases::Table)
                    .col(Cases::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cases_assigned_to_id")
                    .table(Cases::Table)
                    .col(Cases::AssignedToId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_cases_created_by_id")
                    .table(Cases::Table)
                    .col(Cases::CreatedById)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cases::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum ClientProfiles {
    Table,
    Id,
}

#[derive(Iden)]
enum EmployeeProfiles {
    Table,
    Id,
}

#[derive(Iden)]
enum CaseTypes {
    Table,
    Id,
}

#[derive(Iden)]
enum Cases {
    Table,
    Id,
    Title,
    Description,
    CaseTypeId,
    ClientId,
    CreatedById,
    AssignedToId,
    Location,
    Priority,
    Status,
    Symptoms,
    RequiredAssistance,
    MedicalHistory,
    CurrentMedications,
    CreatedAt,
    UpdatedAt,
}
