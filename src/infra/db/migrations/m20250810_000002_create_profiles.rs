//! Migration: Create role-specific profile tables.
//!
//! Each user owns at most one client profile or one employee profile,
//! enforced by the unique constraint on user_id.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClientProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClientProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ClientProfiles::CompanyName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientProfiles::ContactPerson)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClientProfiles::PhoneNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClientProfiles::Country).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_profiles_user")
                            .from(ClientProfiles::Table, ClientProfiles::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EmployeeProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EmployeeProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EmployeeProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(EmployeeProfiles::Department)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(EmployeeProfiles::Position)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_profiles_user")
                            .from(EmployeeProfiles::Table, EmployeeProfiles::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeeProfiles::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ClientProfiles::Table).to_owned())
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
    UserId,
    CompanyName,
    ContactPerson,
    PhoneNumber,
    Country,
}

#[derive(Iden)]
enum EmployeeProfiles {
    Table,
    Id,
    UserId,
    Department,
    Position,
}
