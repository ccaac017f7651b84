//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20250810_000001_create_users_table;
mod m20250810_000002_create_profiles;
mod m20250811_000001_create_case_types;
mod m20250811_000002_create_cases;
mod m20250811_000003_create_case_children;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250810_000001_create_users_table::Migration),
            Box::new(m20250810_000002_create_profiles::Migration),
            Box::new(m20250811_000001_create_case_types::Migration),
            Box::new(m20250811_000002_create_cases::Migration),
            Box::new(m20250811_000003_create_case_children::Migration),
        ]
    }
}
