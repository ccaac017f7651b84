//! Database connection and migration management.

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use sea_orm_migration::MigratorTrait;

use crate::config::Config;
use crate::errors::AppResult;

pub mod migrations;

pub use migrations::Migrator;

/// Owned database handle. `connect` brings the schema up to date; the
/// migrate subcommands manage it explicitly instead.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Connect and apply any pending migrations.
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let connection = sea_orm::Database::connect(&config.database_url).await?;
        Migrator::up(&connection, None).await?;

        tracing::info!("Database connected, schema up to date");
        Ok(Self { connection })
    }

    /// Connect without touching the schema.
    pub async fn connect_without_migrations(config: &Config) -> AppResult<Self> {
        let connection = sea_orm::Database::connect(&config.database_url).await?;
        Ok(Self { connection })
    }

    /// Borrow the underlying connection.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Clone the underlying connection handle.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Apply pending migrations.
    pub async fn run_migrations(&self) -> AppResult<()> {
        Ok(Migrator::up(&self.connection, None).await?)
    }

    /// Roll back the most recent migration.
    pub async fn rollback_migration(&self) -> AppResult<()> {
        Ok(Migrator::down(&self.connection, Some(1)).await?)
    }

    /// Every defined migration paired with whether it has been applied.
    pub async fn migration_status(&self) -> AppResult<Vec<(String, bool)>> {
        use sea_orm::{EntityTrait, QueryOrder};
        use sea_orm_migration::seaql_migrations;

        let applied: std::collections::HashSet<String> = seaql_migrations::Entity::find()
            .order_by_asc(seaql_migrations::Column::Version)
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|m| m.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| {
                let name = m.name().to_string();
                let done = applied.contains(&name);
                (name, done)
            })
            .collect())
    }

    /// Drop everything and re-run all migrations.
    pub async fn fresh_migrations(&self) -> AppResult<()> {
        Ok(Migrator::fresh(&self.connection).await?)
    }

    /// Check connectivity with a trivial query.
    pub async fn ping(&self) -> AppResult<()> {
        self.connection
            .execute(Statement::from_string(
                self.connection.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_failure_is_an_error_not_a_panic() {
        let mut config = Config::for_tests("test-secret-key-for-testing-only-32chars");
        config.database_url = "not-a-database-url".to_string();

        assert!(Database::connect(&config).await.is_err());
        assert!(Database::connect_without_migrations(&config).await.is_err());
    }
}
