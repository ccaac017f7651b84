//! User and profile read access.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::entities::{client_profile, employee_profile, user};
use crate::config::ROLE_EMPLOYEE;
use crate::domain::{
    ClientProfile, EmployeeListing, EmployeeProfile, EmployeeProfileSummary, User,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find the client profile owned by a user, if any
    async fn find_client_profile(&self, user_id: Uuid) -> AppResult<Option<ClientProfile>>;

    /// Find the employee profile owned by a user, if any
    async fn find_employee_profile(&self, user_id: Uuid) -> AppResult<Option<EmployeeProfile>>;

    /// Client profiles of active users, ordered by company name
    async fn list_clients(&self) -> AppResult<Vec<ClientProfile>>;

    /// Active EMPLOYEE users with their profile summaries, ordered by name
    async fn list_employees(&self) -> AppResult<Vec<EmployeeListing>>;
}

/// SeaORM-backed user store
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_client_profile(&self, user_id: Uuid) -> AppResult<Option<ClientProfile>> {
        let result = client_profile::Entity::find()
            .filter(client_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(ClientProfile::from))
    }

    async fn find_employee_profile(&self, user_id: Uuid) -> AppResult<Option<EmployeeProfile>> {
        let result = employee_profile::Entity::find()
            .filter(employee_profile::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(EmployeeProfile::from))
    }

    async fn list_clients(&self) -> AppResult<Vec<ClientProfile>> {
        let models = client_profile::Entity::find()
            .inner_join(user::Entity)
            .filter(user::Column::IsActive.eq(true))
            .order_by_asc(client_profile::Column::CompanyName)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(ClientProfile::from).collect())
    }

    async fn list_employees(&self) -> AppResult<Vec<EmployeeListing>> {
        let rows = user::Entity::find()
            .filter(user::Column::Role.eq(ROLE_EMPLOYEE))
            .filter(user::Column::IsActive.eq(true))
            .order_by_asc(user::Column::Name)
            .find_also_related(employee_profile::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(rows
            .into_iter()
            .map(|(u, profile)| EmployeeListing {
                id: u.id,
                name: u.name,
                employee_profile: profile.map(|p| EmployeeProfileSummary {
                    department: p.department,
                    position: p.position,
                }),
            })
            .collect())
    }
}
