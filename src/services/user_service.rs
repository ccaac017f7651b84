//! User service - profile and directory lookups.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{ClientProfile, EmployeeListing, UserProfileResponse, UserRole};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Current user's profile with its role-matching extension record
    async fn get_profile(&self, user_id: Uuid) -> AppResult<UserProfileResponse>;

    /// Client directory: profiles of active users, by company name
    async fn list_clients(&self) -> AppResult<Vec<ClientProfile>>;

    /// Employee directory: active EMPLOYEE users with profile summaries
    async fn list_employees(&self) -> AppResult<Vec<EmployeeListing>>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    /// Create new user service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_profile(&self, user_id: Uuid) -> AppResult<UserProfileResponse> {
        let user = self.uow.users().find_by_id(user_id).await?.ok_or_not_found()?;

        let (client_profile, employee_profile) = match user.role {
            UserRole::Client => (self.uow.users().find_client_profile(user.id).await?, None),
            UserRole::Employee => (None, self.uow.users().find_employee_profile(user.id).await?),
            UserRole::Admin => (None, None),
        };

        Ok(UserProfileResponse::new(user, client_profile, employee_profile))
    }

    async fn list_clients(&self) -> AppResult<Vec<ClientProfile>> {
        self.uow.users().list_clients().await
    }

    async fn list_employees(&self) -> AppResult<Vec<EmployeeListing>> {
        self.uow.users().list_employees().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::domain::User;
    use crate::errors::AppError;
    use crate::infra::{
        CaseRepository, MockCaseRepository, MockUserRepository, TransactionContext, UserRepository,
    };

    fn test_user(id: Uuid, role: UserRole) -> User {
        User {
            id,
            email: "user@example.com".to_string(),
            password_hash: "hashed".to_string(),
            name: "Test User".to_string(),
            role,
            is_active: true,
            two_factor_secret: None,
            two_factor_enabled: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    struct TestUnitOfWork {
        user_repo: Arc<MockUserRepository>,
    }

    impl TestUnitOfWork {
        fn new(user_repo: MockUserRepository) -> Self {
            Self {
                user_repo: Arc::new(user_repo),
            }
        }
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.user_repo.clone()
        }

        fn cases(&self) -> Arc<dyn CaseRepository> {
            Arc::new(MockCaseRepository::new())
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }

        async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                    Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
                > + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }

    #[tokio::test]
    async fn client_profile_is_attached_to_the_response() {
        let user_id = Uuid::new_v4();
        let profile_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(user_id))
            .returning(move |id| Ok(Some(test_user(id, UserRole::Client))));
        repo.expect_find_client_profile()
            .with(eq(user_id))
            .returning(move |uid| {
                Ok(Some(ClientProfile {
                    id: profile_id,
                    user_id: uid,
                    company_name: "Global Insurance Co.".to_string(),
                    contact_person: "John Smith".to_string(),
                    phone_number: "+1234567890".to_string(),
                    country: "United States".to_string(),
                }))
            });

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let profile = service.get_profile(user_id).await.unwrap();

        assert_eq!(profile.id, user_id);
        assert_eq!(profile.role, UserRole::Client);
        assert_eq!(profile.client_profile.unwrap().id, profile_id);
        assert!(profile.employee_profile.is_none());
    }

    #[tokio::test]
    async fn admin_profile_skips_extension_lookups() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |id| Ok(Some(test_user(id, UserRole::Admin))));
        repo.expect_find_client_profile().times(0);
        repo.expect_find_employee_profile().times(0);

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let profile = service.get_profile(user_id).await.unwrap();

        assert!(profile.client_profile.is_none());
        assert!(profile.employee_profile.is_none());
    }

    #[tokio::test]
    async fn missing_user_maps_to_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let result = service.get_profile(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
