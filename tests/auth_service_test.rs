//! Authentication service tests.
//!
//! Use an in-memory UserRepository stub so no database is required.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use medcase_api::config::Config;
use medcase_api::domain::{
    CaseDetail, CaseFilters, CaseListItem, CaseScope, CaseType, ClientProfile, DocumentView,
    EmployeeListing, EmployeeProfile, Password, User, UserRole,
};
use medcase_api::errors::{AppError, AppResult};
use medcase_api::infra::{
    CaseRepository, TransactionContext, UnitOfWork, UserRepository,
};
use medcase_api::services::{AuthService, Authenticator};

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

fn test_user(email: &str, password: &str, role: UserRole) -> User {
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: Password::new(password).unwrap().into_string(),
        name: "Test User".to_string(),
        role,
        is_active: true,
        two_factor_secret: Some("JBSWY3DPEHPK3PXP".to_string()),
        two_factor_enabled: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// In-memory UserRepository stub
struct StubUserRepository {
    user: Option<User>,
    client_profile: Option<ClientProfile>,
    employee_profile: Option<EmployeeProfile>,
}

impl StubUserRepository {
    fn with_user(user: User) -> Self {
        Self {
            user: Some(user),
            client_profile: None,
            employee_profile: None,
        }
    }

    fn empty() -> Self {
        Self {
            user: None,
            client_profile: None,
            employee_profile: None,
        }
    }
}

#[async_trait]
impl UserRepository for StubUserRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.user.clone().filter(|u| u.id == id))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.user.clone().filter(|u| u.email == email))
    }

    async fn find_client_profile(&self, user_id: Uuid) -> AppResult<Option<ClientProfile>> {
        Ok(self.client_profile.clone().filter(|p| p.user_id == user_id))
    }

    async fn find_employee_profile(&self, user_id: Uuid) -> AppResult<Option<EmployeeProfile>> {
        Ok(self
            .employee_profile
            .clone()
            .filter(|p| p.user_id == user_id))
    }

    async fn list_clients(&self) -> AppResult<Vec<ClientProfile>> {
        Ok(self.client_profile.clone().into_iter().collect())
    }

    async fn list_employees(&self) -> AppResult<Vec<EmployeeListing>> {
        Ok(vec![])
    }
}

/// CaseRepository stub; auth tests never reach it
struct UnusedCaseRepository;

#[async_trait]
impl CaseRepository for UnusedCaseRepository {
    async fn list(
        &self,
        _scope: &CaseScope,
        _filters: &CaseFilters,
    ) -> AppResult<Vec<CaseListItem>> {
        unreachable!("auth tests do not touch cases")
    }

    async fn find_in_scope(
        &self,
        _scope: &CaseScope,
        _id: Uuid,
    ) -> AppResult<Option<medcase_api::domain::Case>> {
        unreachable!("auth tests do not touch cases")
    }

    async fn find_detail(&self, _scope: &CaseScope, _id: Uuid) -> AppResult<Option<CaseDetail>> {
        unreachable!("auth tests do not touch cases")
    }

    async fn find_document(
        &self,
        _case_id: Uuid,
        _document_id: Uuid,
    ) -> AppResult<Option<DocumentView>> {
        unreachable!("auth tests do not touch cases")
    }

    async fn list_case_types(&self) -> AppResult<Vec<CaseType>> {
        unreachable!("auth tests do not touch cases")
    }
}

/// UnitOfWork over the stubs. Transactions are not supported here; tests
/// that need them run against a real database.
struct TestUnitOfWork {
    user_repo: Arc<StubUserRepository>,
}

impl TestUnitOfWork {
    fn new(user_repo: StubUserRepository) -> Self {
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
        Arc::new(UnusedCaseRepository)
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }

    async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(
                TransactionContext<'a>,
            ) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}

fn authenticator(repo: StubUserRepository) -> Authenticator<TestUnitOfWork> {
    Authenticator::new(
        Arc::new(TestUnitOfWork::new(repo)),
        Config::for_tests(TEST_SECRET),
    )
}

#[tokio::test]
async fn login_with_unknown_email_fails() {
    let auth = authenticator(StubUserRepository::empty());

    let result = auth
        .login("nobody@example.com".to_string(), "password123".to_string())
        .await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let user = test_user("user@example.com", "correct-password", UserRole::Client);
    let auth = authenticator(StubUserRepository::with_user(user));

    let result = auth
        .login("user@example.com".to_string(), "wrong-password".to_string())
        .await;

    assert!(matches!(result, Err(AppError::InvalidCredentials)));
}

#[tokio::test]
async fn login_errors_do_not_reveal_which_part_was_wrong() {
    let user = test_user("user@example.com", "correct-password", UserRole::Client);
    let auth_known = authenticator(StubUserRepository::with_user(user));
    let auth_unknown = authenticator(StubUserRepository::empty());

    let wrong_password = auth_known
        .login("user@example.com".to_string(), "wrong-password".to_string())
        .await
        .unwrap_err();
    let unknown_email = auth_unknown
        .login("user@example.com".to_string(), "wrong-password".to_string())
        .await
        .unwrap_err();

    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(
        wrong_password.status(),
        unknown_email.status()
    );
}

#[tokio::test]
async fn login_issues_verifiable_token() {
    let user = test_user("admin@example.com", "sup3r-secret", UserRole::Admin);
    let user_id = user.id;
    let auth = authenticator(StubUserRepository::with_user(user));

    let token = auth
        .login("admin@example.com".to_string(), "sup3r-secret".to_string())
        .await
        .expect("login should succeed");

    assert_eq!(token.token_type, "Bearer");
    assert!(token.expires_in > 0);

    let claims = auth
        .verify_token(&token.access_token)
        .expect("token should verify");
    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "admin@example.com");
    assert_eq!(claims.role, "ADMIN");
    assert!(claims.client_profile_id.is_none());
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn login_embeds_client_profile_id_in_claims() {
    let user = test_user("client@example.com", "sup3r-secret", UserRole::Client);
    let profile = ClientProfile {
        id: Uuid::new_v4(),
        user_id: user.id,
        company_name: "Global Insurance Co.".to_string(),
        contact_person: "John Smith".to_string(),
        phone_number: "+1234567890".to_string(),
        country: "United States".to_string(),
    };
    let profile_id = profile.id;

    let mut repo = StubUserRepository::with_user(user);
    repo.client_profile = Some(profile);
    let auth = authenticator(repo);

    let token = auth
        .login("client@example.com".to_string(), "sup3r-secret".to_string())
        .await
        .expect("login should succeed");

    let claims = auth.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.client_profile_id, Some(profile_id));
    assert!(claims.employee_profile_id.is_none());
}

#[tokio::test]
async fn verify_token_rejects_garbage() {
    let auth = authenticator(StubUserRepository::empty());
    assert!(auth.verify_token("not-a-jwt").is_err());
}

#[tokio::test]
async fn verify_token_rejects_token_signed_with_other_secret() {
    let issuing = authenticator(StubUserRepository::with_user(test_user(
        "user@example.com",
        "sup3r-secret",
        UserRole::Admin,
    )));
    let token = issuing
        .login("user@example.com".to_string(), "sup3r-secret".to_string())
        .await
        .unwrap();

    let other = Authenticator::new(
        Arc::new(TestUnitOfWork::new(StubUserRepository::empty())),
        Config::for_tests("another-secret-key-also-32-chars!!!"),
    );

    assert!(other.verify_token(&token.access_token).is_err());
}
