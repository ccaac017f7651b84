//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and transaction management. The paired
//! writes this application requires (user registration with the
//! first-user-admin decision, case + CREATED history, document +
//! DOCUMENT_UPLOADED history) all run through `transaction`, so either
//! both rows land or neither does.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;
use uuid::Uuid;

use super::repositories::entities::{case, case_history, document, user};
use super::repositories::{CaseRepository, CaseStore, UserRepository, UserStore};
use crate::config::CASE_STATUS_OPEN;
use crate::domain::{Case, CaseHistoryEntry, CreateCaseRequest, CreateDocumentRequest, Document, User};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Provides centralized access to all repositories and transaction
/// management. Not mockable directly due to generic methods; tests mock
/// at the repository or service level instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;

    /// Get case repository
    fn cases(&self) -> Arc<dyn CaseRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is automatically committed on success or rolled back
    /// on error. Uses ReadCommitted isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;

    /// Execute a closure within a serializable transaction.
    ///
    /// Used where a read decides a write, such as the first-user-admin rule
    /// at registration.
    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> TxUserRepository<'_> {
        TxUserRepository::new(self.txn)
    }

    /// Get case repository for this transaction
    pub fn cases(&self) -> TxCaseRepository<'_> {
        TxCaseRepository::new(self.txn)
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    case_repo: Arc<CaseStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let user_repo = Arc::new(UserStore::new(db.clone()));
        let case_repo = Arc::new(CaseStore::new(db.clone()));
        Self {
            db,
            user_repo,
            case_repo,
        }
    }

    async fn execute_transaction<F, T>(&self, isolation: IsolationLevel, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn cases(&self) -> Arc<dyn CaseRepository> {
        self.case_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, f).await
    }

    async fn transaction_serializable<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::Serializable, f).await
    }
}

/// Transaction-aware user repository.
pub struct TxUserRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Total number of registered users (any role)
    pub async fn count(&self) -> AppResult<u64> {
        user::Entity::find()
            .count(self.txn)
            .await
            .map_err(AppError::from)
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    /// Create a new user
    pub async fn create(
        &self,
        email: String,
        password_hash: String,
        name: String,
        role: String,
        two_factor_secret: Option<String>,
    ) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            name: Set(name),
            role: Set(role),
            is_active: Set(true),
            two_factor_enabled: Set(two_factor_secret.is_some()),
            two_factor_secret: Set(two_factor_secret),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(User::from(model))
    }
}

/// Transaction-aware case repository handling the paired writes.
pub struct TxCaseRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxCaseRepository<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Insert a new case with status OPEN
    pub async fn insert_case(
        &self,
        input: &CreateCaseRequest,
        created_by_id: Uuid,
    ) -> AppResult<Case> {
        let now = chrono::Utc::now();
        let active_model = case::ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title.clone()),
            description: Set(input.description.clone()),
            case_type_id: Set(input.case_type_id),
            client_id: Set(input.client_id),
            created_by_id: Set(created_by_id),
            assigned_to_id: Set(input.assigned_to_id),
            location: Set(input.location.clone()),
            priority: Set(input.priority.to_string()),
            status: Set(CASE_STATUS_OPEN.to_string()),
            symptoms: Set(input.symptoms.clone()),
            required_assistance: Set(input.required_assistance.clone()),
            medical_history: Set(input.medical_history.clone()),
            current_medications: Set(input.current_medications.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(Case::from(model))
    }

    /// Append a history entry for a case
    pub async fn insert_history(
        &self,
        case_id: Uuid,
        user_id: Uuid,
        action: &str,
        description: String,
    ) -> AppResult<CaseHistoryEntry> {
        let active_model = case_history::ActiveModel {
            id: Set(Uuid::new_v4()),
            case_id: Set(case_id),
            user_id: Set(user_id),
            action: Set(action.to_string()),
            description: Set(description),
            created_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(CaseHistoryEntry::from(model))
    }

    /// Insert document metadata for a case
    pub async fn insert_document(
        &self,
        case_id: Uuid,
        input: &CreateDocumentRequest,
        uploaded_by_id: Uuid,
    ) -> AppResult<Document> {
        let active_model = document::ActiveModel {
            id: Set(Uuid::new_v4()),
            case_id: Set(case_id),
            name: Set(input.name.clone()),
            doc_type: Set(input.doc_type.clone()),
            description: Set(input.description.clone()),
            url: Set(input.url.clone()),
            uploaded_by_id: Set(uploaded_by_id),
            uploaded_at: Set(chrono::Utc::now()),
        };

        let model = active_model
            .insert(self.txn)
            .await
            .map_err(AppError::from)?;

        Ok(Document::from(model))
    }
}
