//! Case service.
//!
//! Every read takes the caller's `CaseScope`; the paired writes (case +
//! CREATED history, document + DOCUMENT_UPLOADED history) run inside one
//! transaction through the Unit of Work.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::{CASE_ACTION_CREATED, CASE_ACTION_DOCUMENT_UPLOADED};
use crate::domain::{
    Case, CaseDetail, CaseFilters, CaseListItem, CaseScope, CaseType, CreateCaseRequest,
    CreateDocumentRequest, Document, DocumentView,
};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Case service trait for dependency injection.
#[async_trait]
pub trait CaseService: Send + Sync {
    /// Create a case with its CREATED history entry
    async fn create_case(&self, created_by_id: Uuid, input: CreateCaseRequest) -> AppResult<Case>;

    /// Cases visible to the caller, filtered, newest first
    async fn list_cases(
        &self,
        scope: &CaseScope,
        filters: &CaseFilters,
    ) -> AppResult<Vec<CaseListItem>>;

    /// Full case detail, if the scope permits it
    async fn get_case(&self, scope: &CaseScope, id: Uuid) -> AppResult<CaseDetail>;

    /// Attach document metadata with its DOCUMENT_UPLOADED history entry
    async fn add_document(
        &self,
        scope: &CaseScope,
        uploaded_by_id: Uuid,
        case_id: Uuid,
        input: CreateDocumentRequest,
    ) -> AppResult<Document>;

    /// A single document under a case the scope permits
    async fn get_document(
        &self,
        scope: &CaseScope,
        case_id: Uuid,
        document_id: Uuid,
    ) -> AppResult<DocumentView>;

    /// Active case types
    async fn list_case_types(&self) -> AppResult<Vec<CaseType>>;
}

/// Concrete implementation of CaseService using Unit of Work.
pub struct CaseManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> CaseManager<U> {
    /// Create new case service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> CaseService for CaseManager<U> {
    #[instrument(skip(self, input))]
    async fn create_case(&self, created_by_id: Uuid, input: CreateCaseRequest) -> AppResult<Case> {
        // Field constraints are validated by the handler's extractor
        let case = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let cases = ctx.cases();
                    let case = cases.insert_case(&input, created_by_id).await?;
                    cases
                        .insert_history(
                            case.id,
                            created_by_id,
                            CASE_ACTION_CREATED,
                            "Case created".to_string(),
                        )
                        .await?;
                    Ok(case)
                })
            })
            .await?;

        info!(case_id = %case.id, "Case created");
        Ok(case)
    }

    async fn list_cases(
        &self,
        scope: &CaseScope,
        filters: &CaseFilters,
    ) -> AppResult<Vec<CaseListItem>> {
        self.uow.cases().list(scope, filters).await
    }

    async fn get_case(&self, scope: &CaseScope, id: Uuid) -> AppResult<CaseDetail> {
        self.uow
            .cases()
            .find_detail(scope, id)
            .await?
            .ok_or_not_found()
    }

    #[instrument(skip(self, scope, input))]
    async fn add_document(
        &self,
        scope: &CaseScope,
        uploaded_by_id: Uuid,
        case_id: Uuid,
        input: CreateDocumentRequest,
    ) -> AppResult<Document> {
        // Scope check on the parent case before any write
        self.uow
            .cases()
            .find_in_scope(scope, case_id)
            .await?
            .ok_or_not_found()?;

        let document = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let cases = ctx.cases();
                    let document = cases
                        .insert_document(case_id, &input, uploaded_by_id)
                        .await?;
                    cases
                        .insert_history(
                            case_id,
                            uploaded_by_id,
                            CASE_ACTION_DOCUMENT_UPLOADED,
                            format!("Document \"{}\" uploaded", document.name),
                        )
                        .await?;
                    Ok(document)
                })
            })
            .await?;

        info!(case_id = %case_id, document_id = %document.id, "Document attached");
        Ok(document)
    }

    async fn get_document(
        &self,
        scope: &CaseScope,
        case_id: Uuid,
        document_id: Uuid,
    ) -> AppResult<DocumentView> {
        self.uow
            .cases()
            .find_in_scope(scope, case_id)
            .await?
            .ok_or_not_found()?;

        self.uow
            .cases()
            .find_document(case_id, document_id)
            .await?
            .ok_or_not_found()
    }

    async fn list_case_types(&self) -> AppResult<Vec<CaseType>> {
        self.uow.cases().list_case_types().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::errors::AppError;
    use crate::infra::{
        CaseRepository, MockCaseRepository, MockUserRepository, TransactionContext, UserRepository,
    };

    struct TestUnitOfWork {
        case_repo: Arc<MockCaseRepository>,
    }

    impl TestUnitOfWork {
        fn new(case_repo: MockCaseRepository) -> Self {
            Self {
                case_repo: Arc::new(case_repo),
            }
        }
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            Arc::new(MockUserRepository::new())
        }

        fn cases(&self) -> Arc<dyn CaseRepository> {
            self.case_repo.clone()
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
    async fn document_lookup_stops_at_an_invisible_case() {
        let case_id = Uuid::new_v4();

        let mut repo = MockCaseRepository::new();
        repo.expect_find_in_scope()
            .withf(move |_, id| *id == case_id)
            .returning(|_, _| Ok(None));
        // The parent case is out of scope, so the document is never looked up
        repo.expect_find_document().times(0);

        let service = CaseManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let result = service
            .get_document(
                &CaseScope::Client(Some(Uuid::new_v4())),
                case_id,
                Uuid::new_v4(),
            )
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn document_attach_requires_a_visible_parent_case() {
        let mut repo = MockCaseRepository::new();
        repo.expect_find_in_scope().returning(|_, _| Ok(None));

        let service = CaseManager::new(Arc::new(TestUnitOfWork::new(repo)));
        let result = service
            .add_document(
                &CaseScope::Employee {
                    profile_id: None,
                    user_id: Uuid::new_v4(),
                },
                Uuid::new_v4(),
                Uuid::new_v4(),
                CreateDocumentRequest {
                    name: "report.pdf".to_string(),
                    doc_type: "application/pdf".to_string(),
                    description: None,
                    url: "/uploads/report.pdf".to_string(),
                },
            )
            .await;

        // Fails at the scope check, before the transaction would run
        assert!(matches!(result, Err(AppError::NotFound)));
    }
}
