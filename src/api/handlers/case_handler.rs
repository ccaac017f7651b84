//! Case handlers.
//!
//! Every route below the auth middleware reads the caller from request
//! extensions and derives its visibility scope from the token claims.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use uuid::Uuid;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{
    Case, CaseDetail, CaseFilters, CaseListItem, CaseType, CreateCaseRequest,
    CreateDocumentRequest, Document, DocumentView,
};
use crate::errors::AppResult;

/// Create case routes
pub fn case_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_case).get(list_cases))
        .route("/:id", get(get_case))
        .route("/:id/documents", post(add_document))
        .route("/:id/documents/:document_id", get(get_document))
}

/// Create a new case
#[utoipa::path(
    post,
    path = "/cases",
    tag = "Cases",
    request_body = CreateCaseRequest,
    responses(
        (status = 200, description = "Case created", body = Case),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_case(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateCaseRequest>,
) -> AppResult<Json<Case>> {
    let case = state.case_service.create_case(user.id, payload).await?;
    Ok(Json(case))
}

/// List cases visible to the caller
#[utoipa::path(
    get,
    path = "/cases",
    tag = "Cases",
    params(
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("priority" = Option<String>, Query, description = "Filter by priority"),
        ("search" = Option<String>, Query, description = "Match title, description, or location")
    ),
    responses(
        (status = 200, description = "Cases within the caller's scope", body = [CaseListItem]),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_cases(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(filters): Query<CaseFilters>,
) -> AppResult<Json<Vec<CaseListItem>>> {
    let cases = state
        .case_service
        .list_cases(&user.scope(), &filters)
        .await?;
    Ok(Json(cases))
}

/// Get full case detail
#[utoipa::path(
    get,
    path = "/cases/{id}",
    tag = "Cases",
    params(("id" = Uuid, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case detail with history and documents", body = CaseDetail),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Not found or not visible to the caller")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_case(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<CaseDetail>> {
    let detail = state.case_service.get_case(&user.scope(), id).await?;
    Ok(Json(detail))
}

/// Attach document metadata to a case
#[utoipa::path(
    post,
    path = "/cases/{id}/documents",
    tag = "Cases",
    params(("id" = Uuid, Path, description = "Case id")),
    request_body = CreateDocumentRequest,
    responses(
        (status = 200, description = "Document attached", body = Document),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Case not found or not visible to the caller")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_document(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CreateDocumentRequest>,
) -> AppResult<Json<Document>> {
    let document = state
        .case_service
        .add_document(&user.scope(), user.id, id, payload)
        .await?;
    Ok(Json(document))
}

/// Get a single document under a case
#[utoipa::path(
    get,
    path = "/cases/{id}/documents/{document_id}",
    tag = "Cases",
    params(
        ("id" = Uuid, Path, description = "Case id"),
        ("document_id" = Uuid, Path, description = "Document id")
    ),
    responses(
        (status = 200, description = "Document metadata", body = DocumentView),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Case or document not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_document(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path((id, document_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<DocumentView>> {
    let document = state
        .case_service
        .get_document(&user.scope(), id, document_id)
        .await?;
    Ok(Json(document))
}

/// List active case types
#[utoipa::path(
    get,
    path = "/case-types",
    tag = "Cases",
    responses(
        (status = 200, description = "Active case types", body = [CaseType]),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_case_types(State(state): State<AppState>) -> AppResult<Json<Vec<CaseType>>> {
    let types = state.case_service.list_case_types().await?;
    Ok(Json(types))
}
