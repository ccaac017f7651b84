//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    auth_handler, case_handler, directory_handler, upload_handler, user_handler,
};
use crate::domain::{
    AssigneeSummary, Case, CaseDetail, CaseHistoryView, CaseListItem, CasePriority, CaseType,
    CaseTypeSummary, ClientProfile, ClientSummary, CreateCaseRequest, CreateDocumentRequest,
    Document, DocumentView, EmployeeListing, EmployeeProfile, EmployeeProfileSummary, UserProfileResponse,
    UserRole, UserSummary,
};
use crate::services::{RegisterResponse, TokenResponse};

/// OpenAPI documentation for the case management API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Medical Case Management API",
        version = "0.1.0",
        description = "Role-based case management for medical assistance coordination",
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::register,
        auth_handler::login,
        // Case endpoints
        case_handler::create_case,
        case_handler::list_cases,
        case_handler::get_case,
        case_handler::add_document,
        case_handler::get_document,
        case_handler::list_case_types,
        // Directory endpoints
        directory_handler::list_clients,
        directory_handler::list_employees,
        // User endpoints
        user_handler::get_profile,
        // Upload endpoint
        upload_handler::upload,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            CasePriority,
            Case,
            CaseDetail,
            CaseListItem,
            CaseType,
            CaseTypeSummary,
            CaseHistoryView,
            ClientProfile,
            ClientSummary,
            CreateCaseRequest,
            CreateDocumentRequest,
            Document,
            DocumentView,
            EmployeeListing,
            EmployeeProfile,
            EmployeeProfileSummary,
            AssigneeSummary,
            UserProfileResponse,
            UserSummary,
            // Auth types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            RegisterResponse,
            TokenResponse,
            // Upload types
            upload_handler::UploadResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration with 2FA provisioning, and login"),
        (name = "Cases", description = "Case management and documents"),
        (name = "Directory", description = "Client and employee listings"),
        (name = "Users", description = "Current user profile"),
        (name = "Uploads", description = "Document blob uploads")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /auth/login"))
                        .build(),
                ),
            );
        }
    }
}
