//! Case domain entities: cases, their audit history, and attached documents.
//!
//! Wire names are camelCase to match the original API surface consumed by
//! existing clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::scope::CaseOwnership;

/// Case priority levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum CasePriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl std::fmt::Display for CasePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CasePriority::Low => "LOW",
            CasePriority::Medium => "MEDIUM",
            CasePriority::High => "HIGH",
            CasePriority::Urgent => "URGENT",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for CasePriority {
    fn from(s: &str) -> Self {
        match s {
            "LOW" => CasePriority::Low,
            "HIGH" => CasePriority::High,
            "URGENT" => CasePriority::Urgent,
            _ => CasePriority::Medium,
        }
    }
}

/// Case domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub case_type_id: Uuid,
    pub client_id: Uuid,
    pub created_by_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<Uuid>,
    pub location: String,
    pub priority: CasePriority,
    /// Free-form status, set to OPEN at creation. No transition graph is
    /// enforced; see DESIGN.md.
    pub status: String,
    pub symptoms: String,
    pub required_assistance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_history: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_medications: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Case {
    /// The ownership fields the access scoper evaluates
    pub fn ownership(&self) -> CaseOwnership {
        CaseOwnership {
            client_id: self.client_id,
            created_by_id: self.created_by_id,
            assigned_to_id: self.assigned_to_id,
        }
    }
}

/// Append-only audit entry attached to a case
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseHistoryEntry {
    pub id: Uuid,
    pub case_id: Uuid,
    pub user_id: Uuid,
    pub action: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Document metadata attached to a case; the blob lives in the upload store
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub case_id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub uploaded_by_id: Uuid,
    pub uploaded_at: DateTime<Utc>,
}

/// Reference data: a configurable category of case
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseType {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing)]
    pub is_active: bool,
}

// =============================================================================
// Requests
// =============================================================================

/// Case creation request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    pub case_type_id: Uuid,
    pub client_id: Uuid,
    #[validate(length(min = 5, max = 100, message = "Title must be 5-100 characters"))]
    pub title: String,
    #[validate(length(min = 3, max = 100, message = "Location must be 3-100 characters"))]
    pub location: String,
    pub priority: CasePriority,
    #[validate(length(min = 10, max = 2000, message = "Description must be 10-2000 characters"))]
    pub description: String,
    #[validate(length(min = 10, max = 2000, message = "Symptoms must be 10-2000 characters"))]
    pub symptoms: String,
    #[validate(length(
        min = 10,
        max = 2000,
        message = "Required assistance must be 10-2000 characters"
    ))]
    pub required_assistance: String,
    #[validate(length(max = 2000, message = "Medical history must not exceed 2000 characters"))]
    pub medical_history: Option<String>,
    #[validate(length(
        max = 2000,
        message = "Current medications must not exceed 2000 characters"
    ))]
    pub current_medications: Option<String>,
    pub assigned_to_id: Option<Uuid>,
}

/// Document metadata submitted after the blob has been uploaded
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub doc_type: String,
    pub description: Option<String>,
    #[validate(length(min = 1, message = "Url is required"))]
    pub url: String,
}

/// Optional list filters, combined with the caller's scope
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CaseFilters {
    pub status: Option<String>,
    pub priority: Option<CasePriority>,
    /// Case-insensitive match against title, description, or location
    pub search: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

/// Short form of a case type embedded in case responses
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseTypeSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

/// Short form of a client profile embedded in case responses
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientSummary {
    pub id: Uuid,
    pub company_name: String,
    pub contact_person: String,
}

/// Name/email pair identifying a user in embedded responses
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Assigned employee with their user's display name
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeSummary {
    pub id: Uuid,
    pub department: String,
    pub position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

/// List item: a case with its related reference records
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseListItem {
    #[serde(flatten)]
    pub case: Case,
    pub case_type: Option<CaseTypeSummary>,
    pub client: Option<ClientSummary>,
    pub created_by: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<AssigneeSummary>,
}

/// History entry with its actor, newest first in responses
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseHistoryView {
    #[serde(flatten)]
    pub entry: CaseHistoryEntry,
    pub user: Option<UserSummary>,
}

/// Document with its uploader
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    #[serde(flatten)]
    pub document: Document,
    pub uploaded_by: Option<UserSummary>,
}

/// Full case detail: nested reference data, history and documents
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetail {
    #[serde(flatten)]
    pub case: Case,
    pub case_type: Option<CaseTypeSummary>,
    pub client: Option<ClientSummary>,
    pub created_by: Option<UserSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<AssigneeSummary>,
    /// Ordered by created_at descending
    pub history: Vec<CaseHistoryView>,
    /// Ordered by uploaded_at descending
    pub documents: Vec<DocumentView>,
}
