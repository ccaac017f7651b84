//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod case;
pub mod password;
pub mod scope;
pub mod two_factor;
pub mod user;

pub use case::{
    AssigneeSummary, Case, CaseDetail, CaseFilters, CaseHistoryEntry, CaseHistoryView,
    CaseListItem, CasePriority, CaseType, CaseTypeSummary, ClientSummary, CreateCaseRequest,
    CreateDocumentRequest, Document, DocumentView, UserSummary,
};
pub use password::Password;
pub use scope::{CaseOwnership, CaseScope};
pub use two_factor::TwoFactorSetup;
pub use user::{
    ClientProfile, EmployeeListing, EmployeeProfile, EmployeeProfileSummary, User,
    UserProfileResponse, UserRole,
};
