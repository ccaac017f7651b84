//! User domain entity, role-specific profiles, and response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{ROLE_ADMIN, ROLE_CLIENT, ROLE_EMPLOYEE};

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    Employee,
    Client,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_EMPLOYEE => UserRole::Employee,
            _ => UserRole::Client,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::Employee => write!(f, "{}", ROLE_EMPLOYEE),
            UserRole::Client => write!(f, "{}", ROLE_CLIENT),
        }
    }
}

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
    /// Base32 TOTP secret issued at registration. Never serialized.
    #[serde(skip_serializing)]
    pub two_factor_secret: Option<String>,
    pub two_factor_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Client profile: role-specific extension record for CLIENT users
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientProfile {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub company_name: String,
    pub contact_person: String,
    pub phone_number: String,
    pub country: String,
}

/// Employee profile: role-specific extension record for EMPLOYEE users
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfile {
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub department: String,
    pub position: String,
}

/// Directory entry for the employee listing: active EMPLOYEE users with
/// their profile summary.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListing {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_profile: Option<EmployeeProfileSummary>,
}

/// Department/position pair shown in the employee directory
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeProfileSummary {
    pub department: String,
    pub position: String,
}

/// Current user's profile (password stripped)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub is_active: bool,
    pub two_factor_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_profile: Option<ClientProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_profile: Option<EmployeeProfile>,
    pub created_at: DateTime<Utc>,
}

impl UserProfileResponse {
    /// Assemble from a user and its (at most one) role-matching profile
    pub fn new(
        user: User,
        client_profile: Option<ClientProfile>,
        employee_profile: Option<EmployeeProfile>,
    ) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            role: user.role,
            is_active: user.is_active,
            two_factor_enabled: user.two_factor_enabled,
            client_profile,
            employee_profile,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display_round_trips() {
        for role in [UserRole::Admin, UserRole::Employee, UserRole::Client] {
            assert_eq!(UserRole::from(role.to_string().as_str()), role);
        }
    }

    #[test]
    fn unknown_role_defaults_to_client() {
        assert_eq!(UserRole::from("SOMETHING_ELSE"), UserRole::Client);
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Employee).unwrap(),
            "\"EMPLOYEE\""
        );
    }
}
