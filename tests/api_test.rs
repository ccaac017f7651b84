//! Integration tests for API building blocks.
//!
//! These tests use mock services and in-process checks, so no database
//! connection is required.

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;

use medcase_api::api::middleware::CurrentUser;
use medcase_api::domain::{CaseScope, Password, User, UserRole};
use medcase_api::errors::{AppError, AppResult};
use medcase_api::services::{AuthService, Claims, RegisterResponse, TokenResponse};

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Mock auth service that returns predefined responses
struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(
        &self,
        _name: String,
        _email: String,
        _password: String,
    ) -> AppResult<RegisterResponse> {
        Ok(RegisterResponse {
            success: true,
            qr_code: "data:image/svg+xml;base64,AAAA".to_string(),
            secret: "JBSWY3DPEHPK3PXP".to_string(),
        })
    }

    async fn login(&self, _email: String, _password: String) -> AppResult<TokenResponse> {
        Ok(TokenResponse {
            access_token: "mock-token".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        if token == "valid-test-token" {
            Ok(Claims {
                sub: Uuid::new_v4(),
                email: "test@example.com".to_string(),
                role: "CLIENT".to_string(),
                client_profile_id: Some(Uuid::new_v4()),
                employee_profile_id: None,
                exp: Utc::now().timestamp() + 3600,
                iat: Utc::now().timestamp(),
            })
        } else {
            Err(AppError::Unauthenticated)
        }
    }
}

// =============================================================================
// Domain Model Tests
// =============================================================================

#[tokio::test]
async fn test_user_role_display() {
    assert_eq!(UserRole::Admin.to_string(), "ADMIN");
    assert_eq!(UserRole::Employee.to_string(), "EMPLOYEE");
    assert_eq!(UserRole::Client.to_string(), "CLIENT");
}

#[tokio::test]
async fn test_user_role_from_str() {
    assert_eq!(UserRole::from("ADMIN"), UserRole::Admin);
    assert_eq!(UserRole::from("EMPLOYEE"), UserRole::Employee);
    // Unknown values default to the least privileged role
    assert_eq!(UserRole::from("invalid"), UserRole::Client);
}

#[tokio::test]
async fn test_user_creation() {
    let user = User {
        id: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        password_hash: "hashed".to_string(),
        name: "Test User".to_string(),
        role: UserRole::Client,
        is_active: true,
        two_factor_secret: Some("JBSWY3DPEHPK3PXP".to_string()),
        two_factor_enabled: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    assert!(!user.email.is_empty());
    assert!(user.is_active);
}

// =============================================================================
// Error Type Tests
// =============================================================================

#[tokio::test]
async fn test_app_error_types() {
    let not_found = AppError::NotFound;
    let unauthenticated = AppError::Unauthenticated;
    let validation = AppError::validation("invalid field");
    let internal = AppError::internal("server error");

    assert!(matches!(not_found, AppError::NotFound));
    assert!(matches!(unauthenticated, AppError::Unauthenticated));
    assert!(matches!(validation, AppError::Validation(_)));
    assert!(matches!(internal, AppError::Internal(_)));
}

#[tokio::test]
async fn test_app_error_status_codes() {
    use axum::response::IntoResponse;

    assert_eq!(
        AppError::NotFound.into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::Unauthenticated.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::InvalidCredentials.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::DuplicateEmail.into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::PayloadTooLarge(5).into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::UnsupportedMediaType.into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        AppError::internal("boom").into_response().status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_upload_limit_message_names_megabytes() {
    assert_eq!(
        AppError::PayloadTooLarge(5).to_string(),
        "File size exceeds 5 MB limit"
    );
}

// =============================================================================
// Password Hashing Tests
// =============================================================================

#[tokio::test]
async fn test_password_hashing() {
    let plain_password = "secure_password_123";
    let password = Password::new(plain_password).expect("Hashing should succeed");
    let hash = password.into_string();

    // Hash should be different from original
    assert_ne!(hash.as_str(), plain_password);

    // Hash should be verifiable
    let stored = Password::from_hash(hash);
    assert!(stored.verify(plain_password));

    // Wrong password should not verify
    assert!(!stored.verify("wrong_password"));
}

#[tokio::test]
async fn test_password_hash_uniqueness() {
    let plain_password = "same_password";
    let hash1 = Password::new(plain_password)
        .expect("Hashing should succeed")
        .into_string();
    let hash2 = Password::new(plain_password)
        .expect("Hashing should succeed")
        .into_string();

    // Same password should produce different hashes (due to salt)
    assert_ne!(hash1.as_str(), hash2.as_str());

    assert!(Password::from_hash(hash1).verify(plain_password));
    assert!(Password::from_hash(hash2).verify(plain_password));
}

// =============================================================================
// JWT Claims Tests
// =============================================================================

#[tokio::test]
async fn test_claims_structure() {
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "test@example.com".to_string(),
        role: "CLIENT".to_string(),
        client_profile_id: Some(Uuid::new_v4()),
        employee_profile_id: None,
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
    };

    assert!(!claims.email.is_empty());
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_claims_omit_absent_profile_ids() {
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: "admin@example.com".to_string(),
        role: "ADMIN".to_string(),
        client_profile_id: None,
        employee_profile_id: None,
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
    };

    let json = serde_json::to_value(&claims).unwrap();
    assert!(json.get("client_profile_id").is_none());
    assert!(json.get("employee_profile_id").is_none());

    // Tokens issued without the fields still deserialize
    let parsed: Claims = serde_json::from_value(json).unwrap();
    assert!(parsed.client_profile_id.is_none());
}

// =============================================================================
// Response Shape Tests
// =============================================================================

#[tokio::test]
async fn test_register_response_uses_camel_case() {
    let response = RegisterResponse {
        success: true,
        qr_code: "data:image/svg+xml;base64,AAAA".to_string(),
        secret: "JBSWY3DPEHPK3PXP".to_string(),
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert!(json.get("qrCode").is_some());
    assert!(json.get("qr_code").is_none());
}

// =============================================================================
// Caller Scope Tests
// =============================================================================

fn caller(role: UserRole) -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        email: "caller@example.com".to_string(),
        role,
        client_profile_id: None,
        employee_profile_id: None,
    }
}

#[tokio::test]
async fn test_admin_caller_gets_unrestricted_scope() {
    let admin = caller(UserRole::Admin);
    assert!(admin.is_admin());
    assert_eq!(admin.scope(), CaseScope::Unrestricted);
}

#[tokio::test]
async fn test_client_caller_scope_carries_profile_id() {
    let mut client = caller(UserRole::Client);
    let profile_id = Uuid::new_v4();
    client.client_profile_id = Some(profile_id);

    assert_eq!(client.scope(), CaseScope::Client(Some(profile_id)));
}

#[tokio::test]
async fn test_client_caller_without_profile_matches_nothing() {
    let client = caller(UserRole::Client);
    assert!(client.scope().matches_nothing());
}

#[tokio::test]
async fn test_employee_caller_scope_carries_both_ids() {
    let mut employee = caller(UserRole::Employee);
    let profile_id = Uuid::new_v4();
    employee.employee_profile_id = Some(profile_id);

    assert_eq!(
        employee.scope(),
        CaseScope::Employee {
            profile_id: Some(profile_id),
            user_id: employee.id,
        }
    );
}

// =============================================================================
// Mock Service Tests
// =============================================================================

#[tokio::test]
async fn test_mock_auth_service_register() {
    let service = MockAuthService;
    let result = service
        .register(
            "New User".to_string(),
            "new@example.com".to_string(),
            "password123".to_string(),
        )
        .await;

    assert!(result.is_ok());
    let response = result.unwrap();
    assert!(response.success);
    assert!(!response.secret.is_empty());
}

#[tokio::test]
async fn test_mock_auth_service_login() {
    let service = MockAuthService;
    let result = service
        .login("test@example.com".to_string(), "password123".to_string())
        .await;

    assert!(result.is_ok());
    let token = result.unwrap();
    assert_eq!(token.token_type, "Bearer");
    assert!(!token.access_token.is_empty());
}

#[tokio::test]
async fn test_mock_auth_service_verify_valid_token() {
    let service = MockAuthService;
    let result = service.verify_token("valid-test-token");

    assert!(result.is_ok());
    let claims = result.unwrap();
    assert_eq!(claims.email, "test@example.com");
    assert!(claims.client_profile_id.is_some());
}

#[tokio::test]
async fn test_mock_auth_service_verify_invalid_token() {
    let service = MockAuthService;
    let result = service.verify_token("invalid-token");

    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), AppError::Unauthenticated));
}

// =============================================================================
// Integration Tests (Require Infrastructure)
// =============================================================================
//
// The following tests require an actual PostgreSQL connection.
// To run them:
// 1. Start PostgreSQL (use docker-compose up -d)
// 2. Set DATABASE_URL
// 3. Run: cargo test -- --ignored
//
// #[tokio::test]
// #[ignore = "Requires database"]
// async fn test_full_health_endpoint() {
//     // Full integration test with real infrastructure
// }
