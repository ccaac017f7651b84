//! Directory handlers: client and employee listings.

use axum::{extract::State, response::Json, Router};

use crate::api::AppState;
use crate::domain::{ClientProfile, EmployeeListing};
use crate::errors::AppResult;

/// Create directory routes (merged at the router root)
pub fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/clients", axum::routing::get(list_clients))
        .route("/employees", axum::routing::get(list_employees))
}

/// List client profiles of active users
#[utoipa::path(
    get,
    path = "/clients",
    tag = "Directory",
    responses(
        (status = 200, description = "Client profiles, ordered by company name", body = [ClientProfile]),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_clients(State(state): State<AppState>) -> AppResult<Json<Vec<ClientProfile>>> {
    let clients = state.user_service.list_clients().await?;
    Ok(Json(clients))
}

/// List active employees with their profiles
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Directory",
    responses(
        (status = 200, description = "Active employees, ordered by name", body = [EmployeeListing]),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_employees(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<EmployeeListing>>> {
    let employees = state.user_service.list_employees().await?;
    Ok(Json(employees))
}
