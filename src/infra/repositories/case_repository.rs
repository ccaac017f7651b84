//! Case read access. All queries consume the caller's `CaseScope` as a
//! SQL condition, so list and single-record fetches can never disagree
//! about visibility.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, LoaderTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use super::entities::{case, case_history, case_type, client_profile, document, employee_profile, user};
use crate::domain::{
    AssigneeSummary, Case, CaseDetail, CaseFilters, CaseHistoryView, CaseListItem, CaseScope,
    CaseType, CaseTypeSummary, ClientSummary, DocumentView, UserSummary,
};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Case repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait CaseRepository: Send + Sync {
    /// Cases visible under the scope, filtered, newest first
    async fn list(&self, scope: &CaseScope, filters: &CaseFilters) -> AppResult<Vec<CaseListItem>>;

    /// A single case, only if the scope permits it
    async fn find_in_scope(&self, scope: &CaseScope, id: Uuid) -> AppResult<Option<Case>>;

    /// Full detail with history and documents, only if the scope permits it
    async fn find_detail(&self, scope: &CaseScope, id: Uuid) -> AppResult<Option<CaseDetail>>;

    /// A document under a case. Scope must have been checked on the case.
    async fn find_document(
        &self,
        case_id: Uuid,
        document_id: Uuid,
    ) -> AppResult<Option<DocumentView>>;

    /// Active case types
    async fn list_case_types(&self) -> AppResult<Vec<CaseType>>;
}

/// Translate a scope into a SQL condition on the cases table.
///
/// `Client(None)` (caller's role expects a profile they don't have) becomes
/// a condition that matches no row, so lists are empty and fetches miss.
fn scope_condition(scope: &CaseScope) -> Condition {
    match scope {
        CaseScope::Unrestricted => Condition::all(),
        CaseScope::Client(Some(client_id)) => {
            Condition::all().add(case::Column::ClientId.eq(*client_id))
        }
        // Primary key is never NULL: matches nothing
        CaseScope::Client(None) => Condition::all().add(case::Column::Id.is_null()),
        CaseScope::Employee {
            profile_id,
            user_id,
        } => {
            let mut cond = Condition::any().add(case::Column::CreatedById.eq(*user_id));
            if let Some(profile_id) = profile_id {
                cond = cond.add(case::Column::AssignedToId.eq(*profile_id));
            }
            cond
        }
    }
}

/// Combine scope with the optional list filters.
fn list_condition(scope: &CaseScope, filters: &CaseFilters) -> Condition {
    let mut condition = Condition::all().add(scope_condition(scope));

    if let Some(status) = &filters.status {
        condition = condition.add(case::Column::Status.eq(status.as_str()));
    }
    if let Some(priority) = &filters.priority {
        condition = condition.add(case::Column::Priority.eq(priority.to_string()));
    }
    if let Some(search) = &filters.search {
        let pattern = format!("%{}%", search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(case::Column::Title).ilike(pattern.clone()))
                .add(Expr::col(case::Column::Description).ilike(pattern.clone()))
                .add(Expr::col(case::Column::Location).ilike(pattern)),
        );
    }

    condition
}

fn case_type_summary(model: case_type::Model) -> CaseTypeSummary {
    CaseTypeSummary {
        id: model.id,
        name: model.name,
        description: model.description,
    }
}

fn client_summary(model: client_profile::Model) -> ClientSummary {
    ClientSummary {
        id: model.id,
        company_name: model.company_name,
        contact_person: model.contact_person,
    }
}

fn user_summary(model: user::Model, with_email: bool) -> UserSummary {
    UserSummary {
        id: model.id,
        name: model.name,
        email: with_email.then_some(model.email),
    }
}

/// SeaORM-backed case store
pub struct CaseStore {
    db: DatabaseConnection,
}

impl CaseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve an assigned employee profile together with its user's name
    async fn assignee_summary(
        &self,
        profile: employee_profile::Model,
    ) -> AppResult<AssigneeSummary> {
        let assignee_user = user::Entity::find_by_id(profile.user_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(AssigneeSummary {
            id: profile.id,
            department: profile.department,
            position: profile.position,
            user: assignee_user.map(|u| user_summary(u, false)),
        })
    }
}

#[async_trait]
impl CaseRepository for CaseStore {
    async fn list(&self, scope: &CaseScope, filters: &CaseFilters) -> AppResult<Vec<CaseListItem>> {
        let models = case::Entity::find()
            .filter(list_condition(scope, filters))
            .order_by_desc(case::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        // Batch-load related records, aligned with `models`
        let case_types = models
            .load_one(case_type::Entity, &self.db)
            .await
            .map_err(AppError::from)?;
        let clients = models
            .load_one(client_profile::Entity, &self.db)
            .await
            .map_err(AppError::from)?;
        let creators = models
            .load_one(user::Entity, &self.db)
            .await
            .map_err(AppError::from)?;
        let assignees = models
            .load_one(employee_profile::Entity, &self.db)
            .await
            .map_err(AppError::from)?;

        // One extra query resolves the assignees' display names
        let assignee_user_ids: Vec<Uuid> = assignees
            .iter()
            .flatten()
            .map(|p| p.user_id)
            .collect();
        let assignee_users: HashMap<Uuid, user::Model> = if assignee_user_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(assignee_user_ids))
                .all(&self.db)
                .await
                .map_err(AppError::from)?
                .into_iter()
                .map(|u| (u.id, u))
                .collect()
        };

        let items = models
            .into_iter()
            .zip(case_types)
            .zip(clients)
            .zip(creators)
            .zip(assignees)
            .map(|((((model, case_type), client), creator), assignee)| CaseListItem {
                case: Case::from(model),
                case_type: case_type.map(case_type_summary),
                client: client.map(client_summary),
                created_by: creator.map(|u| user_summary(u, true)),
                assigned_to: assignee.map(|profile| {
                    let assignee_user = assignee_users.get(&profile.user_id).cloned();
                    AssigneeSummary {
                        id: profile.id,
                        department: profile.department,
                        position: profile.position,
                        user: assignee_user.map(|u| user_summary(u, false)),
                    }
                }),
            })
            .collect();

        Ok(items)
    }

    async fn find_in_scope(&self, scope: &CaseScope, id: Uuid) -> AppResult<Option<Case>> {
        let model = case::Entity::find_by_id(id)
            .filter(scope_condition(scope))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(model.map(Case::from))
    }

    async fn find_detail(&self, scope: &CaseScope, id: Uuid) -> AppResult<Option<CaseDetail>> {
        let Some(model) = case::Entity::find_by_id(id)
            .filter(scope_condition(scope))
            .one(&self.db)
            .await
            .map_err(AppError::from)?
        else {
            return Ok(None);
        };

        let case_type = case_type::Entity::find_by_id(model.case_type_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        let client = client_profile::Entity::find_by_id(model.client_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;
        let creator = user::Entity::find_by_id(model.created_by_id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        let assigned_to = match model.assigned_to_id {
            Some(profile_id) => {
                let profile = employee_profile::Entity::find_by_id(profile_id)
                    .one(&self.db)
                    .await
                    .map_err(AppError::from)?;
                match profile {
                    Some(p) => Some(self.assignee_summary(p).await?),
                    None => None,
                }
            }
            None => None,
        };

        let history = case_history::Entity::find()
            .filter(case_history::Column::CaseId.eq(id))
            .order_by_desc(case_history::Column::CreatedAt)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|(entry, actor)| CaseHistoryView {
                entry: entry.into(),
                user: actor.map(|u| user_summary(u, false)),
            })
            .collect();

        let documents = document::Entity::find()
            .filter(document::Column::CaseId.eq(id))
            .order_by_desc(document::Column::UploadedAt)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .map(|(doc, uploader)| DocumentView {
                document: doc.into(),
                uploaded_by: uploader.map(|u| user_summary(u, false)),
            })
            .collect();

        Ok(Some(CaseDetail {
            case: Case::from(model),
            case_type: case_type.map(case_type_summary),
            client: client.map(client_summary),
            created_by: creator.map(|u| user_summary(u, true)),
            assigned_to,
            history,
            documents,
        }))
    }

    async fn find_document(
        &self,
        case_id: Uuid,
        document_id: Uuid,
    ) -> AppResult<Option<DocumentView>> {
        let row = document::Entity::find_by_id(document_id)
            .filter(document::Column::CaseId.eq(case_id))
            .find_also_related(user::Entity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(row.map(|(doc, uploader)| DocumentView {
            document: doc.into(),
            uploaded_by: uploader.map(|u| user_summary(u, false)),
        }))
    }

    async fn list_case_types(&self) -> AppResult<Vec<CaseType>> {
        let models = case_type::Entity::find()
            .filter(case_type::Column::IsActive.eq(true))
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(CaseType::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::sea_query::{PostgresQueryBuilder, QueryStatementBuilder};
    use sea_orm::QueryTrait;

    fn list_sql(scope: &CaseScope, filters: &CaseFilters) -> String {
        case::Entity::find()
            .filter(list_condition(scope, filters))
            .into_query()
            .to_string(PostgresQueryBuilder)
    }

    #[test]
    fn unrestricted_scope_adds_no_conditions() {
        let sql = list_sql(&CaseScope::Unrestricted, &CaseFilters::default());
        assert!(!sql.contains("WHERE"), "{sql}");
    }

    #[test]
    fn search_filter_is_case_insensitive_over_all_text_columns() {
        let filters = CaseFilters {
            search: Some("Bangkok".to_string()),
            ..Default::default()
        };
        let sql = list_sql(&CaseScope::Unrestricted, &filters);

        assert!(sql.contains("ILIKE"), "{sql}");
        assert!(sql.contains("%Bangkok%"), "{sql}");
        for column in ["title", "description", "location"] {
            assert!(sql.contains(column), "{column} missing: {sql}");
        }
    }

    #[test]
    fn client_scope_restricts_to_the_profile() {
        let client_id = Uuid::new_v4();
        let sql = list_sql(&CaseScope::Client(Some(client_id)), &CaseFilters::default());

        assert!(sql.contains("client_id"), "{sql}");
        assert!(sql.contains(&client_id.to_string()), "{sql}");
    }

    #[test]
    fn client_scope_without_profile_matches_no_rows() {
        let sql = list_sql(&CaseScope::Client(None), &CaseFilters::default());
        assert!(sql.contains("IS NULL"), "{sql}");
    }

    #[test]
    fn employee_scope_covers_created_and_assigned_cases() {
        let scope = CaseScope::Employee {
            profile_id: Some(Uuid::new_v4()),
            user_id: Uuid::new_v4(),
        };
        let sql = list_sql(&scope, &CaseFilters::default());

        assert!(sql.contains("created_by_id"), "{sql}");
        assert!(sql.contains("assigned_to_id"), "{sql}");
        assert!(sql.contains(" OR "), "{sql}");
    }

    #[test]
    fn status_and_priority_filters_compose_with_scope() {
        let user_id = Uuid::new_v4();
        let filters = CaseFilters {
            status: Some("OPEN".to_string()),
            priority: Some(crate::domain::CasePriority::Urgent),
            search: None,
        };
        let scope = CaseScope::Employee {
            profile_id: None,
            user_id,
        };
        let sql = list_sql(&scope, &filters);

        assert!(sql.contains("'OPEN'"), "{sql}");
        assert!(sql.contains("'URGENT'"), "{sql}");
        assert!(sql.contains(&user_id.to_string()), "{sql}");
    }
}
