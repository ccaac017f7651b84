//! Case database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::{Case, CasePriority};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cases")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub case_type_id: Uuid,
    pub client_id: Uuid,
    pub created_by_id: Uuid,
    pub assigned_to_id: Option<Uuid>,
    pub location: String,
    pub priority: String,
    pub status: String,
    pub symptoms: String,
    pub required_assistance: String,
    pub medical_history: Option<String>,
    pub current_medications: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::case_type::Entity",
        from = "Column::CaseTypeId",
        to = "super::case_type::Column::Id"
    )]
    CaseType,
    #[sea_orm(
        belongs_to = "super::client_profile::Entity",
        from = "Column::ClientId",
        to = "super::client_profile::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedById",
        to = "super::user::Column::Id"
    )]
    CreatedBy,
    #[sea_orm(
        belongs_to = "super::employee_profile::Entity",
        from = "Column::AssignedToId",
        to = "super::employee_profile::Column::Id"
    )]
    AssignedTo,
    #[sea_orm(has_many = "super::case_history::Entity")]
    History,
    #[sea_orm(has_many = "super::document::Entity")]
    Documents,
}

impl Related<super::case_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CaseType.def()
    }
}

impl Related<super::client_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Client.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreatedBy.def()
    }
}

impl Related<super::employee_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedTo.def()
    }
}

impl Related<super::case_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::History.def()
    }
}

impl Related<super::document::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Case {
    fn from(model: Model) -> Self {
        Case {
            id: model.id,
            title: model.title,
            description: model.description,
            case_type_id: model.case_type_id,
            client_id: model.client_id,
            created_by_id: model.created_by_id,
            assigned_to_id: model.assigned_to_id,
            location: model.location,
            priority: CasePriority::from(model.priority.as_str()),
            status: model.status,
            symptoms: model.symptoms,
            required_assistance: model.required_assistance,
            medical_history: model.medical_history,
            current_medications: model.current_medications,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
