//! Document metadata entity for SeaORM. The blob itself lives in the
//! upload store; only the URL is recorded here.

use sea_orm::entity::prelude::*;

use crate::domain::Document;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub case_id: Uuid,
    pub name: String,
    #[sea_orm(column_name = "type")]
    pub doc_type: String,
    pub description: Option<String>,
    pub url: String,
    pub uploaded_by_id: Uuid,
    pub uploaded_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::case::Entity",
        from = "Column::CaseId",
        to = "super::case::Column::Id"
    )]
    Case,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UploadedById",
        to = "super::user::Column::Id"
    )]
    UploadedBy,
}

impl Related<super::case::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Case.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UploadedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Document {
    fn from(model: Model) -> Self {
        Document {
            id: model.id,
            case_id: model.case_id,
            name: model.name,
            doc_type: model.doc_type,
            description: model.description,
            url: model.url,
            uploaded_by_id: model.uploaded_by_id,
            uploaded_at: model.uploaded_at,
        }
    }
}
