//! Case type reference-data entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::CaseType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "case_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::case::Entity")]
    Cases,
}

impl Related<super::case::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CaseType {
    fn from(model: Model) -> Self {
        CaseType {
            id: model.id,
            name: model.name,
            description: model.description,
            is_active: model.is_active,
        }
    }
}
