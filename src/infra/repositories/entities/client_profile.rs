//! Client profile database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::ClientProfile;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "client_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    pub company_name: String,
    pub contact_person: String,
    pub phone_number: String,
    pub country: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ClientProfile {
    fn from(model: Model) -> Self {
        ClientProfile {
            id: model.id,
            user_id: model.user_id,
            company_name: model.company_name,
            contact_person: model.contact_person,
            phone_number: model.phone_number,
            country: model.country,
        }
    }
}
