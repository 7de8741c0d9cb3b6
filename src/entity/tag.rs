use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::content_tag::Entity")]
    ContentTag,
}

impl Related<super::content_tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ContentTag.def()
    }
}

impl Related<super::content::Entity> for Entity {
    fn to() -> RelationDef {
        super::content_tag::Relation::Content.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::content_tag::Relation::Tag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
